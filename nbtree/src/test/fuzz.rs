use crate::error::Error;
use crate::test::builder::Builder;
use crate::{NbtTree, ReadOptions, TagType, DEFAULT_MAX_DEPTH};

/// Bugs found via cargo-fuzz.

#[test]
fn partial_input_causes_error_if_in_string() {
    let input = Builder::new().start_compound("some long name").build();
    let v = NbtTree::from_bytes(&input[0..3]);
    assert!(matches!(v, Err(Error::UnexpectedEndOfStream)));
}

#[test]
fn list_of_end() {
    let input = Builder::new()
        .start_compound("")
        .start_list("", TagType::End, 1)
        .tag(TagType::End)
        .end_compound()
        .build();

    let v = NbtTree::from_bytes(&input);
    assert!(matches!(v, Err(Error::UnsupportedTagType(TagType::End))));
}

#[test]
fn huge_claimed_array_with_no_data() {
    let input = Builder::new()
        .start_compound("")
        .tag(TagType::LongArray)
        .name("a")
        .int_payload(i32::MAX)
        .long_payload(1)
        .build();

    let v = NbtTree::from_bytes(&input);
    assert!(matches!(v, Err(Error::UnexpectedEndOfStream)));
}

#[test]
fn huge_claimed_list_with_no_data() {
    let input = Builder::new()
        .start_compound("")
        .start_list("l", TagType::Compound, i32::MAX)
        .end_anon_compound()
        .build();

    let v = NbtTree::from_bytes(&input);
    assert!(matches!(v, Err(Error::UnexpectedEndOfStream)));
}

#[test]
fn deeply_nested_lists_hit_depth_limit() {
    let mut builder = Builder::new().start_compound("").start_list("l", TagType::List, 1);
    for _ in 0..10_000 {
        builder = builder.start_anon_list(TagType::List, 1);
    }
    let input = builder.build();

    let v = NbtTree::from_bytes(&input);
    assert!(matches!(v, Err(Error::DepthLimit(DEFAULT_MAX_DEPTH))));
}

/// A root compound with `depth - 1` compounds nested inside it.
fn nested_compounds(depth: usize) -> Vec<u8> {
    let mut builder = Builder::new().start_compound("");
    for _ in 1..depth {
        builder = builder.start_compound("c");
    }
    builder = builder.int("x", 1);
    for _ in 0..depth {
        builder = builder.end_compound();
    }
    builder.build()
}

#[test]
fn nesting_up_to_default_limit_roundtrips() {
    let input = nested_compounds(DEFAULT_MAX_DEPTH);

    let tree = NbtTree::from_bytes(&input).unwrap();
    assert_eq!(tree.to_bytes().unwrap(), input);

    let v = NbtTree::from_bytes(&nested_compounds(DEFAULT_MAX_DEPTH + 1));
    assert!(matches!(v, Err(Error::DepthLimit(DEFAULT_MAX_DEPTH))));
}

#[test]
fn raised_limit_decodes_deep_input_without_recursing() {
    // each level is a list holding one compound, 1001 levels in all
    let mut builder = Builder::new().start_compound("");
    for _ in 0..500 {
        builder = builder.start_list("l", TagType::Compound, 1);
    }
    for _ in 0..=500 {
        builder = builder.end_anon_compound();
    }
    let input = builder.build();

    assert!(matches!(
        NbtTree::from_bytes(&input),
        Err(Error::DepthLimit(DEFAULT_MAX_DEPTH))
    ));

    let mut tree = NbtTree::new();
    tree.read_from_with(input.as_slice(), &ReadOptions::default().max_depth(1001))
        .unwrap();
    assert_eq!(tree.to_bytes().unwrap(), input);
}
