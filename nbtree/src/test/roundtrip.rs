use std::convert::TryFrom;

use proptest::collection::vec;
use proptest::prelude::*;

use crate::codec;
use crate::{
    ByteArray, Compound, IntArray, LongArray, ReadOptions, ShortArray, TagList, TagNode,
};

fn arb_scalar() -> impl Strategy<Value = TagNode> {
    let numbers = prop_oneof![
        any::<i8>().prop_map(TagNode::Byte),
        any::<i16>().prop_map(TagNode::Short),
        any::<i32>().prop_map(TagNode::Int),
        any::<i64>().prop_map(TagNode::Long),
        (-1e6f32..1e6f32).prop_map(TagNode::Float),
        (-1e12f64..1e12f64).prop_map(TagNode::Double),
    ];
    let sequences = prop_oneof![
        "\\PC{0,12}".prop_map(TagNode::String),
        vec(any::<i8>(), 0..32).prop_map(|v| TagNode::ByteArray(ByteArray::new(v))),
        vec(any::<i16>(), 0..32).prop_map(|v| TagNode::ShortArray(ShortArray::new(v))),
        vec(any::<i32>(), 0..32).prop_map(|v| TagNode::IntArray(IntArray::new(v))),
        vec(any::<i64>(), 0..32).prop_map(|v| TagNode::LongArray(LongArray::new(v))),
    ];
    prop_oneof![numbers, sequences]
}

fn arb_compound(inner: impl Strategy<Value = TagNode>) -> impl Strategy<Value = Compound> {
    vec(("[a-zA-Z0-9_:]{0,8}", inner), 0..8).prop_map(|entries| entries.into_iter().collect())
}

fn arb_node() -> impl Strategy<Value = TagNode> {
    arb_scalar().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            arb_compound(inner.clone()).prop_map(TagNode::Compound),
            // Keep the nodes that share the first node's type.
            vec(inner, 0..8).prop_map(|nodes| {
                let kept: Vec<_> = match nodes.first().map(TagNode::tag_type) {
                    Some(tag) => nodes.into_iter().filter(|n| n.tag_type() == tag).collect(),
                    None => nodes,
                };
                TagNode::List(TagList::try_from(kept).unwrap_or_default())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn decode_after_encode_is_identity(root in arb_compound(arb_node()), name in "\\PC{0,8}") {
        let mut bytes = Vec::new();
        codec::write_root(&mut bytes, &name, &root).unwrap();

        let (decoded_name, decoded) = codec::read_root(bytes.as_slice(), &ReadOptions::default())
            .unwrap()
            .unwrap();
        prop_assert_eq!(&decoded_name, &name);
        prop_assert_eq!(&decoded, &root);

        let mut again = Vec::new();
        codec::write_root(&mut again, &decoded_name, &decoded).unwrap();
        prop_assert_eq!(again, bytes);
    }

    #[test]
    fn decoding_garbage_never_panics(bytes in vec(any::<u8>(), 0..256)) {
        let _ = codec::read_root(bytes.as_slice(), &ReadOptions::default());
    }
}
