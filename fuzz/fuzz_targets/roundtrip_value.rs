#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{Compound, NbtTree, ReadOptions, TagNode};

fuzz_target!(|v: TagNode| {
    let mut root = Compound::new();
    root.insert("".to_string(), v);

    let tree = NbtTree::with_root(root, "");

    // Over-long strings and arrays are allowed to fail to encode.
    if let Ok(bs) = tree.to_bytes() {
        // The value may nest deeper than the default limit allows.
        let opts = ReadOptions::default().max_depth(usize::MAX);
        let mut decoded = NbtTree::new();
        decoded.read_from_with(bs.as_slice(), &opts).unwrap();
        assert_eq!(decoded.to_bytes().unwrap(), bs);
    }
});
