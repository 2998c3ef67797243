#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{NbtTree, ReadOptions};

fuzz_target!(|data: &[u8]| {
    let mut tree = NbtTree::new();
    let opts = ReadOptions::default().max_depth(64);
    if tree.read_from_with(data, &opts).is_ok() && tree.root().is_some() {
        let _bs = tree.to_bytes().unwrap();
    }
});
