//! nbtree reads and writes NBT (named binary tag) trees, the recursive
//! big-endian format *Minecraft* uses to store world data, level files and
//! player inventories.
//!
//! * For the in-memory node model see [`TagNode`], [`TagList`] and the array
//!   types [`ByteArray`], [`ShortArray`], [`IntArray`] and [`LongArray`].
//! * For a named root compound with load/store entry points see [`NbtTree`].
//! * For the raw encode/decode functions, sync and async, see [`codec`].
//! * For declarative validation and repair of loaded trees see [`schema`].
//!
//! This crate does not decompress anything. Most NBT files on disk are GZip
//! or zlib compressed; decompress first and hand the decoder the raw bytes.
//!
//! # Quick example
//!
//! ```no_run
//! use flate2::read::GzDecoder;
//! use nbtree::{NbtTree, TagNode};
//!
//! # fn main() -> nbtree::error::Result<()> {
//! let file = std::fs::File::open("level.dat")?;
//! let mut tree = NbtTree::new();
//! tree.read_from(GzDecoder::new(file))?;
//!
//! if let Some(root) = tree.root() {
//!     if let Some(TagNode::Compound(data)) = root.get("Data") {
//!         println!("{:?}", data.get("LevelName"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Absent roots
//!
//! A stream whose first byte is not the Compound tag decodes to a tree with
//! no root rather than an error. This matches what older tools expect from
//! empty or legacy files, but it can also hide truncated input. Use
//! [`ReadOptions::strict_root`] to turn it into an error.
//!
//! # Short arrays
//!
//! Tag id 13 ([`TagType::ShortArray`]) is a vendor extension. Standard NBT
//! readers only know ids 0 through 12 and will reject trees containing it.

use serde::Serialize;

pub mod codec;
pub mod error;
pub mod factory;
pub mod schema;

mod arrays;
mod options;
mod tree;
mod value;

pub use arrays::*;
pub use options::{ReadOptions, DEFAULT_MAX_DEPTH};
pub use tree::NbtTree;
pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag type. This does not carry the value or the name of the data.
#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum TagType {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same type.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
    /// Represents as array of Short (i16). Not part of standard NBT.
    ShortArray = 13,
}

impl TryFrom<u8> for TagType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use TagType::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13 => ShortArray,
            14..=u8::MAX => return Err(()),
        })
    }
}

impl From<TagType> for u8 {
    fn from(tag: TagType) -> Self {
        tag as u8
    }
}
