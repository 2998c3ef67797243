//! Maps a tag type to an empty node of that type.
//!
//! The decoder asks for an empty node and then fills it from the stream, so
//! the match over every tag type lives here once.

use crate::error::{Error, Result};
use crate::{ByteArray, Compound, IntArray, LongArray, ShortArray, TagList, TagNode, TagType};

/// An empty node of type `tag`: zero for numbers, empty for strings, arrays
/// and compounds. Lists come back typed `End`; the decoder sets the real
/// element type from the stream.
///
/// Fails with [`Error::UnsupportedTagType`] for `End`, which never has a node.
pub fn empty_node(tag: TagType) -> Result<TagNode> {
    Ok(match tag {
        TagType::End => return Err(Error::UnsupportedTagType(tag)),
        TagType::Byte => TagNode::Byte(0),
        TagType::Short => TagNode::Short(0),
        TagType::Int => TagNode::Int(0),
        TagType::Long => TagNode::Long(0),
        TagType::Float => TagNode::Float(0.0),
        TagType::Double => TagNode::Double(0.0),
        TagType::ByteArray => TagNode::ByteArray(ByteArray::default()),
        TagType::String => TagNode::String(String::new()),
        TagType::List => TagNode::List(TagList::default()),
        TagType::Compound => TagNode::Compound(Compound::new()),
        TagType::IntArray => TagNode::IntArray(IntArray::default()),
        TagType::LongArray => TagNode::LongArray(LongArray::default()),
        TagType::ShortArray => TagNode::ShortArray(ShortArray::default()),
    })
}

/// Like [`empty_node`] but starting from a raw tag id, failing with
/// [`Error::InvalidTagType`] for ids outside the known set.
pub fn empty_node_from_id(id: u8) -> Result<TagNode> {
    let tag = crate::codec::u8_to_tag(id)?;
    empty_node(tag)
}
