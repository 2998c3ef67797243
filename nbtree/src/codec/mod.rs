//! Encoding and decoding of the NBT wire format.
//!
//! Every field is big-endian. A named tag is a `u8` tag id, then (unless the
//! id is End) a name and a payload. Strings carry an `i16` byte length,
//! arrays and lists an `i32` count, and compounds are a run of named tags
//! closed by a single End byte.
//!
//! There is one implementation of the format, written against
//! [`AsyncRead`]/[`AsyncWrite`]. The `_async` functions expose it directly;
//! they only suspend between reads or writes of whole fields, and decode
//! siblings strictly in wire order. The plain functions run the same code
//! over a [`std::io::Read`] or [`std::io::Write`], which never suspends.
//!
//! Nesting is walked with an explicit stack, so deep input does not deepen
//! the call or poll stack. Decoding still stops at
//! [`ReadOptions::max_depth`], as trees that deep are awkward to drop or
//! compare.
//!
//! Every write function flushes the writer before returning.
//!
//! Nothing here can be cancelled part way. To give up on a slow source,
//! close it: the pending read then fails and the error is returned.
//!
//! ```
//! use nbtree::{codec, Compound, ReadOptions, TagNode};
//!
//! # fn main() -> nbtree::error::Result<()> {
//! let mut root = Compound::new();
//! root.insert("x".to_owned(), TagNode::Int(42));
//!
//! let mut buf = Vec::new();
//! codec::write_root(&mut buf, "root", &root)?;
//!
//! let (name, decoded) = codec::read_root(buf.as_slice(), &ReadOptions::default())?
//!     .expect("root compound");
//! assert_eq!(name, "root");
//! assert_eq!(decoded, root);
//! # Ok(())
//! # }
//! ```

mod read;
mod write;

use std::convert::TryFrom;
use std::io::{Read, Write};

use futures::executor::block_on;
use futures::io::{AllowStdIo, AsyncRead, AsyncWrite};

use self::read::NbtReader;
use self::write::NbtWriter;
use crate::error::{Error, Result};
use crate::{Compound, ReadOptions, TagNode, TagType};

/// Largest number of array bytes buffered per read or write.
const CHUNK_BYTES: usize = 64 * 1024;

pub(crate) fn u8_to_tag(tag: u8) -> Result<TagType> {
    TagType::try_from(tag).map_err(|_| Error::InvalidTagType(tag))
}

/// Decode a root compound and its name.
///
/// Returns `Ok(None)` when the first byte is not the Compound tag id (or the
/// reader is empty) unless [`ReadOptions::strict_root`] is set.
pub fn read_root<R: Read>(reader: R, opts: &ReadOptions) -> Result<Option<(String, Compound)>> {
    block_on(read_root_async(AllowStdIo::new(reader), opts))
}

/// Async version of [`read_root`].
pub async fn read_root_async<R: AsyncRead + Unpin>(
    reader: R,
    opts: &ReadOptions,
) -> Result<Option<(String, Compound)>> {
    NbtReader::new(reader, opts)
        .read_root(opts.is_strict_root())
        .await
}

/// Decode one named tag. `None` means the tag was End.
pub fn read_named<R: Read>(reader: R) -> Result<Option<(String, TagNode)>> {
    block_on(read_named_async(AllowStdIo::new(reader)))
}

/// Async version of [`read_named`].
pub async fn read_named_async<R: AsyncRead + Unpin>(
    reader: R,
) -> Result<Option<(String, TagNode)>> {
    NbtReader::new(reader, &ReadOptions::default())
        .read_named()
        .await
}

/// Decode a bare payload of type `tag`, with no tag id or name in front.
pub fn read_payload<R: Read>(reader: R, tag: TagType) -> Result<TagNode> {
    block_on(read_payload_async(AllowStdIo::new(reader), tag))
}

/// Async version of [`read_payload`].
pub async fn read_payload_async<R: AsyncRead + Unpin>(reader: R, tag: TagType) -> Result<TagNode> {
    NbtReader::new(reader, &ReadOptions::default())
        .read_payload(tag)
        .await
}

/// Encode `root` as a named Compound tag, the layout of a whole file.
pub fn write_root<W: Write>(writer: W, name: &str, root: &Compound) -> Result<()> {
    block_on(write_root_async(AllowStdIo::new(writer), name, root))
}

/// Async version of [`write_root`]. Flushes the writer when done.
pub async fn write_root_async<W: AsyncWrite + Unpin>(
    writer: W,
    name: &str,
    root: &Compound,
) -> Result<()> {
    let mut writer = NbtWriter::new(writer);
    writer.write_root(name, root).await?;
    writer.flush().await
}

/// Encode a node as a named tag.
pub fn write_named<W: Write>(writer: W, name: &str, node: &TagNode) -> Result<()> {
    block_on(write_named_async(AllowStdIo::new(writer), name, node))
}

/// Async version of [`write_named`]. Flushes the writer when done.
pub async fn write_named_async<W: AsyncWrite + Unpin>(
    writer: W,
    name: &str,
    node: &TagNode,
) -> Result<()> {
    let mut writer = NbtWriter::new(writer);
    writer.write_named(name, node).await?;
    writer.flush().await
}

/// Encode the bare payload of a node, with no tag id or name in front.
pub fn write_payload<W: Write>(writer: W, node: &TagNode) -> Result<()> {
    block_on(write_payload_async(AllowStdIo::new(writer), node))
}

/// Async version of [`write_payload`]. Flushes the writer when done.
pub async fn write_payload_async<W: AsyncWrite + Unpin>(writer: W, node: &TagNode) -> Result<()> {
    let mut writer = NbtWriter::new(writer);
    writer.write_payload(node).await?;
    writer.flush().await
}
