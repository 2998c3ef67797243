use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder};
use futures::io::{AsyncWrite, AsyncWriteExt};

use super::CHUNK_BYTES;
use crate::error::{Error, Result};
use crate::{Compound, TagNode, TagType};

/// Encodes NBT to any `AsyncWrite`. The mirror image of `NbtReader`.
pub(crate) struct NbtWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> NbtWriter<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a root compound as a named tag.
    pub(crate) async fn write_root(&mut self, name: &str, root: &Compound) -> Result<()> {
        self.write_tag(TagType::Compound).await?;
        self.write_size_prefixed_str(name).await?;
        self.write_open(Open::Compound(root.iter())).await
    }

    pub(crate) async fn write_named(&mut self, name: &str, node: &TagNode) -> Result<()> {
        self.write_tag(node.tag_type()).await?;
        self.write_size_prefixed_str(name).await?;
        self.write_payload(node).await
    }

    /// Write the bare payload of a node: no tag id and no name.
    pub(crate) async fn write_payload(&mut self, node: &TagNode) -> Result<()> {
        match self.begin(node).await? {
            Some(open) => self.write_open(open).await,
            None => Ok(()),
        }
    }

    /// Write out the children of `first` and everything nested below them.
    /// Containers still being written wait on an explicit stack, the way the
    /// decoder keeps its frames.
    async fn write_open<'a>(&mut self, first: Open<'a>) -> Result<()> {
        let mut stack = vec![first];

        loop {
            let next = match stack.last_mut() {
                None => return Ok(()),
                Some(Open::Compound(entries)) => entries.next().map(|(k, v)| (Some(k), v)),
                Some(Open::List(items)) => items.next().map(|v| (None, v)),
            };

            match next {
                Some((name, node)) => {
                    if let Some(name) = name {
                        self.write_tag(node.tag_type()).await?;
                        self.write_size_prefixed_str(name).await?;
                    }
                    if let Some(open) = self.begin(node).await? {
                        stack.push(open);
                    }
                }
                None => {
                    if let Some(Open::Compound(_)) = stack.pop() {
                        self.write_tag(TagType::End).await?;
                    }
                }
            }
        }
    }

    /// Write a leaf payload in full, or the header of a container and hand
    /// back its children.
    async fn begin<'a>(&mut self, node: &'a TagNode) -> Result<Option<Open<'a>>> {
        match node {
            TagNode::Byte(v) => self.write_all(&[*v as u8]).await?,
            TagNode::Short(v) => {
                let mut buf = [0u8; 2];
                BigEndian::write_i16(&mut buf, *v);
                self.write_all(&buf).await?;
            }
            TagNode::Int(v) => {
                let mut buf = [0u8; 4];
                BigEndian::write_i32(&mut buf, *v);
                self.write_all(&buf).await?;
            }
            TagNode::Long(v) => {
                let mut buf = [0u8; 8];
                BigEndian::write_i64(&mut buf, *v);
                self.write_all(&buf).await?;
            }
            TagNode::Float(v) => {
                let mut buf = [0u8; 4];
                BigEndian::write_f32(&mut buf, *v);
                self.write_all(&buf).await?;
            }
            TagNode::Double(v) => {
                let mut buf = [0u8; 8];
                BigEndian::write_f64(&mut buf, *v);
                self.write_all(&buf).await?;
            }
            TagNode::String(v) => self.write_size_prefixed_str(v).await?,
            TagNode::ByteArray(v) => self.write_array(&v[..], 1, encode_i8).await?,
            TagNode::ShortArray(v) => self.write_array(&v[..], 2, BigEndian::write_i16_into).await?,
            TagNode::IntArray(v) => self.write_array(&v[..], 4, BigEndian::write_i32_into).await?,
            TagNode::LongArray(v) => self.write_array(&v[..], 8, BigEndian::write_i64_into).await?,
            TagNode::List(list) => {
                self.write_tag(list.value_type()).await?;
                self.write_len(list.len()).await?;
                return Ok(Some(Open::List(list.iter())));
            }
            TagNode::Compound(entries) => return Ok(Some(Open::Compound(entries.iter()))),
        }
        Ok(None)
    }

    async fn write_array<T: Copy>(
        &mut self,
        data: &[T],
        width: usize,
        encode: fn(&[T], &mut [u8]),
    ) -> Result<()> {
        self.write_len(data.len()).await?;

        let per_chunk = CHUNK_BYTES / width;
        let mut buf = vec![0u8; data.len().min(per_chunk) * width];
        for chunk in data.chunks(per_chunk) {
            let bytes = &mut buf[..chunk.len() * width];
            encode(chunk, bytes);
            self.write_all(bytes).await?;
        }
        Ok(())
    }

    async fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        let len = i16::try_from(s.len()).map_err(|_| Error::LengthTooLarge(s.len()))?;
        let mut buf = [0u8; 2];
        BigEndian::write_i16(&mut buf, len);
        self.write_all(&buf).await?;
        self.write_all(s.as_bytes()).await
    }

    async fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| Error::LengthTooLarge(len))?;
        let mut buf = [0u8; 4];
        BigEndian::write_i32(&mut buf, len);
        self.write_all(&buf).await
    }

    async fn write_tag(&mut self, tag: TagType) -> Result<()> {
        self.write_all(&[u8::from(tag)]).await
    }

    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.writer.write_all(buf).await?;
        Ok(())
    }

    pub(crate) async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// A container whose children are still being written.
enum Open<'a> {
    Compound(indexmap::map::Iter<'a, String, TagNode>),
    List(std::slice::Iter<'a, TagNode>),
}

fn encode_i8(src: &[i8], dst: &mut [u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = *s as u8;
    }
}
