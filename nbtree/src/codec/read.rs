use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder};
use futures::io::{AsyncRead, AsyncReadExt};
use log::debug;

use super::{u8_to_tag, CHUNK_BYTES};
use crate::error::{Error, Result};
use crate::factory;
use crate::{
    ByteArray, Compound, IntArray, LongArray, ReadOptions, ShortArray, TagList, TagNode, TagType,
};

/// Decodes NBT from any `AsyncRead`. Every read is a `read_exact`, so short
/// reads from the source are retried until the field is complete, and a
/// source that runs dry part way through is [`Error::UnexpectedEndOfStream`].
pub(crate) struct NbtReader<R> {
    reader: R,
    depth: usize,
    max_depth: usize,
}

impl<R: AsyncRead + Unpin> NbtReader<R> {
    pub(crate) fn new(reader: R, opts: &ReadOptions) -> Self {
        Self {
            reader,
            depth: 0,
            max_depth: opts.depth_limit(),
        }
    }

    /// Read the root of a tree: a Compound tag, its name and its payload.
    ///
    /// Returns `None` if the stream does not start with a Compound tag, or is
    /// empty, unless `strict` is set.
    pub(crate) async fn read_root(&mut self, strict: bool) -> Result<Option<(String, Compound)>> {
        let id = match self.read_u8().await {
            Ok(id) => id,
            Err(Error::UnexpectedEndOfStream) if !strict => {
                debug!("empty nbt stream, no root");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if id != u8::from(TagType::Compound) {
            if strict {
                return Err(Error::InvalidTagType(id));
            }
            debug!("nbt stream starts with tag {}, not a compound: no root", id);
            return Ok(None);
        }

        let name = self.read_string().await?;
        match self.read_payload(TagType::Compound).await? {
            TagNode::Compound(root) => Ok(Some((name, root))),
            other => Err(Error::invalid_cast(other.tag_type(), TagType::Compound)),
        }
    }

    /// Read a named tag. `None` means the End tag was found.
    pub(crate) async fn read_named(&mut self) -> Result<Option<(String, TagNode)>> {
        let tag = self.read_tag().await?;
        if tag == TagType::End {
            return Ok(None);
        }

        let name = self.read_string().await?;
        let node = self.read_payload(tag).await?;
        Ok(Some((name, node)))
    }

    /// Read an unnamed payload of type `tag`.
    ///
    /// Open compounds and lists are kept on an explicit stack of frames
    /// rather than in nested futures, so the poll depth stays flat however
    /// deep the input nests. Only `max_depth` bounds the nesting.
    pub(crate) async fn read_payload(&mut self, tag: TagType) -> Result<TagNode> {
        let mut top = match self.begin(tag).await? {
            Begun::Value(node) => return Ok(node),
            Begun::Frame(frame) => frame,
        };
        let mut parents: Vec<Frame> = Vec::new();

        loop {
            match self.next_child(&mut top).await? {
                Some(tag) => match self.begin(tag).await? {
                    Begun::Value(node) => top.push(node)?,
                    Begun::Frame(frame) => parents.push(std::mem::replace(&mut top, frame)),
                },
                None => {
                    self.leave();
                    match parents.pop() {
                        Some(parent) => {
                            let done = std::mem::replace(&mut top, parent);
                            top.push(done.into_node())?;
                        }
                        None => return Ok(top.into_node()),
                    }
                }
            }
        }
    }

    /// Start a value of type `tag`. Scalars, strings and arrays are read in
    /// full. Compounds and lists only have their header read and come back as
    /// an open frame.
    async fn begin(&mut self, tag: TagType) -> Result<Begun> {
        match factory::empty_node(tag)? {
            TagNode::Compound(entries) => {
                self.enter()?;
                Ok(Begun::Frame(Frame::Compound {
                    entries,
                    key: String::new(),
                }))
            }
            TagNode::List(_) => {
                let value_type = self.read_tag().await?;
                let remaining = self.read_len().await?;
                self.enter()?;
                Ok(Begun::Frame(Frame::List {
                    list: TagList::new(value_type),
                    remaining,
                }))
            }
            mut node => {
                self.read_into(&mut node).await?;
                Ok(Begun::Value(node))
            }
        }
    }

    /// Type of the next child of an open frame, or `None` once it is done.
    /// For compounds this consumes the child's tag id and name.
    async fn next_child(&mut self, frame: &mut Frame) -> Result<Option<TagType>> {
        match frame {
            Frame::Compound { key, .. } => {
                let tag = self.read_tag().await?;
                if tag == TagType::End {
                    return Ok(None);
                }
                *key = self.read_string().await?;
                Ok(Some(tag))
            }
            Frame::List { list, remaining } => {
                if *remaining == 0 {
                    return Ok(None);
                }
                *remaining -= 1;
                Ok(Some(list.value_type()))
            }
        }
    }

    async fn read_into(&mut self, node: &mut TagNode) -> Result<()> {
        match node {
            TagNode::Byte(v) => *v = self.read_i8().await?,
            TagNode::Short(v) => *v = self.read_i16().await?,
            TagNode::Int(v) => *v = self.read_i32().await?,
            TagNode::Long(v) => *v = self.read_i64().await?,
            TagNode::Float(v) => *v = self.read_f32().await?,
            TagNode::Double(v) => *v = self.read_f64().await?,
            TagNode::String(v) => *v = self.read_string().await?,
            TagNode::ByteArray(v) => {
                *v = ByteArray::new(self.read_array(1, decode_i8).await?);
            }
            TagNode::ShortArray(v) => {
                *v = ShortArray::new(self.read_array(2, BigEndian::read_i16_into).await?);
            }
            TagNode::IntArray(v) => {
                *v = IntArray::new(self.read_array(4, BigEndian::read_i32_into).await?);
            }
            TagNode::LongArray(v) => {
                *v = LongArray::new(self.read_array(8, BigEndian::read_i64_into).await?);
            }
            // opened as frames by `begin`
            TagNode::List(_) | TagNode::Compound(_) => {}
        }
        Ok(())
    }

    /// Read `count` elements of `width` bytes each, a bounded chunk at a
    /// time. Memory grows with the data actually received rather than the
    /// count the stream claims.
    async fn read_array<T: Copy + Default>(
        &mut self,
        width: usize,
        decode: fn(&[u8], &mut [T]),
    ) -> Result<Vec<T>> {
        let count = self.read_len().await?;
        let per_chunk = CHUNK_BYTES / width;

        let mut out = Vec::with_capacity(count.min(per_chunk));
        let mut buf = vec![0u8; count.min(per_chunk) * width];
        let mut remaining = count;

        while remaining > 0 {
            let n = remaining.min(per_chunk);
            let bytes = &mut buf[..n * width];
            self.read_exact(bytes).await?;

            let start = out.len();
            out.resize(start + n, T::default());
            decode(bytes, &mut out[start..]);
            remaining -= n;
        }

        Ok(out)
    }

    async fn read_string(&mut self) -> Result<String> {
        let len = self.read_i16().await?;
        let len = usize::try_from(len).map_err(|_| Error::NegativeLength(len.into()))?;

        let mut buf = vec![0; len];
        self.read_exact(&mut buf).await?;

        String::from_utf8(buf).map_err(|e| Error::Nonunicode(e.into_bytes()))
    }

    /// An i32 length or count prefix.
    async fn read_len(&mut self) -> Result<usize> {
        let len = self.read_i32().await?;
        usize::try_from(len).map_err(|_| Error::NegativeLength(len.into()))
    }

    async fn read_tag(&mut self) -> Result<TagType> {
        let id = self.read_u8().await?;
        u8_to_tag(id)
    }

    async fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf).await?;
        Ok(buf[0])
    }

    async fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8().await? as i8)
    }

    async fn read_i16(&mut self) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf).await?;
        Ok(BigEndian::read_i16(&buf))
    }

    async fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf).await?;
        Ok(BigEndian::read_i32(&buf))
    }

    async fn read_i64(&mut self) -> Result<i64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf).await?;
        Ok(BigEndian::read_i64(&buf))
    }

    async fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf).await?;
        Ok(BigEndian::read_f32(&buf))
    }

    async fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf).await?;
        Ok(BigEndian::read_f64(&buf))
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_exact(buf).await?;
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthLimit(self.max_depth));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

enum Begun {
    Value(TagNode),
    Frame(Frame),
}

/// A compound or list still being filled.
enum Frame {
    /// `key` is the name of the child currently being read.
    Compound { entries: Compound, key: String },
    List { list: TagList, remaining: usize },
}

impl Frame {
    fn push(&mut self, node: TagNode) -> Result<()> {
        match self {
            Frame::Compound { entries, key } => {
                entries.insert(std::mem::take(key), node);
                Ok(())
            }
            Frame::List { list, .. } => list.push(node),
        }
    }

    fn into_node(self) -> TagNode {
        match self {
            Frame::Compound { entries, .. } => TagNode::Compound(entries),
            Frame::List { list, .. } => TagNode::List(list),
        }
    }
}

fn decode_i8(src: &[u8], dst: &mut [i8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = *s as i8;
    }
}
