use std::io::{Read, Write};

use futures::io::{AsyncRead, AsyncWrite};
use log::debug;

use crate::codec;
use crate::error::{Error, Result};
use crate::{Compound, ReadOptions};

/// A named root compound: the unit that NBT files hold.
///
/// Reading replaces both the root and its name. If the stream does not
/// start with a Compound tag the tree ends up with no root (see
/// [`ReadOptions::strict_root`] to make that an error). On any decode error
/// the tree is left as it was.
///
/// Cloning, or [`copy`][NbtTree::copy], deep copies the name and every node.
///
/// ```
/// # use nbtree::{NbtTree, TagNode};
/// # fn main() -> nbtree::error::Result<()> {
/// let mut tree = NbtTree::new();
/// tree.set_name("root");
/// if let Some(root) = tree.root_mut() {
///     root.insert("x".to_owned(), TagNode::Int(42));
/// }
///
/// let bytes = tree.to_bytes()?;
/// assert_eq!(NbtTree::from_bytes(&bytes)?, tree);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NbtTree {
    name: String,
    root: Option<Compound>,
}

impl Default for NbtTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NbtTree {
    /// A tree with an empty root compound and an empty name.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            root: Some(Compound::new()),
        }
    }

    pub fn with_root(root: Compound, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: Some(root),
        }
    }

    /// Decode a whole tree from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut tree = Self::empty();
        tree.read_from(bytes)?;
        Ok(tree)
    }

    /// Encode the tree into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    fn empty() -> Self {
        Self {
            name: String::new(),
            root: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn root(&self) -> Option<&Compound> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Compound> {
        self.root.as_mut()
    }

    pub fn set_root(&mut self, root: Compound) {
        self.root = Some(root);
    }

    pub fn take_root(&mut self) -> Option<Compound> {
        self.root.take()
    }

    /// Replace this tree by decoding `reader` with default options.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<()> {
        self.read_from_with(reader, &ReadOptions::default())
    }

    pub fn read_from_with<R: Read>(&mut self, reader: R, opts: &ReadOptions) -> Result<()> {
        let decoded = codec::read_root(reader, opts)?;
        self.replace(decoded);
        Ok(())
    }

    /// Async version of [`read_from`][NbtTree::read_from].
    pub async fn read_from_async<R: AsyncRead + Unpin>(&mut self, reader: R) -> Result<()> {
        self.read_from_async_with(reader, &ReadOptions::default())
            .await
    }

    pub async fn read_from_async_with<R: AsyncRead + Unpin>(
        &mut self,
        reader: R,
        opts: &ReadOptions,
    ) -> Result<()> {
        let decoded = codec::read_root_async(reader, opts).await?;
        self.replace(decoded);
        Ok(())
    }

    /// Write the root as a named Compound tag using this tree's name.
    /// Fails with [`Error::TreeNotInitialized`] if there is no root.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let root = self.root.as_ref().ok_or(Error::TreeNotInitialized)?;
        debug!("writing nbt tree {:?} with {} entries", self.name, root.len());
        codec::write_root(writer, &self.name, root)
    }

    /// Async version of [`write_to`][NbtTree::write_to].
    pub async fn write_to_async<W: AsyncWrite + Unpin>(&self, writer: W) -> Result<()> {
        let root = self.root.as_ref().ok_or(Error::TreeNotInitialized)?;
        debug!("writing nbt tree {:?} with {} entries", self.name, root.len());
        codec::write_root_async(writer, &self.name, root).await
    }

    /// A deep copy of the tree, name included.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // The name is only replaced when a root was found.
    fn replace(&mut self, decoded: Option<(String, Compound)>) {
        match decoded {
            Some((name, root)) => {
                debug!("read nbt tree {:?} with {} entries", name, root.len());
                self.name = name;
                self.root = Some(root);
            }
            None => self.root = None,
        }
    }
}
