/// Settings for decoding a tree.
///
/// ```
/// # use nbtree::ReadOptions;
/// let opts = ReadOptions::default().strict_root(true).max_depth(64);
/// assert!(opts.is_strict_root());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    strict_root: bool,
    max_depth: usize,
}

/// Default nesting limit, the same one serde_json uses. Real world files
/// stay well under it. Decoding itself copes with any depth, but a decoded
/// tree is still dropped, cloned and compared recursively.
pub const DEFAULT_MAX_DEPTH: usize = 128;

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            strict_root: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReadOptions {
    /// When set, a stream that does not start with a Compound tag is an
    /// error instead of a tree with no root.
    pub fn strict_root(mut self, strict: bool) -> Self {
        self.strict_root = strict;
        self
    }

    /// Maximum nesting of compounds and lists before decoding fails with
    /// [`Error::DepthLimit`][crate::error::Error::DepthLimit].
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn is_strict_root(&self) -> bool {
        self.strict_root
    }

    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }
}
