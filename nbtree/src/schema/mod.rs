//! Declarative descriptions of what a compound should contain.
//!
//! NBT files written by different game versions disagree about which fields
//! exist and how big arrays are. A schema describes the expected shape
//! independently of any one version; [`verify`] checks a loaded compound
//! against it and [`repair`] fills in what is missing.
//!
//! ```
//! use nbtree::schema::{self, SchemaNode, SchemaOptions};
//! use nbtree::{Compound, TagNode};
//!
//! let level = SchemaNode::compound(
//!     "",
//!     vec![
//!         SchemaNode::int("DataVersion"),
//!         SchemaNode::long_array("Heightmap", 37)
//!             .with_options(SchemaOptions::OPTIONAL | SchemaOptions::CREATE_ON_MISSING),
//!     ],
//! );
//!
//! let mut root = Compound::new();
//! root.insert("DataVersion".to_owned(), TagNode::Int(2586));
//!
//! assert!(schema::verify(&level, &root).is_valid());
//!
//! let report = schema::repair(&level, &mut root);
//! assert!(report.is_valid());
//! assert_eq!(root["Heightmap"].as_long_array().map(|a| a.len()), Some(37));
//! ```

mod verify;

use std::ops::BitOr;

use crate::factory;
use crate::{
    ByteArray, Compound, IntArray, LongArray, ShortArray, TagList, TagNode, TagType,
};

pub use self::verify::{repair, verify, Issue, IssueKind, Report};

/// Flags changing how a schema node is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchemaOptions(u8);

impl SchemaOptions {
    pub const NONE: SchemaOptions = SchemaOptions(0);
    /// The node may be missing without failing validation.
    pub const OPTIONAL: SchemaOptions = SchemaOptions(0x1);
    /// Repair inserts a default tree when the node is missing.
    pub const CREATE_ON_MISSING: SchemaOptions = SchemaOptions(0x2);

    pub fn contains(self, other: SchemaOptions) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for SchemaOptions {
    type Output = SchemaOptions;

    fn bitor(self, rhs: SchemaOptions) -> SchemaOptions {
        SchemaOptions(self.0 | rhs.0)
    }
}

/// The type-specific half of a schema node. There is one variant per tag
/// type. A `length` or `max_length` of zero means unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String {
        /// The exact value the string must have, if any.
        value: Option<String>,
        /// Longest allowed string in bytes.
        max_length: usize,
    },
    ByteArray {
        length: usize,
    },
    ShortArray {
        length: usize,
    },
    IntArray {
        length: usize,
    },
    LongArray {
        length: usize,
    },
    List {
        length: usize,
        element: ListElement,
    },
    Compound {
        children: Vec<SchemaNode>,
    },
}

impl SchemaKind {
    pub fn tag_type(&self) -> TagType {
        match self {
            SchemaKind::Byte => TagType::Byte,
            SchemaKind::Short => TagType::Short,
            SchemaKind::Int => TagType::Int,
            SchemaKind::Long => TagType::Long,
            SchemaKind::Float => TagType::Float,
            SchemaKind::Double => TagType::Double,
            SchemaKind::String { .. } => TagType::String,
            SchemaKind::ByteArray { .. } => TagType::ByteArray,
            SchemaKind::ShortArray { .. } => TagType::ShortArray,
            SchemaKind::IntArray { .. } => TagType::IntArray,
            SchemaKind::LongArray { .. } => TagType::LongArray,
            SchemaKind::List { .. } => TagType::List,
            SchemaKind::Compound { .. } => TagType::Compound,
        }
    }

    /// A default tree satisfying this schema: zeroes, the expected string,
    /// zero-filled arrays of the expected length, lists of `length` default
    /// elements, and compounds holding every child that must exist.
    pub fn build_default_tree(&self) -> TagNode {
        match self {
            SchemaKind::Byte => TagNode::Byte(0),
            SchemaKind::Short => TagNode::Short(0),
            SchemaKind::Int => TagNode::Int(0),
            SchemaKind::Long => TagNode::Long(0),
            SchemaKind::Float => TagNode::Float(0.0),
            SchemaKind::Double => TagNode::Double(0.0),
            SchemaKind::String { value, .. } => TagNode::String(value.clone().unwrap_or_default()),
            SchemaKind::ByteArray { length } => TagNode::ByteArray(ByteArray::zeroed(*length)),
            SchemaKind::ShortArray { length } => TagNode::ShortArray(ShortArray::zeroed(*length)),
            SchemaKind::IntArray { length } => TagNode::IntArray(IntArray::zeroed(*length)),
            SchemaKind::LongArray { length } => TagNode::LongArray(LongArray::zeroed(*length)),
            SchemaKind::List { length, element } => {
                let mut list = TagList::new(element.tag_type());
                for _ in 0..*length {
                    let node = match element {
                        ListElement::Shape(kind) => kind.build_default_tree(),
                        // End has no payload, so an End list stays empty
                        ListElement::Type(value_type) => match factory::empty_node(*value_type) {
                            Ok(node) => node,
                            Err(_) => break,
                        },
                    };
                    if list.push(node).is_err() {
                        break;
                    }
                }
                TagNode::List(list)
            }
            SchemaKind::Compound { children } => {
                let compound: Compound = children
                    .iter()
                    .filter(|child| child.is_required() || child.creates_on_missing())
                    .map(|child| (child.name.clone(), child.build_default_tree()))
                    .collect();
                TagNode::Compound(compound)
            }
        }
    }
}

/// What the elements of a list schema look like. The list's element type is
/// always the one given here, so it cannot disagree with the element shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ListElement {
    /// Any elements of this type.
    Type(TagType),
    /// Every element must match this shape.
    Shape(Box<SchemaKind>),
}

impl ListElement {
    pub fn tag_type(&self) -> TagType {
        match self {
            ListElement::Type(value_type) => *value_type,
            ListElement::Shape(kind) => kind.tag_type(),
        }
    }
}

/// Describes one expected child of a compound: its name, options and shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    name: String,
    options: SchemaOptions,
    kind: SchemaKind,
}

impl SchemaNode {
    pub fn new(name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            name: name.into(),
            options: SchemaOptions::NONE,
            kind,
        }
    }

    pub fn byte(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Byte)
    }

    pub fn short(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Short)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Int)
    }

    pub fn long(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Long)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Float)
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Double)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(
            name,
            SchemaKind::String {
                value: None,
                max_length: 0,
            },
        )
    }

    /// A string that must equal `value`. The default tree holds `value`.
    pub fn string_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            name,
            SchemaKind::String {
                value: Some(value.into()),
                max_length: 0,
            },
        )
    }

    pub fn byte_array(name: impl Into<String>, length: usize) -> Self {
        Self::new(name, SchemaKind::ByteArray { length })
    }

    pub fn short_array(name: impl Into<String>, length: usize) -> Self {
        Self::new(name, SchemaKind::ShortArray { length })
    }

    pub fn int_array(name: impl Into<String>, length: usize) -> Self {
        Self::new(name, SchemaKind::IntArray { length })
    }

    pub fn long_array(name: impl Into<String>, length: usize) -> Self {
        Self::new(name, SchemaKind::LongArray { length })
    }

    /// A list of `value_type` with any length and unconstrained elements.
    pub fn list(name: impl Into<String>, value_type: TagType) -> Self {
        Self::new(
            name,
            SchemaKind::List {
                length: 0,
                element: ListElement::Type(value_type),
            },
        )
    }

    /// A list whose elements must each match `element`. A `length` of zero
    /// allows any number of elements.
    pub fn list_of(name: impl Into<String>, element: SchemaKind, length: usize) -> Self {
        Self::new(
            name,
            SchemaKind::List {
                length,
                element: ListElement::Shape(Box::new(element)),
            },
        )
    }

    pub fn compound(name: impl Into<String>, children: Vec<SchemaNode>) -> Self {
        Self::new(name, SchemaKind::Compound { children })
    }

    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Shorthand for adding [`SchemaOptions::OPTIONAL`].
    pub fn optional(mut self) -> Self {
        self.options = self.options | SchemaOptions::OPTIONAL;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> SchemaOptions {
        self.options
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    pub fn tag_type(&self) -> TagType {
        self.kind.tag_type()
    }

    pub fn is_required(&self) -> bool {
        !self.options.contains(SchemaOptions::OPTIONAL)
    }

    pub fn creates_on_missing(&self) -> bool {
        self.options.contains(SchemaOptions::CREATE_ON_MISSING)
    }

    /// See [`SchemaKind::build_default_tree`].
    pub fn build_default_tree(&self) -> TagNode {
        self.kind.build_default_tree()
    }
}
