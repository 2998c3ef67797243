mod list;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::{ByteArray, IntArray, LongArray, ShortArray, TagType};

pub use self::list::{ElementMut, TagList};

/// The payload of a Compound: named children in insertion order. Order is
/// kept so that decoding then encoding a file reproduces it byte for byte.
pub type Compound = IndexMap<String, TagNode>;

/// TagNode is a complete NBT value. It owns its data; Compounds and Lists own
/// their children, and cloning a node is always a deep copy.
///
/// ```
/// # use nbtree::{Compound, TagNode, TagType};
/// let mut pos = Compound::new();
/// pos.insert("x".to_owned(), TagNode::Int(42));
///
/// let node = TagNode::Compound(pos);
/// assert_eq!(node.tag_type(), TagType::Compound);
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum TagNode {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(ByteArray),
    String(String),
    List(TagList),
    Compound(Compound),
    IntArray(IntArray),
    LongArray(LongArray),
    ShortArray(ShortArray),
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for TagNode {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        use TagNode::*;

        Ok(match u.arbitrary::<TagType>()? {
            TagType::End => return Err(arbitrary::Error::IncorrectFormat),
            TagType::Byte => Byte(u.arbitrary()?),
            TagType::Short => Short(u.arbitrary()?),
            TagType::Int => Int(u.arbitrary()?),
            TagType::Long => Long(u.arbitrary()?),
            TagType::Float => Float(u.arbitrary()?),
            TagType::Double => Double(u.arbitrary()?),
            TagType::ByteArray => ByteArray(u.arbitrary()?),
            TagType::String => String(u.arbitrary()?),
            TagType::Compound => Compound(
                u.arbitrary_iter::<(std::string::String, TagNode)>()?
                    .collect::<arbitrary::Result<_>>()?,
            ),
            TagType::IntArray => IntArray(u.arbitrary()?),
            TagType::LongArray => LongArray(u.arbitrary()?),
            TagType::ShortArray => ShortArray(u.arbitrary()?),

            // Lists need to all be the same type, so build one from a
            // template element.
            TagType::List => {
                let template: TagNode = u.arbitrary()?;
                let mut list = TagList::new(template.tag_type());
                for node in u.arbitrary_iter::<TagNode>()? {
                    let node = node?;
                    if node.tag_type() == list.value_type() {
                        list.push(node)
                            .map_err(|_| arbitrary::Error::IncorrectFormat)?;
                    }
                }
                List(list)
            }
        })
    }
}

impl TagNode {
    /// The wire type of this node.
    pub fn tag_type(&self) -> TagType {
        match self {
            TagNode::Byte(_) => TagType::Byte,
            TagNode::Short(_) => TagType::Short,
            TagNode::Int(_) => TagType::Int,
            TagNode::Long(_) => TagType::Long,
            TagNode::Float(_) => TagType::Float,
            TagNode::Double(_) => TagType::Double,
            TagNode::ByteArray(_) => TagType::ByteArray,
            TagNode::String(_) => TagType::String,
            TagNode::List(_) => TagType::List,
            TagNode::Compound(_) => TagType::Compound,
            TagNode::IntArray(_) => TagType::IntArray,
            TagNode::LongArray(_) => TagType::LongArray,
            TagNode::ShortArray(_) => TagType::ShortArray,
        }
    }

    /// Whether [`to_tag`][TagNode::to_tag] would succeed for `target`.
    ///
    /// Only lossless widenings are allowed: Byte to Short, Int or Long; Short
    /// to Int, Long, Float or Double; Int to Long; Float to Double. Every type
    /// is castable to itself.
    pub fn is_castable_to(&self, target: TagType) -> bool {
        use TagType::*;
        match (self.tag_type(), target) {
            (from, to) if from == to => true,
            (Byte, Short | Int | Long) => true,
            (Short, Int | Long | Float | Double) => true,
            (Int, Long) => true,
            (Float, Double) => true,
            _ => false,
        }
    }

    pub fn to_tag_byte(&self) -> Result<i8> {
        match *self {
            TagNode::Byte(v) => Ok(v),
            _ => Err(self.cast_error(TagType::Byte)),
        }
    }

    pub fn to_tag_short(&self) -> Result<i16> {
        match *self {
            TagNode::Byte(v) => Ok(v.into()),
            TagNode::Short(v) => Ok(v),
            _ => Err(self.cast_error(TagType::Short)),
        }
    }

    pub fn to_tag_int(&self) -> Result<i32> {
        match *self {
            TagNode::Byte(v) => Ok(v.into()),
            TagNode::Short(v) => Ok(v.into()),
            TagNode::Int(v) => Ok(v),
            _ => Err(self.cast_error(TagType::Int)),
        }
    }

    pub fn to_tag_long(&self) -> Result<i64> {
        match *self {
            TagNode::Byte(v) => Ok(v.into()),
            TagNode::Short(v) => Ok(v.into()),
            TagNode::Int(v) => Ok(v.into()),
            TagNode::Long(v) => Ok(v),
            _ => Err(self.cast_error(TagType::Long)),
        }
    }

    pub fn to_tag_float(&self) -> Result<f32> {
        match *self {
            TagNode::Short(v) => Ok(v.into()),
            TagNode::Float(v) => Ok(v),
            _ => Err(self.cast_error(TagType::Float)),
        }
    }

    pub fn to_tag_double(&self) -> Result<f64> {
        match *self {
            TagNode::Short(v) => Ok(v.into()),
            TagNode::Float(v) => Ok(v.into()),
            TagNode::Double(v) => Ok(v),
            _ => Err(self.cast_error(TagType::Double)),
        }
    }

    /// Convert to a new node of type `target`. Fails with
    /// [`Error::InvalidCast`] unless [`is_castable_to`][TagNode::is_castable_to]
    /// holds. Non-numeric nodes only convert to themselves, which is a deep copy.
    pub fn to_tag(&self, target: TagType) -> Result<TagNode> {
        Ok(match target {
            TagType::Byte => TagNode::Byte(self.to_tag_byte()?),
            TagType::Short => TagNode::Short(self.to_tag_short()?),
            TagType::Int => TagNode::Int(self.to_tag_int()?),
            TagType::Long => TagNode::Long(self.to_tag_long()?),
            TagType::Float => TagNode::Float(self.to_tag_float()?),
            TagType::Double => TagNode::Double(self.to_tag_double()?),
            _ if self.tag_type() == target => self.clone(),
            _ => return Err(self.cast_error(target)),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagNode::String(v) => Some(v),
            _ => None,
        }
    }

    fn cast_error(&self, to: TagType) -> Error {
        Error::invalid_cast(self.tag_type(), to)
    }
}

// Borrowing accessors. None of these can change which variant a node is, so
// they are also what list elements expose for mutation.
macro_rules! accessors {
    ($($variant:ident: $ty:ty => $as_ref:ident, $as_mut:ident;)*) => {
        impl TagNode {
            $(
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        TagNode::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        TagNode::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            )*
        }

        impl<'a> ElementMut<'a> {
            $(
                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    self.node.$as_mut()
                }
            )*
        }
    };
}

accessors! {
    Byte: i8 => as_byte, as_byte_mut;
    Short: i16 => as_short, as_short_mut;
    Int: i32 => as_int, as_int_mut;
    Long: i64 => as_long, as_long_mut;
    Float: f32 => as_float, as_float_mut;
    Double: f64 => as_double, as_double_mut;
    ByteArray: ByteArray => as_byte_array, as_byte_array_mut;
    String: String => as_string, as_string_mut;
    List: TagList => as_list, as_list_mut;
    Compound: Compound => as_compound, as_compound_mut;
    IntArray: IntArray => as_int_array, as_int_array_mut;
    LongArray: LongArray => as_long_array, as_long_array_mut;
    ShortArray: ShortArray => as_short_array, as_short_array_mut;
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for TagNode {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(ByteArray, ByteArray);
from!(ShortArray, ShortArray);
from!(IntArray, IntArray);
from!(LongArray, LongArray);
from!(TagList, List);
from!(Compound, Compound);

impl From<bool> for TagNode {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}
