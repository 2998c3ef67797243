use std::ops::{Deref, DerefMut};

use serde::Serialize;

macro_rules! nbt_array {
    ($(#[$meta:meta])* $name:ident, $elem:ty) => {
        $(#[$meta])*
        ///
        /// Elements can be read and written by index through `Deref` to a
        /// slice, but the length is fixed once built. Cloning copies the
        /// backing storage.
        #[derive(Serialize, Debug, Clone, PartialEq, Default)]
        #[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
        #[serde(transparent)]
        pub struct $name {
            data: Vec<$elem>,
        }

        impl $name {
            pub fn new(data: Vec<$elem>) -> Self {
                Self { data }
            }

            /// An array of `len` zeroes.
            pub fn zeroed(len: usize) -> Self {
                Self {
                    data: vec![0; len],
                }
            }

            pub fn into_inner(self) -> Vec<$elem> {
                self.data
            }
        }

        impl Deref for $name {
            type Target = [$elem];

            fn deref(&self) -> &Self::Target {
                &self.data
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.data
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(data: Vec<$elem>) -> Self {
                Self::new(data)
            }
        }

        impl From<&[$elem]> for $name {
            fn from(data: &[$elem]) -> Self {
                Self::new(data.to_vec())
            }
        }
    };
}

nbt_array!(
    /// NBT Byte array, a sequence of i8.
    ByteArray,
    i8
);
nbt_array!(
    /// NBT Short array, a sequence of i16. This is a vendor extension (tag 13).
    ShortArray,
    i16
);
nbt_array!(
    /// NBT Int array, a sequence of i32.
    IntArray,
    i32
);
nbt_array!(
    /// NBT Long array, a sequence of i64.
    LongArray,
    i64
);
