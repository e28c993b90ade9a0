//! Little-endian scalar primitives shared by [`crate::Encoder`] and [`crate::Decoder`].
//!
//! Every value on the wire is written verbatim in little-endian byte order with no padding.
//! Booleans and presence markers travel as `u32` and are validated by the decoder rather than
//! through this trait.

use std::fmt;

/// Presence marker value for an absent pointer or array.
pub const MARKER_ABSENT: u32 = 0;
/// Presence marker value for a present pointer or array.
pub const MARKER_PRESENT: u32 = 1;

/// Size in bytes of a presence marker.
pub const MARKER_SIZE: usize = 4;
/// Size in bytes of the element count following a present array marker.
pub const ARRAY_COUNT_SIZE: usize = 8;

/// A fixed-width value that is copied verbatim to and from the wire.
pub trait WireScalar: Copy + Default {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Write `self` into `out`, which is exactly [`Self::SIZE`] bytes long.
    fn write_le(self, out: &mut [u8]);

    /// Read a value from `bytes`, which is exactly [`Self::SIZE`] bytes long.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_wire_scalar_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireScalar for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();

                fn write_le(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                fn read_le(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; core::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_wire_scalar_le!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

/// Tag identifying the concrete type of an extensible structure.
///
/// The numeric values are owned by the schema; this crate only moves them around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureType(pub u32);

impl WireScalar for StructureType {
    const SIZE: usize = 4;

    fn write_le(self, out: &mut [u8]) {
        self.0.write_le(out);
    }

    fn read_le(bytes: &[u8]) -> Self {
        Self(u32::read_le(bytes))
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sType {}", self.0)
    }
}

/// Declare a `u32`/`i32` newtype enumeration with named constants that travels as a scalar.
///
/// Unknown values are preserved as-is; [`name`](#method.name) returns `None` for them.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($repr:ty) {
            $(
                $(#[$cmeta:meta])*
                $cname:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name(pub $repr);

        impl $name {
            $(
                $(#[$cmeta])*
                pub const $cname: $name = $name($value);
            )*

            pub fn name(self) -> Option<&'static str> {
                #[allow(unreachable_patterns)]
                match self {
                    $( $name::$cname => Some(stringify!($cname)), )*
                    _ => None,
                }
            }
        }

        impl $crate::WireScalar for $name {
            const SIZE: usize = <$repr as $crate::WireScalar>::SIZE;

            fn write_le(self, out: &mut [u8]) {
                $crate::WireScalar::write_le(self.0, out);
            }

            fn read_le(bytes: &[u8]) -> Self {
                $name(<$repr as $crate::WireScalar>::read_le(bytes))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self.name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "{}({})", stringify!($name), self.0),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_bytes<T: WireScalar>(v: T) -> Vec<u8> {
        let mut out = vec![0u8; T::SIZE];
        v.write_le(&mut out);
        out
    }

    #[test]
    fn integers_are_little_endian() {
        assert_eq!(to_bytes(0x1234_5678u32), [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(to_bytes(-2i32), [0xfe, 0xff, 0xff, 0xff]);
        assert_eq!(
            to_bytes(0x0102_0304_0506_0708u64),
            [8, 7, 6, 5, 4, 3, 2, 1]
        );
        assert_eq!(u16::read_le(&[0x34, 0x12]), 0x1234);
    }

    #[test]
    fn floats_keep_their_bit_pattern() {
        let bytes = to_bytes(1.5f32);
        assert_eq!(bytes, 1.5f32.to_bits().to_le_bytes());
        assert_eq!(f32::read_le(&bytes), 1.5);
        assert!(f64::read_le(&to_bytes(f64::NAN)).is_nan());
    }

    wire_enum! {
        struct Fruit(u32) {
            APPLE = 1,
            PEAR = 2,
        }
    }

    #[test]
    fn wire_enum_names_known_values_only() {
        assert_eq!(Fruit::PEAR.name(), Some("PEAR"));
        assert_eq!(Fruit(9).name(), None);
        assert_eq!(Fruit::APPLE.to_string(), "APPLE");
        assert_eq!(Fruit(9).to_string(), "Fruit(9)");
        assert_eq!(Fruit::read_le(&to_bytes(Fruit::PEAR)), Fruit::PEAR);
    }
}
