//! Extension chains.
//!
//! A chain is a flat, ordered list of records hanging off an extensible structure. On the wire
//! each link is a present marker, the record's structure-type tag and the record's own fields;
//! an absent marker ends the chain:
//!
//! ```text
//! ( u32 1 | u32 sType | fields )*  u32 0
//! ```
//!
//! Each base structure accepts a closed set of record types, modeled as an enum generated by
//! [`extension_chain!`](crate::extension_chain). Locally built chains may also carry
//! [`Link::Foreign`] entries for records this side does not understand; encoding stops at the
//! first one.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::handle::Replacer;
use crate::wire::StructureType;

/// A closed set of records accepted in one base structure's chain.
pub trait Extension: Sized {
    /// Name of the base structure, used in fault reports.
    const BASE: &'static str;

    /// Whether `stype` names a member of this set.
    fn recognizes(stype: StructureType) -> bool;

    fn structure_type(&self) -> StructureType;

    /// Encode the record's own fields (not its tag).
    fn encode_record(&self, enc: &mut Encoder);

    /// Decode the record identified by `stype`. Returns `None` when `stype` is not recognized.
    fn decode_record_temp(stype: StructureType, dec: &mut Decoder<'_>) -> Option<Self>;

    fn decode_record_partial(stype: StructureType, dec: &mut Decoder<'_>) -> Option<Self>;

    fn replace_record(&mut self, replacer: &mut Replacer<'_>);
}

/// Extension set of a structure whose chain accepts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoExtensions {}

impl Extension for NoExtensions {
    const BASE: &'static str = "structure without extensions";

    fn recognizes(_stype: StructureType) -> bool {
        false
    }

    fn structure_type(&self) -> StructureType {
        match *self {}
    }

    fn encode_record(&self, _enc: &mut Encoder) {
        match *self {}
    }

    fn decode_record_temp(_stype: StructureType, _dec: &mut Decoder<'_>) -> Option<Self> {
        None
    }

    fn decode_record_partial(_stype: StructureType, _dec: &mut Decoder<'_>) -> Option<Self> {
        None
    }

    fn replace_record(&mut self, _replacer: &mut Replacer<'_>) {
        match *self {}
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Link<E> {
    Known(E),
    /// A record of a type this side cannot encode.
    Foreign(StructureType),
}

impl<E: Extension> Link<E> {
    pub fn structure_type(&self) -> StructureType {
        match self {
            Link::Known(record) => record.structure_type(),
            Link::Foreign(stype) => *stype,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chain<E> {
    links: Vec<Link<E>>,
}

impl<E> Default for Chain<E> {
    fn default() -> Self {
        Self { links: Vec::new() }
    }
}

impl<E> Chain<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn push(&mut self, record: impl Into<E>) {
        self.links.push(Link::Known(record.into()));
    }

    pub fn push_foreign(&mut self, stype: StructureType) {
        self.links.push(Link::Foreign(stype));
    }

    pub fn links(&self) -> &[Link<E>] {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut [Link<E>] {
        &mut self.links
    }

    /// Recognized records in chain order.
    pub fn records(&self) -> impl Iterator<Item = &E> {
        self.links.iter().filter_map(|link| match link {
            Link::Known(record) => Some(record),
            Link::Foreign(_) => None,
        })
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.links.iter_mut().filter_map(|link| match link {
            Link::Known(record) => Some(record),
            Link::Foreign(_) => None,
        })
    }
}

impl<E> FromIterator<E> for Chain<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().map(Link::Known).collect(),
        }
    }
}

/// Declare the extension set of a base structure.
///
/// Every member type must implement [`Extensible`](crate::Extensible); only its own fields are
/// coded inside the chain.
///
/// ```ignore
/// extension_chain! {
///     pub enum ImageViewCreateInfoExt for "ImageViewCreateInfo" {
///         YcbcrConversion(SamplerYcbcrConversionInfo),
///         Usage(ImageViewUsageCreateInfo),
///     }
/// }
/// ```
#[macro_export]
macro_rules! extension_chain {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $base:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl $crate::Extension for $name {
            const BASE: &'static str = $base;

            fn recognizes(stype: $crate::StructureType) -> bool {
                $( stype == <$ty as $crate::Extensible>::STRUCTURE_TYPE )||+
            }

            fn structure_type(&self) -> $crate::StructureType {
                match self {
                    $( $name::$variant(_) => <$ty as $crate::Extensible>::STRUCTURE_TYPE, )+
                }
            }

            fn encode_record(&self, enc: &mut $crate::Encoder) {
                match self {
                    $( $name::$variant(record) => $crate::WireCodec::encode_self(record, enc), )+
                }
            }

            fn decode_record_temp(
                stype: $crate::StructureType,
                dec: &mut $crate::Decoder<'_>,
            ) -> Option<Self> {
                $(
                    if stype == <$ty as $crate::Extensible>::STRUCTURE_TYPE {
                        let mut record = <$ty as ::core::default::Default>::default();
                        $crate::WireCodec::decode_self_temp(&mut record, dec);
                        return Some($name::$variant(record));
                    }
                )+
                None
            }

            fn decode_record_partial(
                stype: $crate::StructureType,
                dec: &mut $crate::Decoder<'_>,
            ) -> Option<Self> {
                $(
                    if stype == <$ty as $crate::Extensible>::STRUCTURE_TYPE {
                        let mut record = <$ty as ::core::default::Default>::default();
                        $crate::WireCodec::decode_self_partial(&mut record, dec);
                        return Some($name::$variant(record));
                    }
                )+
                None
            }

            fn replace_record(&mut self, replacer: &mut $crate::Replacer<'_>) {
                match self {
                    $( $name::$variant(record) => $crate::WireCodec::replace_self(record, replacer), )+
                }
            }
        }

        $(
            impl ::core::convert::From<$ty> for $name {
                fn from(record: $ty) -> Self {
                    $name::$variant(record)
                }
            }
        )+
    };
}
