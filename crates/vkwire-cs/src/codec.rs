//! Traits implemented by every schema structure.

use crate::chain::{Chain, Extension};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::handle::Replacer;
use crate::wire::StructureType;

/// Per-structure codec: the structure's own fields in declaration order.
///
/// For extensible structures the structure-type tag and the extension chain are handled by
/// [`Encoder::encode_extensible`] and [`Decoder::decode_extensible_temp`]; `*_self` only covers
/// the fields in between.
pub trait WireCodec: Default {
    fn encode_self(&self, enc: &mut Encoder);

    /// Decode every field, resolving handles and materializing arrays into scratch storage.
    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>);

    /// Decode an output structure: fields the renderer will overwrite are read and discarded.
    ///
    /// Structures without such fields keep this default.
    fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
        self.decode_self_temp(dec);
    }

    /// Resolve handles left in wire form by a deferred decode.
    fn replace_self(&mut self, _replacer: &mut Replacer<'_>) {}
}

/// A structure that carries a structure-type tag and an extension chain.
pub trait Extensible: WireCodec {
    const STRUCTURE_TYPE: StructureType;
    const NAME: &'static str;

    /// The closed set of records this structure's chain accepts.
    type Ext: Extension;

    fn chain(&self) -> &Chain<Self::Ext>;
    fn chain_mut(&mut self) -> &mut Chain<Self::Ext>;
}

/// Implement [`Extensible`] for a structure whose chain lives in a named field.
#[macro_export]
macro_rules! impl_extensible {
    ($ty:ty, $stype:expr, $ext:ty, $field:ident) => {
        impl $crate::Extensible for $ty {
            const STRUCTURE_TYPE: $crate::StructureType = $stype;
            const NAME: &'static str = stringify!($ty);
            type Ext = $ext;

            fn chain(&self) -> &$crate::Chain<$ext> {
                &self.$field
            }

            fn chain_mut(&mut self) -> &mut $crate::Chain<$ext> {
                &mut self.$field
            }
        }
    };
}
