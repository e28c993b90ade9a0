//! Plain structures made of scalars, and the clear-color union.

use vkwire_cs::{DecodeFault, Decoder, Encoder, WireCodec};

use crate::types::{ComponentSwizzle, ImageAspectFlags};

/// Declare a structure whose fields are all scalars.
///
/// A partial decode skips every field: scalar-only structures carry no input the renderer
/// reads back.
macro_rules! scalar_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( pub $field:ident: $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct $name {
            $( pub $field: $ty, )*
        }

        impl WireCodec for $name {
            fn encode_self(&self, enc: &mut Encoder) {
                $( enc.encode_scalar(self.$field); )*
            }

            fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
                $( self.$field = dec.decode_scalar(); )*
            }

            fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
                $( dec.skip::<$ty>(); )*
            }
        }
    };
}

pub(crate) use scalar_struct;

scalar_struct! {
    pub struct Extent2D {
        pub width: u32,
        pub height: u32,
    }
}

scalar_struct! {
    pub struct Extent3D {
        pub width: u32,
        pub height: u32,
        pub depth: u32,
    }
}

scalar_struct! {
    pub struct Offset2D {
        pub x: i32,
        pub y: i32,
    }
}

scalar_struct! {
    pub struct Offset3D {
        pub x: i32,
        pub y: i32,
        pub z: i32,
    }
}

scalar_struct! {
    pub struct Viewport {
        pub x: f32,
        pub y: f32,
        pub width: f32,
        pub height: f32,
        pub min_depth: f32,
        pub max_depth: f32,
    }
}

scalar_struct! {
    pub struct ComponentMapping {
        pub r: ComponentSwizzle,
        pub g: ComponentSwizzle,
        pub b: ComponentSwizzle,
        pub a: ComponentSwizzle,
    }
}

scalar_struct! {
    pub struct ImageSubresource {
        pub aspect_mask: ImageAspectFlags,
        pub mip_level: u32,
        pub array_layer: u32,
    }
}

scalar_struct! {
    pub struct ImageSubresourceRange {
        pub aspect_mask: ImageAspectFlags,
        pub base_mip_level: u32,
        pub level_count: u32,
        pub base_array_layer: u32,
        pub layer_count: u32,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect2D {
    pub offset: Offset2D,
    pub extent: Extent2D,
}

impl WireCodec for Rect2D {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_struct(&self.offset);
        enc.encode_struct(&self.extent);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.offset = dec.decode_struct_temp();
        self.extent = dec.decode_struct_temp();
    }

    fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
        self.offset = dec.decode_struct_partial();
        self.extent = dec.decode_struct_partial();
    }
}

/// Color used to clear an image, interpreted according to the image format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearColorValue {
    Float32([f32; 4]),
    Int32([i32; 4]),
    Uint32([u32; 4]),
}

impl ClearColorValue {
    const FLOAT32: u32 = 0;
    const INT32: u32 = 1;
    const UINT32: u32 = 2;

    pub fn tag(&self) -> u32 {
        match self {
            ClearColorValue::Float32(_) => Self::FLOAT32,
            ClearColorValue::Int32(_) => Self::INT32,
            ClearColorValue::Uint32(_) => Self::UINT32,
        }
    }
}

impl Default for ClearColorValue {
    fn default() -> Self {
        ClearColorValue::Float32([0.0; 4])
    }
}

impl WireCodec for ClearColorValue {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.tag());
        match self {
            ClearColorValue::Float32(v) => enc.encode_scalar_array_fixed(v),
            ClearColorValue::Int32(v) => enc.encode_scalar_array_fixed(v),
            ClearColorValue::Uint32(v) => enc.encode_scalar_array_fixed(v),
        }
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        let tag: u32 = dec.decode_scalar();
        if dec.is_fatal() {
            return;
        }
        *self = match tag {
            Self::FLOAT32 => ClearColorValue::Float32(dec.decode_scalar_array_fixed()),
            Self::INT32 => ClearColorValue::Int32(dec.decode_scalar_array_fixed()),
            Self::UINT32 => ClearColorValue::Uint32(dec.decode_scalar_array_fixed()),
            found => {
                dec.set_fatal(DecodeFault::UnknownUnionTag {
                    union: "ClearColorValue",
                    found,
                });
                return;
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vkwire_cs::{EmptyObjectTable, TempArena};

    #[test]
    fn union_discriminant_selects_the_member() {
        let mut enc = Encoder::new();
        enc.encode_struct(&ClearColorValue::Int32([-1, 2, -3, 4]));
        let bytes = enc.finish().unwrap();
        assert_eq!(bytes.len(), 4 + 16);
        assert_eq!(&bytes[..4], &1u32.to_le_bytes());

        let mut arena = TempArena::new(64);
        let mut dec = Decoder::new(&bytes, &mut arena, &EmptyObjectTable);
        let value: ClearColorValue = dec.decode_struct_temp();
        assert_eq!(value, ClearColorValue::Int32([-1, 2, -3, 4]));
        assert_eq!(dec.remaining(), 0);
    }

    #[test]
    fn unknown_union_discriminant_is_fatal() {
        let mut bytes = 3u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0; 16]);

        let mut arena = TempArena::new(64);
        let mut dec = Decoder::new(&bytes, &mut arena, &EmptyObjectTable);
        let value: ClearColorValue = dec.decode_struct_temp();
        assert_eq!(value, ClearColorValue::default());
        assert_eq!(
            dec.fault(),
            Some(DecodeFault::UnknownUnionTag {
                union: "ClearColorValue",
                found: 3,
            })
        );
    }

    #[test]
    fn partial_scalar_struct_keeps_defaults() {
        let extent = Extent3D {
            width: 4,
            height: 5,
            depth: 6,
        };
        let mut enc = Encoder::new();
        enc.encode_struct(&extent);
        let bytes = enc.finish().unwrap();

        let mut arena = TempArena::new(64);
        let mut dec = Decoder::new(&bytes, &mut arena, &EmptyObjectTable);
        let partial: Extent3D = dec.decode_struct_partial();
        assert_eq!(partial, Extent3D::default());
        assert_eq!(dec.position(), 12);
    }
}
