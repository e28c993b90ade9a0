//! Query results the renderer fills in and sends back.

use vkwire_cs::{Decoder, Encoder, WireCodec};

use crate::basic::Extent3D;
use crate::types::{
    ImageAspectFlags, SparseImageFormatFlags, MAX_DESCRIPTION_SIZE, MAX_EXTENSION_NAME_SIZE,
};

fn fixed_name<const N: usize>(name: &str) -> [u8; N] {
    let mut out = [0u8; N];
    // Keep the terminating NUL.
    let len = name.len().min(N - 1);
    out[..len].copy_from_slice(&name.as_bytes()[..len]);
    out
}

fn name_str(bytes: &[u8]) -> Option<&str> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionProperties {
    pub extension_name: [u8; MAX_EXTENSION_NAME_SIZE],
    pub spec_version: u32,
}

impl ExtensionProperties {
    pub fn new(name: &str, spec_version: u32) -> Self {
        Self {
            extension_name: fixed_name(name),
            spec_version,
        }
    }

    /// The name up to its terminating NUL, if it is valid UTF-8.
    pub fn name(&self) -> Option<&str> {
        name_str(&self.extension_name)
    }
}

impl Default for ExtensionProperties {
    fn default() -> Self {
        Self {
            extension_name: [0; MAX_EXTENSION_NAME_SIZE],
            spec_version: 0,
        }
    }
}

impl WireCodec for ExtensionProperties {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar_array_fixed(&self.extension_name);
        enc.encode_scalar(self.spec_version);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.extension_name = dec.decode_scalar_array_fixed();
        self.spec_version = dec.decode_scalar();
    }

    fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
        dec.skip_bytes(MAX_EXTENSION_NAME_SIZE);
        dec.skip::<u32>();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerProperties {
    pub layer_name: [u8; MAX_EXTENSION_NAME_SIZE],
    pub spec_version: u32,
    pub implementation_version: u32,
    pub description: [u8; MAX_DESCRIPTION_SIZE],
}

impl LayerProperties {
    pub fn new(name: &str, spec_version: u32, implementation_version: u32, description: &str) -> Self {
        Self {
            layer_name: fixed_name(name),
            spec_version,
            implementation_version,
            description: fixed_name(description),
        }
    }

    pub fn name(&self) -> Option<&str> {
        name_str(&self.layer_name)
    }

    pub fn description(&self) -> Option<&str> {
        name_str(&self.description)
    }
}

impl Default for LayerProperties {
    fn default() -> Self {
        Self {
            layer_name: [0; MAX_EXTENSION_NAME_SIZE],
            spec_version: 0,
            implementation_version: 0,
            description: [0; MAX_DESCRIPTION_SIZE],
        }
    }
}

impl WireCodec for LayerProperties {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar_array_fixed(&self.layer_name);
        enc.encode_scalar(self.spec_version);
        enc.encode_scalar(self.implementation_version);
        enc.encode_scalar_array_fixed(&self.description);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.layer_name = dec.decode_scalar_array_fixed();
        self.spec_version = dec.decode_scalar();
        self.implementation_version = dec.decode_scalar();
        self.description = dec.decode_scalar_array_fixed();
    }

    fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
        dec.skip_bytes(MAX_EXTENSION_NAME_SIZE);
        dec.skip::<u32>();
        dec.skip::<u32>();
        dec.skip_bytes(MAX_DESCRIPTION_SIZE);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SparseImageFormatProperties {
    pub aspect_mask: ImageAspectFlags,
    pub image_granularity: Extent3D,
    pub flags: SparseImageFormatFlags,
}

impl WireCodec for SparseImageFormatProperties {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.aspect_mask);
        enc.encode_struct(&self.image_granularity);
        enc.encode_scalar(self.flags);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.aspect_mask = dec.decode_scalar();
        self.image_granularity = dec.decode_struct_temp();
        self.flags = dec.decode_scalar();
    }

    fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
        dec.skip::<ImageAspectFlags>();
        self.image_granularity = dec.decode_struct_partial();
        dec.skip::<SparseImageFormatFlags>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_nul_terminated() {
        let props = ExtensionProperties::new("VK_KHR_swapchain", 70);
        assert_eq!(props.name(), Some("VK_KHR_swapchain"));
        assert_eq!(props.extension_name[16], 0);

        let long = "x".repeat(400);
        let layer = LayerProperties::new(&long, 1, 2, "validation");
        assert_eq!(layer.name().map(str::len), Some(MAX_EXTENSION_NAME_SIZE - 1));
        assert_eq!(layer.description(), Some("validation"));
    }
}
