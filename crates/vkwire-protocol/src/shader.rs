use vkwire_cs::{impl_extensible, Chain, Decoder, Encoder, NoExtensions, WireCodec};

use crate::types::stype;

/// SPIR-V module source. `code` holds `code_size / 4` words.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderModuleCreateInfo {
    pub next: Chain<NoExtensions>,
    pub flags: u32,
    /// Size of `code` in bytes.
    pub code_size: u64,
    pub code: Option<Vec<u32>>,
}

impl ShaderModuleCreateInfo {
    pub fn from_words(words: Vec<u32>) -> Self {
        Self {
            code_size: words.len() as u64 * 4,
            code: Some(words),
            ..Self::default()
        }
    }
}

impl WireCodec for ShaderModuleCreateInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.flags);
        enc.encode_scalar(self.code_size);
        enc.encode_scalar_array(self.code.as_deref());
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.flags = dec.decode_scalar();
        self.code_size = dec.decode_scalar();
        let max_words = usize::try_from(self.code_size / 4).unwrap_or(usize::MAX);
        self.code = dec.decode_scalar_array(max_words);
    }
}

impl_extensible!(
    ShaderModuleCreateInfo,
    stype::SHADER_MODULE_CREATE_INFO,
    NoExtensions,
    next
);
