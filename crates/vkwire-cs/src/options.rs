use crate::arena::{TempArena, DEFAULT_TEMP_ARENA_CAPACITY};

/// Default ceiling on the bytes of replies produced by one [`crate::Encoder`].
pub const DEFAULT_REPLY_CAPACITY: usize = 1024 * 1024;

/// Default limit on links in one extension chain.
pub const DEFAULT_MAX_CHAIN_LINKS: usize = 64;

/// Resource limits applied while decoding and replying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsOptions {
    /// Scratch budget per command scope.
    pub temp_arena_capacity: usize,
    pub reply_capacity: usize,
    pub max_chain_links: usize,
}

impl Default for CsOptions {
    fn default() -> Self {
        Self {
            temp_arena_capacity: DEFAULT_TEMP_ARENA_CAPACITY,
            reply_capacity: DEFAULT_REPLY_CAPACITY,
            max_chain_links: DEFAULT_MAX_CHAIN_LINKS,
        }
    }
}

impl CsOptions {
    pub fn temp_arena(&self) -> TempArena {
        TempArena::new(self.temp_arena_capacity)
    }
}
