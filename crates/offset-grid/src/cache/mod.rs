//! Cache implementations for repeated offset lookups.

mod cached_sampler;
mod offset_cache;

pub use cached_sampler::CachedSampler;
pub use offset_cache::{OffsetCache, OffsetKey};
