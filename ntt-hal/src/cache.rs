use std::sync::Arc;

use utils::Map;

use crate::{api::NttBackend, error::NttError, layouts::Module, params::NttParams};

/// `(q, log_n, w)`: one table configuration.
pub type CacheKey = (u64, usize, u64);

/// Memoises prepared modules per configuration.
///
/// Entries live until [`TwiddleCache::release`] retires them; handed-out
/// `Arc`s stay valid after release.
pub struct TwiddleCache<B: NttBackend> {
    modules: Map<CacheKey, Arc<Module<B>>>,
}

impl<B: NttBackend> Default for TwiddleCache<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: NttBackend> TwiddleCache<B> {
    pub fn new() -> Self {
        Self { modules: Map::new() }
    }

    #[inline]
    pub fn key(params: &NttParams) -> CacheKey {
        (params.q(), params.log_n(), params.w())
    }

    /// Returns the module for `params`, building its tables on first use.
    /// A failed build caches nothing.
    pub fn get_or_try_insert(&mut self, params: &NttParams) -> Result<Arc<Module<B>>, NttError> {
        let key: CacheKey = Self::key(params);
        self.modules
            .get_or_try_insert_with(key, || {
                tracing::debug!(backend = B::NAME, q = key.0, log_n = key.1, "twiddle cache miss");
                Module::<B>::new(*params).map(Arc::new)
            })
            .map(Arc::clone)
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Module<B>>> {
        self.modules.get(key).cloned()
    }

    /// Retires a configuration.
    pub fn release(&mut self, key: &CacheKey) -> Option<Arc<Module<B>>> {
        self.modules.remove(key)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
