//! Your font library: ids in, loaded fonts out
//!
//! Fonts are found in one of two ways. Registered fonts (from memory or an
//! explicit path) always win. Otherwise the id is looked up as a file name
//! (`<id>.ttf`, `<id>.otf`, `<id>.ttc`, `<id>.otc`) in each search directory,
//! in the order the directories were added. Fonts loaded from disk are kept
//! in a bounded LRU cache so repeated stamps do not re-read the file.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};

use dojang_core::{GlyphSource, Result};

use crate::error::{FontLoadError, LoadResult};
use crate::font::Font;

/// File extensions tried, in order, when searching a directory
pub const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "ttc", "otc"];

/// Cache statistics for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Maximum number of cached fonts.
    pub capacity: usize,
    /// Currently cached fonts.
    pub entries: usize,
}

/// Resolves font ids to loaded fonts
pub struct FontDatabase {
    search_dirs: Vec<PathBuf>,
    registered: RwLock<HashMap<String, Arc<Font>>>,
    cache: Mutex<LruCache<String, Arc<Font>>>,
}

impl FontDatabase {
    pub const DEFAULT_CACHE_SIZE: usize = 16;

    /// An empty library with no search directories
    pub fn new() -> Self {
        Self::with_cache_size(Self::DEFAULT_CACHE_SIZE)
    }

    /// An empty library keeping at most `cache_size` disk fonts (minimum 1)
    pub fn with_cache_size(cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            search_dirs: Vec::new(),
            registered: RwLock::new(HashMap::new()),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Search `dir` for fonts named by id
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.add_search_dir(dir);
        self
    }

    pub fn add_search_dir(&mut self, dir: impl Into<PathBuf>) {
        self.search_dirs.push(dir.into());
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Make in-memory font data available under `id`
    pub fn register_data(&self, id: impl Into<String>, data: Vec<u8>) -> LoadResult<Arc<Font>> {
        let id = id.into();
        let font = Arc::new(Font::from_data(id.clone(), data)?);
        self.registered.write().insert(id, font.clone());
        Ok(font)
    }

    /// Make the font at `path` available under `id`
    pub fn register_file(
        &self,
        id: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> LoadResult<Arc<Font>> {
        let id = id.into();
        let font = Arc::new(Font::from_file(id.clone(), path)?);
        self.registered.write().insert(id, font.clone());
        Ok(font)
    }

    /// The file a search would load for `id`, if any
    pub fn locate(&self, id: &str) -> Option<PathBuf> {
        // Ids are file stems, never paths
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return None;
        }
        self.search_dirs.iter().find_map(|dir| {
            FONT_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{id}.{ext}")))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Load (or fetch from cache) the font for `id`
    pub fn load(&self, id: &str) -> LoadResult<Arc<Font>> {
        if let Some(font) = self.registered.read().get(id) {
            return Ok(font.clone());
        }
        if let Some(font) = self.cache.lock().get(id) {
            log::trace!("Font cache hit for {:?}", id);
            return Ok(font.clone());
        }

        let path = self
            .locate(id)
            .ok_or_else(|| FontLoadError::UnknownFont(id.to_string()))?;
        log::debug!("Loading font {:?} from {}", id, path.display());
        let font = Arc::new(Font::from_file(id, &path)?);

        self.cache.lock().put(id.to_string(), font.clone());
        Ok(font)
    }

    /// Number of fonts registered explicitly
    pub fn registered_count(&self) -> usize {
        self.registered.read().len()
    }

    pub fn cache_stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        CacheStats {
            capacity: cache.cap().get(),
            entries: cache.len(),
        }
    }

    /// Drop every font loaded from the search directories
    ///
    /// Registered fonts stay. Memory is reclaimed once in-flight stamps
    /// release their references.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolution reads and parses font files synchronously inside the future,
/// so `compose_concurrent` over a `FontDatabase` does not overlap any I/O.
/// It still returns the same stamps; register or preload fonts when latency
/// matters.
impl GlyphSource for FontDatabase {
    type Provider = Arc<Font>;

    async fn resolve(&self, font_id: &str) -> Result<Arc<Font>> {
        Ok(self.load(font_id)?)
    }
}
