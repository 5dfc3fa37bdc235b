//! The public font library surface (made by FontLab https://www.fontlab.com/)

use log::debug;

use crate::cache::{CatalogCache, Snapshot};
use crate::catalog::{CatalogOptions, DirectoryBackend, FontBackend};
use crate::error::Result;
use crate::font::{FontId, FontMatch};
use crate::matcher::{match_font, requested_family};
use crate::query::FontQuery;

/// List, match and load fonts through one backend.
#[derive(Debug)]
pub struct FontLibrary<B> {
    cache: CatalogCache<B>,
}

impl FontLibrary<DirectoryBackend> {
    /// Library over the platform font directories.
    pub fn system(opts: CatalogOptions) -> Result<Self> {
        Ok(Self::new(DirectoryBackend::system(opts)?))
    }
}

impl<B: FontBackend> FontLibrary<B> {
    pub fn new(backend: B) -> Self {
        Self {
            cache: CatalogCache::new(backend),
        }
    }

    pub fn cache(&self) -> &CatalogCache<B> {
        &self.cache
    }

    /// Every installed face, from the cached snapshot.
    pub fn list_fonts(&self) -> Result<Snapshot> {
        self.cache.snapshot()
    }

    /// Re-enumerate the backend.
    pub fn refresh_fonts(&self) -> Result<()> {
        self.cache.refresh().map(drop)
    }

    /// Closest installed face for `query`.
    ///
    /// The query is validated before the catalog is touched.
    pub fn match_fonts(&self, query: &FontQuery) -> Result<FontMatch> {
        requested_family(query)?;
        let snapshot = self.cache.snapshot()?;
        let found = match_font(&snapshot, query)?;
        debug!("matched {:?} to {}", query.family, found.font.id);
        Ok(found)
    }

    pub fn load_font_data(&self, id: &FontId) -> Result<Vec<u8>> {
        self.cache.load(id)
    }
}
