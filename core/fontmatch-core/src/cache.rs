//! Cached catalog snapshots (made by FontLab https://www.fontlab.com/)

use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use crate::catalog::FontBackend;
use crate::error::Result;
use crate::font::{FontDescriptor, FontId};

/// Shared, immutable view of an enumerated catalog.
pub type Snapshot = Arc<[FontDescriptor]>;

/// Owns a backend and the last catalog it produced.
///
/// Readers get a cheap `Arc` clone of the snapshot; [`CatalogCache::refresh`]
/// swaps in a new one without disturbing snapshots already handed out.
#[derive(Debug)]
pub struct CatalogCache<B> {
    backend: B,
    snapshot: RwLock<Option<Snapshot>>,
}

impl<B: FontBackend> CatalogCache<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            snapshot: RwLock::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current snapshot, enumerating the backend on first use.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let cached = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match cached {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh(),
        }
    }

    /// Re-enumerate and replace the snapshot.
    ///
    /// On failure the previous snapshot is kept and the error returned.
    pub fn refresh(&self) -> Result<Snapshot> {
        let fonts: Snapshot = self.backend.enumerate()?.into();
        info!("catalog snapshot holds {} faces", fonts.len());
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&fonts));
        Ok(fonts)
    }

    /// Drop the snapshot so the next read re-enumerates.
    pub fn invalidate(&self) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_valid(&self) -> bool {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn load(&self, id: &FontId) -> Result<Vec<u8>> {
        self.backend.load(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBackend {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl FontBackend for CountingBackend {
        fn enumerate(&self) -> Result<Vec<FontDescriptor>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::system("catalog went away"));
            }
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok((0..n)
                .map(|i| FontDescriptor {
                    id: FontId::new("/fonts/F.ttc", i as u32),
                    family: "F".to_string(),
                    ..FontDescriptor::default()
                })
                .collect())
        }

        fn load(&self, _id: &FontId) -> Result<Vec<u8>> {
            Ok(vec![0])
        }
    }

    #[test]
    fn enumerates_once_until_refreshed() {
        let cache = CatalogCache::new(CountingBackend::default());
        assert!(!cache.is_valid());

        assert_eq!(cache.snapshot().expect("first").len(), 1);
        assert_eq!(cache.snapshot().expect("cached").len(), 1);
        assert_eq!(cache.backend().calls.load(Ordering::SeqCst), 1);

        assert_eq!(cache.refresh().expect("refresh").len(), 2);
        assert_eq!(cache.snapshot().expect("after refresh").len(), 2);
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let cache = CatalogCache::new(CountingBackend::default());
        let before = cache.snapshot().expect("snapshot");

        cache.backend().fail.store(true, Ordering::SeqCst);
        let err = cache.refresh().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SystemError);

        let after = cache.snapshot().expect("still cached");
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn invalidate_forces_re_enumeration() {
        let cache = CatalogCache::new(CountingBackend::default());
        cache.snapshot().expect("snapshot");
        cache.invalidate();
        assert!(!cache.is_valid());
        assert_eq!(cache.snapshot().expect("re-enumerated").len(), 2);
    }

    #[test]
    fn handed_out_snapshots_survive_refresh() {
        let cache = CatalogCache::new(CountingBackend::default());
        let old = cache.snapshot().expect("snapshot");
        cache.refresh().expect("refresh");
        assert_eq!(old.len(), 1);
    }
}
