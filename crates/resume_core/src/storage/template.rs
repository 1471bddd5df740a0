//! Shared CRUD orchestration for locate-based backends.
//!
//! # Responsibility
//! - Apply the existence policy (`AlreadyExists` / `NotFound`) once for
//!   every backend that can express "locate a document".
//! - Sort snapshots generically so all backends share one ordering.
//!
//! # Invariants
//! - Backend mutators are only called after `locate` has confirmed the
//!   precondition under the same write lock.
//! - Backends never sort; `get_all_sorted` always uses
//!   `compare_by_name_then_uuid`.

use super::{compare_by_name_then_uuid, log_outcome, Storage, StorageError, StorageResult};
use crate::model::resume::Resume;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Backend-specific primitives plugged into [`TemplateStorage`].
pub trait StorageBackend: Send + Sync {
    /// Where a located document lives (index, map key, file path).
    type SearchKey;

    /// Short backend name used in log lines.
    fn name(&self) -> &'static str;

    /// Finds the stored document for `uuid`, if any.
    fn locate(&self, uuid: &str) -> StorageResult<Option<Self::SearchKey>>;
    /// Stores a document whose uuid is known to be absent.
    fn insert(&mut self, resume: &Resume) -> StorageResult<()>;
    fn replace(&mut self, key: Self::SearchKey, resume: &Resume) -> StorageResult<()>;
    fn remove(&mut self, key: Self::SearchKey) -> StorageResult<()>;
    fn fetch(&self, key: &Self::SearchKey) -> StorageResult<Resume>;
    /// Copies of every stored document, in any order.
    fn snapshot(&self) -> StorageResult<Vec<Resume>>;
    fn count(&self) -> StorageResult<usize>;
    fn remove_all(&mut self) -> StorageResult<()>;
}

/// [`Storage`] implementation driving a [`StorageBackend`] behind a coarse lock.
pub struct TemplateStorage<B: StorageBackend> {
    backend: RwLock<B>,
}

impl<B: StorageBackend> TemplateStorage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: RwLock::new(backend),
        }
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, B>> {
        self.backend.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, B>> {
        self.backend.write().map_err(|_| StorageError::LockPoisoned)
    }

    fn backend_name(&self) -> &'static str {
        self.backend
            .read()
            .map(|backend| backend.name())
            .unwrap_or("poisoned")
    }

    fn save_inner(&self, resume: &Resume) -> StorageResult<()> {
        resume.validate()?;
        let mut backend = self.write()?;
        if backend.locate(resume.uuid())?.is_some() {
            return Err(StorageError::AlreadyExists(resume.uuid().to_string()));
        }
        backend.insert(resume)
    }

    fn update_inner(&self, resume: &Resume) -> StorageResult<()> {
        resume.validate()?;
        let mut backend = self.write()?;
        let key = existing_key(&*backend, resume.uuid())?;
        backend.replace(key, resume)
    }

    fn delete_inner(&self, uuid: &str) -> StorageResult<()> {
        let mut backend = self.write()?;
        let key = existing_key(&*backend, uuid)?;
        backend.remove(key)
    }

    fn get_inner(&self, uuid: &str) -> StorageResult<Resume> {
        let backend = self.read()?;
        let key = existing_key(&*backend, uuid)?;
        backend.fetch(&key)
    }

    fn get_all_sorted_inner(&self) -> StorageResult<Vec<Resume>> {
        let mut resumes = self.read()?.snapshot()?;
        resumes.sort_by(compare_by_name_then_uuid);
        Ok(resumes)
    }
}

fn existing_key<B: StorageBackend>(backend: &B, uuid: &str) -> StorageResult<B::SearchKey> {
    backend
        .locate(uuid)?
        .ok_or_else(|| StorageError::NotFound(uuid.to_string()))
}

impl<B: StorageBackend> Storage for TemplateStorage<B> {
    fn save(&self, resume: &Resume) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.save_inner(resume);
        log_outcome("resume_save", self.backend_name(), Some(resume.uuid()), started_at, &result);
        result
    }

    fn update(&self, resume: &Resume) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.update_inner(resume);
        log_outcome("resume_update", self.backend_name(), Some(resume.uuid()), started_at, &result);
        result
    }

    fn delete(&self, uuid: &str) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.delete_inner(uuid);
        log_outcome("resume_delete", self.backend_name(), Some(uuid), started_at, &result);
        result
    }

    fn get(&self, uuid: &str) -> StorageResult<Resume> {
        let started_at = Instant::now();
        let result = self.get_inner(uuid);
        log_outcome("resume_get", self.backend_name(), Some(uuid), started_at, &result);
        result
    }

    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>> {
        let started_at = Instant::now();
        let result = self.get_all_sorted_inner();
        log_outcome("resume_list", self.backend_name(), None, started_at, &result);
        result
    }

    fn size(&self) -> StorageResult<usize> {
        self.read()?.count()
    }

    fn clear(&self) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.write().and_then(|mut backend| backend.remove_all());
        log_outcome("resume_clear", self.backend_name(), None, started_at, &result);
        result
    }
}
