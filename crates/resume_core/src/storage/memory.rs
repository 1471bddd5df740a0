//! In-memory backends for the storage template.

use super::template::StorageBackend;
use super::StorageResult;
use crate::model::resume::Resume;
use std::collections::HashMap;

/// Backend keyed by uuid; locate is a map lookup.
#[derive(Debug, Default)]
pub struct MapStorage {
    resumes: HashMap<String, Resume>,
}

impl MapStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MapStorage {
    type SearchKey = String;

    fn name(&self) -> &'static str {
        "map"
    }

    fn locate(&self, uuid: &str) -> StorageResult<Option<String>> {
        Ok(self.resumes.contains_key(uuid).then(|| uuid.to_string()))
    }

    fn insert(&mut self, resume: &Resume) -> StorageResult<()> {
        self.resumes
            .insert(resume.uuid().to_string(), resume.clone());
        Ok(())
    }

    fn replace(&mut self, key: String, resume: &Resume) -> StorageResult<()> {
        self.resumes.insert(key, resume.clone());
        Ok(())
    }

    fn remove(&mut self, key: String) -> StorageResult<()> {
        self.resumes.remove(&key);
        Ok(())
    }

    fn fetch(&self, key: &String) -> StorageResult<Resume> {
        // `locate` ran under the same lock, so the entry is present.
        self.resumes
            .get(key)
            .cloned()
            .ok_or_else(|| super::StorageError::NotFound(key.clone()))
    }

    fn snapshot(&self) -> StorageResult<Vec<Resume>> {
        Ok(self.resumes.values().cloned().collect())
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.resumes.len())
    }

    fn remove_all(&mut self) -> StorageResult<()> {
        self.resumes.clear();
        Ok(())
    }
}

/// Backend over a plain vector; locate is a linear scan returning the index.
#[derive(Debug, Default)]
pub struct ListStorage {
    resumes: Vec<Resume>,
}

impl ListStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for ListStorage {
    type SearchKey = usize;

    fn name(&self) -> &'static str {
        "list"
    }

    fn locate(&self, uuid: &str) -> StorageResult<Option<usize>> {
        Ok(self
            .resumes
            .iter()
            .position(|resume| resume.uuid() == uuid))
    }

    fn insert(&mut self, resume: &Resume) -> StorageResult<()> {
        self.resumes.push(resume.clone());
        Ok(())
    }

    fn replace(&mut self, key: usize, resume: &Resume) -> StorageResult<()> {
        self.resumes[key] = resume.clone();
        Ok(())
    }

    fn remove(&mut self, key: usize) -> StorageResult<()> {
        self.resumes.swap_remove(key);
        Ok(())
    }

    fn fetch(&self, key: &usize) -> StorageResult<Resume> {
        Ok(self.resumes[*key].clone())
    }

    fn snapshot(&self) -> StorageResult<Vec<Resume>> {
        Ok(self.resumes.clone())
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.resumes.len())
    }

    fn remove_all(&mut self) -> StorageResult<()> {
        self.resumes.clear();
        Ok(())
    }
}
