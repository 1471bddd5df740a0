//! File-per-document backend.
//!
//! # Responsibility
//! - Store each resume in `<dir>/<name>`, encoded by the configured strategy.
//! - Express "locate" as a filesystem existence check.
//!
//! # File names
//! - `<name>` is the uuid with every byte outside `[A-Za-z0-9_-]` written as
//!   `%XX`, so any uuid maps to exactly one plain file inside `<dir>`.
//!
//! # Invariants
//! - Writes go to a hidden temp file first and are renamed into place, so a
//!   reader never observes a half-written document.
//! - Hidden entries (leading `.`) and directories are ignored when listing.

use super::template::StorageBackend;
use super::{StorageError, StorageResult};
use crate::model::resume::Resume;
use crate::serialization::SerializationStrategy;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileStorage {
    dir: PathBuf,
    strategy: Box<dyn SerializationStrategy>,
}

impl FileStorage {
    /// Opens (creating if needed) a storage directory.
    ///
    /// # Errors
    /// - `Io` when the directory cannot be created or is not a directory.
    pub fn new(
        dir: impl AsRef<Path>,
        strategy: Box<dyn SerializationStrategy>,
    ) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|err| {
            StorageError::io(format!("failed to create {}", dir.display()), err)
        })?;
        if !dir.is_dir() {
            return Err(StorageError::InvalidData(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        Ok(Self { dir, strategy })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, uuid: &str) -> PathBuf {
        self.dir.join(file_name_for(uuid))
    }

    fn write_file(&self, path: &Path, resume: &Resume) -> StorageResult<()> {
        let tmp_path = self
            .dir
            .join(format!(".{}.tmp", file_name_for(resume.uuid())));
        let file = File::create(&tmp_path).map_err(|err| {
            StorageError::io(format!("failed to create {}", tmp_path.display()), err)
        })?;
        let mut writer = BufWriter::new(file);
        if let Err(err) = self.strategy.write(resume, &mut writer) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        let flushed = writer.flush();
        drop(writer);
        flushed
            .and_then(|()| fs::rename(&tmp_path, path))
            .map_err(|err| {
                let _ = fs::remove_file(&tmp_path);
                StorageError::io(format!("failed to write {}", path.display()), err)
            })
    }

    fn read_file(&self, path: &Path) -> StorageResult<Resume> {
        let file = File::open(path).map_err(|err| {
            StorageError::io(format!("failed to open {}", path.display()), err)
        })?;
        let mut reader = BufReader::new(file);
        Ok(self.strategy.read(&mut reader)?)
    }

    fn document_paths(&self) -> StorageResult<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|err| {
            StorageError::io(format!("failed to list {}", self.dir.display()), err)
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                StorageError::io(format!("failed to list {}", self.dir.display()), err)
            })?;
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if hidden || !entry.path().is_file() {
                continue;
            }
            paths.push(entry.path());
        }
        Ok(paths)
    }
}

fn file_name_for(uuid: &str) -> String {
    let mut name = String::with_capacity(uuid.len());
    for byte in uuid.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            name.push(char::from(byte));
        } else {
            name.push_str(&format!("%{byte:02X}"));
        }
    }
    name
}

impl StorageBackend for FileStorage {
    type SearchKey = PathBuf;

    fn name(&self) -> &'static str {
        "file"
    }

    fn locate(&self, uuid: &str) -> StorageResult<Option<PathBuf>> {
        if uuid.is_empty() {
            return Ok(None);
        }
        let path = self.path_for(uuid);
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file().then_some(path)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(
                format!("failed to check {}", path.display()),
                err,
            )),
        }
    }

    fn insert(&mut self, resume: &Resume) -> StorageResult<()> {
        let path = self.path_for(resume.uuid());
        self.write_file(&path, resume)
    }

    fn replace(&mut self, key: PathBuf, resume: &Resume) -> StorageResult<()> {
        self.write_file(&key, resume)
    }

    fn remove(&mut self, key: PathBuf) -> StorageResult<()> {
        fs::remove_file(&key)
            .map_err(|err| StorageError::io(format!("failed to delete {}", key.display()), err))
    }

    fn fetch(&self, key: &PathBuf) -> StorageResult<Resume> {
        self.read_file(key)
    }

    fn snapshot(&self) -> StorageResult<Vec<Resume>> {
        self.document_paths()?
            .iter()
            .map(|path| self.read_file(path))
            .collect()
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.document_paths()?.len())
    }

    fn remove_all(&mut self) -> StorageResult<()> {
        for path in self.document_paths()? {
            self.remove(path)?;
        }
        Ok(())
    }
}
