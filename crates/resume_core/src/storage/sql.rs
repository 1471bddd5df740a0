//! Relational backend over SQLite.
//!
//! # Responsibility
//! - Map the `Resume` aggregate onto `resume`, `contact` and `section` rows.
//! - Keep parent and child rows consistent by running every operation in
//!   exactly one transaction.
//!
//! # Invariants
//! - A failed operation rolls its transaction back before the error surfaces.
//! - `update` replaces the full child row set (delete then reinsert).
//! - Listing order comes from `ORDER BY full_name, uuid` under the default
//!   BINARY collation, which matches `compare_by_name_then_uuid`.

use super::{log_outcome, Storage, StorageError, StorageResult};
use crate::db::open_db_url;
use crate::model::resume::{ContactType, Resume, SectionType};
use crate::serialization::section::{decode_section_content, encode_section_content};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Transaction, TransactionBehavior};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

const BACKEND_NAME: &str = "sql";
const REQUIRED_TABLES: [&str; 3] = ["resume", "contact", "section"];

/// SQLite-backed storage.
///
/// The connection is the shared resource: each operation holds it for the
/// duration of one transaction and releases it on every exit path.
pub struct SqlStorage {
    conn: Mutex<Connection>,
}

impl SqlStorage {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the schema has not been applied.
    pub fn new(conn: Connection) -> StorageResult<Self> {
        for table in REQUIRED_TABLES {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
                );",
                [table],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(StorageError::MissingRequiredTable(table));
            }
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens the database behind `database_url` and applies migrations.
    pub fn open(database_url: &str) -> StorageResult<Self> {
        Self::new(open_db_url(database_url)?)
    }

    fn with_transaction<T>(
        &self,
        behavior: TransactionBehavior,
        work: impl FnOnce(&Transaction<'_>) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let tx = conn.transaction_with_behavior(behavior)?;
        // Dropping `tx` on the error path rolls back.
        let value = work(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    fn save_inner(&self, resume: &Resume) -> StorageResult<()> {
        resume.validate()?;
        self.with_transaction(TransactionBehavior::Immediate, |tx| {
            let inserted = tx.execute(
                "INSERT INTO resume (uuid, full_name) VALUES (?1, ?2);",
                params![resume.uuid(), resume.full_name()],
            );
            match inserted {
                Err(err) if is_primary_key_violation(&err) => {
                    return Err(StorageError::AlreadyExists(resume.uuid().to_string()));
                }
                Err(err) => return Err(err.into()),
                Ok(_) => {}
            }
            insert_children(tx, resume)
        })
    }

    fn update_inner(&self, resume: &Resume) -> StorageResult<()> {
        resume.validate()?;
        self.with_transaction(TransactionBehavior::Immediate, |tx| {
            let changed = tx.execute(
                "UPDATE resume SET full_name = ?2 WHERE uuid = ?1;",
                params![resume.uuid(), resume.full_name()],
            )?;
            if changed == 0 {
                return Err(StorageError::NotFound(resume.uuid().to_string()));
            }
            delete_children(tx, resume.uuid())?;
            insert_children(tx, resume)
        })
    }

    fn delete_inner(&self, uuid: &str) -> StorageResult<()> {
        self.with_transaction(TransactionBehavior::Immediate, |tx| {
            delete_children(tx, uuid)?;
            let changed = tx.execute("DELETE FROM resume WHERE uuid = ?1;", [uuid])?;
            if changed == 0 {
                return Err(StorageError::NotFound(uuid.to_string()));
            }
            Ok(())
        })
    }

    fn get_inner(&self, uuid: &str) -> StorageResult<Resume> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            let full_name: Option<String> = tx
                .query_row(
                    "SELECT full_name FROM resume WHERE uuid = ?1;",
                    [uuid],
                    |row| row.get(0),
                )
                .optional()?;
            let full_name = full_name.ok_or_else(|| StorageError::NotFound(uuid.to_string()))?;
            let mut resume = stored_resume(uuid.to_string(), full_name)?;

            let mut stmt = tx.prepare_cached("SELECT type, value FROM contact WHERE resume_uuid = ?1;")?;
            let mut rows = stmt.query([uuid])?;
            while let Some(row) = rows.next()? {
                apply_contact(&mut resume, &row.get::<_, String>(0)?, row.get(1)?)?;
            }

            let mut stmt = tx.prepare_cached("SELECT type, content FROM section WHERE resume_uuid = ?1;")?;
            let mut rows = stmt.query([uuid])?;
            while let Some(row) = rows.next()? {
                apply_section(&mut resume, &row.get::<_, String>(0)?, &row.get::<_, String>(1)?)?;
            }

            Ok(resume)
        })
    }

    fn get_all_sorted_inner(&self) -> StorageResult<Vec<Resume>> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            let mut resumes = Vec::new();
            let mut positions: HashMap<String, usize> = HashMap::new();

            let mut stmt = tx.prepare("SELECT uuid, full_name FROM resume ORDER BY full_name, uuid;")?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let uuid: String = row.get(0)?;
                positions.insert(uuid.clone(), resumes.len());
                resumes.push(stored_resume(uuid, row.get(1)?)?);
            }

            let mut stmt = tx.prepare("SELECT resume_uuid, type, value FROM contact;")?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let index = owner_index(&positions, &row.get::<_, String>(0)?)?;
                apply_contact(&mut resumes[index], &row.get::<_, String>(1)?, row.get(2)?)?;
            }

            let mut stmt = tx.prepare("SELECT resume_uuid, type, content FROM section;")?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let index = owner_index(&positions, &row.get::<_, String>(0)?)?;
                apply_section(
                    &mut resumes[index],
                    &row.get::<_, String>(1)?,
                    &row.get::<_, String>(2)?,
                )?;
            }

            Ok(resumes)
        })
    }

    fn size_inner(&self) -> StorageResult<usize> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            let count: i64 = tx.query_row("SELECT COUNT(*) FROM resume;", [], |row| row.get(0))?;
            usize::try_from(count)
                .map_err(|_| StorageError::InvalidData(format!("negative row count {count}")))
        })
    }

    fn clear_inner(&self) -> StorageResult<()> {
        self.with_transaction(TransactionBehavior::Immediate, |tx| {
            tx.execute_batch(
                "DELETE FROM contact;
                 DELETE FROM section;
                 DELETE FROM resume;",
            )?;
            Ok(())
        })
    }
}

impl Storage for SqlStorage {
    fn save(&self, resume: &Resume) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.save_inner(resume);
        log_outcome("resume_save", BACKEND_NAME, Some(resume.uuid()), started_at, &result);
        result
    }

    fn update(&self, resume: &Resume) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.update_inner(resume);
        log_outcome("resume_update", BACKEND_NAME, Some(resume.uuid()), started_at, &result);
        result
    }

    fn delete(&self, uuid: &str) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.delete_inner(uuid);
        log_outcome("resume_delete", BACKEND_NAME, Some(uuid), started_at, &result);
        result
    }

    fn get(&self, uuid: &str) -> StorageResult<Resume> {
        let started_at = Instant::now();
        let result = self.get_inner(uuid);
        log_outcome("resume_get", BACKEND_NAME, Some(uuid), started_at, &result);
        result
    }

    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>> {
        let started_at = Instant::now();
        let result = self.get_all_sorted_inner();
        log_outcome("resume_list", BACKEND_NAME, None, started_at, &result);
        result
    }

    fn size(&self) -> StorageResult<usize> {
        self.size_inner()
    }

    fn clear(&self) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.clear_inner();
        log_outcome("resume_clear", BACKEND_NAME, None, started_at, &result);
        result
    }
}

fn insert_children(tx: &Transaction<'_>, resume: &Resume) -> StorageResult<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO contact (resume_uuid, type, value) VALUES (?1, ?2, ?3);",
    )?;
    for (kind, link) in resume.contacts() {
        stmt.execute(params![resume.uuid(), kind.as_str(), link.as_str()])?;
    }

    let mut stmt = tx.prepare_cached(
        "INSERT INTO section (resume_uuid, type, content) VALUES (?1, ?2, ?3);",
    )?;
    for (kind, section) in resume.sections() {
        let content = encode_section_content(section)?;
        stmt.execute(params![resume.uuid(), kind.as_str(), content])?;
    }
    Ok(())
}

fn delete_children(tx: &Transaction<'_>, uuid: &str) -> StorageResult<()> {
    tx.execute("DELETE FROM contact WHERE resume_uuid = ?1;", [uuid])?;
    tx.execute("DELETE FROM section WHERE resume_uuid = ?1;", [uuid])?;
    Ok(())
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn stored_resume(uuid: String, full_name: String) -> StorageResult<Resume> {
    Resume::with_id(uuid, full_name)
        .map_err(|err| StorageError::InvalidData(format!("resume row: {err}")))
}

fn owner_index(positions: &HashMap<String, usize>, uuid: &str) -> StorageResult<usize> {
    positions
        .get(uuid)
        .copied()
        .ok_or_else(|| StorageError::InvalidData(format!("orphaned child row for `{uuid}`")))
}

fn apply_contact(resume: &mut Resume, type_text: &str, value: String) -> StorageResult<()> {
    let kind = ContactType::parse(type_text).ok_or_else(|| {
        StorageError::InvalidData(format!("invalid contact type `{type_text}` in contact.type"))
    })?;
    resume.set_contact(kind, value.as_str());
    Ok(())
}

fn apply_section(resume: &mut Resume, type_text: &str, content: &str) -> StorageResult<()> {
    let kind = SectionType::parse(type_text).ok_or_else(|| {
        StorageError::InvalidData(format!("invalid section type `{type_text}` in section.type"))
    })?;
    let section = decode_section_content(kind.kind(), content)?;
    resume
        .set_section(kind, section)
        .map_err(|err| StorageError::InvalidData(format!("section {type_text}: {err}")))
}
