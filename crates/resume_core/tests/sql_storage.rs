mod common;

use common::{full_resume, test_resume, UUID_1, UUID_2};
use resume_core::db::migrations::latest_version;
use resume_core::db::{open_db, open_db_in_memory};
use resume_core::{ContactType, Resume, SerializationError, SqlStorage, Storage, StorageError};
use rusqlite::Connection;

fn child_rows(conn: &Connection, table: &str, uuid: &str) -> i64 {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE resume_uuid = ?1;"),
        [uuid],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn update_to_zero_contacts_leaves_no_orphaned_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.db");
    let storage = SqlStorage::new(open_db(&path).unwrap()).unwrap();

    let mut resume = Resume::with_id(UUID_1, "Philip J. Fry").unwrap();
    resume.set_contact(ContactType::Email, "fry@planet.example");
    resume.set_contact(ContactType::Skype, "fry3000");
    storage.save(&resume).unwrap();

    let raw = Connection::open(&path).unwrap();
    assert_eq!(child_rows(&raw, "contact", UUID_1), 2);

    let bare = Resume::with_id(UUID_1, "Philip J. Fry").unwrap();
    storage.update(&bare).unwrap();

    assert!(storage.get(UUID_1).unwrap().contacts().is_empty());
    assert_eq!(child_rows(&raw, "contact", UUID_1), 0);
}

#[test]
fn delete_removes_child_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.db");
    let storage = SqlStorage::new(open_db(&path).unwrap()).unwrap();
    storage.save(&full_resume(UUID_1, "Bender")).unwrap();

    storage.delete(UUID_1).unwrap();

    let raw = Connection::open(&path).unwrap();
    assert_eq!(child_rows(&raw, "contact", UUID_1), 0);
    assert_eq!(child_rows(&raw, "section", UUID_1), 0);
}

#[test]
fn duplicate_save_rolls_back_and_keeps_children_of_original() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.db");
    let storage = SqlStorage::new(open_db(&path).unwrap()).unwrap();
    let original = test_resume(UUID_2, "Amy Kroker", true, false);
    storage.save(&original).unwrap();

    let err = storage
        .save(&full_resume(UUID_2, "Turanga Leela"))
        .unwrap_err();

    assert!(matches!(err, StorageError::AlreadyExists(_)));
    let raw = Connection::open(&path).unwrap();
    assert_eq!(child_rows(&raw, "contact", UUID_2), 3);
    assert_eq!(child_rows(&raw, "section", UUID_2), 0);
    assert_eq!(storage.get(UUID_2).unwrap(), original);
}

#[test]
fn data_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.db");
    let resume = full_resume(UUID_1, "Hubert Farnsworth");
    {
        let storage = SqlStorage::new(open_db(&path).unwrap()).unwrap();
        storage.save(&resume).unwrap();
    }

    let reopened = SqlStorage::open(path.to_str().unwrap()).unwrap();
    assert_eq!(reopened.get(UUID_1).unwrap(), resume);
    assert_eq!(reopened.size().unwrap(), 1);
}

#[test]
fn corrupt_section_content_surfaces_as_serialization_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.db");
    let storage = SqlStorage::new(open_db(&path).unwrap()).unwrap();
    storage
        .save(&Resume::with_id(UUID_1, "Nibbler").unwrap())
        .unwrap();

    let raw = Connection::open(&path).unwrap();
    raw
        .execute(
            "INSERT INTO section (resume_uuid, type, content) VALUES (?1, 'ACHIEVEMENT', 'not json');",
            [UUID_1],
        )
        .unwrap();

    let err = storage.get(UUID_1).unwrap_err();
    assert!(matches!(
        err,
        StorageError::Serialization(SerializationError::InvalidData(_))
    ));
    assert!(err.is_storage_failure());
}

#[test]
fn unknown_contact_type_in_database_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.db");
    let storage = SqlStorage::new(open_db(&path).unwrap()).unwrap();
    storage
        .save(&Resume::with_id(UUID_1, "Calculon").unwrap())
        .unwrap();

    let raw = Connection::open(&path).unwrap();
    raw
        .execute(
            "INSERT INTO contact (resume_uuid, type, value) VALUES (?1, 'FAX', '555');",
            [UUID_1],
        )
        .unwrap();

    assert!(matches!(
        storage.get_all_sorted(),
        Err(StorageError::InvalidData(_))
    ));
}

#[test]
fn storage_rejects_connection_without_schema() {
    let conn = Connection::open_in_memory().unwrap();
    let result = SqlStorage::new(conn);
    assert!(matches!(
        result,
        Err(StorageError::MissingRequiredTable("resume"))
    ));
}

#[test]
fn storage_rejects_connection_missing_child_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE resume (uuid TEXT PRIMARY KEY, full_name TEXT NOT NULL);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    assert!(matches!(
        SqlStorage::new(conn),
        Err(StorageError::MissingRequiredTable("contact"))
    ));
}

#[test]
fn in_memory_url_opens_fresh_database() {
    let storage = SqlStorage::open("sqlite::memory:").unwrap();
    assert_eq!(storage.size().unwrap(), 0);

    let other = SqlStorage::new(open_db_in_memory().unwrap()).unwrap();
    other.save(&full_resume(UUID_1, "Leela")).unwrap();
    assert_eq!(storage.size().unwrap(), 0);
}
