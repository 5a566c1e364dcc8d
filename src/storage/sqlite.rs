//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{ImageRecord, NewImage, PageRecord};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database at `path`
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn insert_page(conn: &Connection, url: &str, text_file: &str) -> StorageResult<i64> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO scraped_pages (url, text_file, created_at) VALUES (?1, ?2, ?3)",
        params![url, text_file, now],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_image(conn: &Connection, page_id: i64, url: &str, filename: &str) -> StorageResult<i64> {
    conn.execute(
        "INSERT INTO scraped_images (page_id, url, filename) VALUES (?1, ?2, ?3)",
        params![page_id, url, filename],
    )?;
    Ok(conn.last_insert_rowid())
}

fn page_from_row(row: &Row<'_>) -> rusqlite::Result<PageRecord> {
    Ok(PageRecord {
        id: row.get(0)?,
        url: row.get(1)?,
        text_file: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl Storage for SqliteStorage {
    // ===== Page Records =====

    fn create_page_record(&mut self, url: &str, text_file: &str) -> StorageResult<i64> {
        insert_page(&self.conn, url, text_file)
    }

    fn create_image_record(
        &mut self,
        page_id: i64,
        url: &str,
        filename: &str,
    ) -> StorageResult<i64> {
        insert_image(&self.conn, page_id, url, filename)
    }

    fn record_page(
        &mut self,
        url: &str,
        text_file: &str,
        images: &[NewImage],
    ) -> StorageResult<i64> {
        let tx = self.conn.transaction()?;

        let page_id = insert_page(&tx, url, text_file)?;
        for image in images {
            insert_image(&tx, page_id, &image.url, &image.filename)?;
        }

        tx.commit()?;
        Ok(page_id)
    }

    fn get_page_record(&self, page_id: i64) -> StorageResult<PageRecord> {
        self.conn
            .query_row(
                "SELECT id, url, text_file, created_at FROM scraped_pages WHERE id = ?1",
                params![page_id],
                page_from_row,
            )
            .optional()?
            .ok_or(StorageError::PageNotFound(page_id))
    }

    fn list_page_records(&self) -> StorageResult<Vec<PageRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, url, text_file, created_at FROM scraped_pages ORDER BY id")?;

        let pages = stmt
            .query_map([], page_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }

    // ===== Image Records =====

    fn list_image_records(&self, page_id: i64) -> StorageResult<Vec<ImageRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, page_id, url, filename FROM scraped_images WHERE page_id = ?1 ORDER BY id",
        )?;

        let images = stmt
            .query_map(params![page_id], |row| {
                Ok(ImageRecord {
                    id: row.get(0)?,
                    page_id: row.get(1)?,
                    url: row.get(2)?,
                    filename: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(images)
    }

    // ===== Statistics =====

    fn count_page_records(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM scraped_pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_image_records(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM scraped_images", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, filename: &str) -> NewImage {
        NewImage {
            url: url.to_string(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn test_create_in_memory() {
        assert!(SqliteStorage::new_in_memory().is_ok());
    }

    #[test]
    fn test_create_and_get_page_record() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let page_id = storage
            .create_page_record("http://example.com/", "abc.txt")
            .unwrap();
        assert!(page_id > 0);

        let page = storage.get_page_record(page_id).unwrap();
        assert_eq!(page.url, "http://example.com/");
        assert_eq!(page.text_file, "abc.txt");
        assert!(!page.created_at.is_empty());
    }

    #[test]
    fn test_get_missing_page_record() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        assert!(matches!(
            storage.get_page_record(42),
            Err(StorageError::PageNotFound(42))
        ));
    }

    #[test]
    fn test_image_requires_committed_page() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let result = storage.create_image_record(999, "http://example.com/a.png", "x.png");
        assert!(matches!(result, Err(StorageError::Sqlite(_))));
        assert_eq!(storage.count_image_records().unwrap(), 0);
    }

    #[test]
    fn test_create_image_record() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let page_id = storage
            .create_page_record("http://example.com/", "abc.txt")
            .unwrap();
        storage
            .create_image_record(page_id, "http://example.com/a.png", "def.png")
            .unwrap();

        let images = storage.list_image_records(page_id).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].page_id, page_id);
        assert_eq!(images[0].filename, "def.png");
    }

    #[test]
    fn test_record_page_with_images() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let page_id = storage
            .record_page(
                "http://example.com/",
                "abc.txt",
                &[
                    image("http://example.com/a.png", "a.png"),
                    image("http://example.com/b.gif", "b.gif"),
                ],
            )
            .unwrap();

        let images = storage.list_image_records(page_id).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].url, "http://example.com/a.png");
        assert_eq!(images[1].url, "http://example.com/b.gif");
        assert_eq!(storage.count_page_records().unwrap(), 1);
        assert_eq!(storage.count_image_records().unwrap(), 2);
    }

    #[test]
    fn test_same_url_recorded_twice_gets_two_records() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let first = storage.record_page("http://example.com/", "abc.txt", &[]).unwrap();
        let second = storage.record_page("http://example.com/", "abc.txt", &[]).unwrap();

        assert_ne!(first, second);
        assert_eq!(storage.list_page_records().unwrap().len(), 2);
    }

    #[test]
    fn test_list_page_records_in_order() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage.record_page("http://example.com/1", "1.txt", &[]).unwrap();
        storage.record_page("http://example.com/2", "2.txt", &[]).unwrap();

        let urls: Vec<_> = storage
            .list_page_records()
            .unwrap()
            .into_iter()
            .map(|p| p.url)
            .collect();
        assert_eq!(urls, vec!["http://example.com/1", "http://example.com/2"]);
    }

    #[test]
    fn test_file_backed_storage_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("harvest.db");

        {
            let mut storage = SqliteStorage::new(&path).unwrap();
            storage.record_page("http://example.com/", "abc.txt", &[]).unwrap();
        }

        let storage = SqliteStorage::new(&path).unwrap();
        assert_eq!(storage.count_page_records().unwrap(), 1);
    }
}
