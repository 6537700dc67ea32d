// Common test utilities for redlite integration tests

use std::path::PathBuf;
use std::sync::Arc;

use redlite::{Bucket, Db};
use tempfile::TempDir;

/// Test fixture that opens a database in a temporary directory
pub struct DbTestFixture {
    #[allow(dead_code)]
    pub temp_dir: TempDir,
    pub db_path: PathBuf,
    pub db: Db,
}

impl DbTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("db");
        let db = Db::open(&db_path).expect("Failed to open database");

        Self {
            temp_dir,
            db_path,
            db,
        }
    }

    pub fn bucket(&self) -> Arc<Bucket> {
        self.db.bucket("0").expect("Failed to open bucket")
    }

    /// Close the database and open it again from the same directory
    #[allow(dead_code)]
    pub fn reopen(&mut self) {
        self.db.close().expect("Failed to close database");
        self.db = Db::open(&self.db_path).expect("Failed to reopen database");
    }
}

impl Default for DbTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_data_file() {
        let fixture = DbTestFixture::new();
        assert!(fixture.db_path.join(redlite_storage::DATA_FILE).exists());
    }
}
