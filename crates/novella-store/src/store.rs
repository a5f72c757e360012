//! Read-only access to the `scenes` table.

use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Row, Rows, Statement};

use crate::error::{Result, StoreError};

const SELECT_SCENES: &str = "SELECT id, title FROM scenes";

/// One row of the `scenes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRecord {
    pub id: i64,
    pub title: String,
}

impl SceneRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
        })
    }
}

/// Connection to a scene database.
///
/// Statements and row iterators borrow the store, so they are always
/// finalized before the connection closes.
pub struct RecordStore {
    conn: Connection,
    path: PathBuf,
}

impl RecordStore {
    /// Open an existing database file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Opened database {}", path.display());

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepare the query listing every scene.
    pub fn scenes(&self) -> Result<SceneQuery<'_>> {
        let stmt = self.conn.prepare(SELECT_SCENES).map_err(StoreError::Prepare)?;
        Ok(SceneQuery { stmt })
    }

    /// Read the whole `scenes` table.
    pub fn read_all_scenes(&self) -> Result<Vec<SceneRecord>> {
        let mut query = self.scenes()?;
        let records = query.rows()?.collect::<Result<Vec<_>>>();
        records
    }

    /// Close the connection, reporting any error.
    ///
    /// Dropping the store also closes it, but silently.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, source)| StoreError::Close(source))?;
        tracing::debug!("Closed database {}", self.path.display());
        Ok(())
    }
}

/// Prepared scene listing.
pub struct SceneQuery<'conn> {
    stmt: Statement<'conn>,
}

impl SceneQuery<'_> {
    /// Run the query, yielding rows lazily.
    pub fn rows(&mut self) -> Result<SceneRows<'_>> {
        let rows = self.stmt.query([]).map_err(StoreError::QueryStep)?;
        Ok(SceneRows { rows, done: false })
    }
}

/// Lazy sequence of scene rows.
///
/// Ends after the last row or after the first error.
pub struct SceneRows<'stmt> {
    rows: Rows<'stmt>,
    done: bool,
}

impl Iterator for SceneRows<'_> {
    type Item = Result<SceneRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.rows.next() {
            Ok(Some(row)) => {
                let record = SceneRecord::from_row(row).map_err(StoreError::QueryStep);
                self.done = record.is_err();
                Some(record)
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(StoreError::QueryStep(e)))
            }
        }
    }
}

impl FusedIterator for SceneRows<'_> {}
