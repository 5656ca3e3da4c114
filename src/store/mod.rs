//! The data-access layer: one [`Store`] owning the SQLite connection, with
//! per-area operation impls in the submodules.

mod attendance;
mod classes;
mod export;
mod grades;
mod students;

pub mod error;

use std::path::Path;

use rusqlite::Connection;

pub use error::{Error, Result};

/// School records store backed by a single SQLite file.
///
/// The connection is owned here and lives for the whole process; `close`
/// is the explicit shutdown path behind the quit menu entry.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database under `data_dir` and run the
    /// idempotent schema setup.
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let conn = crate::db::open_db(data_dir)?;
        Ok(Self { conn })
    }

    /// In-memory store, for tests.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = crate::db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Database(e))
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub registration_date: String,
}

/// One roster line: a student with their current class, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub id: i64,
    pub name: String,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub grade_level: i64,
}

/// One line of the joined grade reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRow {
    pub student_name: String,
    pub class_name: String,
    pub grade_level: i64,
    pub subject: String,
    pub grade: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub student_name: String,
    pub date: String,
    pub present: bool,
}
