//! Error type for the data-access layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("name must not be empty")]
    EmptyName,

    #[error("student with ID {0} not found")]
    StudentNotFound(i64),

    #[error("class '{0}' not found")]
    ClassNotFound(String),

    #[error("class '{0}' already exists")]
    DuplicateClass(String),

    /// Class grade level outside the accepted 1..=6 range.
    #[error("invalid grade level {0}: expected a number between 1 and 6")]
    GradeLevelOutOfRange(i64),

    /// Level missing from the Grades_Scale vocabulary.
    #[error("grade level {0} is not in the grade scale")]
    UnknownGradeLevel(i64),

    #[error("student with ID {0} is not assigned to a class")]
    StudentUnassigned(i64),

    #[error("'{0}' is not an exportable table")]
    UnknownTable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
