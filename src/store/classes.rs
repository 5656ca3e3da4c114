//! Class management and student-class assignment.

use rusqlite::OptionalExtension;
use tracing::debug;

use crate::db::MAX_GRADE_LEVEL;

use super::{Class, Error, Result, Store};

impl Store {
    /// Create a class. The grade level must be within 1..=6 and present in
    /// the Grades_Scale vocabulary; the name must be unused.
    pub fn add_class(&self, name: &str, grade_level: i64) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if !(1..=MAX_GRADE_LEVEL).contains(&grade_level) {
            return Err(Error::GradeLevelOutOfRange(grade_level));
        }
        if !self.grade_level_exists(grade_level)? {
            return Err(Error::UnknownGradeLevel(grade_level));
        }
        if self.find_class(name)?.is_some() {
            return Err(Error::DuplicateClass(name.to_string()));
        }
        self.conn().execute(
            "INSERT INTO Classes(name, grade_level) VALUES(?, ?)",
            (name, grade_level),
        )?;
        let id = self.conn().last_insert_rowid();
        debug!(id, name, grade_level, "class added");
        Ok(id)
    }

    pub fn list_classes(&self) -> Result<Vec<Class>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name, grade_level FROM Classes ORDER BY name")?;
        let rows = stmt
            .query_map([], |r| {
                Ok(Class {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    grade_level: r.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn find_class(&self, name: &str) -> Result<Option<Class>> {
        self.conn()
            .query_row(
                "SELECT id, name, grade_level FROM Classes WHERE name = ?",
                [name],
                |r| {
                    Ok(Class {
                        id: r.get(0)?,
                        name: r.get(1)?,
                        grade_level: r.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(Error::Database)
    }

    /// Enroll a student in the named class, replacing any prior assignment.
    /// The UNIQUE(student_id) constraint makes this an upsert, so a student
    /// can never hold two assignments.
    pub fn assign_student(&self, student_id: i64, class_name: &str) -> Result<()> {
        if self.get_student(student_id)?.is_none() {
            return Err(Error::StudentNotFound(student_id));
        }
        let class = self
            .find_class(class_name)?
            .ok_or_else(|| Error::ClassNotFound(class_name.to_string()))?;
        self.conn().execute(
            "INSERT INTO Student_Class(student_id, class_id)
             VALUES(?, ?)
             ON CONFLICT(student_id) DO UPDATE SET class_id = excluded.class_id",
            (student_id, class.id),
        )?;
        debug!(student_id, class_id = class.id, "student assigned to class");
        Ok(())
    }

    /// Students enrolled in the named class.
    pub fn students_in_class(&self, class_name: &str) -> Result<Vec<(i64, String)>> {
        let class = self
            .find_class(class_name)?
            .ok_or_else(|| Error::ClassNotFound(class_name.to_string()))?;
        let mut stmt = self.conn().prepare(
            "SELECT s.id, s.name
             FROM Students s
             JOIN Student_Class sc ON sc.student_id = s.id
             WHERE sc.class_id = ?
             ORDER BY s.name",
        )?;
        let rows = stmt
            .query_map([class.id], |r| Ok((r.get(0)?, r.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub(crate) fn grade_level_exists(&self, grade_level: i64) -> Result<bool> {
        self.conn()
            .query_row(
                "SELECT 1 FROM Grades_Scale WHERE grade_level = ?",
                [grade_level],
                |r| r.get::<_, i64>(0),
            )
            .optional()
            .map(|v| v.is_some())
            .map_err(Error::Database)
    }
}
