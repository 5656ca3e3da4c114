//! Grade recording and the joined grade reports.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{Error, GradeRow, Result, Store};

const GRADE_REPORT_SELECT: &str = "SELECT s.name, c.name, c.grade_level, g.subject, g.grade
     FROM Grades g
     JOIN Students s ON s.id = g.student_id
     JOIN Student_Class sc ON sc.student_id = s.id
     JOIN Classes c ON c.id = sc.class_id
     JOIN Grades_Scale gs ON gs.grade_level = c.grade_level";

impl Store {
    /// Record a grade for a student.
    ///
    /// Preconditions: the student exists, holds a class assignment, and the
    /// assigned class's grade level is in the Grades_Scale vocabulary. The
    /// numeric grade value itself is not range-checked.
    pub fn add_grade(&self, student_id: i64, subject: &str, grade: i64) -> Result<i64> {
        if self.get_student(student_id)?.is_none() {
            return Err(Error::StudentNotFound(student_id));
        }
        let grade_level: Option<i64> = self
            .conn()
            .query_row(
                "SELECT c.grade_level
                 FROM Student_Class sc
                 JOIN Classes c ON c.id = sc.class_id
                 WHERE sc.student_id = ?",
                [student_id],
                |r| r.get(0),
            )
            .optional()?;
        let grade_level = grade_level.ok_or(Error::StudentUnassigned(student_id))?;
        if !self.grade_level_exists(grade_level)? {
            return Err(Error::UnknownGradeLevel(grade_level));
        }
        self.conn().execute(
            "INSERT INTO Grades(student_id, subject, grade) VALUES(?, ?, ?)",
            (student_id, subject, grade),
        )?;
        let id = self.conn().last_insert_rowid();
        debug!(id, student_id, subject, grade, "grade recorded");
        Ok(id)
    }

    /// All grades joined through the assignment chain, ordered by student
    /// name, grade level, then subject. Grades whose student lost their
    /// assignment fall out of this view while staying in storage.
    pub fn list_grades(&self) -> Result<Vec<GradeRow>> {
        let sql = format!(
            "{} ORDER BY s.name, c.grade_level, g.subject",
            GRADE_REPORT_SELECT
        );
        self.query_grade_rows(&sql, params![])
    }

    /// Grades for one student, ordered by grade level then subject. An
    /// unknown id simply yields an empty report.
    pub fn student_grades(&self, student_id: i64) -> Result<Vec<GradeRow>> {
        let sql = format!(
            "{} WHERE s.id = ?1 ORDER BY c.grade_level, g.subject",
            GRADE_REPORT_SELECT
        );
        self.query_grade_rows(&sql, params![student_id])
    }

    fn query_grade_rows<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<GradeRow>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt
            .query_map(params, |r| {
                Ok(GradeRow {
                    student_name: r.get(0)?,
                    class_name: r.get(1)?,
                    grade_level: r.get(2)?,
                    subject: r.get(3)?,
                    grade: r.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
