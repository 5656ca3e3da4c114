//! Daily attendance records.

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::{AttendanceRow, Error, Result, Store};

impl Store {
    /// Record one attendance entry. `date` defaults to today. Duplicate
    /// records for the same student and day are allowed.
    pub fn add_attendance(
        &self,
        student_id: i64,
        date: Option<NaiveDate>,
        present: bool,
    ) -> Result<i64> {
        if self.get_student(student_id)?.is_none() {
            return Err(Error::StudentNotFound(student_id));
        }
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let date_text = date.format("%Y-%m-%d").to_string();
        self.conn().execute(
            "INSERT INTO Attendance(student_id, date, present) VALUES(?, ?, ?)",
            (student_id, &date_text, present as i64),
        )?;
        let id = self.conn().last_insert_rowid();
        debug!(id, student_id, date = %date_text, present, "attendance recorded");
        Ok(id)
    }

    /// Attendance for all students, ordered by student name then date.
    pub fn list_attendance(&self) -> Result<Vec<AttendanceRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT s.name, a.date, a.present
             FROM Attendance a
             JOIN Students s ON s.id = a.student_id
             ORDER BY s.name, a.date",
        )?;
        let rows = stmt
            .query_map([], |r| {
                Ok(AttendanceRow {
                    student_name: r.get(0)?,
                    date: r.get(1)?,
                    present: r.get::<_, i64>(2)? != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Attendance for one student, ordered by date. An unknown id yields an
    /// empty report.
    pub fn student_attendance(&self, student_id: i64) -> Result<Vec<AttendanceRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT s.name, a.date, a.present
             FROM Attendance a
             JOIN Students s ON s.id = a.student_id
             WHERE a.student_id = ?
             ORDER BY a.date",
        )?;
        let rows = stmt
            .query_map([student_id], |r| {
                Ok(AttendanceRow {
                    student_name: r.get(0)?,
                    date: r.get(1)?,
                    present: r.get::<_, i64>(2)? != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
