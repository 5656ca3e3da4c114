//! Student CRUD and roster queries.

use rusqlite::OptionalExtension;
use tracing::debug;

use super::{Error, Result, RosterRow, Store, Student};

const ROSTER_SELECT: &str = "SELECT s.id, s.name, c.name
     FROM Students s
     LEFT JOIN Student_Class sc ON sc.student_id = s.id
     LEFT JOIN Classes c ON c.id = sc.class_id";

impl Store {
    /// Insert a new student and return the assigned id. Registration date
    /// defaults to today via the column default.
    pub fn add_student(&self, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        self.conn()
            .execute("INSERT INTO Students(name) VALUES(?)", [name])?;
        let id = self.conn().last_insert_rowid();
        debug!(id, name, "student added");
        Ok(id)
    }

    pub fn get_student(&self, id: i64) -> Result<Option<Student>> {
        self.conn()
            .query_row(
                "SELECT id, name, registration_date FROM Students WHERE id = ?",
                [id],
                |r| {
                    Ok(Student {
                        id: r.get(0)?,
                        name: r.get(1)?,
                        registration_date: r.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(Error::Database)
    }

    /// All students with their current class, unassigned ones included.
    pub fn list_students(&self) -> Result<Vec<RosterRow>> {
        let sql = format!("{} ORDER BY s.id", ROSTER_SELECT);
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map([], |r| {
                Ok(RosterRow {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    class_name: r.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Roster filtered by a substring match on the name. The term is bound
    /// as a parameter; LIKE case folding is whatever SQLite defaults to.
    pub fn search_students(&self, term: &str) -> Result<Vec<RosterRow>> {
        let sql = format!("{} WHERE s.name LIKE '%' || ?1 || '%' ORDER BY s.id", ROSTER_SELECT);
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map([term], |r| {
                Ok(RosterRow {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    class_name: r.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn rename_student(&self, id: i64, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(Error::EmptyName);
        }
        let changed = self
            .conn()
            .execute("UPDATE Students SET name = ? WHERE id = ?", (new_name, id))?;
        if changed == 0 {
            return Err(Error::StudentNotFound(id));
        }
        debug!(id, new_name, "student renamed");
        Ok(())
    }

    /// Remove a student and every row referencing them, in one transaction.
    ///
    /// Dependents go first (no ON DELETE CASCADE in the schema): Attendance,
    /// Grades, Student_Class, then the Student row itself.
    pub fn delete_student(&self, id: i64) -> Result<()> {
        if self.get_student(id)?.is_none() {
            return Err(Error::StudentNotFound(id));
        }
        let tx = self.conn().unchecked_transaction()?;
        tx.execute("DELETE FROM Attendance WHERE student_id = ?", [id])?;
        tx.execute("DELETE FROM Grades WHERE student_id = ?", [id])?;
        tx.execute("DELETE FROM Student_Class WHERE student_id = ?", [id])?;
        tx.execute("DELETE FROM Students WHERE id = ?", [id])?;
        tx.commit()?;
        debug!(id, "student deleted with dependents");
        Ok(())
    }
}
