use rusqlite::Connection;
use std::path::Path;

/// Highest class grade level accepted anywhere in the system. The scale
/// table is seeded with 1..=MAX_GRADE_LEVEL on every open.
pub const MAX_GRADE_LEVEL: i64 = 6;

pub fn open_db(data_dir: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join("schoolbook.sqlite3");
    let conn = Connection::open(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// In-memory database with the full schema, for tests.
pub fn open_in_memory() -> anyhow::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Students(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            registration_date TEXT NOT NULL DEFAULT CURRENT_DATE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Grades_Scale(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            grade_level INTEGER NOT NULL UNIQUE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Classes(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            grade_level INTEGER NOT NULL,
            FOREIGN KEY(grade_level) REFERENCES Grades_Scale(grade_level)
        )",
        [],
    )?;

    // UNIQUE(student_id) is the one-class-per-student invariant; assignment
    // writes are upserts against it.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Student_Class(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL UNIQUE,
            class_id INTEGER NOT NULL,
            FOREIGN KEY(student_id) REFERENCES Students(id),
            FOREIGN KEY(class_id) REFERENCES Classes(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_student_class_class ON Student_Class(class_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Grades(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL,
            subject TEXT NOT NULL,
            grade INTEGER NOT NULL,
            date TEXT NOT NULL DEFAULT CURRENT_DATE,
            FOREIGN KEY(student_id) REFERENCES Students(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_grades_student ON Grades(student_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Attendance(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL,
            date TEXT NOT NULL DEFAULT CURRENT_DATE,
            present INTEGER NOT NULL,
            FOREIGN KEY(student_id) REFERENCES Students(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attendance_student ON Attendance(student_id)",
        [],
    )?;

    // Databases created by the first-generation schema have a Grades table
    // without a date column. Add and default it before anything queries it.
    ensure_grades_date(conn)?;

    seed_grade_scale(conn)?;

    Ok(())
}

fn ensure_grades_date(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "Grades", "date")? {
        return Ok(());
    }
    // ADD COLUMN cannot carry a non-constant default; backfill instead.
    conn.execute("ALTER TABLE Grades ADD COLUMN date TEXT", [])?;
    conn.execute(
        "UPDATE Grades SET date = DATE('now') WHERE date IS NULL",
        [],
    )?;
    Ok(())
}

// The grade-level vocabulary has no creation operation on the menu, so an
// unseeded scale would make every class and grade insertion fail.
fn seed_grade_scale(conn: &Connection) -> anyhow::Result<()> {
    for level in 1..=MAX_GRADE_LEVEL {
        conn.execute(
            "INSERT OR IGNORE INTO Grades_Scale(grade_level) VALUES(?)",
            [level],
        )?;
    }
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
