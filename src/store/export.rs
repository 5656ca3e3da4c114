//! Flat CSV export of single tables and the composite student roster.

use std::path::{Path, PathBuf};

use chrono::Local;
use rusqlite::types::ValueRef;
use tracing::debug;

use super::{Error, Result, Store};

/// Tables the export menu may name, with their canonical spelling.
const EXPORTABLE_TABLES: &[&str] = &[
    "Students",
    "Grades",
    "Attendance",
    "Classes",
    "Student_Class",
    "Grades_Scale",
];

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(v) => v.to_string(),
        ValueRef::Text(v) => String::from_utf8_lossy(v).into_owned(),
        ValueRef::Blob(_) => String::new(),
    }
}

impl Store {
    /// Dump one whitelisted table to `<table>_<YYYY-MM-DD>.csv` under `dir`,
    /// header row first, overwriting any existing file. The table name is
    /// matched case-insensitively against the whitelist; nothing else is
    /// ever spliced into the query.
    pub fn export_table(&self, table: &str, dir: &Path) -> Result<PathBuf> {
        let requested = table.trim();
        let canonical = EXPORTABLE_TABLES
            .iter()
            .find(|t| t.eq_ignore_ascii_case(requested))
            .ok_or_else(|| Error::UnknownTable(requested.to_string()))?;

        let mut stmt = self
            .conn()
            .prepare(&format!("SELECT * FROM {}", canonical))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut out = String::new();
        out.push_str(&columns.iter().map(|c| csv_quote(c)).collect::<Vec<_>>().join(","));
        out.push('\n');

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut fields = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                fields.push(csv_quote(&render_value(row.get_ref(i)?)));
            }
            out.push_str(&fields.join(","));
            out.push('\n');
        }

        let today = Local::now().format("%Y-%m-%d");
        let path = dir.join(format!("{}_{}.csv", canonical.to_lowercase(), today));
        std::fs::write(&path, out)?;
        debug!(table = canonical, path = %path.display(), "table exported");
        Ok(path)
    }

    /// Composite export: every student with their class (or blank when
    /// unassigned), written to the fixed filename `student_data.csv`.
    pub fn export_roster(&self, dir: &Path) -> Result<PathBuf> {
        let mut out = String::from("Student ID,Student Name,Class\n");
        for row in self.list_students()? {
            out.push_str(&format!(
                "{},{},{}\n",
                row.id,
                csv_quote(&row.name),
                csv_quote(row.class_name.as_deref().unwrap_or("Unassigned")),
            ));
        }
        let path = dir.join("student_data.csv");
        std::fs::write(&path, out)?;
        debug!(path = %path.display(), "roster exported");
        Ok(path)
    }
}
