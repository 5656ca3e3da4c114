use chrono::Local;
use schoolbook::store::{Error, Store};
use tempfile::TempDir;

fn open_store() -> Store {
    Store::open_in_memory().expect("open in-memory store")
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("read export")
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn unknown_table_is_rejected_and_no_file_is_written() {
    let store = open_store();
    let dir = TempDir::new().expect("temp dir");

    let err = store.export_table("Teachers", dir.path()).unwrap_err();
    assert!(matches!(err, Error::UnknownTable(ref name) if name == "Teachers"));
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn students_export_round_trips_headers_and_row_count() {
    let store = open_store();
    let dir = TempDir::new().expect("temp dir");
    store.add_student("Ana").expect("add Ana");
    store.add_student("Ben, Jr.").expect("add Ben");

    let path = store.export_table("Students", dir.path()).expect("export");
    let today = Local::now().format("%Y-%m-%d");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(format!("students_{}.csv", today).as_str())
    );

    let lines = read_lines(&path);
    assert_eq!(lines[0], "id,name,registration_date");
    assert_eq!(lines.len() - 1, store.list_students().expect("roster").len());
    // Field with a comma must come back quoted.
    assert!(lines[2].contains("\"Ben, Jr.\""));
}

#[test]
fn table_name_matching_is_case_insensitive() {
    let store = open_store();
    let dir = TempDir::new().expect("temp dir");
    let path = store.export_table("grades_scale", dir.path()).expect("export");
    let lines = read_lines(&path);
    assert_eq!(lines[0], "id,grade_level");
    // Seeded vocabulary: levels 1 through 6.
    assert_eq!(lines.len() - 1, 6);
}

#[test]
fn roster_export_uses_the_fixed_filename() {
    let store = open_store();
    let dir = TempDir::new().expect("temp dir");
    let ana = store.add_student("Ana").expect("add Ana");
    store.add_student("Ben").expect("add Ben");
    store.add_class("Room1", 3).expect("add class");
    store.assign_student(ana, "Room1").expect("assign");

    let path = store.export_roster(dir.path()).expect("export roster");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("student_data.csv"));

    let lines = read_lines(&path);
    assert_eq!(lines[0], "Student ID,Student Name,Class");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("Ana,Room1"));
    assert!(lines[2].ends_with("Ben,Unassigned"));
}

#[test]
fn export_overwrites_an_existing_file() {
    let store = open_store();
    let dir = TempDir::new().expect("temp dir");
    store.add_student("Ana").expect("add Ana");
    let first = store.export_table("Students", dir.path()).expect("first export");
    assert_eq!(read_lines(&first).len(), 2);

    store.add_student("Ben").expect("add Ben");
    let second = store.export_table("Students", dir.path()).expect("second export");
    assert_eq!(first, second);
    assert_eq!(read_lines(&second).len(), 3);
}
