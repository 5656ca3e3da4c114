use schoolbook::store::{Error, Store};

fn open_store() -> Store {
    Store::open_in_memory().expect("open in-memory store")
}

#[test]
fn grade_level_outside_1_to_6_is_rejected() {
    let store = open_store();
    assert!(matches!(
        store.add_class("Room0", 0).unwrap_err(),
        Error::GradeLevelOutOfRange(0)
    ));
    assert!(matches!(
        store.add_class("Room7", 7).unwrap_err(),
        Error::GradeLevelOutOfRange(7)
    ));
    assert!(store.list_classes().expect("list classes").is_empty());
}

#[test]
fn seeded_scale_accepts_every_level_in_range() {
    let store = open_store();
    for level in 1..=6 {
        store
            .add_class(&format!("Room{}", level), level)
            .expect("add class at seeded level");
    }
    assert_eq!(store.list_classes().expect("list classes").len(), 6);
}

#[test]
fn duplicate_class_name_is_rejected_with_no_second_row() {
    let store = open_store();
    store.add_class("Room1", 3).expect("add class");
    let err = store.add_class("Room1", 4).unwrap_err();
    assert!(matches!(err, Error::DuplicateClass(ref name) if name == "Room1"));
    assert_eq!(store.list_classes().expect("list classes").len(), 1);
}

#[test]
fn assigning_to_unknown_class_leaves_student_unassigned() {
    let store = open_store();
    let id = store.add_student("Ana").expect("add student");

    let err = store.assign_student(id, "Nowhere").unwrap_err();
    assert!(matches!(err, Error::ClassNotFound(ref name) if name == "Nowhere"));

    let rows = store.list_students().expect("list students");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].class_name, None);
}

#[test]
fn assigning_unknown_student_reports_not_found() {
    let store = open_store();
    store.add_class("Room1", 3).expect("add class");
    let err = store.assign_student(42, "Room1").unwrap_err();
    assert!(matches!(err, Error::StudentNotFound(42)));
    assert!(store
        .students_in_class("Room1")
        .expect("students in class")
        .is_empty());
}

#[test]
fn reassignment_replaces_the_prior_assignment() {
    let store = open_store();
    let id = store.add_student("Ana").expect("add student");
    store.add_class("Room1", 3).expect("add Room1");
    store.add_class("Room2", 4).expect("add Room2");

    store.assign_student(id, "Room1").expect("first assign");
    store.assign_student(id, "Room2").expect("reassign");

    assert!(store
        .students_in_class("Room1")
        .expect("Room1 roster")
        .is_empty());
    let room2 = store.students_in_class("Room2").expect("Room2 roster");
    assert_eq!(room2, vec![(id, "Ana".to_string())]);

    let rows = store.list_students().expect("list students");
    assert_eq!(rows[0].class_name.as_deref(), Some("Room2"));
}

#[test]
fn students_in_unknown_class_is_an_error() {
    let store = open_store();
    let err = store.students_in_class("Nowhere").unwrap_err();
    assert!(matches!(err, Error::ClassNotFound(_)));
}
