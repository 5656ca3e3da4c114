use schoolbook::store::{Error, Store};

fn open_store() -> Store {
    Store::open_in_memory().expect("open in-memory store")
}

#[test]
fn grade_requires_an_existing_student() {
    let store = open_store();
    let err = store.add_grade(1, "Math", 95).unwrap_err();
    assert!(matches!(err, Error::StudentNotFound(1)));
    assert!(store.list_grades().expect("all grades").is_empty());
}

#[test]
fn grade_requires_a_class_assignment() {
    let store = open_store();
    let id = store.add_student("Ana").expect("add student");
    let err = store.add_grade(id, "Math", 95).unwrap_err();
    assert!(matches!(err, Error::StudentUnassigned(found) if found == id));
    assert!(store.student_grades(id).expect("student grades").is_empty());
}

#[test]
fn grade_value_is_not_range_checked() {
    let store = open_store();
    let id = store.add_student("Ana").expect("add student");
    store.add_class("Room1", 3).expect("add class");
    store.assign_student(id, "Room1").expect("assign");

    // Only the grade level's presence in the scale is checked.
    store.add_grade(id, "Math", 450).expect("oversized grade");
    let rows = store.student_grades(id).expect("student grades");
    assert_eq!(rows[0].grade, 450);
}

#[test]
fn reports_are_ordered_by_student_level_then_subject() {
    let store = open_store();
    let ana = store.add_student("Ana").expect("add Ana");
    let ben = store.add_student("Ben").expect("add Ben");
    store.add_class("RoomA", 1).expect("add RoomA");
    store.add_class("RoomB", 2).expect("add RoomB");
    store.assign_student(ana, "RoomB").expect("assign Ana");
    store.assign_student(ben, "RoomA").expect("assign Ben");

    store.add_grade(ana, "Math", 90).expect("Ana Math");
    store.add_grade(ana, "Art", 85).expect("Ana Art");
    store.add_grade(ben, "Science", 70).expect("Ben Science");

    let rows = store.list_grades().expect("all grades");
    let order: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.student_name.as_str(), r.subject.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![("Ana", "Art"), ("Ana", "Math"), ("Ben", "Science")]
    );
}

// End-to-end flow: roster, class, assignment, grade, then deletion wiping
// the student's report.
#[test]
fn ana_scenario_end_to_end() {
    let store = open_store();

    let ana = store.add_student("Ana").expect("add Ana");
    let roster = store.list_students().expect("roster");
    assert_eq!(roster[0].class_name, None);

    store.add_class("Room1", 3).expect("add Room1");
    store.assign_student(ana, "Room1").expect("assign Ana");
    let roster = store.list_students().expect("roster");
    assert_eq!(roster[0].class_name.as_deref(), Some("Room1"));

    store.add_grade(ana, "Math", 95).expect("add grade");
    let grades = store.student_grades(ana).expect("student grades");
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].subject, "Math");
    assert_eq!(grades[0].grade, 95);
    assert_eq!(grades[0].class_name, "Room1");
    assert_eq!(grades[0].grade_level, 3);

    store.delete_student(ana).expect("delete Ana");
    assert!(store.student_grades(ana).expect("student grades").is_empty());
}
