//! The interactive numbered menu. Thin prompt-and-render wrapper around the
//! store; every failure is reported as a single `Error:` line and the menu
//! loop continues.

use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::NaiveDate;

use schoolbook::store::Store;

pub fn run(store: &Store, input: &mut impl BufRead) -> anyhow::Result<()> {
    loop {
        print_menu();
        let Some(choice) = read_menu_choice(input)? else {
            break;
        };
        match choice {
            1 => add_student(store, input)?,
            2 => view_students(store)?,
            3 => search_students(store, input)?,
            4 => update_student(store, input)?,
            5 => delete_student(store, input)?,
            6 => add_grade(store, input)?,
            7 => view_grades(store)?,
            8 => view_student_grades(store, input)?,
            9 => add_attendance(store, input)?,
            10 => view_attendances(store)?,
            11 => view_student_attendance(store, input)?,
            12 => class_management(store, input)?,
            13 => export_data(store, input)?,
            14 => {
                println!("Exiting School Management System...");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}

fn print_menu() {
    println!("\nSchool Management System");
    println!("1. Add Student");
    println!("2. View Students");
    println!("3. Search Students");
    println!("4. Update Student Information");
    println!("5. Delete Student");
    println!("6. Add Grade");
    println!("7. View Grades");
    println!("8. View Student Grades");
    println!("9. Add Attendance");
    println!("10. View Attendances");
    println!("11. View Student Attendance");
    println!("12. Class Management");
    println!("13. Export Data to CSV");
    println!("14. Quit");
}

/// Prompt for one input line. `None` means the input stream ended.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// The menu selector re-prompts until it gets a number (or EOF).
fn read_menu_choice(input: &mut impl BufRead) -> io::Result<Option<i64>> {
    loop {
        let Some(line) = prompt(input, "Choose an option: ")? else {
            return Ok(None);
        };
        match line.parse::<i64>() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => println!("Invalid input. Please enter a number."),
        }
    }
}

/// Numeric prompt inside an operation: a non-numeric answer aborts the
/// operation with a message instead of re-prompting.
fn prompt_number(input: &mut impl BufRead, label: &str) -> io::Result<Option<i64>> {
    let Some(line) = prompt(input, label)? else {
        return Ok(None);
    };
    match line.parse::<i64>() {
        Ok(n) => Ok(Some(n)),
        Err(_) => {
            println!("Error: Invalid input. Please enter a number.");
            Ok(None)
        }
    }
}

fn add_student(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(name) = prompt(input, "Enter student name: ")? else {
        return Ok(());
    };
    let Some(class_name) = prompt(input, "Enter class name (optional): ")? else {
        return Ok(());
    };
    let id = match store.add_student(&name) {
        Ok(id) => id,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    println!("Student added successfully!");
    // A failed assignment leaves the new student row in place, unassigned.
    if !class_name.is_empty() {
        match store.assign_student(id, &class_name) {
            Ok(()) => println!("Student assigned to class '{}'.", class_name),
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(())
}

fn print_roster(rows: &[schoolbook::store::RosterRow]) {
    for row in rows {
        println!("Student ID: {}", row.id);
        println!("Student Name: {}", row.name);
        println!("Class: {}", row.class_name.as_deref().unwrap_or("Unassigned"));
        println!("{}", "-".repeat(30));
    }
}

fn view_students(store: &Store) -> io::Result<()> {
    match store.list_students() {
        Ok(rows) if rows.is_empty() => println!("No students found."),
        Ok(rows) => {
            println!("\nStudents:");
            print_roster(&rows);
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn search_students(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(term) = prompt(input, "Enter student name (or part of the name) to search: ")? else {
        return Ok(());
    };
    match store.search_students(&term) {
        Ok(rows) if rows.is_empty() => println!("No students found matching the search term."),
        Ok(rows) => {
            println!("\nSearch Results:");
            print_roster(&rows);
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn update_student(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt_number(input, "Enter student ID to update: ")? else {
        return Ok(());
    };
    let Some(new_name) = prompt(input, "Enter new student name (leave blank to keep old name): ")?
    else {
        return Ok(());
    };
    if new_name.is_empty() {
        println!("Student name remains unchanged.");
    } else {
        match store.rename_student(id, &new_name) {
            Ok(()) => println!("Student name updated to '{}'.", new_name),
            Err(e) => {
                println!("Error: {}", e);
                return Ok(());
            }
        }
    }

    let Some(answer) = prompt(input, "Update class assignment? (yes/no): ")? else {
        return Ok(());
    };
    if answer.to_lowercase() != "yes" {
        return Ok(());
    }
    let Some(class_name) =
        prompt(input, "Enter new class name (leave blank to keep current class): ")?
    else {
        return Ok(());
    };
    if class_name.is_empty() {
        return Ok(());
    }
    match store.assign_student(id, &class_name) {
        Ok(()) => println!("Student assigned to class '{}'.", class_name),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn delete_student(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt_number(input, "Enter student ID to delete: ")? else {
        return Ok(());
    };
    let student = match store.get_student(id) {
        Ok(Some(s)) => s,
        Ok(None) => {
            println!("Error: Student not found.");
            return Ok(());
        }
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    let label = format!(
        "Are you sure you want to delete student '{}'? This will also remove their grades and attendance records. (yes/no): ",
        student.name
    );
    let Some(answer) = prompt(input, &label)? else {
        return Ok(());
    };
    if answer.to_lowercase() != "yes" {
        println!("Deletion cancelled.");
        return Ok(());
    }
    match store.delete_student(id) {
        Ok(()) => println!("Student deleted successfully."),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn add_grade(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(student_id) = prompt_number(input, "Enter student ID: ")? else {
        return Ok(());
    };
    let Some(subject) = prompt(input, "Enter subject name: ")? else {
        return Ok(());
    };
    let Some(grade) = prompt_number(input, "Enter grade (must be a number): ")? else {
        return Ok(());
    };
    match store.add_grade(student_id, &subject, grade) {
        Ok(_) => println!("Grade added successfully!"),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn view_grades(store: &Store) -> io::Result<()> {
    match store.list_grades() {
        Ok(rows) if rows.is_empty() => println!("No grades found."),
        Ok(rows) => {
            println!("\nAll Grades:");
            for row in rows {
                println!("Student Name: {}", row.student_name);
                println!("Class: {} (Grade {})", row.class_name, row.grade_level);
                println!("Subject: {}", row.subject);
                println!("Grade: {}", row.grade);
                println!("{}", "-".repeat(30));
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn view_student_grades(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(student_id) = prompt_number(input, "Enter student ID: ")? else {
        return Ok(());
    };
    match store.student_grades(student_id) {
        Ok(rows) if rows.is_empty() => println!("No grades found for this student."),
        Ok(rows) => {
            println!("\nStudent Grades:");
            for row in rows {
                println!("Subject: {}", row.subject);
                println!("Grade: {}", row.grade);
                println!("{}", "-".repeat(30));
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn add_attendance(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(student_id) = prompt_number(input, "Enter student ID: ")? else {
        return Ok(());
    };
    let Some(date_text) =
        prompt(input, "Enter date (YYYY-MM-DD) (optional, defaults to today): ")?
    else {
        return Ok(());
    };
    let date = if date_text.is_empty() {
        None
    } else {
        match NaiveDate::parse_from_str(&date_text, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                println!("Error: Invalid date. Expected YYYY-MM-DD.");
                return Ok(());
            }
        }
    };
    let Some(status) = prompt(input, "Enter attendance status (present/absent): ")? else {
        return Ok(());
    };
    let present = status.to_lowercase() == "present";
    match store.add_attendance(student_id, date, present) {
        Ok(_) => println!("Attendance added successfully!"),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn print_attendance(rows: &[schoolbook::store::AttendanceRow], with_name: bool) {
    for row in rows {
        if with_name {
            println!("Student Name: {}", row.student_name);
        }
        println!("Date: {}", row.date);
        println!(
            "Attendance: {}",
            if row.present { "Present" } else { "Absent" }
        );
        println!("{}", "-".repeat(30));
    }
}

fn view_attendances(store: &Store) -> io::Result<()> {
    match store.list_attendance() {
        Ok(rows) if rows.is_empty() => println!("No attendance records found."),
        Ok(rows) => {
            println!("\nAll Attendance Records:");
            print_attendance(&rows, true);
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn view_student_attendance(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(student_id) = prompt_number(input, "Enter student ID: ")? else {
        return Ok(());
    };
    match store.student_attendance(student_id) {
        Ok(rows) if rows.is_empty() => println!("No attendance records found for this student."),
        Ok(rows) => {
            println!("\nStudent Attendance Records:");
            print_attendance(&rows, false);
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn class_management(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    println!("\nClass Management:");
    println!("1. Add Class");
    println!("2. View Classes");
    println!("3. Assign Student to Class");
    println!("4. View Students in a Class");
    let Some(choice) = prompt_number(input, "Enter choice (number) for class management: ")? else {
        return Ok(());
    };
    match choice {
        1 => add_class(store, input),
        2 => view_classes(store),
        3 => assign_student_to_class(store, input),
        4 => view_students_in_class(store, input),
        _ => {
            println!("Invalid choice.");
            Ok(())
        }
    }
}

fn add_class(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(name) = prompt(input, "Enter class name: ")? else {
        return Ok(());
    };
    let Some(grade_level) = prompt_number(input, "Enter grade level (1-6): ")? else {
        return Ok(());
    };
    match store.add_class(&name, grade_level) {
        Ok(_) => println!("Class added successfully!"),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

/// List classes so the user can type an exact name at the next prompt.
/// Returns false when there is nothing to pick from.
fn print_available_classes(store: &Store) -> io::Result<bool> {
    match store.list_classes() {
        Ok(classes) if classes.is_empty() => {
            println!("No classes found.");
            Ok(false)
        }
        Ok(classes) => {
            println!("\nAvailable Classes:");
            for class in classes {
                println!("{} (Grade {})", class.name, class.grade_level);
            }
            Ok(true)
        }
        Err(e) => {
            println!("Error: {}", e);
            Ok(false)
        }
    }
}

fn view_classes(store: &Store) -> io::Result<()> {
    match store.list_classes() {
        Ok(classes) if classes.is_empty() => println!("No classes found."),
        Ok(classes) => {
            println!("\nAll Classes:");
            for class in classes {
                println!("Class ID: {}", class.id);
                println!("Class Name: {}", class.name);
                println!("Grade Level: {}", class.grade_level);
                println!("{}", "-".repeat(30));
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn assign_student_to_class(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(student_id) = prompt_number(input, "Enter student ID: ")? else {
        return Ok(());
    };
    if !print_available_classes(store)? {
        return Ok(());
    }
    let Some(class_name) = prompt(input, "Enter class name to assign student: ")? else {
        return Ok(());
    };
    match store.assign_student(student_id, &class_name) {
        Ok(()) => println!("Student assigned to class successfully!"),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn view_students_in_class(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    if !print_available_classes(store)? {
        return Ok(());
    }
    let Some(class_name) = prompt(input, "Enter class name to view students: ")? else {
        return Ok(());
    };
    match store.students_in_class(&class_name) {
        Ok(rows) if rows.is_empty() => println!("No students found in this class."),
        Ok(rows) => {
            println!("\nStudents Enrolled:");
            for (id, name) in rows {
                println!("Student ID: {}", id);
                println!("Student Name: {}", name);
                println!("{}", "-".repeat(30));
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn export_data(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let label = "Enter the table name to export (Students, Grades, Attendance, Classes, \
                 Student_Class, Grades_Scale) or 'roster' for the student roster: ";
    let Some(choice) = prompt(input, label)? else {
        return Ok(());
    };
    let result = if choice.eq_ignore_ascii_case("roster") {
        store.export_roster(Path::new("."))
    } else {
        store.export_table(&choice, Path::new("."))
    };
    match result {
        Ok(path) => println!("Data exported successfully to '{}'.", path.display()),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}
