use crate::domain::model::{Roster, Student};
use crate::utils::error::Result;
use std::io::Write;

/// The grade `find` looks for.
pub const FAILING_GRADE: i32 = 2;

pub const EMPTY_ROSTER_MESSAGE: &str = "Student roster is empty.";

const NO_WIDTH: usize = 4;
const NAME_WIDTH: usize = 30;
const GROUP_WIDTH: usize = 20;
const PERFORMANCE_WIDTH: usize = 20;

pub fn add_student(
    students: &mut Roster,
    name: impl Into<String>,
    group_number: impl Into<String>,
    performance: Vec<i32>,
) -> &mut Roster {
    let student = Student::new(name, group_number, performance);
    tracing::info!(
        "added student: {}, group: {}",
        student.name,
        student.group_number
    );
    students.push(student);
    students
}

/// Print the roster table to stdout.
pub fn list_students(students: &[Student]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_students(&mut out, students).map_err(|e| {
        tracing::error!("failed to print student list: {}", e);
        e
    })
}

pub fn write_students<W: Write>(out: &mut W, students: &[Student]) -> Result<()> {
    if students.is_empty() {
        writeln!(out, "{}", EMPTY_ROSTER_MESSAGE)?;
        return Ok(());
    }

    let line = format!(
        "+-{}-+-{}-+-{}-+-{}-+",
        "-".repeat(NO_WIDTH),
        "-".repeat(NAME_WIDTH),
        "-".repeat(GROUP_WIDTH),
        "-".repeat(PERFORMANCE_WIDTH)
    );

    writeln!(out, "{}", line)?;
    writeln!(
        out,
        "| {:^w0$} | {:^w1$} | {:^w2$} | {:^w3$} |",
        "No",
        "Name",
        "Group",
        "Performance",
        w0 = NO_WIDTH,
        w1 = NAME_WIDTH,
        w2 = GROUP_WIDTH,
        w3 = PERFORMANCE_WIDTH
    )?;
    writeln!(out, "{}", line)?;

    for (idx, student) in students.iter().enumerate() {
        writeln!(
            out,
            "| {:>w0$} | {:<w1$} | {:<w2$} | {:>w3$} |",
            idx + 1,
            student.name,
            student.group_number,
            student.performance_text(", "),
            w0 = NO_WIDTH,
            w1 = NAME_WIDTH,
            w2 = GROUP_WIDTH,
            w3 = PERFORMANCE_WIDTH
        )?;
    }
    writeln!(out, "{}", line)?;
    Ok(())
}

/// Students holding at least one failing grade.
pub fn find(students: &[Student]) -> Vec<Student> {
    find_with_grade(students, FAILING_GRADE)
}

pub fn find_with_grade(students: &[Student], grade: i32) -> Vec<Student> {
    let found: Vec<Student> = students
        .iter()
        .filter(|s| s.contains_grade(grade))
        .cloned()
        .collect();
    tracing::debug!(
        "found {} of {} students with grade {}",
        found.len(),
        students.len(),
        grade
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> Roster {
        vec![
            Student::new("A", "1", vec![5, 5, 5]),
            Student::new("B", "2", vec![2, 5, 3]),
            Student::new("C", "3", vec![4, 4, 4]),
        ]
    }

    fn render(students: &[Student]) -> String {
        let mut buf = Vec::new();
        write_students(&mut buf, students).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_add_student_appends() {
        let mut roster = sample_roster();
        let len = add_student(&mut roster, "Kuznetsova A.A.", "126", vec![5, 5, 5, 5, 5]).len();

        assert_eq!(len, 4);
        let last = roster.last().unwrap();
        assert_eq!(last.name, "Kuznetsova A.A.");
        assert_eq!(last.group_number, "126");
        assert_eq!(last.performance, vec![5, 5, 5, 5, 5]);
    }

    #[test]
    fn test_add_student_chains() {
        let mut roster = Roster::new();
        add_student(&mut roster, "A", "1", vec![2]);
        add_student(&mut roster, "B", "1", vec![3]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "A");
    }

    #[test]
    fn test_find_returns_only_failing_students() {
        let roster = sample_roster();
        let found = find(&roster);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "B");
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_find_is_exact_match_not_threshold() {
        let roster = vec![
            Student::new("low", "1", vec![1, 1]),
            Student::new("twice", "1", vec![2, 2]),
            Student::new("none", "1", vec![]),
            Student::new("last", "1", vec![5, 2]),
        ];
        let names: Vec<String> = find(&roster).into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["twice", "last"]);
    }

    #[test]
    fn test_find_with_grade() {
        let found = find_with_grade(&sample_roster(), 4);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "C");
    }

    #[test]
    fn test_write_students_empty() {
        let output = render(&[]);
        assert!(output.contains("roster is empty"));
        assert!(!output.contains('+'));
    }

    #[test]
    fn test_write_students_table() {
        let output = render(&sample_roster());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], lines[2]);
        assert_eq!(lines[0], lines[6]);
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
        assert!(lines[1].contains("Performance"));
        assert!(lines[4].starts_with("|    2 | B "));
        assert!(lines[4].ends_with("             2, 5, 3 |"));
    }
}
