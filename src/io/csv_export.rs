use std::path::Path;

use crate::io::IoError;
use crate::model::Task;

/// Export tasks to a semicolon-delimited CSV file matching the import format.
///
/// Columns: Name ; Start ; End ; Category
/// Dates are formatted as YYYY-MM-DD.
/// Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize, IoError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(["Name", "Start", "End", "Category"])?;

    for task in tasks {
        wtr.write_record([
            &task.name,
            &task.start.format("%Y-%m-%d").to_string(),
            &task.end.format("%Y-%m-%d").to_string(),
            task.category.label(),
        ])?;
    }

    wtr.flush()?;
    Ok(tasks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn writes_header_and_one_row_per_task() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.csv");

        let mut done = Task::new("Design review", d(2024, 6, 10), d(2024, 6, 12));
        done.category = Category::Completed;
        let todo = Task::new("Fix login bug", d(2024, 6, 18), d(2024, 6, 21));

        let written = export_csv(&[done, todo], &path).expect("export");
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Name;Start;End;Category");
        assert_eq!(lines[1], "Design review;2024-06-10;2024-06-12;Completed");
        assert_eq!(lines[2], "Fix login bug;2024-06-18;2024-06-21;To Do");
    }

    #[test]
    fn exported_file_imports_back_unchanged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.csv");

        let mut review = Task::new("Design review", d(2024, 6, 10), d(2024, 6, 12));
        review.category = Category::Review;
        export_csv(&[review], &path).expect("export");

        let (tasks, skipped) = crate::io::csv_import::import_csv(&path).expect("import");
        assert_eq!(skipped, 0);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Design review");
        assert_eq!(tasks[0].category, Category::Review);
        assert_eq!(tasks[0].start, d(2024, 6, 10));
        assert_eq!(tasks[0].end, d(2024, 6, 12));
    }
}
