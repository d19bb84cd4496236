use std::path::Path;

use chrono::NaiveDate;

use crate::io::IoError;
use crate::model::{Category, Task};

/// Map a status/category string to a workflow category.
fn parse_category(s: &str) -> Category {
    match s.trim().to_lowercase().as_str() {
        "completed" | "complete" | "done" | "finished" => Category::Completed,
        "review" | "in review" | "in-review" | "qa" => Category::Review,
        "in progress" | "in-progress" | "inprogress" | "doing" | "active" | "started" => {
            Category::InProgress
        }
        _ => Category::Todo,
    }
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &[
        "%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%m-%d-%Y",
    ] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = name, 1 = start, 2 = end, 3 = category
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "name" | "task" | "taskname" | "tasklabel" | "label" | "title" | "activity" => Some(0),

        "start" | "startdate" | "from" | "begin" | "begindate" => Some(1),

        "end" | "enddate" | "to" | "finish" | "finishdate" | "due" | "duedate" => Some(2),

        "category" | "status" | "state" | "lane" | "column" | "stage" => Some(3),

        _ => None,
    }
}

/// Import tasks from a CSV file.
///
/// Auto-detects the delimiter (comma, semicolon, tab) and matches column
/// headers flexibly (e.g. "Task Name", "Start Date", "Status"). Rows with
/// a missing name or unparseable dates are skipped and counted; an
/// inverted date pair is swapped rather than refused.
/// Returns `(tasks, skipped_count)` on success.
pub fn import_csv(path: &Path) -> Result<(Vec<Task>, usize), IoError> {
    let content = std::fs::read_to_string(path)?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has_name = col_map.iter().any(|c| *c == Some(0));
    let has_start = col_map.iter().any(|c| *c == Some(1));
    let has_end = col_map.iter().any(|c| *c == Some(2));

    if !has_name || !has_start || !has_end {
        let found: Vec<&str> = headers.iter().collect();
        return Err(IoError::InvalidData(format!(
            "CSV is missing required columns. Found headers: {:?}. \
             Need columns for: task name, start date, end date.",
            found
        )));
    }

    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut name_val = None;
        let mut start_val = None;
        let mut end_val = None;
        let mut category_val = None;

        for (col_idx, field) in record.iter().enumerate() {
            if col_idx < col_map.len() {
                match col_map[col_idx] {
                    Some(0) => name_val = Some(field.trim().to_string()),
                    Some(1) => start_val = Some(field.trim().to_string()),
                    Some(2) => end_val = Some(field.trim().to_string()),
                    Some(3) => category_val = Some(field.trim().to_string()),
                    _ => {}
                }
            }
        }

        let name = match name_val {
            Some(n) if !n.is_empty() => n,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let start = match start_val.as_deref().and_then(parse_date) {
            Some(d) => d,
            None => {
                log::warn!(
                    "skipping row {}: invalid start date '{}'",
                    i + 2,
                    start_val.as_deref().unwrap_or("")
                );
                skipped += 1;
                continue;
            }
        };

        let end = match end_val.as_deref().and_then(parse_date) {
            Some(d) => d,
            None => {
                log::warn!(
                    "skipping row {}: invalid end date '{}'",
                    i + 2,
                    end_val.as_deref().unwrap_or("")
                );
                skipped += 1;
                continue;
            }
        };

        // Task::new orders an inverted pair itself.
        let mut task = Task::new(name, start, end);
        task.category = category_val.as_deref().map(parse_category).unwrap_or_default();
        tasks.push(task);
    }

    if tasks.is_empty() && skipped > 0 {
        return Err(IoError::InvalidData(format!(
            "no valid tasks found in CSV ({} rows skipped)",
            skipped
        )));
    }
    if tasks.is_empty() {
        return Err(IoError::InvalidData(
            "CSV file is empty or has no data rows".to_string(),
        ));
    }

    Ok((tasks, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("import.csv");
        std::fs::write(&path, content).expect("write");
        (dir, path)
    }

    #[test]
    fn imports_semicolon_delimited_rows() {
        let (_dir, path) = write_csv(
            "Name;Start;End;Category\n\
             Design review;2024-06-10;2024-06-12;Review\n\
             Fix login bug;2024-06-18;2024-06-21;In Progress\n",
        );
        let (tasks, skipped) = import_csv(&path).expect("import");
        assert_eq!(skipped, 0);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "Design review");
        assert_eq!(tasks[0].category, Category::Review);
        assert_eq!(tasks[1].category, Category::InProgress);
        assert_eq!(tasks[1].start, d(2024, 6, 18));
    }

    #[test]
    fn detects_commas_and_flexible_headers() {
        let (_dir, path) = write_csv(
            "Task Name,Start Date,Due Date,Status\n\
             Ship release,01/07/2024,03/07/2024,done\n",
        );
        let (tasks, skipped) = import_csv(&path).expect("import");
        assert_eq!(skipped, 0);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Ship release");
        assert_eq!(tasks[0].category, Category::Completed);
        assert_eq!(tasks[0].start, d(2024, 7, 1));
        assert_eq!(tasks[0].end, d(2024, 7, 3));
    }

    #[test]
    fn skips_rows_with_bad_dates_and_counts_them() {
        let (_dir, path) = write_csv(
            "Name;Start;End\n\
             Good;2024-06-10;2024-06-12\n\
             Bad;not-a-date;2024-06-12\n\
             ;2024-06-10;2024-06-12\n",
        );
        let (tasks, skipped) = import_csv(&path).expect("import");
        assert_eq!(tasks.len(), 1);
        assert_eq!(skipped, 2);
        assert_eq!(tasks[0].name, "Good");
    }

    #[test]
    fn swaps_inverted_date_pairs() {
        let (_dir, path) = write_csv(
            "Name;Start;End\n\
             Backwards;2024-06-20;2024-06-10\n",
        );
        let (tasks, _) = import_csv(&path).expect("import");
        assert_eq!(tasks[0].start, d(2024, 6, 10));
        assert_eq!(tasks[0].end, d(2024, 6, 20));
    }

    #[test]
    fn unknown_category_defaults_to_todo() {
        let (_dir, path) = write_csv(
            "Name;Start;End;Category\n\
             Mystery;2024-06-10;2024-06-12;someday-maybe\n",
        );
        let (tasks, _) = import_csv(&path).expect("import");
        assert_eq!(tasks[0].category, Category::Todo);
    }

    #[test]
    fn missing_required_columns_is_an_error() {
        let (_dir, path) = write_csv("Name;Category\nNo dates;todo\n");
        let err = import_csv(&path).expect_err("should fail");
        assert!(err.to_string().contains("missing required columns"));
    }

    #[test]
    fn file_with_only_bad_rows_is_an_error() {
        let (_dir, path) = write_csv(
            "Name;Start;End\n\
             Bad;nope;also-nope\n",
        );
        let err = import_csv(&path).expect_err("should fail");
        assert!(err.to_string().contains("no valid tasks"));
    }
}
