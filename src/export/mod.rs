//! Workbook export.
//!
//! A workbook is an ordered list of named sheets. There is no spreadsheet
//! writer in the dependency stack, so workbooks are written as a directory
//! with one CSV file per sheet.

pub mod diary;
pub mod evaluation;
pub mod writer;

use serde::Serialize;

pub use diary::diary_workbook;
pub use evaluation::evaluation_workbook;
pub use writer::{CsvBundleWriter, WorkbookWriter};

/// Name used in export files when the user left theirs empty.
pub const ANONYMOUS_USER: &str = "usuario";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Two-column convenience for question/answer and metric/value sheets.
    pub fn pair(&mut self, key: impl Into<String>, value: impl ToString) {
        self.rows.push(vec![key.into(), value.to_string()]);
    }

    /// Value in the second column of the first row whose first column is `key`.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.first().map(String::as_str) == Some(key))
            .and_then(|row| row.get(1))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workbook {
    /// File name without extension.
    pub stem: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Keeps letters, digits, `-` and `_`; everything else becomes `_`.
fn sanitize_file_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// `Evaluation_<COUNTRY_CODE>_<name>`.
pub fn export_file_stem(country_code: &str, user_name: &str) -> String {
    let name = match sanitize_file_component(user_name) {
        name if name.is_empty() => ANONYMOUS_USER.to_string(),
        name => name,
    };
    format!("Evaluation_{}_{}", sanitize_file_component(country_code), name)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
