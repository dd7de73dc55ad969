use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The digitization platform export puts school metadata and the column
/// headings in the first 8 rows; the class list starts on row 9.
pub const TABLE_HEADER_ROWS: usize = 8;
pub const FIRST_NAME_COL: usize = 1;
pub const LAST_NAME_COL: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub is_exempted: bool,
}

impl Student {
    fn numbered(position: usize, name: String) -> Self {
        Self {
            id: u32::try_from(position + 1).unwrap_or(u32::MAX),
            name,
            is_exempted: false,
        }
    }
}

/// Builds a roster from a spreadsheet grid.
///
/// Best effort: rows without a first name are skipped, never reported. Ids
/// follow the emitted order, not the source row numbers.
pub fn import_from_table<R, C>(rows: &[R]) -> Vec<Student>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    rows.iter()
        .skip(TABLE_HEADER_ROWS)
        .filter_map(|row| {
            let row = row.as_ref();
            let first = cell(row, FIRST_NAME_COL);
            if first.is_empty() {
                return None;
            }
            let last = cell(row, LAST_NAME_COL);
            Some(if last.is_empty() {
                first.to_string()
            } else {
                format!("{} {}", first, last)
            })
        })
        .enumerate()
        .map(|(i, name)| Student::numbered(i, name))
        .collect()
}

fn cell<C: AsRef<str>>(row: &[C], col: usize) -> &str {
    row.get(col).map(|c| c.as_ref().trim()).unwrap_or("")
}

/// One student per non-blank line.
pub fn import_from_text(text: &str) -> Vec<Student> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| Student::numbered(i, line.to_string()))
        .collect()
}

/// Comma separated ids; anything that is not an integer is dropped.
pub fn parse_exemption_list(text: &str) -> HashSet<u32> {
    text.split(',')
        .filter_map(|token| token.trim().parse::<u32>().ok())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn exempted_count(&self) -> usize {
        self.students.iter().filter(|s| s.is_exempted).count()
    }

    /// Imports never merge.
    pub fn replace(&mut self, students: Vec<Student>) {
        self.students = students;
    }

    pub fn clear(&mut self) {
        self.students.clear();
    }

    /// Returns the new flag, or `None` when no student has `id`.
    pub fn toggle_exempt(&mut self, id: u32) -> Option<bool> {
        let student = self.students.iter_mut().find(|s| s.id == id)?;
        student.is_exempted = !student.is_exempted;
        Some(student.is_exempted)
    }

    /// Overwrites every flag from the list, including manual toggles.
    pub fn apply_exemption_list(&mut self, text: &str) -> usize {
        let ids = parse_exemption_list(text);
        for student in &mut self.students {
            student.is_exempted = ids.contains(&student.id);
        }
        self.exempted_count()
    }
}
