use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use std::path::Path;

use crate::error::SplitError;

/// Characters that may not appear in a filename on common platforms.
const ILLEGAL_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// The first column of a spreadsheet, row by row, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSource {
    entries: Vec<Option<String>>,
    /// Rows skipped above the first entry, so errors can cite spreadsheet rows
    header_rows: usize,
}

/// Validated output names, in chunk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameList {
    names: Vec<String>,
}

impl NameSource {
    #[cfg(test)]
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        NameSource {
            entries: cells.into_iter().map(|c| c.map(Into::into)).collect(),
            header_rows: 0,
        }
    }

    /// Read the first column of a worksheet.
    ///
    /// Uses the first sheet unless `sheet` names one. With `has_header`, the
    /// first row of the used range is a column title and is skipped.
    pub fn load<P: AsRef<Path>>(path: P, sheet: Option<&str>, has_header: bool) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

        let range = match sheet {
            Some(name) => workbook
                .worksheet_range(name)
                .with_context(|| format!("Failed to read sheet '{}' of {}", name, path.display()))?,
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| anyhow!("Spreadsheet has no worksheets: {}", path.display()))?
                .with_context(|| format!("Failed to read first sheet of {}", path.display()))?,
        };

        Ok(Self::from_range(&range, has_header))
    }

    fn from_range(range: &Range<Data>, has_header: bool) -> Self {
        let Some((start_row, start_col)) = range.start() else {
            return NameSource::default();
        };

        // The used range starts right of column A, so column A is blank throughout
        let in_first_column = start_col == 0;
        let skip = usize::from(has_header);

        let entries = range
            .rows()
            .skip(skip)
            .map(|row| {
                if in_first_column {
                    row.first().and_then(cell_to_name)
                } else {
                    None
                }
            })
            .collect();

        NameSource {
            entries,
            header_rows: start_row as usize + skip,
        }
    }

    /// Reject an empty column or any blank cell.
    ///
    /// A cell counts as blank when it is missing, holds only whitespace, or
    /// holds only characters that sanitization strips.
    pub(crate) fn validate(&self) -> Result<NameList, SplitError> {
        if self.entries.is_empty() {
            return Err(SplitError::invalid_input("the spreadsheet is empty"));
        }

        let mut names = Vec::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            match entry {
                Some(name) if !sanitize_filename(name).is_empty() => names.push(name.clone()),
                _ => {
                    return Err(SplitError::invalid_input(format!(
                        "row {} of the first column is empty",
                        self.header_rows + i + 1
                    )));
                }
            }
        }

        Ok(NameList { names })
    }
}

impl NameList {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Strip characters that are illegal in filenames and trim whitespace.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c) && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn output_file_name(name: &str) -> String {
    format!("{}.pdf", sanitize_filename(name))
}

fn cell_to_name(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) => Some(s.clone()),
        Data::DateTime(dt) if !dt.is_duration() => cell
            .as_datetime()
            .map(|value| value.format("%Y-%m-%d %H:%M:%S").to_string()),
        // Spreadsheets store most numbers as floats; "1024.0" should name "1024"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}
