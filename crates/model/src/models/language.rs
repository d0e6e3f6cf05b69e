use std::fmt::{Display, Formatter, Result as FmtResult};

use super::{FileType, WorksheetInfo};

/// All worksheets available in one language: a snapshot.
///
/// Worksheets are keyed by [`WorksheetInfo::page`] and kept in the order they
/// were added, which is also the order changes are reported in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    language_code: String,
    /// May be empty if the name couldn't be looked up
    english_name: String,
    worksheets: Vec<WorksheetInfo>,
}
impl LanguageInfo {
    pub fn new(language_code: impl Into<String>, english_name: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            english_name: english_name.into(),
            worksheets: Vec::new(),
        }
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn english_name(&self) -> &str {
        &self.english_name
    }

    /// Adds a worksheet. A worksheet with the same page replaces the existing
    /// one in place.
    pub fn add_worksheet_info(&mut self, worksheet: WorksheetInfo) {
        match self.position(worksheet.page()) {
            Some(index) => self.worksheets[index] = worksheet,
            None => self.worksheets.push(worksheet),
        }
    }

    pub fn has_worksheet(&self, page: &str) -> bool {
        self.position(page).is_some()
    }

    pub fn worksheet(&self, page: &str) -> Option<&WorksheetInfo> {
        self.worksheets.iter().find(|w| w.page() == page)
    }

    /// Worksheets in insertion order.
    pub fn worksheets(&self) -> &[WorksheetInfo] {
        &self.worksheets
    }

    pub fn worksheet_has_type(&self, page: &str, file_type: FileType) -> bool {
        self.worksheet(page).is_some_and(|w| w.has_file_type(file_type))
    }

    /// Worksheets that are translated but have no PDF yet.
    pub fn worksheets_with_missing_pdf(&self) -> Vec<&str> {
        self.worksheets
            .iter()
            .filter(|w| !w.has_file_type(FileType::Pdf))
            .map(WorksheetInfo::page)
            .collect()
    }

    /// A translation counts as finished once its PDF is published.
    pub fn count_finished_translations(&self) -> usize {
        self.worksheets.iter().filter(|w| w.has_file_type(FileType::Pdf)).count()
    }

    fn position(&self, page: &str) -> Option<usize> {
        self.worksheets.iter().position(|w| w.page() == page)
    }
}
impl Display for LanguageInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} ({}): {} worksheets",
            self.language_code,
            self.english_name,
            self.worksheets.len()
        )
    }
}
