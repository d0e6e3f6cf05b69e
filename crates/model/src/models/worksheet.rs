use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::{FileInfo, FileType, TranslationProgress};
use crate::numerals::native_to_standard;

/// One worksheet in one language; only exists for worksheets that are at
/// least partially translated.
///
/// Everything but the file map is fixed at construction. Files are added
/// with [`WorksheetInfo::add_file_info`] and never removed: a vanished file
/// is only ever noticed by comparing against an older snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInfo {
    page: String,
    language_code: String,
    title: String,
    progress: TranslationProgress,
    version: String,
    version_unit: Option<u32>,
    files: BTreeMap<FileType, FileInfo>,
}
impl WorksheetInfo {
    /// `page` is the English name of the worksheet, `title` the translated one.
    pub fn new(
        page: impl Into<String>,
        language_code: impl Into<String>,
        title: impl Into<String>,
        progress: TranslationProgress,
        version: impl Into<String>,
    ) -> Self {
        Self {
            page: page.into(),
            language_code: language_code.into(),
            title: title.into(),
            progress,
            version: version.into(),
            version_unit: None,
            files: BTreeMap::new(),
        }
    }

    /// Translation unit holding the version string. Only stored for English.
    pub fn with_version_unit(mut self, unit: u32) -> Self {
        self.version_unit = Some(unit);
        self
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn progress(&self) -> TranslationProgress {
        self.progress
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn version_unit(&self) -> Option<u32> {
        self.version_unit
    }

    /// Adds a file, replacing any existing file of the same type.
    pub fn add_file_info(&mut self, file: FileInfo) {
        self.files.insert(file.file_type, file);
    }

    /// All files of this worksheet, ordered by file type.
    pub fn files(&self) -> &BTreeMap<FileType, FileInfo> {
        &self.files
    }

    pub fn has_file_type(&self, file_type: FileType) -> bool {
        self.files.contains_key(&file_type)
    }

    pub fn file_info(&self, file_type: FileType) -> Option<&FileInfo> {
        self.files.get(&file_type)
    }

    /// Name (not the full URL) of the file of the given type, or an empty
    /// string if there is none.
    pub fn file_name(&self, file_type: FileType) -> &str {
        self.files.get(&file_type).map_or("", FileInfo::file_name)
    }

    /// Does our version match the version of the English original?
    ///
    /// Native numerals are converted to ASCII digits first, and one trailing
    /// letter is ignored (`2.2b` matches `2.2`). With
    /// `check_only_major_version`, only the first character of both versions
    /// is compared, so `2.0` matches `2.2`.
    ///
    /// Known approximations: the major version is assumed to be a single
    /// leading character (`10.0` matches `1.0`), and suffixes longer than one
    /// letter never match.
    pub fn has_same_version(&self, reference: &WorksheetInfo, check_only_major_version: bool) -> bool {
        if self.version.is_empty() {
            return false;
        }
        let standard = native_to_standard(&self.language_code, &self.version);
        let ours = match standard.chars().next_back() {
            Some(last) if last.is_alphabetic() => &standard[..standard.len() - last.len_utf8()],
            _ => &standard[..],
        };
        if ours == reference.version {
            return true;
        }
        if !check_only_major_version {
            return false;
        }
        match (ours.chars().next(), reference.version.chars().next()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Should this worksheet be listed on the language information page?
    /// Only if it has a PDF and the same major version as the English original.
    pub fn show_in_list(&self, reference: &WorksheetInfo) -> bool {
        self.has_file_type(FileType::Pdf) && self.has_same_version(reference, true)
    }
}
impl Display for WorksheetInfo {
    /// Multi-line dump for debugging.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}: '{}' with version {}", self.page, self.language_code, self.title, self.version)?;
        if let Some(unit) = self.version_unit {
            write!(f, " (in translation unit {unit})")?;
        }
        write!(f, " and progress {} and {} files", self.progress, self.files.len())?;
        if !self.files.is_empty() {
            f.write_str(":")?;
        }
        for file in self.files.values() {
            write!(f, "\n{file}")?;
        }
        Ok(())
    }
}
