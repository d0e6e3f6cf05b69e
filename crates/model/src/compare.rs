//! Diffing two snapshots of the same language.

use crate::models::{ChangeLog, ChangeType, FileType, LanguageInfo, WorksheetInfo};

/// Change types reported for one artifact type: new, updated, deleted.
struct ArtifactRule {
    file_type: FileType,
    new: ChangeType,
    updated: ChangeType,
    deleted: ChangeType,
}

/// Only PDFs and ODTs are reported; other artifact types are tracked but
/// never announced.
const ARTIFACT_RULES: [ArtifactRule; 2] = [
    ArtifactRule {
        file_type: FileType::Pdf,
        new: ChangeType::NewPdf,
        updated: ChangeType::UpdatedPdf,
        deleted: ChangeType::DeletedPdf,
    },
    ArtifactRule {
        file_type: FileType::Odt,
        new: ChangeType::NewOdt,
        updated: ChangeType::UpdatedOdt,
        deleted: ChangeType::DeletedOdt,
    },
];

impl LanguageInfo {
    /// Compares this snapshot to an older one of the same language.
    ///
    /// A new worksheet is reported as [`ChangeType::NewWorksheet`] only, even
    /// if it already has files; likewise a vanished worksheet only yields
    /// [`ChangeType::DeletedWorksheet`]. Changes come in the iteration order
    /// of this snapshot, followed by deletions in the order of `old`.
    ///
    /// Comparing against a snapshot of another language makes no sense and
    /// yields an empty change log.
    pub fn compare(&self, old: &LanguageInfo) -> ChangeLog {
        let mut change_log = ChangeLog::new();
        if self.language_code() != old.language_code() {
            tracing::warn!(
                current = self.language_code(),
                old = old.language_code(),
                "Comparison failed: snapshots belong to different languages"
            );
            return change_log;
        }
        for current in self.worksheets() {
            match old.worksheet(current.page()) {
                Some(previous) => compare_worksheet(&mut change_log, current, previous),
                None => change_log.add_change(current.page(), ChangeType::NewWorksheet),
            }
        }
        for previous in old.worksheets() {
            if !self.has_worksheet(previous.page()) {
                change_log.add_change(previous.page(), ChangeType::DeletedWorksheet);
            }
        }
        change_log
    }
}

fn compare_worksheet(change_log: &mut ChangeLog, current: &WorksheetInfo, previous: &WorksheetInfo) {
    for rule in &ARTIFACT_RULES {
        match (current.file_info(rule.file_type), previous.file_info(rule.file_type)) {
            (Some(_), None) => change_log.add_change(current.page(), rule.new),
            (Some(now), Some(before)) if before.timestamp < now.timestamp => {
                change_log.add_change(current.page(), rule.updated)
            },
            (None, Some(_)) => change_log.add_change(current.page(), rule.deleted),
            _ => {},
        }
    }
    // Any difference counts, we don't check whether the version went up.
    if current.version() != previous.version() {
        change_log.add_change(current.page(), ChangeType::UpdatedWorksheet);
    }
}

#[cfg(test)]
mod tests {
    use crate::{ChangeItem, ChangeType, FileInfo, FileType, LanguageInfo, TranslationProgress, WorksheetInfo};
    use time::OffsetDateTime;
    use time::macros::datetime;

    const T1: OffsetDateTime = datetime!(2022-01-13 10:09:08 UTC);
    const T2: OffsetDateTime = datetime!(2022-03-01 08:00:00 UTC);

    fn worksheet(page: &str, version: &str, files: &[(FileType, OffsetDateTime)]) -> WorksheetInfo {
        let mut info = WorksheetInfo::new(page, "de", page, TranslationProgress::new(10, 0, 10), version);
        for (file_type, timestamp) in files {
            info.add_file_info(FileInfo::new(
                *file_type,
                format!("https://example.net/{page}.{file_type}"),
                *timestamp,
            ));
        }
        info
    }

    fn language(worksheets: Vec<WorksheetInfo>) -> LanguageInfo {
        let mut info = LanguageInfo::new("de", "German");
        for worksheet in worksheets {
            info.add_worksheet_info(worksheet);
        }
        info
    }

    fn changes(current: &LanguageInfo, old: &LanguageInfo) -> Vec<(String, ChangeType)> {
        current
            .compare(old)
            .changes()
            .iter()
            .map(|ChangeItem { worksheet, change_type }| (worksheet.clone(), *change_type))
            .collect()
    }

    #[test]
    fn test_identical_snapshots_have_no_changes() {
        let snapshot = language(vec![
            worksheet("Prayer", "1.2", &[(FileType::Pdf, T1), (FileType::Odt, T1)]),
            worksheet("Church", "1.0", &[]),
        ]);
        assert!(snapshot.compare(&snapshot.clone()).is_empty());
    }

    #[test]
    fn test_new_worksheet_hides_new_files() {
        let old = language(vec![]);
        let current = language(vec![worksheet("D", "1.0", &[(FileType::Pdf, T1), (FileType::Odt, T1)])]);
        assert_eq!(changes(&current, &old), [("D".to_string(), ChangeType::NewWorksheet)]);
    }

    #[test]
    fn test_deleted_worksheet_hides_deleted_files() {
        let old = language(vec![worksheet("D", "1.0", &[(FileType::Pdf, T1), (FileType::Odt, T1)])]);
        let current = language(vec![]);
        assert_eq!(changes(&current, &old), [("D".to_string(), ChangeType::DeletedWorksheet)]);
    }

    #[test]
    fn test_updated_pdf_requires_newer_timestamp() {
        let old = language(vec![worksheet("D", "1.0", &[(FileType::Pdf, T1)])]);
        let newer = language(vec![worksheet("D", "1.0", &[(FileType::Pdf, T2)])]);
        assert_eq!(changes(&newer, &old), [("D".to_string(), ChangeType::UpdatedPdf)]);
        // Same timestamp, or an older one, is not an update
        assert!(old.compare(&old.clone()).is_empty());
        assert!(old.compare(&newer).is_empty());
    }

    #[test]
    fn test_artifact_rules() {
        let old = language(vec![
            worksheet("A", "1.0", &[]),
            worksheet("B", "1.0", &[(FileType::Pdf, T1), (FileType::Odt, T1)]),
            worksheet("C", "1.0", &[(FileType::Odt, T1)]),
        ]);
        let current = language(vec![
            worksheet("A", "1.0", &[(FileType::Pdf, T1), (FileType::Odt, T1)]),
            worksheet("B", "1.0", &[]),
            worksheet("C", "1.0", &[(FileType::Odt, T2)]),
        ]);
        assert_eq!(
            changes(&current, &old),
            [
                ("A".to_string(), ChangeType::NewPdf),
                ("A".to_string(), ChangeType::NewOdt),
                ("B".to_string(), ChangeType::DeletedPdf),
                ("B".to_string(), ChangeType::DeletedOdt),
                ("C".to_string(), ChangeType::UpdatedOdt),
            ]
        );
    }

    #[test]
    fn test_untracked_file_types_are_not_reported() {
        let old = language(vec![worksheet("D", "1.0", &[(FileType::Odg, T1)])]);
        let current = language(vec![worksheet("D", "1.0", &[(FileType::PrintPdf, T1)])]);
        assert!(current.compare(&old).is_empty());
    }

    #[test]
    fn test_version_change_in_any_direction() {
        let old = language(vec![worksheet("D", "1.2", &[])]);
        let current = language(vec![worksheet("D", "1.1", &[])]);
        assert_eq!(changes(&current, &old), [("D".to_string(), ChangeType::UpdatedWorksheet)]);
    }

    #[test]
    fn test_event_order() {
        let old = language(vec![
            worksheet("Gone1", "1.0", &[]),
            worksheet("Kept", "1.0", &[(FileType::Pdf, T1)]),
            worksheet("Gone2", "1.0", &[]),
        ]);
        let current = language(vec![worksheet("Fresh", "1.0", &[]), worksheet("Kept", "2.0", &[(FileType::Pdf, T2)])]);
        assert_eq!(
            changes(&current, &old),
            [
                ("Fresh".to_string(), ChangeType::NewWorksheet),
                ("Kept".to_string(), ChangeType::UpdatedPdf),
                ("Kept".to_string(), ChangeType::UpdatedWorksheet),
                ("Gone1".to_string(), ChangeType::DeletedWorksheet),
                ("Gone2".to_string(), ChangeType::DeletedWorksheet),
            ]
        );
    }

    #[test]
    fn test_different_languages_yield_empty_log() {
        let german = language(vec![worksheet("D", "1.0", &[])]);
        let french = LanguageInfo::new("fr", "French");
        assert!(german.compare(&french).is_empty());
        assert!(french.compare(&german).is_empty());
    }
}
