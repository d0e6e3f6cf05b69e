use serde_json::{Map, Value, json};

use crate::error::{ErrorKind, Result};
use crate::models::{FileInfo, LanguageInfo, PdfMetadataSummary, TranslationProgress, WorksheetInfo};
use exn::ResultExt;

/// Converts an entity into its untyped snapshot form.
///
/// Optional fields are left out rather than written as `null`.
pub trait Encode {
    fn encode(&self) -> Result<Value>;
}

impl Encode for TranslationProgress {
    fn encode(&self) -> Result<Value> {
        Ok(json!({
            "translated": self.translated,
            "fuzzy": self.fuzzy,
            "total": self.total,
        }))
    }
}

impl Encode for PdfMetadataSummary {
    fn encode(&self) -> Result<Value> {
        Ok(json!({
            "version": self.version,
            "correct": self.correct,
            "pdf1a": self.pdf1a,
            "only_docinfo": self.only_docinfo,
            "warnings": self.warnings,
        }))
    }
}

impl Encode for FileInfo {
    fn encode(&self) -> Result<Value> {
        let timestamp = crate::format_timestamp(self.timestamp).or_raise(|| ErrorKind::Encode("FileInfo"))?;
        let mut record = Map::new();
        record.insert("file_type".into(), self.file_type.as_str().into());
        record.insert("url".into(), self.url.clone().into());
        record.insert("timestamp".into(), timestamp.into());
        if let Some(unit) = self.translation_unit {
            record.insert("translation_unit".into(), unit.into());
        }
        if let Some(metadata) = &self.metadata {
            record.insert("metadata".into(), metadata.encode()?);
        }
        Ok(Value::Object(record))
    }
}

impl Encode for WorksheetInfo {
    fn encode(&self) -> Result<Value> {
        let mut record = Map::new();
        record.insert("page".into(), self.page().into());
        record.insert("language_code".into(), self.language_code().into());
        record.insert("title".into(), self.title().into());
        record.insert("version".into(), self.version().into());
        record.insert("progress".into(), self.progress().encode()?);
        if let Some(unit) = self.version_unit() {
            record.insert("version_unit".into(), unit.into());
        }
        if !self.files().is_empty() {
            let files = self.files().values().map(Encode::encode).collect::<Result<Vec<_>>>()?;
            record.insert("files".into(), Value::Array(files));
        }
        Ok(Value::Object(record))
    }
}

impl Encode for LanguageInfo {
    fn encode(&self) -> Result<Value> {
        let worksheets = self.worksheets().iter().map(Encode::encode).collect::<Result<Vec<_>>>()?;
        Ok(json!({
            "language_code": self.language_code(),
            "english_name": self.english_name(),
            "worksheets": worksheets,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileType;
    use time::macros::datetime;

    #[test]
    fn test_encode_file_omits_absent_fields() {
        let file = FileInfo::new(FileType::PrintPdf, "https://example.net/a.pdf", datetime!(2022-01-13 10:09:08 UTC));
        assert_eq!(
            file.encode().unwrap(),
            json!({
                "file_type": "printPdf",
                "url": "https://example.net/a.pdf",
                "timestamp": "2022-01-13T10:09:08+00:00",
            })
        );
    }

    #[test]
    fn test_encode_file_with_optional_fields() {
        let file = FileInfo::new(FileType::Pdf, "https://example.net/a.pdf", datetime!(2022-01-13 10:09:08 UTC))
            .with_translation_unit(28)
            .with_metadata(PdfMetadataSummary::new("1.0", true, true, false, ""));
        let value = file.encode().unwrap();
        assert_eq!(value["translation_unit"], 28);
        assert_eq!(value["metadata"]["pdf1a"], true);
        assert_eq!(value["metadata"]["version"], "1.0");
    }

    #[test]
    fn test_encode_worksheet_without_files() {
        let worksheet = WorksheetInfo::new("Prayer", "de", "Gebet", TranslationProgress::new(1, 2, 3), "1.0");
        assert_eq!(
            worksheet.encode().unwrap(),
            json!({
                "page": "Prayer",
                "language_code": "de",
                "title": "Gebet",
                "version": "1.0",
                "progress": {"translated": 1, "fuzzy": 2, "total": 3},
            })
        );
    }

    #[test]
    fn test_encode_worksheet_files_in_type_order() {
        let mut worksheet = WorksheetInfo::new("Prayer", "en", "Prayer", TranslationProgress::new(3, 0, 3), "1.0")
            .with_version_unit(4);
        let at = datetime!(2022-01-13 10:09:08 UTC);
        worksheet.add_file_info(FileInfo::new(FileType::Odg, "https://example.net/a.odg", at));
        worksheet.add_file_info(FileInfo::new(FileType::Pdf, "https://example.net/a.pdf", at));
        let value = worksheet.encode().unwrap();
        assert_eq!(value["version_unit"], 4);
        let types: Vec<&str> = value["files"]
            .as_array()
            .unwrap()
            .iter()
            .map(|file| file["file_type"].as_str().unwrap())
            .collect();
        assert_eq!(types, ["pdf", "odg"]);
    }
}
