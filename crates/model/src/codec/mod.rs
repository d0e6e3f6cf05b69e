//! Snapshot codec.
//!
//! Snapshots are stored as plain JSON without type tags:
//!
//! ```json
//! {"english_name": "German", "language_code": "de", "worksheets": [
//!   {"page": "Prayer", "language_code": "de", "title": "Gebet", "version": "1.3",
//!    "progress": {"translated": 10, "fuzzy": 0, "total": 10},
//!    "files": [{"file_type": "pdf", "url": "https://…/Gebet.pdf", "timestamp": "2022-01-13T10:09:08+00:00"}]}
//! ]}
//! ```
//!
//! [`Encode`] writes entities into that shape. [`decode`] works its way back
//! up: every record is decoded after its children, and the entity it becomes
//! is recognised by the fields it carries (see [`Rule`]).

mod decode;
mod encode;

use serde_json::Value;

pub use self::decode::{Node, Rule, decode};
pub use self::encode::Encode;
use crate::error::{ErrorKind, Result};
use crate::models::LanguageInfo;
use exn::ResultExt;

/// Encodes a snapshot into a JSON tree.
pub fn encode_language(language: &LanguageInfo) -> Result<Value> {
    language.encode()
}

/// Encodes a snapshot into its stored text form.
///
/// The output is deterministic: encoding an unchanged snapshot twice yields
/// identical text, so callers can compare texts to decide whether to store.
pub fn to_json_string(language: &LanguageInfo) -> Result<String> {
    let value = language.encode()?;
    serde_json::to_string(&value).or_raise(|| ErrorKind::Encode("LanguageInfo"))
}

/// Decodes a JSON tree that must hold a snapshot.
pub fn decode_language(value: Value) -> Result<LanguageInfo> {
    match decode(value)? {
        Node::Language(language) => Ok(language),
        _ => exn::bail!(ErrorKind::UnexpectedShape("LanguageInfo")),
    }
}

/// Decodes a snapshot from its stored text form.
pub fn from_json_str(text: &str) -> Result<LanguageInfo> {
    let value: Value = serde_json::from_str(text).or_raise(|| ErrorKind::Json)?;
    decode_language(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileInfo, FileType, PdfMetadataSummary, TranslationProgress, WorksheetInfo};
    use time::macros::datetime;

    fn german() -> LanguageInfo {
        let mut prayer = WorksheetInfo::new("Prayer", "de", "Gebet", TranslationProgress::new(13, 1, 14), "1.3b");
        prayer.add_file_info(
            FileInfo::new(FileType::Pdf, "https://example.net/Gebet.pdf", datetime!(2022-01-13 10:09:08 UTC))
                .with_metadata(PdfMetadataSummary::new("1.3b", true, false, true, "no keywords")),
        );
        prayer.add_file_info(FileInfo::new(
            FileType::PrintPdf,
            "https://example.net/Gebet_print.pdf",
            datetime!(2021-12-31 23:00:00.5 +02:00),
        ));
        prayer.add_file_info(FileInfo::new(
            FileType::Odt,
            "https://example.net/Gebet.odt",
            datetime!(2022-01-13 10:09:07 UTC),
        ));
        let church = WorksheetInfo::new("Church", "de", "Gemeinde", TranslationProgress::new(2, 0, 30), "");

        let mut language = LanguageInfo::new("de", "German");
        language.add_worksheet_info(prayer);
        language.add_worksheet_info(church);
        language
    }

    fn english() -> LanguageInfo {
        let mut prayer = WorksheetInfo::new("Prayer", "en", "Prayer", TranslationProgress::new(14, 0, 14), "1.3")
            .with_version_unit(31);
        prayer.add_file_info(
            FileInfo::new(FileType::Pdf, "https://example.net/Prayer.pdf", datetime!(2022-01-10 00:00:00 UTC))
                .with_translation_unit(28),
        );
        let mut language = LanguageInfo::new("en", "English");
        language.add_worksheet_info(prayer);
        language
    }

    #[test]
    fn test_round_trip() {
        for language in [german(), english(), LanguageInfo::new("xx", "")] {
            let text = to_json_string(&language).unwrap();
            let decoded = from_json_str(&text).unwrap();
            assert_eq!(decoded, language);
            assert_eq!(to_json_string(&decoded).unwrap(), text);
        }
    }

    #[test]
    fn test_round_trip_keeps_worksheet_order() {
        let decoded = decode_language(encode_language(&german()).unwrap()).unwrap();
        let pages: Vec<&str> = decoded.worksheets().iter().map(WorksheetInfo::page).collect();
        assert_eq!(pages, ["Prayer", "Church"]);
    }

    #[test]
    fn test_decode_language_rejects_other_shapes() {
        let err = from_json_str(r#"{"translated": 1, "fuzzy": 0, "total": 2}"#).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnexpectedShape("LanguageInfo")));
        let err = from_json_str(r#"["de", "en"]"#).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnexpectedShape("LanguageInfo")));
    }

    #[test]
    fn test_invalid_json() {
        let err = from_json_str("{\"worksheets\": [").unwrap_err();
        assert!(matches!(&*err, ErrorKind::Json));
        assert!(err.is_structural());
    }

    #[test]
    fn test_missing_progress_is_structural() {
        let text = r#"{"language_code": "de", "english_name": "German", "worksheets": [
            {"page": "Prayer", "language_code": "de", "title": "Gebet", "version": "1.3"}
        ]}"#;
        let err = from_json_str(text).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingField { entity: "WorksheetInfo", field: "progress" }));
        assert!(err.is_structural());
    }
}
