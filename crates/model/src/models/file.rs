use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use time::OffsetDateTime;

use super::PdfMetadataSummary;
use crate::error::{Error, ErrorKind};

/// Kind of downloadable artifact attached to a worksheet.
///
/// Variants are declared in wire order, which is also the order files are
/// stored and encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileType {
    Pdf,
    Odt,
    Odg,
    PrintPdf,
}
impl FileType {
    /// Every file type, in wire order.
    pub const ALL: [FileType; 4] = [Self::Pdf, Self::Odt, Self::Odg, Self::PrintPdf];

    /// Returns the name used in snapshots and wiki queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Odt => "odt",
            Self::Odg => "odg",
            Self::PrintPdf => "printPdf",
        }
    }

    /// Name of the wiki template that links the artifact on a worksheet page,
    /// e.g. `PdfDownload` for `{{PdfDownload|Foo.pdf}}`.
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PdfDownload",
            Self::Odt => "OdtDownload",
            Self::Odg => "OdgDownload",
            Self::PrintPdf => "PrintPdfDownload",
        }
    }
}
impl FromStr for FileType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "pdf" => Self::Pdf,
            "odt" => Self::Odt,
            "odg" => Self::Odg,
            "printPdf" => Self::PrintPdf,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "file_type",
                value: s.to_string()
            }),
        })
    }
}
impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One downloadable artifact as published on the website.
///
/// Not meant to be modified after creation; a changed artifact is a new
/// `FileInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub file_type: FileType,
    /// Full URL the file can be downloaded from
    pub url: String,
    /// Last modification of the file
    pub timestamp: OffsetDateTime,
    /// Translation unit holding the file name. Example: for worksheet
    /// `My_Story_with_God` this is 28, so the English name lives in
    /// `Translations:My_Story_with_God/28/en`. Only stored for English.
    pub translation_unit: Option<u32>,
    /// Only analyzed for PDFs
    pub metadata: Option<PdfMetadataSummary>,
}
impl FileInfo {
    pub fn new(file_type: FileType, url: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            file_type,
            url: url.into(),
            timestamp,
            translation_unit: None,
            metadata: None,
        }
    }

    /// Creates a file from a textual ISO-8601 timestamp as reported by the
    /// wiki (`2022-01-13T10:09:08Z` or `2022-01-13T10:09:08+00:00`).
    ///
    /// An unreadable timestamp is logged and replaced by the Unix epoch, so
    /// the next comparison reports the file as updated rather than failing.
    pub fn from_timestamp_str(file_type: FileType, url: impl Into<String>, timestamp: &str) -> Self {
        let url = url.into();
        let timestamp = crate::parse_timestamp(timestamp).unwrap_or_else(|err| {
            tracing::error!(%file_type, %url, %timestamp, %err, "Invalid timestamp");
            OffsetDateTime::UNIX_EPOCH
        });
        Self::new(file_type, url, timestamp)
    }

    pub fn with_translation_unit(mut self, unit: u32) -> Self {
        self.translation_unit = Some(unit);
        self
    }

    pub fn with_metadata(mut self, metadata: PdfMetadataSummary) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// File name out of the URL (everything after the last `/`).
    pub fn file_name(&self) -> &str {
        self.url.rsplit_once('/').map_or(self.url.as_str(), |(_, name)| name)
    }
}
impl Display for FileInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {} ", self.file_type, self.url)?;
        match crate::format_timestamp(self.timestamp) {
            Ok(timestamp) => f.write_str(&timestamp)?,
            Err(_) => write!(f, "{}", self.timestamp)?,
        }
        if let Some(unit) = self.translation_unit {
            write!(f, ", in translation unit: {unit}")?;
        }
        if let Some(metadata) = &self.metadata {
            write!(f, ", metadata: [{metadata}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    #[rstest]
    #[case("pdf", FileType::Pdf)]
    #[case("odt", FileType::Odt)]
    #[case("odg", FileType::Odg)]
    #[case("printPdf", FileType::PrintPdf)]
    fn test_file_type_wire_names(#[case] name: &str, #[case] expected: FileType) {
        let parsed: FileType = name.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), name);
    }

    #[rstest]
    #[case("PDF")]
    #[case("printpdf")]
    #[case("docx")]
    #[case("")]
    fn test_file_type_unknown(#[case] name: &str) {
        let err = name.parse::<FileType>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::ParseError { field: "file_type", .. }));
    }

    #[test]
    fn test_file_type_order() {
        let mut types = vec![FileType::PrintPdf, FileType::Odt, FileType::Pdf, FileType::Odg];
        types.sort();
        assert_eq!(types, FileType::ALL);
        assert_eq!(FileType::PrintPdf.template_name(), "PrintPdfDownload");
    }

    #[rstest]
    #[case("https://www.example.net/mediawiki/images/1/15/Prayer.pdf", "Prayer.pdf")]
    #[case("Prayer.pdf", "Prayer.pdf")]
    #[case("https://www.example.net/", "")]
    fn test_file_name(#[case] url: &str, #[case] expected: &str) {
        let file = FileInfo::new(FileType::Pdf, url, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(file.file_name(), expected);
    }

    #[rstest]
    #[case("2022-01-13T10:09:08Z")]
    #[case("2022-01-13T10:09:08+00:00")]
    fn test_from_timestamp_str(#[case] timestamp: &str) {
        let file = FileInfo::from_timestamp_str(FileType::Odt, "https://example.net/a.odt", timestamp);
        assert_eq!(file.timestamp, datetime!(2022-01-13 10:09:08 UTC));
    }

    #[test]
    fn test_from_timestamp_str_falls_back_to_epoch() {
        let file = FileInfo::from_timestamp_str(FileType::Pdf, "https://example.net/a.pdf", "13.01.2022");
        assert_eq!(file.timestamp, OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_display() {
        let file = FileInfo::new(FileType::Pdf, "https://example.net/a.pdf", datetime!(2022-01-13 10:09:08 UTC))
            .with_translation_unit(28)
            .with_metadata(PdfMetadataSummary::new("1.2", true, true, false, ""));
        assert_eq!(
            file.to_string(),
            "pdf https://example.net/a.pdf 2022-01-13T10:09:08+00:00, in translation unit: 28, \
             metadata: [Metadata: correct. Version: 1.2. PDF/1A: yes. ]"
        );
    }
}
