use std::fmt::{Display, Formatter, Result as FmtResult};

/// Verdict on the metadata embedded in one PDF artifact.
///
/// Produced by the PDF analysis collaborator; this crate only stores and
/// renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PdfMetadataSummary {
    /// Version found in the metadata (empty if extraction failed)
    pub version: String,
    /// Do the metadata contents meet our standards?
    pub correct: bool,
    /// Is the document PDF/1A compatible?
    pub pdf1a: bool,
    /// Are the properties only stored in the (deprecated) DocInfo dictionary?
    pub only_docinfo: bool,
    /// Free-text details on any issues
    pub warnings: String,
}
impl PdfMetadataSummary {
    pub fn new(
        version: impl Into<String>,
        correct: bool,
        pdf1a: bool,
        only_docinfo: bool,
        warnings: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            correct,
            pdf1a,
            only_docinfo,
            warnings: warnings.into(),
        }
    }

    /// Human-readable verdict, e.g. `Metadata: correct. PDF/1A: yes. `
    pub fn describe(&self, include_version: bool) -> String {
        let mut result = format!("Metadata: {}. ", if self.correct { "correct" } else { "incorrect" });
        if include_version {
            result.push_str(&format!("Version: {}. ", self.version));
        }
        result.push_str(&format!("PDF/1A: {}. ", if self.pdf1a { "yes" } else { "no" }));
        if self.only_docinfo {
            result.push_str("Metadata only in DocInfo (deprecated). ");
        }
        if !self.warnings.is_empty() {
            result.push_str(&format!("(Warnings: {})", self.warnings));
        }
        result
    }

    /// Compact HTML cell for reports: a check mark (followed by `?` when the
    /// PDF isn't PDF/1A or relies on DocInfo) or a warning sign, with the
    /// full verdict as tooltip.
    pub fn to_html(&self) -> String {
        let symbol = match (self.correct, !self.pdf1a || self.only_docinfo) {
            (true, false) => "✓",
            (true, true) => "✓ ?",
            (false, _) => "⚠",
        };
        format!(r#"<div title="{}">{symbol}</div>"#, escape_attribute(&self.describe(false)))
    }
}
impl Display for PdfMetadataSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.describe(true))
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_describe() {
        let summary = PdfMetadataSummary::new("1.2", true, false, true, "");
        assert_eq!(summary.describe(false), "Metadata: correct. PDF/1A: no. Metadata only in DocInfo (deprecated). ");
        assert_eq!(
            summary.describe(true),
            "Metadata: correct. Version: 1.2. PDF/1A: no. Metadata only in DocInfo (deprecated). "
        );
    }

    #[test]
    fn test_describe_with_warnings() {
        let summary = PdfMetadataSummary::new("", false, true, false, "missing title");
        assert_eq!(summary.to_string(), "Metadata: incorrect. Version: . PDF/1A: yes. (Warnings: missing title)");
    }

    #[rstest]
    #[case(PdfMetadataSummary::new("1.0", true, true, false, ""), "✓</div>")]
    #[case(PdfMetadataSummary::new("1.0", true, false, false, ""), "✓ ?</div>")]
    #[case(PdfMetadataSummary::new("1.0", true, true, true, ""), "✓ ?</div>")]
    #[case(PdfMetadataSummary::new("1.0", false, true, false, ""), "⚠</div>")]
    fn test_to_html(#[case] summary: PdfMetadataSummary, #[case] expected_suffix: &str) {
        let html = summary.to_html();
        assert!(html.starts_with(r#"<div title="Metadata: "#));
        assert!(html.ends_with(expected_suffix), "{html}");
    }

    #[test]
    fn test_to_html_escapes_title() {
        let summary = PdfMetadataSummary::new("1.0", false, true, false, r#"title is "Untitled""#);
        assert!(summary.to_html().contains("&quot;Untitled&quot;"));
    }
}
