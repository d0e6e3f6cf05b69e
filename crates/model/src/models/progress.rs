use serde::Deserialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// How much of one worksheet is translated into one language, counted in
/// translation units.
///
/// Deserializes straight from a translation-progress query record such as
/// `{"total": 44, "translated": 44, "fuzzy": 0, "proofread": 0, "code": "de"}`;
/// the extra fields are ignored.
///
/// `translated + fuzzy <= total` is expected but deliberately not enforced:
/// counters come straight from the wiki and a slightly inconsistent record
/// is still worth tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct TranslationProgress {
    /// Units with an up-to-date translation
    pub translated: u32,
    /// Units whose translation is outdated
    pub fuzzy: u32,
    /// All units of the worksheet
    pub total: u32,
}
impl TranslationProgress {
    /// Number of untouched units above which a translation counts as unfinished.
    const UNFINISHED_THRESHOLD: i64 = 4;

    pub fn new(translated: u32, fuzzy: u32, total: u32) -> Self {
        Self { translated, fuzzy, total }
    }

    /// Units that are neither translated nor fuzzy. Negative when the counters
    /// are inconsistent.
    pub fn untranslated(&self) -> i64 {
        i64::from(self.total) - i64::from(self.fuzzy) - i64::from(self.translated)
    }

    /// Returns true if more than four units are neither translated nor fuzzy.
    ///
    /// Only influences how loudly problems with the translation are logged.
    pub fn is_unfinished(&self) -> bool {
        self.untranslated() > Self::UNFINISHED_THRESHOLD
    }
}
impl From<(u32, u32, u32)> for TranslationProgress {
    fn from((translated, fuzzy, total): (u32, u32, u32)) -> Self {
        Self::new(translated, fuzzy, total)
    }
}
impl Display for TranslationProgress {
    /// `13+1/14`: 13 translated units and one fuzzy unit, out of 14.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}+{}/{}", self.translated, self.fuzzy, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case((44, 0, 44), false)]
    #[case((40, 0, 44), false)]
    #[case((39, 0, 44), true)]
    #[case((30, 10, 44), false)]
    #[case((0, 0, 5), true)]
    #[case((0, 0, 0), false)]
    // Inconsistent counters must not underflow
    #[case((10, 5, 3), false)]
    fn test_is_unfinished(#[case] counters: (u32, u32, u32), #[case] expected: bool) {
        assert_eq!(TranslationProgress::from(counters).is_unfinished(), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(TranslationProgress::new(13, 1, 14).to_string(), "13+1/14");
    }

    #[test]
    fn test_deserialize_query_record() {
        let record = r#"{"total": 44, "translated": 40, "fuzzy": 2, "proofread": 0, "code": "de", "language": "de"}"#;
        let progress: TranslationProgress = serde_json::from_str(record).unwrap();
        assert_eq!(progress, TranslationProgress::new(40, 2, 44));
    }
}
