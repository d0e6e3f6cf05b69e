//! Native numeral systems.
//!
//! Translators write version numbers with the digits of their own script
//! ("٢.١" in Arabic, "२.१" in Hindi). Before comparing a translated version to
//! the English original, those digits are mapped back to ASCII.
//!
//! Only decimal digit blocks are handled: every supported script encodes its
//! digits as ten consecutive code points starting at a native zero.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

const ARABIC_INDIC: &[char] = &['\u{0660}'];
const PERSIAN: &[char] = &['\u{06F0}', '\u{0660}'];
const DEVANAGARI: &[char] = &['\u{0966}'];
const BENGALI: &[char] = &['\u{09E6}'];
const GURMUKHI: &[char] = &['\u{0A66}'];
const GUJARATI: &[char] = &['\u{0AE6}'];
const ORIYA: &[char] = &['\u{0B66}'];
const TAMIL: &[char] = &['\u{0BE6}'];
const TELUGU: &[char] = &['\u{0C66}'];
const KANNADA: &[char] = &['\u{0CE6}'];
const MALAYALAM: &[char] = &['\u{0D66}'];
const THAI: &[char] = &['\u{0E50}'];
const LAO: &[char] = &['\u{0ED0}'];
const TIBETAN: &[char] = &['\u{0F20}'];
const MYANMAR: &[char] = &['\u{1040}'];
const KHMER: &[char] = &['\u{17E0}'];

/// Map of language codes to the zero code points of the digit blocks used
/// when writing that language. Persian-script languages also accept the
/// Arabic-Indic block, which shows up in copy-pasted text.
static NATIVE_ZEROES: LazyLock<HashMap<&'static str, &'static [char]>> = LazyLock::new(|| {
    HashMap::from([
        ("ar", ARABIC_INDIC),
        ("ckb", ARABIC_INDIC),
        ("fa", PERSIAN),
        ("ps", PERSIAN),
        ("ur", PERSIAN),
        ("hi", DEVANAGARI),
        ("mr", DEVANAGARI),
        ("ne", DEVANAGARI),
        ("bn", BENGALI),
        ("as", BENGALI),
        ("pa", GURMUKHI),
        ("gu", GUJARATI),
        ("or", ORIYA),
        ("ta", TAMIL),
        ("te", TELUGU),
        ("kn", KANNADA),
        ("ml", MALAYALAM),
        ("th", THAI),
        ("lo", LAO),
        ("bo", TIBETAN),
        ("my", MYANMAR),
        ("km", KHMER),
    ])
});

/// Converts the native digits of `language_code` in `text` to ASCII digits.
///
/// Text without native digits, and languages without a native numeral
/// system, are returned unchanged (and unallocated).
///
/// # Examples
///
/// ```
/// use resbot_model::numerals::native_to_standard;
/// assert_eq!(native_to_standard("ar", "٢.١"), "2.1");
/// assert_eq!(native_to_standard("fa", "۱.۳b"), "1.3b");
/// assert_eq!(native_to_standard("de", "1.2"), "1.2");
/// ```
pub fn native_to_standard<'a>(language_code: &str, text: &'a str) -> Cow<'a, str> {
    let Some(zeroes) = NATIVE_ZEROES.get(language_code) else {
        return Cow::Borrowed(text);
    };
    if !text.chars().any(|c| native_digit(zeroes, c).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(|c| native_digit(zeroes, c).unwrap_or(c)).collect())
}

fn native_digit(zeroes: &[char], c: char) -> Option<char> {
    zeroes.iter().find_map(|zero| {
        let offset = u32::from(c).checked_sub(u32::from(*zero))?;
        if offset < 10 { char::from_digit(offset, 10) } else { None }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ar", "٠١٢٣٤٥٦٧٨٩", "0123456789")]
    #[case("fa", "۲.۰", "2.0")]
    #[case("fa", "٢.٠", "2.0")]
    #[case("hi", "२.१a", "2.1a")]
    #[case("bn", "১.২", "1.2")]
    #[case("th", "๓.๐", "3.0")]
    #[case("my", "၁.၂", "1.2")]
    #[case("km", "១.៣", "1.3")]
    fn test_native_to_standard(#[case] lang: &str, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(native_to_standard(lang, input), expected);
    }

    #[test]
    fn test_unknown_language_is_untouched() {
        assert!(matches!(native_to_standard("de", "1.2"), Cow::Borrowed("1.2")));
        // Arabic digits are only converted for languages that use them
        assert_eq!(native_to_standard("de", "٢.١"), "٢.١");
    }

    #[test]
    fn test_ascii_is_borrowed() {
        assert!(matches!(native_to_standard("ar", "1.2"), Cow::Borrowed(_)));
    }
}
