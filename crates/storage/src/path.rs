//! Storage key validation.
//!
//! Every key handed to a backend is relative to the storage root. Keys that
//! would escape the root are rejected before any backend sees them.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates and normalizes a storage key.
///
/// `.` components and repeated or trailing separators are dropped, and `..`
/// is resolved as long as it never climbs above the root. Empty keys and keys
/// containing NUL bytes are rejected.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use resbot_storage::validate_path;
/// assert!(validate_path("de.json").is_ok());
/// assert!(validate_path("archive/2024/de.json").is_ok());
/// assert!(validate_path("../de.json").is_err());
/// assert!(validate_path("de\0.json").is_err());
/// assert_eq!(validate_path("./archive//../de.json").unwrap(), Path::new("de.json"));
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(original.to_path_buf());
    let mut components = Vec::new();
    for component in original.components() {
        match component {
            // NUL passes through Path::components() on Unix but truncates in syscalls.
            Component::Normal(s) if s.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(s) => components.push(s),
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if components.is_empty() {
        exn::bail!(invalid());
    }
    Ok(components.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("de.json", "de.json")]
    #[case("languages.json", "languages.json")]
    #[case("archive/2024/de.json", "archive/2024/de.json")]
    #[case("archive//de.json", "archive/de.json")]
    #[case("./archive/./de.json", "archive/de.json")]
    #[case("archive/../de.json", "de.json")]
    #[case("/de.json", "de.json")]
    #[case("archive/", "archive")]
    fn test_valid(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate(input).unwrap(), Path::new(expected));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("./.")]
    #[case("//")]
    #[case("..")]
    #[case("../de.json")]
    #[case("archive/../../de.json")]
    #[case("de\0.json")]
    fn test_invalid(#[case] input: &str) {
        let err = validate(input).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(path) if path == Path::new(input)));
    }
}
