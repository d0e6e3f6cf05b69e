use std::path::{Path, PathBuf};

/// A stored document as reported by listing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Relative path from storage root
    pub path: PathBuf,
}
impl Entry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name without its extension, if the entry has the given extension.
    ///
    /// ```
    /// use resbot_storage::Entry;
    ///
    /// let entry = Entry::new("de.json");
    /// assert_eq!(entry.stem_with_extension("json"), Some("de"));
    /// assert_eq!(entry.stem_with_extension("toml"), None);
    /// ```
    pub fn stem_with_extension(&self, extension: &str) -> Option<&str> {
        if self.path.extension()? != extension {
            return None;
        }
        self.path.file_stem()?.to_str()
    }

    /// Is the entry directly in the storage root (not in a subdirectory)?
    pub fn is_top_level(&self) -> bool {
        self.path.parent().is_none_or(|parent| parent == Path::new(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_with_extension() {
        let entry = Entry::new("archive/de.json");
        assert_eq!(entry.stem_with_extension("json"), Some("de"));
        assert!(!entry.is_top_level());
        let entry = Entry::new("README");
        assert_eq!(entry.stem_with_extension("json"), None);
        assert!(entry.is_top_level());
    }
}
