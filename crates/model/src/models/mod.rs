mod changes;
mod file;
mod language;
mod metadata;
mod progress;
mod worksheet;

pub use self::changes::{ChangeItem, ChangeLog, ChangeType};
pub use self::file::{FileInfo, FileType};
pub use self::language::LanguageInfo;
pub use self::metadata::PdfMetadataSummary;
pub use self::progress::TranslationProgress;
pub use self::worksheet::WorksheetInfo;
