use std::fmt::{Display, Formatter, Result as FmtResult};

/// What happened to a worksheet between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    NewWorksheet,
    NewPdf,
    NewOdt,
    UpdatedWorksheet,
    UpdatedPdf,
    UpdatedOdt,
    DeletedWorksheet,
    DeletedPdf,
    DeletedOdt,
}
impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewWorksheet => "new worksheet",
            Self::NewPdf => "new PDF",
            Self::NewOdt => "new ODT",
            Self::UpdatedWorksheet => "updated worksheet",
            Self::UpdatedPdf => "updated PDF",
            Self::UpdatedOdt => "updated ODT",
            Self::DeletedWorksheet => "deleted worksheet",
            Self::DeletedPdf => "deleted PDF",
            Self::DeletedOdt => "deleted ODT",
        }
    }
}
impl Display for ChangeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A single detected change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeItem {
    /// English name of the worksheet
    pub worksheet: String,
    pub change_type: ChangeType,
}
impl ChangeItem {
    pub fn new(worksheet: impl Into<String>, change_type: ChangeType) -> Self {
        Self { worksheet: worksheet.into(), change_type }
    }
}
impl Display for ChangeItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.change_type, self.worksheet)
    }
}

/// All changes of one language found in one run, in the order they were
/// detected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    changes: Vec<ChangeItem>,
}
impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_change(&mut self, worksheet: impl Into<String>, change_type: ChangeType) {
        self.changes.push(ChangeItem::new(worksheet, change_type));
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[ChangeItem] {
        &self.changes
    }
}
impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a ChangeItem;
    type IntoIter = std::slice::Iter<'a, ChangeItem>;
    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
impl Display for ChangeLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, change) in self.changes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{change}")?;
        }
        Ok(())
    }
}
