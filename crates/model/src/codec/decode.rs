use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ErrorKind, Result};
use crate::models::{FileInfo, FileType, LanguageInfo, PdfMetadataSummary, TranslationProgress, WorksheetInfo};
use exn::{OptionExt, ResultExt};

/// A decoded snapshot tree.
///
/// Records that were recognised as an entity are typed; everything else is
/// kept as it was, with any entities nested inside it decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Metadata(PdfMetadataSummary),
    File(FileInfo),
    Progress(TranslationProgress),
    Worksheet(WorksheetInfo),
    Language(LanguageInfo),
    Array(Vec<Node>),
    Object(BTreeMap<String, Node>),
    Scalar(Value),
}

/// Decodes a snapshot tree, children first.
///
/// Every record is matched against [`Rule::ORDER`] once all of its fields are
/// decoded, so a `FileInfo` record finds its `metadata` already typed.
pub fn decode(value: Value) -> Result<Node> {
    Ok(match value {
        Value::Array(items) => Node::Array(items.into_iter().map(decode).collect::<Result<_>>()?),
        Value::Object(record) => {
            let fields = record
                .into_iter()
                .map(|(key, value)| decode(value).map(|node| (key, node)))
                .collect::<Result<BTreeMap<_, _>>>()?;
            match Rule::sniff(&fields) {
                Some(rule) => rule.apply(Record::new(rule.entity(), fields))?,
                None => Node::Object(fields),
            }
        },
        scalar => Node::Scalar(scalar),
    })
}

/// How an untagged record is recognised: by the presence of one marker field.
///
/// Several entities share field names (`version`, `language_code`), so the
/// rules are tried in a fixed order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Metadata,
    File,
    Progress,
    Worksheet,
    Language,
}
impl Rule {
    pub const ORDER: [Rule; 5] = [Self::Metadata, Self::File, Self::Progress, Self::Worksheet, Self::Language];

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Metadata => "pdf1a",
            Self::File => "file_type",
            Self::Progress => "translated",
            Self::Worksheet => "page",
            Self::Language => "worksheets",
        }
    }

    pub fn entity(&self) -> &'static str {
        match self {
            Self::Metadata => "PdfMetadataSummary",
            Self::File => "FileInfo",
            Self::Progress => "TranslationProgress",
            Self::Worksheet => "WorksheetInfo",
            Self::Language => "LanguageInfo",
        }
    }

    /// Returns the first rule whose marker field is present.
    pub fn sniff(fields: &BTreeMap<String, Node>) -> Option<Rule> {
        Self::ORDER.into_iter().find(|rule| fields.contains_key(rule.marker()))
    }

    fn apply(self, mut record: Record) -> Result<Node> {
        Ok(match self {
            Self::Metadata => Node::Metadata(PdfMetadataSummary {
                version: record.string("version")?,
                correct: record.boolean("correct")?,
                pdf1a: record.boolean("pdf1a")?,
                only_docinfo: record.boolean("only_docinfo")?,
                warnings: record.string("warnings")?,
            }),
            Self::File => {
                let file_type = record
                    .string("file_type")?
                    .parse::<FileType>()
                    .or_raise(|| ErrorKind::InvalidField { entity: record.entity, field: "file_type" })?;
                let url = record.string("url")?;
                let timestamp = record.string("timestamp")?;
                let mut file = FileInfo::from_timestamp_str(file_type, url, &timestamp);
                file.translation_unit = record.optional_unsigned("translation_unit")?;
                file.metadata = match record.take("metadata") {
                    Some(Node::Metadata(metadata)) => Some(metadata),
                    Some(_) => record.invalid("metadata")?,
                    None => None,
                };
                Node::File(file)
            },
            Self::Progress => Node::Progress(TranslationProgress::new(
                record.unsigned("translated")?,
                record.unsigned("fuzzy")?,
                record.unsigned("total")?,
            )),
            Self::Worksheet => {
                let page = record.string("page")?;
                let language_code = record.string("language_code")?;
                let title = record.string("title")?;
                let version = record.string("version")?;
                let progress = match record.required("progress")? {
                    Node::Progress(progress) => progress,
                    _ => record.invalid("progress")?,
                };
                let mut worksheet = WorksheetInfo::new(page, language_code, title, progress, version);
                if let Some(unit) = record.optional_unsigned("version_unit")? {
                    worksheet = worksheet.with_version_unit(unit);
                }
                for node in record.optional_array("files")? {
                    match node {
                        Node::File(file) => worksheet.add_file_info(file),
                        _ => record.invalid("files")?,
                    }
                }
                Node::Worksheet(worksheet)
            },
            Self::Language => {
                let language_code = record.string("language_code")?;
                let english_name = record.string("english_name")?;
                let mut language = LanguageInfo::new(language_code, english_name);
                let worksheets = match record.required("worksheets")? {
                    Node::Array(items) => items,
                    _ => record.invalid("worksheets")?,
                };
                for node in worksheets {
                    match node {
                        Node::Worksheet(worksheet) => language.add_worksheet_info(worksheet),
                        _ => record.invalid("worksheets")?,
                    }
                }
                Node::Language(language)
            },
        })
    }
}

/// Fields of one record being decoded as `entity`. A `null` field counts as
/// absent.
struct Record {
    entity: &'static str,
    fields: BTreeMap<String, Node>,
}
impl Record {
    fn new(entity: &'static str, fields: BTreeMap<String, Node>) -> Self {
        Self { entity, fields }
    }

    fn take(&mut self, field: &'static str) -> Option<Node> {
        match self.fields.remove(field)? {
            Node::Scalar(Value::Null) => None,
            node => Some(node),
        }
    }

    fn required(&mut self, field: &'static str) -> Result<Node> {
        let entity = self.entity;
        self.take(field).ok_or_raise(|| ErrorKind::MissingField { entity, field })
    }

    fn invalid<T>(&self, field: &'static str) -> Result<T> {
        exn::bail!(ErrorKind::InvalidField { entity: self.entity, field })
    }

    fn string(&mut self, field: &'static str) -> Result<String> {
        match self.required(field)? {
            Node::Scalar(Value::String(value)) => Ok(value),
            _ => self.invalid(field),
        }
    }

    fn boolean(&mut self, field: &'static str) -> Result<bool> {
        match self.required(field)? {
            Node::Scalar(Value::Bool(value)) => Ok(value),
            _ => self.invalid(field),
        }
    }

    fn unsigned(&mut self, field: &'static str) -> Result<u32> {
        let node = self.required(field)?;
        self.to_unsigned(field, node)
    }

    fn optional_unsigned(&mut self, field: &'static str) -> Result<Option<u32>> {
        self.take(field).map(|node| self.to_unsigned(field, node)).transpose()
    }

    fn optional_array(&mut self, field: &'static str) -> Result<Vec<Node>> {
        match self.take(field) {
            Some(Node::Array(items)) => Ok(items),
            Some(_) => self.invalid(field),
            None => Ok(Vec::new()),
        }
    }

    fn to_unsigned(&self, field: &'static str, node: Node) -> Result<u32> {
        match node {
            Node::Scalar(Value::Number(number)) => match number.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(value) => Ok(value),
                None => self.invalid(field),
            },
            _ => self.invalid(field),
        }
    }
}
