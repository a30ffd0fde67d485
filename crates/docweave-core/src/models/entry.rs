use serde::{Deserialize, Serialize};

use crate::ident::EntryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    FormalDocument,
    StructuredText,
    Presentation,
    MathematicalEncoding,
    ExecutableLogic,
    InteractiveScript,
    Configuration,
    RawText,
    Undefined,
}

impl ContentType {
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Self::FormalDocument,
            "md" => Self::StructuredText,
            "html" => Self::Presentation,
            "tex" => Self::MathematicalEncoding,
            "py" => Self::ExecutableLogic,
            "js" => Self::InteractiveScript,
            "yaml" | "yml" => Self::Configuration,
            "txt" => Self::RawText,
            _ => Self::Undefined,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FormalDocument => "formal_document",
            Self::StructuredText => "structured_text",
            Self::Presentation => "presentation",
            Self::MathematicalEncoding => "mathematical_encoding",
            Self::ExecutableLogic => "executable_logic",
            Self::InteractiveScript => "interactive_script",
            Self::Configuration => "configuration",
            Self::RawText => "raw_text",
            Self::Undefined => "undefined",
        }
    }

    // Directory label for preserved content: `structured_text` -> `structuredtext`.
    #[must_use]
    pub fn dir_label(self) -> String {
        self.as_str().replace('_', "")
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryContext {
    pub directory_depth: usize,
    pub file_size: u64,
    pub modified_unix: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    pub neighbors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: EntryId,
    pub path: String,
    pub content_type: ContentType,
    pub weight: f64,
    pub tags: Vec<String>,
    pub context: EntryContext,
    pub confidence: f64,
}

impl IndexEntry {
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        content_type: ContentType,
        weight: f64,
        tags: Vec<String>,
        context: EntryContext,
        confidence: f64,
    ) -> Self {
        let path = path.into();
        let id = EntryId::for_entry(&path, content_type.as_str(), weight);
        Self {
            id,
            path,
            content_type,
            weight,
            tags,
            context,
            confidence,
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    #[must_use]
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => name,
            Some(idx) => &name[..idx],
        }
    }

    #[must_use]
    pub fn shared_tag_count(&self, other: &Self) -> usize {
        self.tags.iter().filter(|tag| other.tags.contains(tag)).count()
    }
}
