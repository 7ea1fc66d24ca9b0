use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category a document is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Notes,
    Papers,
}

impl DocType {
    /// Parse a category from its wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "notes" => Some(DocType::Notes),
            "papers" => Some(DocType::Papers),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Notes => "notes",
            DocType::Papers => "papers",
        }
    }
}

/// Accepted upload formats, derived from the uploaded filename's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    /// Derive a file kind from a filename extension. Case-insensitive;
    /// anything outside pdf/docx is rejected before a record exists.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            _ => None,
        }
    }

    /// Derive a file kind from a full filename.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
        }
    }
}

/// Moderation state of a document. `Pending` on creation; transitions are
/// unrestricted (any state to any state, admin-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// A subject catalog entry stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A document metadata record stored in redb. The file bytes themselves live
/// in the object store; `file_url` is the resolvable location it returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Referenced subject. Not re-validated after creation; deleting the
    /// subject leaves this dangling.
    pub subject_id: String,
    pub doc_type: DocType,
    pub file_url: String,
    pub file_kind: FileKind,
    pub uploaded_by: String,
    pub uploaded_by_name: String,
    pub status: ReviewStatus,
    /// Set by the first status update, reaffirmed on each one after.
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
