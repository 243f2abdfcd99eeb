//! Normalized records produced by a run.
//!
//! All records are created fresh per run, held in memory only, and handed
//! once to the sink; there are no update or delete operations.

use serde::{Deserialize, Serialize};

/// One story from a feed, addressed by its site-assigned story key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub author: Option<String>,
    pub date: Option<String>,
    /// Long-form body when present, otherwise the short-form body.
    pub text: Option<String>,
    /// Linked image when present, otherwise the inline image.
    pub media_url: Option<String>,
    pub link: Option<String>,
    /// Comment texts in DOM order; empty comment bodies stay as `None`
    /// entries so positions line up with the page.
    pub comments: Vec<Option<String>>,
}

/// Romantic status classified from the profile's free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RomanticStatus {
    /// The profile exposes no relationship information.
    NoInfo,
    Single,
    Partnered { person_name: String, status: String },
    /// Free text that matched no vocabulary label; kept verbatim instead
    /// of degrading into an empty record.
    Unrecognized { raw: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyRelation {
    pub name: String,
    /// `None` when the text matched no vocabulary label; `name` then holds
    /// the raw text.
    pub relation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub romantic: RomanticStatus,
    pub family: Vec<FamilyRelation>,
}

impl Default for RelationshipRecord {
    fn default() -> Self {
        Self {
            romantic: RomanticStatus::NoInfo,
            family: Vec::new(),
        }
    }
}

/// One label/value pair from a profile sub-page, in page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub label: String,
    pub value: String,
}

/// The combined experience list split at its divider boundaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub work: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: Option<String>,
    /// Whole years against the current date; `None` whenever the birth-date
    /// entry is missing, a placeholder, or unparseable.
    pub age: Option<u32>,
    pub relationship: RelationshipRecord,
    pub contact: Vec<ContactEntry>,
    pub living: Vec<ContactEntry>,
    pub education: EducationRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: String,
    pub posts: Vec<PostRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<UserRecord>>,
}

/// Top-level aggregate handed to the sink, serialized as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Aggregate {
    Group(GroupRecord),
    Profile(Box<UserRecord>),
}
