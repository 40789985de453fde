use crate::domain::ids::ContactId;
use crate::domain::status::ContactStatus;
use serde::{Deserialize, Serialize};

/// Canonical contact record as stored by the remote collection.
///
/// `created_at`/`updated_at` are RFC 3339 UTC strings, so ordinary string
/// comparison orders them chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub status: ContactStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// User-supplied subset of a contact; `id` and both timestamps are
/// system-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub status: ContactStatus,
    pub notes: Option<String>,
}

impl Contact {
    /// Builds a fresh record from validated input, stamping the given id and
    /// using `created_at` for both timestamps.
    pub fn from_input(id: ContactId, input: ContactInput, created_at: String) -> Self {
        let updated_at = created_at.clone();
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            company: input.company,
            status: input.status,
            notes: input.notes,
            created_at,
            updated_at,
        }
    }

    /// Merges validated input over this record, field by field. Input wins
    /// for every user-editable field; `id` and `created_at` are preserved and
    /// `updated_at` is replaced with the supplied timestamp.
    pub fn merged_with(&self, input: &ContactInput, updated_at: String) -> Self {
        Self {
            id: self.id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone(),
            status: input.status,
            notes: input.notes.clone(),
            created_at: self.created_at.clone(),
            updated_at,
        }
    }
}
