use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Active,
    Inactive,
}

impl ContactStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Active => "active",
            ContactStatus::Inactive => "inactive",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            ContactStatus::Active => ContactStatus::Inactive,
            ContactStatus::Inactive => ContactStatus::Active,
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ContactStatus::Active),
            "inactive" => Ok(ContactStatus::Inactive),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// Status selector for the filter engine: everything, or one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ContactStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ContactStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub const fn cycled(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(ContactStatus::Active),
            StatusFilter::Only(ContactStatus::Active) => {
                StatusFilter::Only(ContactStatus::Inactive)
            }
            StatusFilter::Only(ContactStatus::Inactive) => StatusFilter::All,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Only(ContactStatus::Active)),
            "inactive" => Ok(StatusFilter::Only(ContactStatus::Inactive)),
            other => Err(CoreError::InvalidStatusFilter(other.to_string())),
        }
    }
}
