//! Typed view of the member-tools sync document.
//!
//! The sync endpoint returns far more than the roster needs. These records
//! keep only the fields the query engine reads; everything else is ignored
//! on parse and survives untouched in the raw cached document.
//!
//! ```json
//! {
//!   "organizations": [
//!     {"name": "Primary", "uuid": "...", "childOrgs": [{"name": "Valiant 9", "uuid": "..."}]}
//!   ],
//!   "households": [
//!     {"members": [{"displayName": "Doe, Jane", "preferredName": "Jane Doe", "classes": ["..."]}]}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Membership and organization data for one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSnapshot {
    /// Organizations in upstream order.
    pub organizations: Vec<Organization>,
    /// Households in upstream order.
    pub households: Vec<Household>,
}

impl MembershipSnapshot {
    /// Parses and validates a raw sync document.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        Ok(Self::deserialize(value)?)
    }

    /// Total number of members across all households.
    pub fn member_count(&self) -> usize {
        self.households.iter().map(|h| h.members.len()).sum()
    }
}

/// A named group, such as a ward organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Display name, used for lookup.
    pub name: String,
    /// Identifier referenced by member `classes`.
    pub uuid: String,
    /// Classes nested under this organization.
    #[serde(default)]
    pub child_orgs: Vec<ChildOrg>,
}

/// A class within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildOrg {
    /// Display name, used for lookup.
    pub name: String,
    /// Identifier referenced by member `classes`.
    pub uuid: String,
}

/// A family grouping of members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    /// Members in upstream order.
    pub members: Vec<Member>,
}

/// One person in a household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Sort key, usually "Last, First".
    pub display_name: String,
    /// Name written to the roster.
    pub preferred_name: String,
    /// Organization and class UUIDs the member belongs to.
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Member {
    /// Returns true if the member is enrolled in the given organization or class.
    pub fn is_enrolled_in(&self, uuid: &str) -> bool {
        self.classes.iter().any(|c| c == uuid)
    }
}
