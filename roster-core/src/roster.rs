//! Roster query engine.
//!
//! Resolves a [`ClassSelector`] against a [`MembershipSnapshot`] and
//! produces the enrolled members in `displayName` order. Every step is a
//! pure read of the snapshot.
//!
//! ```ignore
//! let snapshot = MembershipSnapshot::from_value(&raw)?;
//! let selector = ClassSelector::new("Primary", "Valiant 9");
//! for name in class_roster(&snapshot, &selector)? {
//!     println!("{name}");
//! }
//! ```

use tracing::{debug, instrument};

use crate::error::CoreError;
use crate::models::{ClassSelector, Household, Member, MembershipSnapshot, Organization};

// ============================================================================
// Lookup
// ============================================================================

/// Finds the single organization named `name`.
///
/// Zero matches and multiple matches are reported as distinct errors.
pub fn find_organization<'a>(
    snapshot: &'a MembershipSnapshot,
    name: &str,
) -> Result<&'a Organization, CoreError> {
    let matches: Vec<&Organization> = snapshot
        .organizations
        .iter()
        .filter(|org| org.name == name)
        .collect();

    match matches.as_slice() {
        [org] => Ok(*org),
        [] => Err(CoreError::OrganizationNotFound(name.to_string())),
        _ => Err(CoreError::AmbiguousOrganization {
            name: name.to_string(),
            count: matches.len(),
        }),
    }
}

/// Resolves the UUID members must carry to be on the roster.
///
/// An empty class name targets the organization itself. Otherwise exactly
/// one child org must carry the class name. Resolution is by name only.
pub fn resolve_target_uuid<'a>(
    organization: &'a Organization,
    class: &str,
) -> Result<&'a str, CoreError> {
    if class.is_empty() {
        return Ok(organization.uuid.as_str());
    }

    let matches: Vec<&str> = organization
        .child_orgs
        .iter()
        .filter(|child| child.name == class)
        .map(|child| child.uuid.as_str())
        .collect();

    match matches.as_slice() {
        [uuid] => Ok(*uuid),
        [] => Err(CoreError::ClassNotFound {
            organization: organization.name.clone(),
            class: class.to_string(),
        }),
        _ => Err(CoreError::AmbiguousClass {
            organization: organization.name.clone(),
            class: class.to_string(),
            count: matches.len(),
        }),
    }
}

// ============================================================================
// Flatten / Filter / Sort
// ============================================================================

/// Every member of every household, households first, then members in order.
pub fn flatten_members(households: &[Household]) -> impl Iterator<Item = &Member> {
    households.iter().flat_map(|household| household.members.iter())
}

/// Members enrolled in `uuid`, stably sorted by `displayName`.
///
/// Names compare byte-wise with no case folding or locale rules.
pub fn members_in<'a>(households: &'a [Household], uuid: &str) -> Vec<&'a Member> {
    let mut members: Vec<&Member> = flatten_members(households)
        .filter(|member| member.is_enrolled_in(uuid))
        .collect();
    members.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    members
}

// ============================================================================
// Query
// ============================================================================

/// Members selected by `selector`, in roster order.
#[instrument(skip(snapshot, selector), fields(selector = %selector))]
pub fn select_members<'a>(
    snapshot: &'a MembershipSnapshot,
    selector: &ClassSelector,
) -> Result<Vec<&'a Member>, CoreError> {
    let organization = find_organization(snapshot, &selector.organization)?;
    let uuid = resolve_target_uuid(organization, &selector.class)?;
    debug!(uuid = %uuid, "Resolved roster target");

    let members = members_in(&snapshot.households, uuid);
    debug!(count = members.len(), "Selected members");
    Ok(members)
}

/// Preferred names of the members selected by `selector`, in roster order.
pub fn class_roster(
    snapshot: &MembershipSnapshot,
    selector: &ClassSelector,
) -> Result<Vec<String>, CoreError> {
    Ok(select_members(snapshot, selector)?
        .into_iter()
        .map(|member| member.preferred_name.clone())
        .collect())
}

// ============================================================================
// Tests
// ============================================================================
