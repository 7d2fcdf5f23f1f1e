//! Serde tests for the snapshot records.
//!
//! These verify that real-shaped sync documents parse, that optional fields
//! default, and that shape mismatches surface as `InvalidSnapshot`.

use serde_json::json;

use crate::{ClassSelector, CoreError, Credentials, MembershipSnapshot, OAuth2ClientCredentials};

// ============================================================================
// MembershipSnapshot Parsing
// ============================================================================

#[test]
fn test_snapshot_parses_sync_document() {
    let raw = json!({
        "organizations": [{
            "name": "Primary",
            "uuid": "org-1",
            "unitNumber": 12345,
            "childOrgs": [{"name": "Sunbeam", "uuid": "class-1", "positions": []}]
        }],
        "households": [{
            "uuid": "hh-1",
            "members": [{
                "displayName": "Doe, Jane",
                "preferredName": "Jane Doe",
                "classes": ["org-1", "class-1"],
                "phone": "555-0100"
            }]
        }],
        "callings": []
    });

    let snapshot = MembershipSnapshot::from_value(&raw).unwrap();

    assert_eq!(snapshot.organizations.len(), 1);
    assert_eq!(snapshot.organizations[0].child_orgs[0].uuid, "class-1");
    assert_eq!(snapshot.member_count(), 1);
    assert!(snapshot.households[0].members[0].is_enrolled_in("class-1"));
}

#[test]
fn test_missing_child_orgs_and_classes_default_to_empty() {
    let raw = json!({
        "organizations": [{"name": "Elders Quorum", "uuid": "eq"}],
        "households": [{"members": [{"displayName": "Roe, Rick", "preferredName": "Rick Roe"}]}]
    });

    let snapshot = MembershipSnapshot::from_value(&raw).unwrap();

    assert!(snapshot.organizations[0].child_orgs.is_empty());
    assert!(snapshot.households[0].members[0].classes.is_empty());
}

#[test]
fn test_missing_organizations_is_invalid() {
    let raw = json!({"households": []});
    let err = MembershipSnapshot::from_value(&raw).unwrap_err();
    assert!(matches!(err, CoreError::InvalidSnapshot(_)));
    assert!(!err.is_lookup());
}

#[test]
fn test_missing_preferred_name_is_invalid() {
    let raw = json!({
        "organizations": [],
        "households": [{"members": [{"displayName": "Doe, Jane", "classes": []}]}]
    });
    assert!(MembershipSnapshot::from_value(&raw).is_err());
}

#[test]
fn test_non_object_document_is_invalid() {
    assert!(MembershipSnapshot::from_value(&json!([1, 2, 3])).is_err());
}

// ============================================================================
// Credentials / Selector
// ============================================================================

#[test]
fn test_credentials_debug_redacts_password() {
    let creds = Credentials::new("jdoe", "hunter2");
    let debug = format!("{creds:?}");
    assert!(debug.contains("jdoe"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn test_client_credentials_debug_redacts_secret() {
    let client = OAuth2ClientCredentials::new("client-abc", "s3cret");
    let debug = format!("{client:?}");
    assert!(debug.contains("client-abc"));
    assert!(!debug.contains("s3cret"));
}

#[test]
fn test_selector_display() {
    assert_eq!(ClassSelector::organization("Primary").to_string(), "Primary");
    assert_eq!(
        ClassSelector::new("Primary", "Sunbeam").to_string(),
        "Primary / Sunbeam"
    );
    assert!(ClassSelector::new("Primary", "").targets_organization());
}
