//! End-to-end runs: snapshot acquisition through roster output.

use roster_core::{ClassSelector, CoreError};
use roster_fetch::{
    CredentialChain, CredentialError, Endpoints, MockTransport, SecretField, SecretSource,
};
use roster_store::{RosterWriter, SnapshotCache, SnapshotSource, StoreError};
use serde_json::{Value, json};
use tempfile::TempDir;

struct Fixed;

impl SecretSource for Fixed {
    fn id(&self) -> &str {
        "fixed"
    }

    fn lookup(&self, field: &SecretField) -> Result<Option<String>, CredentialError> {
        Ok(Some(format!("{}-value", field.account)))
    }
}

fn chain() -> CredentialChain {
    CredentialChain::new().with_source(Box::new(Fixed))
}

fn ward() -> Value {
    json!({
        "organizations": [
            {"name": "Primary", "uuid": "p", "childOrgs": [{"name": "CTR 7", "uuid": "ctr7"}]},
            {"name": "Choir", "uuid": "c1"},
            {"name": "Choir", "uuid": "c2"}
        ],
        "households": [
            {"members": [
                {"displayName": "Zed", "preferredName": "Z", "classes": ["ctr7"]},
                {"displayName": "Ann", "preferredName": "A", "classes": ["ctr7", "p"]}
            ]},
            {"members": [
                {"displayName": "Bo", "preferredName": "B", "classes": ["p"]}
            ]}
        ]
    })
}

fn live_transport() -> MockTransport {
    MockTransport::new()
        .reply(json!({"id_token": "tok"}))
        .reply(json!({"name": "oauth_token", "value": "cookie"}))
        .reply(ward())
}

#[tokio::test]
async fn test_second_run_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("data").join("membertools_data.json");
    let writer = RosterWriter::new(dir.path().join("data").join("class_members.txt"));
    let selector = ClassSelector::new("Primary", "CTR 7");
    let endpoints = Endpoints::default();

    let first_transport = live_transport();
    let source = SnapshotSource::new(SnapshotCache::new(&cache_path), &first_transport, &endpoints, 1);
    let snapshot = source.acquire(false, &chain(), &chain()).await.unwrap();
    let first = writer.publish(&snapshot, &selector).await.unwrap();
    let first_file = tokio::fs::read_to_string(writer.path()).await.unwrap();
    assert_eq!(first_transport.request_count(), 3);

    let second_transport = MockTransport::new();
    let source = SnapshotSource::new(SnapshotCache::new(&cache_path), &second_transport, &endpoints, 1);
    let snapshot = source
        .acquire(false, &CredentialChain::new(), &CredentialChain::new())
        .await
        .unwrap();
    let second = writer.publish(&snapshot, &selector).await.unwrap();
    let second_file = tokio::fs::read_to_string(writer.path()).await.unwrap();

    assert_eq!(second_transport.request_count(), 0);
    assert_eq!(first, vec!["A", "Z"]);
    assert_eq!(first, second);
    assert_eq!(first_file, "A\nZ\n");
    assert_eq!(first_file, second_file);
}

#[tokio::test]
async fn test_organization_roster_written() {
    let dir = TempDir::new().unwrap();
    let writer = RosterWriter::new(dir.path().join("out.txt"));

    let names = writer
        .publish(&ward(), &ClassSelector::organization("Primary"))
        .await
        .unwrap();

    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(tokio::fs::read_to_string(writer.path()).await.unwrap(), "A\nB\n");
}

#[tokio::test]
async fn test_ambiguous_organization_leaves_output_untouched() {
    let dir = TempDir::new().unwrap();
    let writer = RosterWriter::new(dir.path().join("out.txt"));
    tokio::fs::write(writer.path(), "previous\n").await.unwrap();

    let err = writer
        .publish(&ward(), &ClassSelector::organization("Choir"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Core(CoreError::AmbiguousOrganization { count: 2, .. })
    ));
    assert_eq!(
        tokio::fs::read_to_string(writer.path()).await.unwrap(),
        "previous\n"
    );
}

#[tokio::test]
async fn test_unknown_class_leaves_output_absent() {
    let dir = TempDir::new().unwrap();
    let writer = RosterWriter::new(dir.path().join("out.txt"));

    let err = writer
        .publish(&ward(), &ClassSelector::new("Primary", "CTR 8"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Core(CoreError::ClassNotFound { .. })));
    assert!(!writer.path().exists());
}
