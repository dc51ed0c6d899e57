// Wire-format contract for the (external) HTTP layer:
// ids are never exposed, timestamps travel as RFC 3339.

use boxstash_core::model::{current_version, Provider, User, VagrantBox, Version, VersionStatus};
use serde_json::json;

#[test]
fn test_box_timestamps_serialize_as_internet_time() {
    // Given: A stored box with epoch timestamps
    let vbox = VagrantBox {
        id: 3,
        user_id: 1,
        created_at: 1_500_000_000,
        updated_at: 1_500_000_060,
        ..VagrantBox::new("jdoe", "base")
    };

    // When: It is serialized
    let value = serde_json::to_value(&vbox).unwrap();

    // Then: Timestamps are RFC 3339 and keys are hidden
    assert_eq!(value["created_at"], "2017-07-14T02:40:00Z");
    assert_eq!(value["updated_at"], "2017-07-14T02:41:00Z");
    assert!(value.get("id").is_none());
    assert!(value.get("user_id").is_none());
    assert_eq!(value["username"], "jdoe");
}

#[test]
fn test_unset_timestamps_serialize_empty() {
    let value = serde_json::to_value(Provider::new("virtualbox")).unwrap();
    assert_eq!(value["created_at"], "");
}

#[test]
fn test_incoming_timestamps_parse_to_epoch() {
    let version: Version = serde_json::from_value(json!({
        "version": "1.0",
        "status": "released",
        "created_at": "2017-07-14T02:40:00Z",
        "updated_at": "not a time"
    }))
    .unwrap();

    assert_eq!(version.created_at, 1_500_000_000);
    assert_eq!(version.updated_at, 0);
    assert_eq!(version.status, VersionStatus::Released);
    assert_eq!(version.id, 0, "ids are never taken from the wire");
}

#[test]
fn test_partial_user_body_uses_defaults() {
    let user: User = serde_json::from_value(json!({ "username": "jdoe" })).unwrap();
    assert_eq!(user, User::new("jdoe"));
}

#[test]
fn test_box_with_current_version_serializes_nested() {
    let released = Version {
        status: VersionStatus::Released,
        ..Version::new("1.0")
    };
    let vbox = VagrantBox {
        current_version: current_version(std::slice::from_ref(&released)),
        versions: vec![released],
        ..VagrantBox::new("jdoe", "base")
    };

    let value = serde_json::to_value(&vbox).unwrap();
    assert_eq!(value["current_version"]["version"], "1.0");
    assert_eq!(value["versions"].as_array().map(Vec::len), Some(1));
}
