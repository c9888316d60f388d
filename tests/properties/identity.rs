//! Property tests for artifact identity parsing and storage locations.

use proptest::prelude::*;

use modelrepo::infrastructure::upload::storage_location;
use modelrepo::{ArtifactIdentity, SemanticVersion};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_]{1,12}").unwrap()
}

fn name() -> impl Strategy<Value = String> {
    (proptest::collection::vec(segment(), 1..=4), segment())
        .prop_map(|(group, artifact)| format!("{}.{}", group.join("."), artifact))
}

fn version() -> impl Strategy<Value = SemanticVersion> {
    (0u32..100, 0u32..100, 0u32..100).prop_map(|(a, b, c)| SemanticVersion::new(a, b, c))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `parse(display(id)) == id` for versioned and unversioned names.
    #[test]
    fn property_identity_round_trips(name in name(), version in proptest::option::of(version())) {
        let id = ArtifactIdentity::new(name.clone(), version).unwrap();
        let parsed = ArtifactIdentity::parse(&id.to_string()).unwrap();
        prop_assert_eq!(parsed.name(), name.as_str());
        prop_assert_eq!(parsed.version(), version);
        prop_assert_eq!(parsed, id);
    }

    /// PROPERTY: group and artifact split the name at its last period.
    #[test]
    fn property_group_and_artifact_rebuild_the_name(name in name()) {
        let id = ArtifactIdentity::parse(&name).unwrap();
        prop_assert_eq!(format!("{}.{}", id.group(), id.artifact()), name);
        prop_assert!(!id.artifact().contains('.'));
    }

    /// PROPERTY: the storage location mirrors the identity.
    #[test]
    fn property_storage_location_shape(name in name(), version in version()) {
        let id = ArtifactIdentity::versioned(name, version).unwrap();
        let location = storage_location(&id).unwrap();

        let expected_prefix = format!(
            "{}/{}/{}/",
            id.group().replace('.', "/"),
            id.artifact(),
            version
        );
        prop_assert!(location.starts_with(&expected_prefix), "{}", location);
        let expected_file = format!("{}-{}.tar", id.artifact(), version);
        prop_assert!(location.ends_with(&expected_file), "{}", location);
        prop_assert!(!location.starts_with('/'));
        prop_assert!(!location.contains(".."));

        let unversioned = ArtifactIdentity::new(id.name(), None).unwrap();
        prop_assert!(storage_location(&unversioned).is_none());
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(input in ".{0,40}") {
        let _ = ArtifactIdentity::parse(&input);
    }

    /// PROPERTY: names without a group, or with stray separators, are rejected.
    #[test]
    fn property_malformed_names_are_rejected(seg in segment()) {
        let no_group = ArtifactIdentity::parse(&seg);
        let empty_segment = ArtifactIdentity::parse(&format!("{seg}..{seg}"));
        let trailing = ArtifactIdentity::parse(&format!("{seg}.{seg}."));
        prop_assert!(no_group.is_err());
        prop_assert!(empty_segment.is_err());
        prop_assert!(trailing.is_err());
    }
}
