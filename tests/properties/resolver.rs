//! Property tests for version resolution over a populated table.

use proptest::prelude::*;

use modelrepo::domain::entities::DataRequest;
use modelrepo::domain::ports::RowStore;
use modelrepo::domain::services::next_version;
use modelrepo::infrastructure::MemoryRowStore;
use modelrepo::{RecordField, RowKey, SemanticVersion};

const NAME: &str = "org.acme.model";

fn version() -> impl Strategy<Value = SemanticVersion> {
    (0u32..20, 0u32..20, 0u32..50).prop_map(|(a, b, c)| SemanticVersion::new(a, b, c))
}

fn reserve(store: &MemoryRowStore, name: &str, version: SemanticVersion) {
    store
        .put(&RowKey::new(name, version), RecordField::Uploaded, false.into())
        .unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the next version bumps the patch of the highest stored version.
    #[test]
    fn property_next_version_follows_the_maximum(
        ours in proptest::collection::vec(version(), 0..12),
        theirs in proptest::collection::vec(version(), 0..12),
    ) {
        let store = MemoryRowStore::new();
        for v in &ours {
            reserve(&store, NAME, *v);
        }
        for v in &theirs {
            reserve(&store, "org.acme.other", *v);
        }

        let expected = ours
            .iter()
            .copied()
            .max()
            .unwrap_or(SemanticVersion::ZERO)
            .next_patch()
            .unwrap();
        prop_assert_eq!(next_version(&store, NAME).unwrap(), expected);
    }

    /// PROPERTY: resolving then reserving yields a strictly increasing sequence
    /// and never lands on an existing key.
    #[test]
    fn property_sequential_resolution_is_monotonic(
        seed in proptest::collection::vec(version(), 0..6),
        rounds in 1usize..8,
    ) {
        let store = MemoryRowStore::new();
        for v in &seed {
            reserve(&store, NAME, *v);
        }

        let mut previous: Option<SemanticVersion> = None;
        for _ in 0..rounds {
            let next = next_version(&store, NAME).unwrap();
            let key = RowKey::new(NAME, next);
            prop_assert!(store.get(&key, &DataRequest::all()).unwrap().is_none());
            if let Some(prev) = previous {
                prop_assert!(next > prev);
            }
            reserve(&store, NAME, next);
            previous = Some(next);
        }
    }
}
