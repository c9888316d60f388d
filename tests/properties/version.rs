//! Property tests for semantic version parsing and ordering.

use proptest::prelude::*;

use modelrepo::SemanticVersion;

/// Component values biased towards both ends of the `u32` range
fn component() -> impl Strategy<Value = u32> {
    prop_oneof![
        0u32..1000,
        (u32::MAX - 3)..=u32::MAX,
        any::<u32>(),
    ]
}

fn version() -> impl Strategy<Value = SemanticVersion> {
    (component(), component(), component())
        .prop_map(|(major, minor, patch)| SemanticVersion::new(major, minor, patch))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the canonical string parses back to the same version.
    #[test]
    fn property_canonical_string_parses_back(v in version()) {
        let parsed: SemanticVersion = v.to_canonical_string().parse().unwrap();
        prop_assert_eq!(parsed, v);
    }

    /// PROPERTY: ordering is numeric per component, never textual.
    #[test]
    fn property_order_matches_integer_triples(a in version(), b in version()) {
        prop_assert_eq!(
            a.cmp(&b),
            (a.major, a.minor, a.patch).cmp(&(b.major, b.minor, b.patch))
        );
    }

    /// PROPERTY: a patch bump is the immediate successor within a minor line,
    /// and there is none at the patch ceiling.
    #[test]
    fn property_next_patch_is_strictly_greater(v in version(), other in version()) {
        let Some(next) = v.next_patch() else {
            prop_assert_eq!(v.patch, u32::MAX);
            return Ok(());
        };
        prop_assert!(next > v);
        prop_assert_eq!((next.major, next.minor), (v.major, v.minor));
        // Nothing sits strictly between v and its bump.
        prop_assert!(!(other > v && other < next));
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(input in ".{0,24}") {
        let _ = input.parse::<SemanticVersion>();
    }

    /// PROPERTY: anything that is not three dot-separated digit runs is rejected.
    #[test]
    fn property_extra_components_are_rejected(v in version(), extra in 0u32..100) {
        let four = format!("{v}.{extra}");
        let signed = format!("+{v}");
        prop_assert!(four.parse::<SemanticVersion>().is_err());
        prop_assert!(signed.parse::<SemanticVersion>().is_err());
    }
}
