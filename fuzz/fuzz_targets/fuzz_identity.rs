#![no_main]

use libfuzzer_sys::fuzz_target;
use modelrepo::infrastructure::upload::storage_location;
use modelrepo::ArtifactIdentity;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(identity) = ArtifactIdentity::parse(input) {
            // Whatever parses must print back to something that parses the same.
            let reparsed = ArtifactIdentity::parse(&identity.to_string());
            assert_eq!(reparsed.as_ref(), Ok(&identity));

            if let Some(location) = storage_location(&identity) {
                assert!(!location.contains(".."));
                assert!(!location.starts_with('/'));
            }
        }
    }
});
