#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz table decoding - malformed tables are errors, never panics
        let _ = modelrepo::infrastructure::store::decode_table(content);
    }
});
