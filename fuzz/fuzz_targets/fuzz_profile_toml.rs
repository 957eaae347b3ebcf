#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz profile document parsing - this should never panic
        if let Ok((profile, _)) = gantry::store::parse_profile(content, Path::new("fuzz.toml")) {
            // Anything that parsed must render without panicking
            let _ = gantry::store::render_profile(&profile);
        }
    }
});
