#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        // Fuzz step name suggestion - this should never panic
        let names = ["info-plist", "entitlements", "signing", "frameworks"];
        let _ = gantry::catalog::closest_name(name, names);
    }
});
