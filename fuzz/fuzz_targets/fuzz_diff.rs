#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (old, new) = data.split_at(data.len() / 2);
    if let (Ok(old), Ok(new)) = (std::str::from_utf8(old), std::str::from_utf8(new)) {
        // Fuzz document diffing - this should never panic
        let _ = gantry::diff::diff_documents(old, new);
    }
});
