#![no_main]

use elm_constants::{Config, entry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Parse errors build a source span from the content; that must not panic.
    if let Ok(config) = Config::from_json_str(content, "fuzz.json") {
        let _ = entry::normalize(&config.values);
    }
});
