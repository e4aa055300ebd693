#![no_main]

use elm_constants::entry::{Identifier, camel_case};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|name: &str| {
    let converted = camel_case(name);

    if let Some(identifier) = Identifier::parse(&converted) {
        assert!(identifier.as_str().is_ascii());
    }
});
