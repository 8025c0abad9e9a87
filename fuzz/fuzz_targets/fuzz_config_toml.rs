#![no_main]

use libfuzzer_sys::fuzz_target;

use policy_push::Config;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing should never panic
        let _ = toml::from_str::<Config>(content);
    }
});
