#![no_main]

use libfuzzer_sys::fuzz_target;

use policy_push::RunListItem;

fuzz_target!(|data: &[u8]| {
    if let Ok(item) = std::str::from_utf8(data) {
        if let Some(parsed) = RunListItem::parse(item) {
            // The rendered form must parse back to the same item
            assert_eq!(RunListItem::parse(&parsed.to_string()), Some(parsed));
        }
    }
});
