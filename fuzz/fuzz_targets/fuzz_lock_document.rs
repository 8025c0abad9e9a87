#![no_main]

use libfuzzer_sys::fuzz_target;

use policy_push::domain::entities::{LockDocument, PolicyLock};
use policy_push::StorageConfig;

fuzz_target!(|data: &[u8]| {
    // Arbitrary lockfile JSON must be accepted or rejected, never panic
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(document) = LockDocument::from_value(value) else {
        return;
    };
    let storage = StorageConfig::new("/cache").use_policyfile_lock("/srv/app/Policyfile.lock.json".as_ref());
    if let Ok(lock) = PolicyLock::build_from_lock_data(&storage, &document) {
        let _ = serde_json::to_vec(&lock.to_lock());
    }
});
