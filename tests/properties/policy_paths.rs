//! Property tests for policy file and lockfile path derivation.

use proptest::prelude::*;

use policy_push::domain::value_objects::lockfile_relative_path;
use policy_push::PolicyPaths;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `<stem>.rb` always locks to `<stem>.lock.json`.
    #[test]
    fn property_rb_suffix_is_replaced(dirs in proptest::collection::vec(segment(), 0..=3), stem in segment()) {
        let mut parts = dirs.clone();
        parts.push(stem.clone());
        let base = parts.join("/");

        prop_assert_eq!(lockfile_relative_path(&format!("{}.rb", base)), format!("{}.lock.json", base));
    }

    /// PROPERTY: names without `.rb` get the suffix appended verbatim.
    #[test]
    fn property_other_names_get_suffix(stem in segment()) {
        let derived = lockfile_relative_path(&stem);
        prop_assert!(derived.ends_with(".lock.json"));
        prop_assert!(derived.starts_with(stem.as_str()));
    }

    /// PROPERTY: the lockfile sits in the same directory as the policy file.
    #[test]
    fn property_lockfile_is_sibling_of_policyfile(dirs in proptest::collection::vec(segment(), 0..=3), stem in segment()) {
        let mut parts = dirs;
        parts.push(format!("{}.rb", stem));
        let paths = PolicyPaths::new("/srv/app", Some(parts.join("/")));

        let lockfile_path = paths.lockfile_path();
        let policyfile_path = paths.policyfile_path();
        prop_assert_eq!(lockfile_path.parent(), policyfile_path.parent());
        prop_assert!(paths.lockfile_path().starts_with("/srv/app"));
    }
}
