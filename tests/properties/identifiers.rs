//! Property tests for cookbook identifiers and policy group names.

use proptest::prelude::*;

use policy_push::domain::value_objects::CookbookIdentifier;
use policy_push::PolicyGroup;

fn file_entry() -> impl Strategy<Value = (String, String)> {
    (
        proptest::string::string_regex("[a-z]{1,8}(/[a-z]{1,8}){0,2}\\.rb").unwrap(),
        proptest::string::string_regex("[0-9a-f]{64}").unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the identifier does not depend on file order.
    #[test]
    fn property_identifier_ignores_order(files in proptest::collection::vec(file_entry(), 0..8)) {
        let forward = CookbookIdentifier::from_file_checksums(
            files.iter().map(|(p, c)| (p.as_str(), c.as_str())),
        );
        let backward = CookbookIdentifier::from_file_checksums(
            files.iter().rev().map(|(p, c)| (p.as_str(), c.as_str())),
        );

        prop_assert_eq!(forward.as_str().len(), 64);
        prop_assert_eq!(forward, backward);
    }

    /// PROPERTY: a 64-hex identifier always has a dotted decimal form.
    #[test]
    fn property_dotted_decimal_has_three_parts(files in proptest::collection::vec(file_entry(), 1..4)) {
        let id = CookbookIdentifier::from_file_checksums(
            files.iter().map(|(p, c)| (p.as_str(), c.as_str())),
        );
        let dotted = id.dotted_decimal().unwrap();

        prop_assert_eq!(dotted.split('.').count(), 3);
        prop_assert!(dotted.split('.').all(|part| part.parse::<u64>().is_ok()));
    }

    /// PROPERTY: group names from the allowed alphabet are accepted verbatim,
    /// except the dot segments `.` and `..`.
    #[test]
    fn property_policy_group_accepts_allowed_names(name in "[A-Za-z0-9_.:-]{1,24}") {
        prop_assume!(name != "." && name != "..");
        let group = PolicyGroup::new(name.clone()).unwrap();
        prop_assert_eq!(group.as_str(), name.as_str());
    }

    /// PROPERTY: server path characters never make a valid group name.
    #[test]
    fn property_policy_group_rejects_separators(prefix in "[a-z]{0,6}", bad in "[ /?#%]", suffix in "[a-z]{0,6}") {
        let name = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(PolicyGroup::new(name).is_err());
    }
}
