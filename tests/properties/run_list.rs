//! Property tests for run list item parsing.

use proptest::prelude::*;

use policy_push::RunListItem;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_.-]{1,16}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every accepted spelling renders to the fully qualified form.
    #[test]
    fn property_forms_normalize(cookbook in name(), recipe in name()) {
        let expected = format!("recipe[{}::{}]", cookbook, recipe);
        let spellings = [
            format!("recipe[{}::{}]", cookbook, recipe),
            format!("{}::{}", cookbook, recipe),
        ];
        for spelling in &spellings {
            let item = RunListItem::parse(spelling).unwrap();
            prop_assert_eq!(item.to_string(), expected.clone());
        }
    }

    /// PROPERTY: a bare cookbook name means its default recipe.
    #[test]
    fn property_bare_cookbook_uses_default_recipe(cookbook in name()) {
        let item = RunListItem::parse(&format!("recipe[{}]", cookbook)).unwrap();
        prop_assert_eq!(item.cookbook(), cookbook.as_str());
        prop_assert_eq!(item.recipe(), "default");
    }

    /// PROPERTY: rendering is a fixed point of parsing.
    #[test]
    fn property_render_is_stable(cookbook in name(), recipe in name()) {
        let once = RunListItem::parse(&format!("{}::{}", cookbook, recipe)).unwrap();
        let twice = RunListItem::parse(&once.to_string()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: roles never parse.
    #[test]
    fn property_roles_rejected(role in name()) {
        let role_item = format!("role[{}]", role);
        prop_assert!(RunListItem::parse(&role_item).is_none());
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(input in ".{0,40}") {
        let _ = RunListItem::parse(&input);
    }
}
