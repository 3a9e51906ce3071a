use super::*;

mod parse {
    use super::*;

    #[test]
    fn should_return_method_when_name_is_standard_then_match_variant() {
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("PATCH"), Some(Method::Patch));
        assert_eq!(Method::parse("OPTIONS"), Some(Method::Options));
    }

    #[test]
    fn should_return_none_when_case_differs_then_keep_lookup_exact() {
        assert_eq!(Method::parse("get"), None);
        assert_eq!(Method::parse("Post"), None);
    }

    #[test]
    fn should_return_none_when_name_unknown_then_reject_extension_methods() {
        assert_eq!(Method::parse("PROPFIND"), None);
        assert_eq!(Method::parse(""), None);
        assert_eq!(Method::parse(" GET"), None);
    }
}

mod from_str {
    use super::*;

    #[test]
    fn should_report_offending_value_when_unknown_then_return_error() {
        let err = "BREW".parse::<Method>().unwrap_err();

        assert_eq!(err, UnknownMethod("BREW".into()));
        assert_eq!(err.to_string(), "unknown HTTP method `BREW`");
    }

    #[test]
    fn should_round_trip_through_display_when_standard_then_preserve_name() {
        for method in Method::ALL {
            assert_eq!(method.to_string().parse::<Method>(), Ok(method));
        }
    }
}

mod all {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn should_list_each_method_once_then_cover_every_variant() {
        let unique: HashSet<_> = Method::ALL.iter().collect();

        assert_eq!(unique.len(), Method::ALL.len());
        assert_eq!(Method::ALL[0], Method::Get);
    }
}
