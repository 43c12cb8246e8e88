//! Property-based tests for help selection and passthrough forwarding

use proptest::prelude::*;
use std::ffi::OsString;
use td_import::delegate::{is_help_mode, ArgumentTail};

fn plain_arg() -> impl Strategy<Value = String> {
    "[a-z0-9./_-]{1,12}"
}

proptest! {
    /// Two or more arguments whose first is not an import: token are forwarded verbatim.
    #[test]
    fn multiple_plain_args_are_forwarded(args in proptest::collection::vec(plain_arg(), 2..8)) {
        prop_assume!(!args[0].starts_with("import:"));
        prop_assert!(!is_help_mode(&args));
        let forwarded: Vec<OsString> = args.iter().map(OsString::from).collect();
        prop_assert_eq!(ArgumentTail::from_args(&args), ArgumentTail::Passthrough(forwarded));
    }

    /// Zero or one argument always selects help.
    #[test]
    fn short_args_select_help(args in proptest::collection::vec(plain_arg(), 0..=1)) {
        prop_assert_eq!(ArgumentTail::from_args(&args), ArgumentTail::Help);
    }

    /// A leading import: token selects help regardless of what follows.
    #[test]
    fn leading_command_token_selects_help(
        name in "[a-z_]{1,10}",
        rest in proptest::collection::vec(plain_arg(), 0..5),
    ) {
        let mut args = vec![format!("import:{}", name)];
        args.extend(rest);
        prop_assert!(is_help_mode(&args));
    }
}
