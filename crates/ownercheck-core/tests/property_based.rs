//! Property-based tests for the COMMENT_ARGS decoder using proptest

use ownercheck_core::{CommentArgs, DecodeError};
use proptest::prelude::*;

/// Escape args the way Atlantis does: backslash before every character,
/// commas between arguments.
fn encode(args: &[String]) -> String {
    args.iter()
        .map(|arg| arg.chars().flat_map(|c| ['\\', c]).collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
}

// Arguments without backslashes; commas and spaces are fair game
fn arb_arg() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ,=./_:-]{0,12}").expect("valid regex")
}

proptest! {
    #[test]
    fn test_decode_inverts_encode(args in prop::collection::vec(arb_arg(), 1..6)) {
        let encoded = encode(&args);
        prop_assume!(!encoded.is_empty());
        prop_assume!(encoded.matches("\\,").count() * 2 != encoded.len());

        let decoded = CommentArgs::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.into_inner(), args);
    }

    #[test]
    fn test_arg_count_is_separator_count_plus_one(args in prop::collection::vec("[a-z]{1,8}", 1..8)) {
        let encoded = encode(&args);
        let separators = encoded.matches(',').count();

        let decoded = CommentArgs::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.len(), separators + 1);
    }

    #[test]
    fn test_decode_never_panics(s in ".{0,64}") {
        let _ = CommentArgs::decode(&s);
    }

    #[test]
    fn test_unescaped_letter_is_rejected(prefix in prop::collection::vec(arb_arg(), 0..3), bare in "[a-z]{2}") {
        let mut encoded = encode(&prefix);
        if !prefix.is_empty() {
            encoded.push(',');
        }
        encoded.push_str(&bare);

        let is_improper = matches!(
            CommentArgs::decode(&encoded),
            Err(DecodeError::ImproperlyEscaped { .. })
        );
        prop_assert!(is_improper);
    }

    #[test]
    fn test_only_escaped_commas_is_ambiguous(n in 1usize..32) {
        let encoded = "\\,".repeat(n);
        let is_ambiguous = matches!(
            CommentArgs::decode(&encoded),
            Err(DecodeError::Ambiguous { .. })
        );
        prop_assert!(is_ambiguous);
    }
}
