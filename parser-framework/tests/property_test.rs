//! Property tests for literal matching and committed choice.

use parser_framework::{choice, many, parse, satisfy, string, Reply, Source};
use proptest::prelude::*;

proptest! {
    #[test]
    fn literal_matches_itself(text in "\\PC*") {
        let reply = parse(&string(&text), text.as_str());
        prop_assert_eq!(reply, Reply::ok(text.clone(), Source::at(text.as_str(), text.len())));
    }

    #[test]
    fn literal_fails_at_start_on_mismatch(literal in "[a-z]{1,8}", input in "[a-z]{0,8}") {
        prop_assume!(!input.starts_with(&literal));
        let reply = parse(&string(&literal), input.as_str());
        prop_assert!(reply.is_err());
        prop_assert_eq!(reply.offset(), 0);
    }

    #[test]
    fn clean_failure_defers_to_next_alternative(input in "[a-z]{0,8}") {
        let word = many(satisfy(|c| c.is_ascii_lowercase()));
        let never = string("0").map(|_| Vec::new());
        let either = choice(vec![never, word.clone()]);
        prop_assert_eq!(parse(&either, input.as_str()), parse(&word, input.as_str()));
    }

    #[test]
    fn consumed_failure_is_final(digits in "[0-9]{1,6}") {
        let input = format!("{digits}x");
        let strict = many(satisfy(|c| c.is_ascii_digit())).then(string("!"));
        let fallback = many(satisfy(|c| c.is_ascii_digit())).then(string("x"));
        let reply = parse(&choice(vec![strict, fallback]), input.as_str());
        prop_assert!(reply.is_err());
        prop_assert_eq!(reply.offset(), digits.len());
    }
}
