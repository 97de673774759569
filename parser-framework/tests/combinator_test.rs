use parser_framework::{
    any_char, attempt, between, chainl1, chainr1, char_, choice, count, digit, end_by, end_by1,
    label, lazy, look_ahead, many, many1, many_till, not_followed_by, option, optional, parse,
    pure, recursive, repeat, sep_by, sep_by1, sep_end_by, skip_many, space, string, Parser, Reply,
    Source,
};
use rstest::rstest;

fn number() -> Parser<i32> {
    many1(digit()).map(|digits| {
        digits
            .into_iter()
            .fold(0, |acc, d| acc * 10 + d.to_digit(10).unwrap() as i32)
    })
}

fn nesting() -> Parser<usize> {
    between(char_('('), char_(')'), lazy(nesting))
        .map(|depth| depth + 1)
        .or(pure(0))
}

#[test]
fn test_choice_tries_next_after_clean_failure() {
    let keyword = choice(vec![string("if"), string("else")]);
    assert_eq!(
        parse(&keyword, "else x"),
        Reply::ok("else".to_string(), Source::at("else x", 4))
    );
}

#[test]
fn test_choice_commits_after_consumption() {
    let open_a = char_('(').ignore_then(char_('a'));
    let open_b = char_('(').ignore_then(char_('b'));
    let reply = parse(&choice(vec![open_a.clone(), open_b]), "(b)");
    assert_eq!(reply, parse(&open_a, "(b)"));
    assert_eq!(reply.offset(), 1);
}

#[test]
fn test_attempt_allows_backtracking() {
    let paren = |inner: &str| between(string("("), string(")"), string(inner));
    let parser = choice(vec![attempt(paren("a")), paren("b")]);
    assert_eq!(
        parse(&parser, "(b)"),
        Reply::ok("b".to_string(), Source::at("(b)", 3))
    );
}

#[test]
fn test_attempt_rewinds_failure_position() {
    let pair = attempt(char_('(').ignore_then(char_('a')));
    let reply = parse(&pair, "(b");
    assert_eq!(reply.offset(), 0);
    assert_eq!(reply.message().as_deref(), Some("expected 'a'"));
}

#[test]
fn test_choice_returns_last_failure() {
    let parser = choice(vec![string("x"), string("y")]);
    assert_eq!(parse(&parser, "z").message().as_deref(), Some("expected \"y\""));
}

#[test]
fn test_choice_without_alternatives_fails() {
    let parser: Parser<()> = choice(Vec::new());
    assert!(parse(&parser, "abc").is_err());
}

#[test]
fn test_look_ahead_does_not_consume() {
    let reply = parse(&look_ahead(string("ab")), "abc");
    assert_eq!(reply, Reply::ok("ab".to_string(), Source::new("abc")));
}

#[test]
fn test_look_ahead_keeps_consuming_failures() {
    let reply = parse(&look_ahead(string("a").then(string("x"))), "ab");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 1);
}

#[rstest]
#[case("a", true)]
#[case("", true)]
#[case("1", false)]
fn test_not_followed_by(#[case] input: &str, #[case] succeeds: bool) {
    let reply = parse(&not_followed_by(digit()), input);
    assert_eq!(reply.is_ok(), succeeds);
    assert_eq!(reply.offset(), 0);
}

#[test]
fn test_label_replaces_clean_failure_message() {
    let reply = parse(&label("number", number()), "x");
    assert_eq!(reply.message().as_deref(), Some("expected number"));
}

#[test]
fn test_label_keeps_message_after_consumption() {
    let pair = label("pair", char_('(').ignore_then(digit()));
    let reply = parse(&pair, "(x");
    assert_eq!(reply.offset(), 1);
    assert_eq!(reply.message().as_deref(), Some("expected digit"));
}

#[test]
fn test_many_accepts_zero_matches() {
    assert_eq!(parse(&many(digit()), "abc"), Reply::ok(vec![], Source::new("abc")));
}

#[test]
fn test_many1_requires_one_match() {
    let reply = parse(&many1(digit()), "abc");
    assert_eq!(reply.offset(), 0);
    assert_eq!(reply.message().as_deref(), Some("expected digit"));
}

#[test]
fn test_many_stops_at_first_clean_failure() {
    let reply = parse(&many(digit()), "123a");
    assert_eq!(reply, Reply::ok(vec!['1', '2', '3'], Source::at("123a", 3)));
}

#[test]
fn test_many_propagates_failure_after_consumption() {
    let pair = char_('a').then(char_('b'));
    let reply = parse(&many(pair), "ababac");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 5);
}

#[test]
#[should_panic(expected = "accepts empty input")]
fn test_many_of_empty_parser_panics() {
    let _ = parse(&many(pure(1)), "abc");
}

#[test]
#[should_panic(expected = "accepts empty input")]
fn test_skip_many_of_optional_parser_panics() {
    let _ = parse(&skip_many(optional(space())), "abc");
}

#[test]
fn test_count_allows_empty_parser() {
    let reply = parse(&count(3, pure('x')), "abc");
    assert_eq!(reply, Reply::ok(vec!['x'; 3], Source::new("abc")));
}

#[test]
fn test_count_fails_when_short() {
    let reply = parse(&count(2, digit()), "1a");
    assert_eq!(reply.offset(), 1);
    assert_eq!(reply.message().as_deref(), Some("expected digit"));
}

#[test]
fn test_repeat_stops_at_maximum() {
    let reply = parse(&repeat(1, Some(2), digit()), "123");
    assert_eq!(reply, Reply::ok(vec!['1', '2'], Source::at("123", 2)));
}

#[test]
#[should_panic(expected = "exceeds maximum")]
fn test_repeat_rejects_inverted_bounds() {
    let _ = repeat(3, Some(1), digit());
}

#[rstest]
#[case("1,2,3", Some(vec![1, 2, 3]), 5)]
#[case("7", Some(vec![7]), 1)]
#[case("", Some(vec![]), 0)]
#[case("1,2,", None, 4)]
fn test_sep_by(#[case] input: &str, #[case] expected: Option<Vec<i32>>, #[case] offset: usize) {
    let reply = parse(&sep_by(number(), char_(',')), input);
    assert_eq!(reply.value().cloned(), expected);
    assert_eq!(reply.offset(), offset);
}

#[test]
fn test_sep_by1_requires_an_item() {
    assert!(parse(&sep_by1(number(), char_(',')), "").is_err());
}

#[test]
fn test_end_by_requires_terminators() {
    let reply = parse(&end_by(number(), char_(';')), "1;2;");
    assert_eq!(reply, Reply::ok(vec![1, 2], Source::at("1;2;", 4)));

    let reply = parse(&end_by(number(), char_(';')), "1;2");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 3);

    assert!(parse(&end_by1(number(), char_(';')), "x").is_err());
}

#[rstest]
#[case("1;2;")]
#[case("1;2")]
fn test_sep_end_by_accepts_optional_terminator(#[case] input: &str) {
    let reply = parse(&sep_end_by(number(), char_(';')), input);
    assert_eq!(reply.value(), Some(&vec![1, 2]));
    assert_eq!(reply.offset(), input.len());
}

#[test]
fn test_many_till_consumes_terminator() {
    let comment = string("<!--").ignore_then(many_till(any_char(), string("-->")));
    let reply = parse(&comment, "<!--abc-->rest");
    assert_eq!(reply, Reply::ok(vec!['a', 'b', 'c'], Source::at("<!--abc-->rest", 10)));
}

#[test]
fn test_many_till_fails_at_end_of_input() {
    let reply = parse(&many_till(any_char(), string("-->")), "abc");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 3);
}

#[test]
fn test_chains_fold_in_their_direction() {
    let minus = char_('-').to(|a: i32, b: i32| a - b);
    assert_eq!(parse(&chainl1(number(), minus.clone()), "9-3-2").into_value(), Some(4));
    assert_eq!(parse(&chainr1(number(), minus), "9-3-2").into_value(), Some(8));
}

#[test]
fn test_chain_fails_on_dangling_operator() {
    let minus = char_('-').to(|a: i32, b: i32| a - b);
    let reply = parse(&chainl1(number(), minus), "9-");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 2);
}

#[test]
fn test_option_and_optional() {
    assert_eq!(parse(&option(0, number()), "x").into_value(), Some(0));
    assert_eq!(parse(&option(0, number()), "42").into_value(), Some(42));
    assert_eq!(parse(&optional(number()), "x").into_value(), Some(None));
}

#[test]
fn test_lazy_supports_recursion() {
    let reply = parse(&nesting(), "((()))");
    assert_eq!(reply, Reply::ok(3, Source::at("((()))", 6)));
}

#[test]
fn test_recursive_parser_refers_to_itself() {
    let depth = recursive(|list| {
        between(char_('['), char_(']'), sep_by(list, char_(',')))
            .map(|items: Vec<usize>| 1 + items.into_iter().max().unwrap_or(0))
    });
    assert_eq!(parse(&depth, "[[],[[]]]").into_value(), Some(3));
    assert_eq!(parse(&depth, "[]").into_value(), Some(1));
    assert!(parse(&depth, "[[]").is_err());
}
