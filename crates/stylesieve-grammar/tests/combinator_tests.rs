//! Integration tests for the matcher primitives and combinators.

use std::sync::Arc;

use stylesieve_grammar::{
    Alternative, AnythingMatcher, BlockMatcher, CheckedMatcher, CustomPropertyMatcher,
    DeclarationSanitizer, DelimMatcher, Forward, FunctionMatcher, GrammarError, GrammarMatch,
    Juxtaposition, KeywordMatcher, MatchOptions, MatcherExt, MatcherFactory, MatcherRef,
    NoWhitespace, NothingMatcher, Quantifier, TokenMatcher, UnorderedGroup, WhitespaceMatcher,
    next_position,
};
use stylesieve_syntax::{
    ComponentValue, Declaration, TokenKind, parse_component_values, to_css_string,
};

fn parse(css: &str) -> Vec<ComponentValue> {
    parse_component_values(css)
}

/// Every match from the start of `values`, after leading whitespace.
fn all_matches(matcher: &MatcherRef, values: &[ComponentValue]) -> Vec<GrammarMatch> {
    let options = MatchOptions::default();
    let start = next_position(values, 0, options);
    matcher.generate_matches(values, start, options).collect()
}

fn full(matcher: &MatcherRef, css: &str) -> Option<GrammarMatch> {
    matcher.match_against(&parse(css), MatchOptions::default())
}

fn keyword(words: &[&str]) -> MatcherRef {
    Arc::new(KeywordMatcher::new(words.iter().copied()))
}

fn text(values: &[ComponentValue], found: &GrammarMatch) -> String {
    to_css_string(found.values(values).unwrap())
}

#[test]
fn test_keyword_matches_one_ident() {
    let matcher = keyword(&["ease", "linear"]);
    let values = parse("ease");
    let found = all_matches(&matcher, &values);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].consumed(), 1);
    assert!(full(&matcher, "ease-in").is_none());
}

#[test]
fn test_hash_quantifier_consumes_commas_and_whitespace() {
    let number: MatcherRef = Arc::new(TokenMatcher::new(TokenKind::Number));
    let list = number.capture("n").hash();
    let values = parse("1, 2, 3");

    let first = all_matches(&list, &values).remove(0);
    assert_eq!(first.consumed(), values.len());
    assert_eq!(first.captures_named("n").count(), 3);

    assert!(full(&list, "1 2").is_none());
    assert!(full(&list, "1,").is_none());
    assert!(full(&list, "1 ,2").is_some());
}

#[test]
fn test_custom_property_needs_two_dashes() {
    let matcher: MatcherRef = Arc::new(CustomPropertyMatcher);
    assert!(full(&matcher, "--main-color").is_some());
    assert!(full(&matcher, "-main-color").is_none());
    assert!(full(&matcher, "main-color").is_none());
}

#[test]
fn test_unordered_all_of_accepts_either_order() {
    let group: MatcherRef = Arc::new(UnorderedGroup::all_of(vec![
        keyword(&["left", "center", "right"]),
        keyword(&["top", "center", "bottom"]),
    ]));
    let values = parse("bottom left");
    let complete: Vec<_> = all_matches(&group, &values)
        .into_iter()
        .filter(|m| m.next() == values.len())
        .collect();
    assert_eq!(complete.len(), 1);
    assert_eq!(complete[0].range(), 0..3);
}

#[test]
fn test_unordered_all_of_order_independence() {
    let group: MatcherRef = Arc::new(UnorderedGroup::all_of(vec![keyword(&["a"]), keyword(&["b"])]));
    let ab = full(&group, "a b").unwrap();
    let ba = full(&group, "b a").unwrap();
    assert_eq!(ab.consumed(), ba.consumed());

    assert!(full(&group, "a a").is_none());
    assert!(full(&group, "a b a").is_none());
    assert!(full(&group, "a").is_none());
}

#[test]
fn test_unordered_some_of() {
    let group: MatcherRef = Arc::new(UnorderedGroup::some_of(vec![keyword(&["a"]), keyword(&["b"])]));
    assert!(full(&group, "a").is_some());
    assert!(full(&group, "b").is_some());
    assert!(full(&group, "b a").is_some());
    assert!(full(&group, "").is_none());
    assert!(full(&group, "a a").is_none());
}

#[test]
fn test_alternative_is_ordered_multiset_union() {
    let first: MatcherRef = Arc::new(AnythingMatcher::star());
    let second = keyword(&["a"]);
    let either: MatcherRef = Arc::new(Alternative::new(vec![Arc::clone(&first), Arc::clone(&second)]));
    let values = parse("a b");

    let mut expected = all_matches(&first, &values);
    expected.extend(all_matches(&second, &values));
    assert_eq!(all_matches(&either, &values), expected);

    let twice: MatcherRef = Arc::new(Alternative::new(vec![Arc::clone(&second), second]));
    assert_eq!(all_matches(&twice, &parse("a")).len(), 2);
}

#[test]
fn test_juxtaposition_backtracks_into_earlier_members() {
    let greedy: MatcherRef = Arc::new(AnythingMatcher::star());
    let sequence: MatcherRef = Arc::new(Juxtaposition::new(vec![greedy, keyword(&["end"])]));
    let found = full(&sequence, "a b end").unwrap();
    assert_eq!(found.consumed(), 5);

    let optional_then_required: MatcherRef =
        Arc::new(Juxtaposition::new(vec![keyword(&["a"]).optional(), keyword(&["a"])]));
    assert!(full(&optional_then_required, "a").is_some());
    assert!(full(&optional_then_required, "a a").is_some());
}

#[test]
fn test_juxtaposition_yields_every_partition() {
    let any = Arc::new(AnythingMatcher::star()) as MatcherRef;
    let pair: MatcherRef = Arc::new(Juxtaposition::new(vec![
        any.capture("left"),
        any.capture("right"),
    ]));
    let values = parse("a b");
    let complete: Vec<_> = all_matches(&pair, &values)
        .into_iter()
        .filter(|m| m.next() == values.len())
        .collect();
    // left takes 2, 1 or 0 values.
    assert_eq!(complete.len(), 3);
}

#[test]
fn test_juxtaposition_with_commas() {
    let sequence: MatcherRef = Arc::new(Juxtaposition::with_commas(vec![
        keyword(&["a"]),
        keyword(&["b"]).optional(),
        keyword(&["c"]),
    ]));
    assert!(full(&sequence, "a, b, c").is_some());
    assert!(full(&sequence, "a , c").is_some());
    assert!(full(&sequence, "a b c").is_none());
    assert!(full(&sequence, "a, b c").is_none());
}

#[test]
fn test_quantifier_is_greedy_but_gives_back() {
    let a = keyword(&["a"]).capture("a");
    let between = a.count(2, 3);
    let values = parse("a a a a");
    let found = all_matches(&between, &values);
    assert_eq!(found[0].captures().len(), 3);
    assert_eq!(found[1].captures().len(), 2);
    assert_eq!(found.len(), 2);

    assert!(full(&between, "a a").is_some());
    assert!(full(&between, "a").is_none());
    assert!(full(&between, "a a a a").is_none());
}

#[test]
fn test_star_over_optional_terminates() {
    let loose = keyword(&["a"]).optional().star();
    assert!(full(&loose, "a a").is_some());
    assert!(full(&loose, "").is_some());
}

#[test]
fn test_quantifier_bounds() {
    let a = keyword(&["a"]);
    assert_eq!(
        Quantifier::try_count(Arc::clone(&a), 3, 1).unwrap_err(),
        GrammarError::InvalidQuantifierBounds { min: 3, max: 1 }
    );
    assert!(Quantifier::try_count(a, 0, 0).is_ok());
}

#[test]
#[should_panic(expected = "invalid quantifier bounds")]
fn test_quantifier_count_panics_on_bad_bounds() {
    let _ = Quantifier::count(keyword(&["a"]), 2, 1);
}

#[test]
fn test_nothing_matcher_never_matches() {
    let nothing: MatcherRef = Arc::new(NothingMatcher);
    assert!(all_matches(&nothing, &parse("")).is_empty());
    assert!(all_matches(&nothing, &parse("a")).is_empty());

    // Even wrapped in a sequence it does not count as an empty match.
    let sequence: MatcherRef = Arc::new(Juxtaposition::new(vec![Arc::clone(&nothing)]));
    assert!(full(&sequence, "").is_none());
    // A star over it still matches zero repetitions.
    assert!(full(&nothing.star(), "").is_some());
}

#[test]
fn test_undefined_forward_matches_nothing() {
    let (handle, slot) = Forward::new();
    let optional = handle.optional();
    let values = parse("x");
    assert!(all_matches(&handle, &values).is_empty());
    assert!(handle.match_against(&parse(""), MatchOptions::default()).is_none());

    slot.define(keyword(&["x"]));
    assert_eq!(all_matches(&handle, &values).len(), 1);
    // Graphs built around the handle before it was defined see the definition.
    assert!(full(&optional, "x").is_some());
}

#[test]
fn test_forward_supports_recursion() {
    let (inner, slot) = Forward::new();
    let nested: MatcherRef = Arc::new(Alternative::new(vec![
        keyword(&["x"]),
        Arc::new(BlockMatcher::new('(', inner)),
    ]));
    slot.define(Arc::clone(&nested));

    assert!(full(&nested, "x").is_some());
    assert!(full(&nested, "(((x)))").is_some());
    assert!(full(&nested, "((y))").is_none());
}

#[test]
fn test_whitespace_matchers() {
    let plus_minus = |ws: MatcherRef| -> MatcherRef {
        Arc::new(Juxtaposition::new(vec![
            Arc::new(DelimMatcher::new(['+'])),
            ws,
            Arc::new(DelimMatcher::new(['-'])),
        ]))
    };
    let significant = plus_minus(Arc::new(WhitespaceMatcher::significant()));
    assert!(full(&significant, "+ -").is_some());
    assert!(full(&significant, "+-").is_none());

    let optional = plus_minus(Arc::new(WhitespaceMatcher::optional()));
    assert!(full(&optional, "+ -").is_some());
    assert!(full(&optional, "+-").is_some());

    let touching = plus_minus(Arc::new(NoWhitespace));
    assert!(full(&touching, "+-").is_some());
    assert!(full(&touching, "+ -").is_none());
}

#[test]
fn test_match_options_control_whitespace_skipping() {
    let pair: MatcherRef = Arc::new(Juxtaposition::new(vec![keyword(&["a"]), keyword(&["b"])]));
    let values = parse("a b");
    assert!(pair.match_against(&values, MatchOptions::default()).is_some());
    assert!(
        pair.match_against(&values, MatchOptions::significant_whitespace())
            .is_none()
    );

    // A subgraph can override the option it is matched with.
    let strict = pair.skip_whitespace(false);
    assert!(strict.match_against(&values, MatchOptions::default()).is_none());
}

#[test]
fn test_zero_length_matches_do_not_skip_whitespace() {
    let optional = keyword(&["a"]).optional();
    let values = parse("  b");
    let found = optional
        .generate_matches(&values, 1, MatchOptions::default())
        .last()
        .unwrap();
    assert!(found.is_empty());
    assert_eq!(found.next(), 1);
}

#[test]
fn test_function_captures_resolve_from_outer_list() {
    let inner = keyword(&["b"]).capture("inner");
    let function: MatcherRef = Arc::new(FunctionMatcher::new("f", inner));
    let sequence: MatcherRef = Arc::new(Juxtaposition::new(vec![keyword(&["a"]), function]));
    let values = parse("a F(b)");

    let found = sequence.match_against(&values, MatchOptions::default()).unwrap();
    let captures = found.find_all("inner");
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].scope(), &[2]);
    assert_eq!(text(&values, captures[0]), "b");
}

#[test]
fn test_function_arguments_must_match_entirely() {
    let function: MatcherRef = Arc::new(FunctionMatcher::new("f", keyword(&["a"])));
    assert!(full(&function, "f(a)").is_some());
    assert!(full(&function, "f( a )").is_some());
    assert!(full(&function, "f(a b)").is_none());
    assert!(full(&function, "g(a)").is_none());
}

#[test]
fn test_enclosing_grammar_backtracks_into_block_contents() {
    let a = keyword(&["a"]);
    let contents: MatcherRef = Arc::new(Juxtaposition::new(vec![
        a.capture("first").optional(),
        a.capture("second").optional(),
    ]));
    let block: MatcherRef = Arc::new(BlockMatcher::new('(', contents));
    let values = parse("(a)");

    let names: Vec<_> = all_matches(&block, &values)
        .iter()
        .map(|m| m.captures()[0].name().map(str::to_owned))
        .collect();
    assert_eq!(names, vec![Some("first".to_owned()), Some("second".to_owned())]);

    let wants_second: MatcherRef = Arc::new(CheckedMatcher::new(block, |_, found| {
        Ok(found.find_all("second").len() == 1)
    }));
    let found = full(&wants_second, "(a)").unwrap();
    assert!(found.find_all("first").is_empty());
    assert_eq!(found.find_all("second")[0].scope(), &[0]);
}

#[test]
fn test_function_collapses_identical_argument_matches() {
    let function: MatcherRef = Arc::new(FunctionMatcher::new(
        "f",
        Arc::new(Alternative::new(vec![keyword(&["a"]), keyword(&["a"])])),
    ));
    assert_eq!(all_matches(&function, &parse("f(a)")).len(), 1);
}

#[test]
fn test_checked_matcher_filters_candidates() {
    let single_value: MatcherRef = Arc::new(CheckedMatcher::new(
        Arc::new(AnythingMatcher::plus()),
        |_, found| Ok(found.len() == 1),
    ));
    assert!(full(&single_value, "a").is_some());
    assert!(full(&single_value, "a b").is_none());

    let failing: MatcherRef = Arc::new(CheckedMatcher::new(
        Arc::new(AnythingMatcher::plus()),
        |_, _| Err(GrammarError::InvalidQuantifierBounds { min: 1, max: 0 }),
    ));
    assert!(full(&failing, "a").is_none());
}

#[test]
fn test_checked_declaration_uses_sanitizer() {
    let sanitizer: Arc<dyn DeclarationSanitizer> = Arc::new(|declaration: &Declaration| {
        if declaration.name == "color" {
            Ok(())
        } else {
            Err(GrammarError::DeclarationRejected {
                property: declaration.name.clone(),
                reason: "unknown property".to_owned(),
            })
        }
    });
    let checked: MatcherRef = Arc::new(CheckedMatcher::declaration(sanitizer));
    let in_parens: MatcherRef = Arc::new(BlockMatcher::new('(', checked));

    assert!(full(&in_parens, "(color: red)").is_some());
    assert!(full(&in_parens, "( color : red !important )").is_some());
    assert!(full(&in_parens, "(behavior: url(x.htc))").is_none());
    assert!(full(&in_parens, "(not a declaration)").is_none());
}

#[test]
fn test_matching_is_deterministic() {
    let any = Arc::new(AnythingMatcher::star()) as MatcherRef;
    let grammar: MatcherRef = Arc::new(Juxtaposition::new(vec![
        any.capture("head"),
        Arc::new(UnorderedGroup::some_of(vec![keyword(&["a"]), keyword(&["b"])])),
        any.capture("tail"),
    ]));
    let values = parse("a b a b");
    let first = all_matches(&grammar, &values);
    let second = all_matches(&grammar, &values);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_rematching_consumed_range_is_idempotent() {
    let grammar: MatcherRef = Arc::new(Juxtaposition::new(vec![
        keyword(&["a"]).capture("x"),
        keyword(&["b"]),
    ]));
    let values = parse("a b, z");
    let found = all_matches(&grammar, &values).remove(0);
    assert_eq!(found.range(), 0..3);

    let again = grammar
        .match_against(&values[found.range()], MatchOptions::default())
        .unwrap();
    assert_eq!(again.consumed(), found.consumed());
    assert_eq!(again.captures(), found.captures());
}

#[test]
fn test_callers_can_bound_backtracking() {
    let any = Arc::new(AnythingMatcher::star()) as MatcherRef;
    let grammar: MatcherRef = Arc::new(Juxtaposition::new(vec![
        Arc::clone(&any),
        Arc::clone(&any),
        any,
    ]));
    let values = parse("a b c d e f g h");
    let bounded: Vec<_> = grammar
        .generate_matches(&values, 0, MatchOptions::default())
        .take(5)
        .collect();
    assert_eq!(bounded.len(), 5);
}

/// Drain every candidate from every start position and check its bounds.
fn assert_consumption_validity(matcher: &MatcherRef, css: &str, may_be_empty: bool) {
    let values = parse(css);
    for options in [MatchOptions::default(), MatchOptions::significant_whitespace()] {
        for start in 0..=values.len() {
            for found in matcher.generate_matches(&values, start, options).take(2000) {
                assert_eq!(found.start(), start, "{css} at {start}");
                assert!(
                    found.start() <= found.end()
                        && found.end() <= found.next()
                        && found.next() <= values.len(),
                    "{css} at {start}: {found:?}"
                );
                assert!(may_be_empty || !found.is_empty(), "{css} at {start}: {found:?}");
                if found.is_empty() {
                    assert_eq!(found.next(), start, "{css} at {start}: {found:?}");
                }
            }
        }
    }
}

#[test]
fn test_consumption_validity() {
    let word = keyword(&["a", "b"]);
    let number: MatcherRef = Arc::new(TokenMatcher::new(TokenKind::Number));
    let function: MatcherRef =
        Arc::new(FunctionMatcher::new("f", Arc::new(AnythingMatcher::star())));
    let block: MatcherRef = Arc::new(BlockMatcher::new('(', number.plus()));
    let required: MatcherRef = Arc::new(Juxtaposition::new(vec![
        Arc::new(Quantifier::plus(Arc::clone(&word))),
        Arc::new(UnorderedGroup::some_of(vec![function, block])),
        Arc::new(WhitespaceMatcher::optional()),
        Arc::new(AnythingMatcher::single()),
    ]));
    let loose: MatcherRef = Arc::new(Juxtaposition::new(vec![
        word.star(),
        Arc::new(WhitespaceMatcher::optional()),
        Arc::clone(&required).optional(),
        Arc::new(AnythingMatcher::star()),
    ]));

    for css in ["a b f(x y) (1 2) c", "  a (1) f() 2 ", "b f(a)(3)x", "", "  "] {
        assert_consumption_validity(&required, css, false);
        assert_consumption_validity(&loose, css, true);
    }

    let factory = MatcherFactory::new();
    let selectors = factory.css_selector_list();
    for css in [
        "div.foo, #bar > span",
        " a:not(.b)  [href^='x'] ~ li:nth-child(2n+1) ",
        "svg|circle,*|*,",
    ] {
        assert_consumption_validity(&selectors, css, false);
    }
}
