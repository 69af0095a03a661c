//! Integration tests for the CSS grammars built by `MatcherFactory`.

use std::sync::Arc;

use stylesieve_grammar::{
    DeclarationSanitizer, GrammarError, MatchOptions, MatcherFactory, MatcherRef,
};
use stylesieve_syntax::{Declaration, parse_component_values};

fn matches(matcher: &MatcherRef, css: &str) -> bool {
    matcher
        .match_against(&parse_component_values(css), MatchOptions::default())
        .is_some()
}

fn assert_accepts(matcher: &MatcherRef, inputs: &[&str]) {
    for css in inputs {
        assert!(matches(matcher, css), "expected a match for `{css}`");
    }
}

fn assert_rejects(matcher: &MatcherRef, inputs: &[&str]) {
    for css in inputs {
        assert!(!matches(matcher, css), "expected no match for `{css}`");
    }
}

/// Accepts `color` and `display` declarations only.
fn known_properties() -> Arc<dyn DeclarationSanitizer> {
    Arc::new(|declaration: &Declaration| {
        if ["color", "display"].contains(&declaration.name.as_str()) {
            Ok(())
        } else {
            Err(GrammarError::DeclarationRejected {
                property: declaration.name.clone(),
                reason: "unknown property".to_owned(),
            })
        }
    })
}

#[test]
fn test_productions_are_cached() {
    let factory = MatcherFactory::new();
    assert!(factory.is_empty());
    let first = factory.length();
    let built = factory.len();
    let second = factory.length();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.len(), built);
}

#[test]
fn test_parameterized_productions_are_keyed_by_parameters() {
    let factory = MatcherFactory::new();
    assert!(!Arc::ptr_eq(
        &factory.css_media_query(true),
        &factory.css_media_query(false)
    ));
    assert!(Arc::ptr_eq(
        &factory.custom_ident(&["auto", "none"]),
        &factory.custom_ident(&["NONE", "auto"])
    ));
}

#[test]
fn test_math_function_over_raw_length() {
    let factory = MatcherFactory::new();
    let length = factory.math_function("length", factory.raw_length());
    let values = parse_component_values("calc(10px + 5px)");
    let found = length
        .match_against(&values, MatchOptions::default())
        .unwrap();
    assert_eq!(found.consumed(), 1);
}

#[test]
fn test_calc_with_nested_parentheses() {
    let factory = MatcherFactory::new();
    assert_accepts(
        &factory.number(),
        &["calc(1 + 2 * (3 - 4))", "calc((1))", "calc(2 * pi)", "calc(-infinity)"],
    );
    assert_accepts(&factory.length(), &["calc(1px + 2 * (3px - 4px))"]);
}

#[test]
fn test_deeply_nested_calc_terminates() {
    let factory = MatcherFactory::new();
    let css = format!("{}1{}", "calc(".repeat(20), ")".repeat(20));
    assert!(matches(&factory.number(), &css));
    let css = format!("{}1px{}", "calc(".repeat(20), ")".repeat(20));
    assert!(matches(&factory.length(), &css));
}

#[test]
fn test_calc_operator_spacing() {
    let factory = MatcherFactory::new();
    let length = factory.length();
    assert_accepts(&length, &["calc(1px + 2px)", "calc(1px - 2px)", "calc(2px*3)"]);
    assert_rejects(&length, &["calc(1px+2px)", "calc(1px -2px)", "calc(1px +)", "calc()"]);
}

#[test]
fn test_math_functions() {
    let factory = MatcherFactory::new();
    assert_accepts(
        &factory.length(),
        &[
            "min(10px, 5vw)",
            "max(1em, 2rem, 3px)",
            "clamp(1rem, 2.5vw, 2rem)",
            "clamp(none, 1px, 2px)",
            "round(up, 10px, 3px)",
            "round(10px)",
            "mod(10px, 3px)",
            "abs(-1px)",
            "hypot(3px, 4px)",
            "calc(10px * sin(30deg))",
            "calc(1px * pow(2, 3))",
        ],
    );
    assert_rejects(&factory.length(), &["sin(30deg)", "clamp(1px, 2px)", "calc(1px, 2px)"]);
    assert_accepts(
        &factory.number(),
        &["sin(30deg)", "cos(1)", "pow(2, 8)", "sqrt(2)", "log(8, 2)", "exp(1)", "sign(-3)"],
    );
    assert_accepts(
        &factory.angle(),
        &["asin(1)", "atan2(1px, 2px)", "calc(90deg - acos(0.5))"],
    );
    assert_rejects(&factory.angle(), &["atan2(1px)"]);
}

#[test]
fn test_numbers() {
    let factory = MatcherFactory::new();
    assert_accepts(&factory.number(), &["1", "-1.5", "1e3"]);
    assert_rejects(&factory.number(), &["1px", "a", "10%"]);
    assert_accepts(&factory.integer(), &["3", "-7"]);
    assert_rejects(&factory.integer(), &["3.5"]);
    assert_accepts(&factory.percentage(), &["10%", "calc(10% + 5%)"]);
    assert_accepts(&factory.zero(), &["0"]);
    assert_rejects(&factory.zero(), &["1", "0px"]);
    assert_accepts(&factory.number_percentage(), &["0.5", "50%"]);
    assert_accepts(&factory.ratio(), &["16/9", "16 / 9", "2"]);
    assert_rejects(&factory.ratio(), &["16/", "/9"]);
}

#[test]
fn test_dimensions() {
    let factory = MatcherFactory::new();
    assert_accepts(&factory.length(), &["10px", "1.5EM", "0", "100vmin", "3cqw"]);
    assert_rejects(&factory.length(), &["5", "10deg", "10%"]);
    assert_accepts(&factory.length_percentage(), &["10px", "10%", "calc(100% - 10px)"]);
    assert_accepts(&factory.angle(), &["45deg", "0.25turn", "1rad"]);
    assert_rejects(&factory.angle(), &["45px"]);
    assert_accepts(&factory.angle_percentage(), &["45deg", "50%"]);
    assert_accepts(&factory.time(), &["200ms", "2s"]);
    assert_rejects(&factory.time(), &["2px"]);
    assert_accepts(&factory.time_percentage(), &["2s", "5%"]);
    assert_accepts(&factory.frequency(), &["440hz", "1kHz"]);
    assert_accepts(&factory.frequency_percentage(), &["1khz", "5%"]);
    assert_accepts(&factory.resolution(), &["2dppx", "96dpi", "2x"]);
    assert_rejects(&factory.resolution(), &["2px"]);
}

#[test]
fn test_identifiers_and_strings() {
    let factory = MatcherFactory::new();
    let custom = factory.custom_ident(&["auto"]);
    assert_accepts(&custom, &["foo", "my-name"]);
    assert_rejects(&custom, &["auto", "AUTO", "inherit", "revert-layer", "default", "'foo'"]);
    assert_accepts(&factory.css_wide_keywords(), &["initial", "UNSET"]);
    assert_accepts(&factory.ident(), &["anything"]);
    assert_accepts(&factory.string(), &["'quoted'", "\"double\""]);
    assert_accepts(&factory.custom_property(), &["--x"]);
    assert_rejects(&factory.custom_property(), &["--", "x"]);
    assert_accepts(&factory.comma(), &[","]);
}

#[test]
fn test_urls_use_the_validator() {
    let factory = MatcherFactory::with_url_validator(Arc::new(|url: &str, resource_type: &str| {
        resource_type == "image" && url.starts_with("https://")
    }));
    let url = factory.url("image");
    assert_accepts(
        &url,
        &[
            "url(https://example.com/a.png)",
            "url('https://example.com/a.png')",
            "url(\"https://example.com/a.png\" format)",
        ],
    );
    assert_rejects(&url, &["url(javascript:alert(1))", "url('http://example.com')"]);
    assert_rejects(&factory.url("font"), &["url(https://example.com/a.woff)"]);

    let url_string = factory.url_string("image");
    assert_accepts(&url_string, &["'https://example.com/a.css'"]);
    assert_rejects(&url_string, &["'data:text/css,x'"]);
}

#[test]
fn test_default_factory_allows_all_urls() {
    let factory = MatcherFactory::new();
    assert_accepts(&factory.url("image"), &["url(data:image/png;base64,AAAA)"]);
}

#[test]
fn test_colors() {
    let factory = MatcherFactory::new();
    let color = factory.color();
    assert_accepts(
        &color,
        &[
            "red",
            "RebeccaPurple",
            "transparent",
            "currentColor",
            "Canvas",
            "#fff",
            "#ffff",
            "#a0b1c2",
            "#a0b1c2d3",
            "#123",
            "rgb(255, 0, 0)",
            "rgba(255, 0, 0, 0.5)",
            "rgb(100%, 0%, 0%)",
            "rgb(255 0 0)",
            "rgb(255 0 0 / 50%)",
            "rgb(none 0 0 / none)",
            "rgb(calc(100 + 155), 0, 0)",
            "hsl(120deg, 100%, 50%)",
            "hsla(120, 100%, 50%, 0.3)",
            "hsl(120 100% 50% / 0.5)",
            "hwb(120 10% 20%)",
            "hwb(120deg 10% 20% / 50%)",
        ],
    );
    assert_rejects(
        &color,
        &[
            "notacolor",
            "#ff",
            "#fffff",
            "rgb(255, 0%, 0)",
            "rgb(255 0)",
            "rgb(255, 0, 0 / 1)",
            "hsl(120, 100%)",
            "hwb(120, 10%, 20%)",
        ],
    );
}

#[test]
fn test_images() {
    let factory = MatcherFactory::new();
    let image = factory.image();
    assert_accepts(
        &image,
        &[
            "url(a.png)",
            "linear-gradient(red, blue)",
            "linear-gradient(to right, red, blue)",
            "linear-gradient(to top left, red, blue)",
            "linear-gradient(45deg, red 0%, blue 100%)",
            "linear-gradient(red 10% 20%, 50%, blue)",
            "repeating-linear-gradient(red, blue 10px)",
            "radial-gradient(circle, red, blue)",
            "radial-gradient(circle at center, red, blue)",
            "radial-gradient(ellipse farthest-corner at 10px 20px, red, blue)",
            "radial-gradient(at top left, red, blue)",
            "repeating-radial-gradient(10px 20px, red, blue)",
        ],
    );
    assert_rejects(
        &image,
        &[
            "linear-gradient(red)",
            "linear-gradient(to middle, red, blue)",
            "linear-gradient(45deg red, blue)",
            "conic-gradient(red, blue)",
            "red",
        ],
    );
}

#[test]
fn test_positions() {
    let factory = MatcherFactory::new();
    let position = factory.position();
    assert_accepts(
        &position,
        &[
            "center",
            "top",
            "10px",
            "left top",
            "top left",
            "10px 20px",
            "left 50%",
            "left 10px top 20px",
            "bottom 10% right 5px",
        ],
    );
    assert_rejects(&position, &["left left", "top 10px", "right 10px top", "1px 2px 3px"]);

    let bg_position = factory.bg_position();
    assert_accepts(&bg_position, &["right 10px top", "center bottom 5px", "left 10px top 20px"]);
    assert_rejects(&bg_position, &["left right"]);
}

#[test]
fn test_media_queries() {
    let factory = MatcherFactory::new();
    let query = factory.css_media_query(true);
    assert_accepts(
        &query,
        &[
            "screen",
            "not print",
            "only screen and (color)",
            "screen and (min-width: 100px)",
            "screen and (min-width: 100px) and (orientation: landscape)",
            "(min-width: 100px) and (max-width: 200px)",
            "(hover) or (pointer: fine)",
            "not (monochrome)",
            "(aspect-ratio: 16/9)",
            "(resolution: 2dppx)",
            "(width >= 600px)",
            "(600px < width)",
            "(400px <= width <= 700px)",
            "(700px > width > 400px)",
            "((color) and (hover))",
            "(width: calc(100px + 2em))",
        ],
    );
    assert_rejects(
        &query,
        &[
            "and",
            "only",
            "screen and",
            "screen or (color)",
            "(a) and (b) or (c)",
            "not screen and (color) or (hover)",
            "(width > = 600px)",
            "(400px < width > 700px)",
            "(foo bar baz)",
            "unknown(x)",
        ],
    );

    let list = factory.css_media_query_list(true);
    assert_accepts(&list, &["screen, print", "screen and (color), (hover)"]);
    assert_rejects(&list, &["screen,", ", print"]);
}

#[test]
fn test_media_general_enclosed_only_when_lenient() {
    let factory = MatcherFactory::new();
    let lenient = factory.css_media_query(false);
    assert_accepts(&lenient, &["(foo bar baz)", "unknown(x) and (color)", "(width > = 600px)"]);
    assert_rejects(&lenient, &["screen and"]);
}

#[test]
fn test_supports_conditions() {
    let factory = MatcherFactory::new();
    let condition = factory.css_supports_condition(known_properties(), true);
    assert_accepts(
        &condition,
        &[
            "(color: red)",
            "( display : grid !important )",
            "not (color: red)",
            "(color: red) and (display: grid)",
            "(color: red) or (display: grid) or (color: blue)",
            "((color: red) or (display: flex))",
            "selector(a > b)",
            "selector( .x:hover )",
            "(color: red) and selector(div p)",
        ],
    );
    assert_rejects(
        &condition,
        &[
            "(behavior: url(x.htc))",
            "(color: red) and (display: grid) or (color: blue)",
            "not (behavior: x)",
            "(color red)",
            "color: red",
            "selector(a >)",
            "unknown(x)",
        ],
    );
}

#[test]
fn test_supports_general_enclosed_only_when_lenient() {
    let factory = MatcherFactory::new();
    let lenient = factory.css_supports_condition(known_properties(), false);
    assert_accepts(&lenient, &["unknown(x)", "(foo bar)", "(color: red) or (behavior: x)"]);
}

#[test]
fn test_supports_conditions_are_keyed_by_sanitizer() {
    let factory = MatcherFactory::new();
    let sanitizer = known_properties();
    let first = factory.css_supports_condition(Arc::clone(&sanitizer), true);
    let again = factory.css_supports_condition(Arc::clone(&sanitizer), true);
    let other = factory.css_supports_condition(known_properties(), true);
    assert!(Arc::ptr_eq(&first, &again));
    assert!(!Arc::ptr_eq(&first, &other));
}

#[test]
fn test_counter_styles() {
    let factory = MatcherFactory::new();
    let style = factory.counter_style();
    assert_accepts(
        &style,
        &["decimal", "my-style", "symbols('*')", "symbols(cyclic '*' '+')", "symbols(url(a.png))"],
    );
    assert_rejects(&style, &["none", "symbols()", "symbols(cyclic)", "inherit"]);
}

#[test]
fn test_built_grammars_are_shareable_across_threads() {
    let factory = MatcherFactory::new();
    let length = factory.length();
    let handle = std::thread::spawn(move || matches(&length, "calc(1px + 2px)"));
    assert!(handle.join().unwrap());
}
