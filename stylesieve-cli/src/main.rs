//! stylesieve - match CSS text against grammar productions
//!
//! Usage:
//!   stylesieve <production> <css>          Does the whole input match?
//!   stylesieve <production> <css> --all    List every partial match from the start
//!   stylesieve <production> <css> --json   Print the result as JSON
//!
//! Examples:
//!   stylesieve color 'rgb(255 0 0 / 50%)'
//!   stylesieve selector-list 'div.foo, #bar > span'
//!   stylesieve media-query --strict 'screen and (width >= 600px)'

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use serde_json::{Value, json};
use stylesieve_grammar::{
    DeclarationSanitizer, GrammarError, GrammarMatch, MatchOptions, MatcherFactory,
    MatcherRef, next_position,
};
use stylesieve_syntax::{ComponentValue, Declaration, parse_component_values, to_css_string};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Grammar productions that can be matched from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Production {
    Ident,
    CustomIdent,
    CustomProperty,
    String,
    Url,
    Number,
    Integer,
    Percentage,
    Ratio,
    Length,
    LengthPercentage,
    Angle,
    Time,
    Frequency,
    Resolution,
    Color,
    Image,
    Gradient,
    Position,
    BgPosition,
    CounterStyle,
    AnPlusB,
    Selector,
    SelectorList,
    MediaQuery,
    MediaQueryList,
    Supports,
}

impl Production {
    fn build(self, factory: &MatcherFactory, strict: bool) -> MatcherRef {
        match self {
            Self::Ident => factory.ident(),
            Self::CustomIdent => factory.custom_ident::<&str>(&[]),
            Self::CustomProperty => factory.custom_property(),
            Self::String => factory.string(),
            Self::Url => factory.url("image"),
            Self::Number => factory.number(),
            Self::Integer => factory.integer(),
            Self::Percentage => factory.percentage(),
            Self::Ratio => factory.ratio(),
            Self::Length => factory.length(),
            Self::LengthPercentage => factory.length_percentage(),
            Self::Angle => factory.angle(),
            Self::Time => factory.time(),
            Self::Frequency => factory.frequency(),
            Self::Resolution => factory.resolution(),
            Self::Color => factory.color(),
            Self::Image => factory.image(),
            Self::Gradient => factory.gradient(),
            Self::Position => factory.position(),
            Self::BgPosition => factory.bg_position(),
            Self::CounterStyle => factory.counter_style(),
            Self::AnPlusB => factory.css_an_plus_b(),
            Self::Selector => factory.css_selector(),
            Self::SelectorList => factory.css_selector_list(),
            Self::MediaQuery => factory.css_media_query(strict),
            Self::MediaQueryList => factory.css_media_query_list(strict),
            Self::Supports => factory.css_supports_condition(any_declaration(), strict),
        }
    }
}

/// Accepts every well-formed declaration; the CLI checks syntax only.
fn any_declaration() -> Arc<dyn DeclarationSanitizer> {
    Arc::new(|declaration: &Declaration| {
        debug!(property = %declaration.name, "accepting declaration");
        Ok::<(), GrammarError>(())
    })
}

/// stylesieve - match CSS component values against CSS grammar productions
#[derive(Parser, Debug)]
#[command(name = "stylesieve")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"EXAMPLES:
    # Check a color
    stylesieve color 'hsl(120deg 100% 50%)'

    # Show the captures of a selector list
    stylesieve selector-list 'div.foo, #bar > span'

    # Reject unknown media syntax instead of treating it as false
    stylesieve media-query --strict '(width >= 600px)'

    # Every way a length list prefix matches, as JSON
    stylesieve length --all --json '10px calc(1px + 2px)'

    # Log grammar construction
    RUST_LOG=stylesieve_grammar=debug stylesieve supports '(display: grid)'
")]
struct Cli {
    /// Grammar production to match against
    #[arg(value_enum, value_name = "PRODUCTION")]
    production: Production,

    /// CSS text to match
    #[arg(value_name = "CSS")]
    css: String,

    /// Leave `<general-enclosed>` out of media and supports conditions
    #[arg(long)]
    strict: bool,

    /// List every match from the start of the input instead of requiring a full match
    #[arg(short, long)]
    all: bool,

    /// Stop after this many matches (with --all)
    #[arg(long, default_value = "20", value_name = "N")]
    limit: usize,

    /// Treat whitespace as significant at the top level
    #[arg(long)]
    no_skip_whitespace: bool,

    /// Print results as JSON
    #[arg(short, long)]
    json: bool,

    /// Log grammar construction and matching to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> MatchOptions {
        if self.no_skip_whitespace {
            MatchOptions::significant_whitespace()
        } else {
            MatchOptions::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.all && cli.limit == 0 {
        bail!("--limit must be at least 1");
    }

    let factory = MatcherFactory::new();
    let matcher = cli.production.build(&factory, cli.strict);
    info!(production = ?cli.production, built = factory.len(), "grammar ready");

    let values = parse_component_values(&cli.css);
    let options = cli.options();

    let found: Vec<GrammarMatch> = if cli.all {
        let start = next_position(&values, 0, options);
        matcher
            .generate_matches(&values, start, options)
            .take(cli.limit)
            .collect()
    } else {
        matcher.match_against(&values, options).into_iter().collect()
    };

    if cli.json {
        let report = json!({
            "production": format!("{:?}", cli.production),
            "input": to_css_string(&values),
            "matches": found.iter().map(|m| match_json(&values, m)).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&cli, &values, &found);
    }

    if found.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(cli: &Cli, values: &[ComponentValue], found: &[GrammarMatch]) {
    if found.is_empty() {
        println!("{} {}", "no match".red().bold(), cli.css);
        return;
    }
    for (i, m) in found.iter().enumerate() {
        let label = if m.next() == values.len() {
            "match".green().bold().to_string()
        } else {
            "partial".yellow().bold().to_string()
        };
        if cli.all {
            print!("{i:3}: ");
        }
        println!("{} {} {:?}", label, text_of(values, m), m.range());
        for capture in m.captures() {
            print_capture(values, capture, 1);
        }
    }
}

fn print_capture(values: &[ComponentValue], capture: &GrammarMatch, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = capture.name().unwrap_or("?");
    println!(
        "{indent}{} {}",
        format!("{name}:").cyan(),
        text_of(values, capture).dimmed()
    );
    for inner in capture.captures() {
        print_capture(values, inner, depth + 1);
    }
}

fn text_of(values: &[ComponentValue], m: &GrammarMatch) -> String {
    m.values(values).map(to_css_string).unwrap_or_default()
}

fn match_json(values: &[ComponentValue], m: &GrammarMatch) -> Value {
    let captures: Vec<Value> = m.captures().iter().map(|c| match_json(values, c)).collect();
    json!({
        "name": m.name(),
        "start": m.start(),
        "end": m.end(),
        "next": m.next(),
        "scope": m.scope(),
        "text": text_of(values, m),
        "captures": captures,
    })
}
