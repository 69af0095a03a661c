//! [Media Queries 4](https://www.w3.org/TR/mediaqueries-4/#mq-syntax)
//!
//! ```text
//! <media-query-list> = <media-query>#
//! <media-query> = <media-condition>
//!              | [ not | only ]? <media-type> [ and <media-condition-without-or> ]?
//! <media-condition> = <media-not> | <media-in-parens> [ <media-and>* | <media-or>* ]
//! <media-condition-without-or> = <media-not> | <media-in-parens> <media-and>*
//! <media-in-parens> = ( <media-condition> ) | ( <media-feature> ) | <general-enclosed>
//! ```
//!
//! `strict` leaves out `<general-enclosed>`, so unknown syntax is rejected
//! instead of accepted as an always-false condition.

use std::sync::Arc;

use stylesieve_syntax::TokenKind;

use crate::ext::MatcherExt;
use crate::matcher::MatcherRef;
use crate::whitespace::NoWhitespace;

use super::{
    MatcherFactory, alt, block, delim, general_enclosed, ident_where, juxt, keywords, token,
};

/// Identifiers that cannot name a media type.
const RESERVED_MEDIA_TYPES: [&str; 5] = ["only", "not", "and", "or", "layer"];

impl MatcherFactory {
    /// `<media-query-list>`
    pub fn css_media_query_list(&self, strict: bool) -> MatcherRef {
        self.cached(&format!("media-query-list:{strict}"), || {
            self.css_media_query(strict).hash()
        })
    }

    /// `<media-query>`
    pub fn css_media_query(&self, strict: bool) -> MatcherRef {
        self.cached(&format!("media-query:{strict}"), || {
            let media_type = ident_where(|name| {
                !RESERVED_MEDIA_TYPES
                    .iter()
                    .any(|r| r.eq_ignore_ascii_case(name))
            });
            alt(vec![
                self.media_condition(strict),
                juxt(vec![
                    keywords(&["not", "only"]).optional(),
                    media_type,
                    juxt(vec![
                        keywords(&["and"]),
                        self.media_condition_without_or(strict),
                    ])
                    .optional(),
                ]),
            ])
        })
    }

    /// `<media-condition>`, with `<media-in-parens>` as the forward cell.
    pub fn media_condition(&self, strict: bool) -> MatcherRef {
        self.recursive(
            &format!("media-condition:{strict}"),
            |in_parens| {
                let prefixed = |word: &str| juxt(vec![keywords(&[word]), Arc::clone(in_parens)]);
                alt(vec![
                    prefixed("not"),
                    juxt(vec![
                        Arc::clone(in_parens),
                        alt(vec![prefixed("and").plus(), prefixed("or").plus()]).optional(),
                    ]),
                ])
            },
            |_| self.media_in_parens(strict),
        )
    }

    /// `<media-condition-without-or>`
    pub fn media_condition_without_or(&self, strict: bool) -> MatcherRef {
        self.cached(&format!("media-condition-without-or:{strict}"), || {
            let in_parens = self.media_in_parens(strict);
            alt(vec![
                juxt(vec![keywords(&["not"]), Arc::clone(&in_parens)]),
                juxt(vec![
                    Arc::clone(&in_parens),
                    juxt(vec![keywords(&["and"]), in_parens]).star(),
                ]),
            ])
        })
    }

    fn media_in_parens(&self, strict: bool) -> MatcherRef {
        // Building the condition first caches this production as its cell
        // definition, so both share one graph.
        let condition = self.media_condition(strict);
        self.cached(&format!("media-in-parens:{strict}"), || {
            let mut choices = vec![block('(', condition), block('(', self.media_feature())];
            if !strict {
                choices.push(general_enclosed());
            }
            alt(choices)
        })
    }

    /// ```text
    /// <media-feature> = [ <mf-plain> | <mf-boolean> | <mf-range> ]
    /// <mf-plain> = <mf-name> : <mf-value>
    /// <mf-boolean> = <mf-name>
    /// <mf-range> = <mf-name> <mf-comparison> <mf-value>
    ///            | <mf-value> <mf-comparison> <mf-name>
    ///            | <mf-value> <mf-lt> <mf-name> <mf-lt> <mf-value>
    ///            | <mf-value> <mf-gt> <mf-name> <mf-gt> <mf-value>
    /// ```
    pub fn media_feature(&self) -> MatcherRef {
        self.cached("media-feature", || {
            let name = self.ident();
            let value = alt(vec![
                self.ratio(),
                self.length(),
                self.resolution(),
                token(TokenKind::Dimension),
                self.ident(),
            ]);
            // '<=' and '>=' are two delims that must touch.
            let touching: MatcherRef = Arc::new(NoWhitespace);
            let or_equal = juxt(vec![touching, delim('=')]);
            let lt = juxt(vec![delim('<'), or_equal.optional()]);
            let gt = juxt(vec![delim('>'), or_equal.optional()]);
            let comparison = alt(vec![Arc::clone(&lt), Arc::clone(&gt), delim('=')]);

            let plain = juxt(vec![
                Arc::clone(&name),
                token(TokenKind::Colon),
                Arc::clone(&value),
            ]);
            let range = alt(vec![
                juxt(vec![
                    Arc::clone(&name),
                    Arc::clone(&comparison),
                    Arc::clone(&value),
                ]),
                juxt(vec![Arc::clone(&value), comparison, Arc::clone(&name)]),
                juxt(vec![
                    Arc::clone(&value),
                    Arc::clone(&lt),
                    Arc::clone(&name),
                    lt,
                    Arc::clone(&value),
                ]),
                juxt(vec![
                    Arc::clone(&value),
                    Arc::clone(&gt),
                    Arc::clone(&name),
                    gt,
                    value,
                ]),
            ]);
            alt(vec![plain, range, name])
        })
    }
}
