//! [CSS Conditional 4 § 2.1](https://www.w3.org/TR/css-conditional-4/#at-supports)
//!
//! ```text
//! <supports-condition> = not <supports-in-parens>
//!                      | <supports-in-parens> [ and <supports-in-parens> ]*
//!                      | <supports-in-parens> [ or <supports-in-parens> ]*
//! <supports-in-parens> = ( <supports-condition> ) | <supports-feature> | <general-enclosed>
//! <supports-feature> = <supports-selector-fn> | <supports-decl>
//! <supports-selector-fn> = selector( <complex-selector> )
//! <supports-decl> = ( <declaration> )
//! ```

use std::sync::Arc;

use crate::checked::{CheckedMatcher, DeclarationSanitizer};
use crate::ext::MatcherExt;
use crate::matcher::MatcherRef;

use super::{MatcherFactory, alt, block, function, general_enclosed, juxt, keywords};

/// Cache key suffix identifying a sanitizer.
///
/// The cached graph keeps the sanitizer alive, so its address cannot be
/// reused by another sanitizer while the entry exists.
fn sanitizer_key(sanitizer: &Arc<dyn DeclarationSanitizer>, strict: bool) -> String {
    format!("{:p}:{strict}", Arc::as_ptr(sanitizer).cast::<()>())
}

impl MatcherFactory {
    /// `<supports-condition>`, with declarations accepted only if `sanitizer`
    /// accepts them.
    pub fn css_supports_condition(
        &self,
        sanitizer: Arc<dyn DeclarationSanitizer>,
        strict: bool,
    ) -> MatcherRef {
        self.recursive(
            &format!("supports-condition:{}", sanitizer_key(&sanitizer, strict)),
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
            |_| self.supports_in_parens(&sanitizer, strict),
        )
    }

    fn supports_in_parens(
        &self,
        sanitizer: &Arc<dyn DeclarationSanitizer>,
        strict: bool,
    ) -> MatcherRef {
        let condition = self.css_supports_condition(Arc::clone(sanitizer), strict);
        self.cached(
            &format!("supports-in-parens:{}", sanitizer_key(sanitizer, strict)),
            || {
                let declaration: MatcherRef =
                    Arc::new(CheckedMatcher::declaration(Arc::clone(sanitizer)));
                let ows = self.optional_whitespace();
                let selector = function(
                    "selector",
                    juxt(vec![Arc::clone(&ows), self.css_selector(), ows]),
                );
                let mut choices = vec![
                    block('(', condition),
                    block('(', declaration),
                    selector,
                ];
                if !strict {
                    choices.push(general_enclosed());
                }
                alt(choices)
            },
        )
    }
}
