//! [CSS Counter Styles 3 § 2](https://www.w3.org/TR/css-counter-styles-3/#typedef-counter-style)

use crate::ext::MatcherExt;
use crate::matcher::MatcherRef;

use super::{MatcherFactory, alt, function, juxt, keywords};

/// `<symbols-type>`
const SYMBOLS_TYPES: [&str; 5] = ["cyclic", "numeric", "alphabetic", "symbolic", "fixed"];

impl MatcherFactory {
    /// `<counter-style-name>`: a `<custom-ident>` other than `none`.
    pub fn counter_style_name(&self) -> MatcherRef {
        self.custom_ident(&["none"])
    }

    /// ```text
    /// <counter-style> = <counter-style-name> | symbols()
    /// symbols() = symbols( <symbols-type>? [ <string> | <image> ]+ )
    /// ```
    pub fn counter_style(&self) -> MatcherRef {
        self.cached("counter-style", || {
            let symbol = alt(vec![self.string(), self.image()]);
            alt(vec![
                self.counter_style_name(),
                function(
                    "symbols",
                    juxt(vec![keywords(&SYMBOLS_TYPES).optional(), symbol.plus()]),
                ),
            ])
        })
    }
}
