//! [§ 9 2D Positioning](https://www.w3.org/TR/css-values-4/#position)

use std::sync::Arc;

use crate::ext::MatcherExt;
use crate::matcher::MatcherRef;
use crate::unordered::UnorderedGroup;

use super::{MatcherFactory, alt, juxt, keywords};

impl MatcherFactory {
    /// ```text
    /// <position> = [ left | center | right | top | bottom | <length-percentage> ]
    ///   | [ left | center | right | <length-percentage> ]
    ///     [ top | center | bottom | <length-percentage> ]
    ///   | [ left | center | right ] && [ top | center | bottom ]
    ///   | [ [ left | right ] <length-percentage> ] &&
    ///     [ [ top | bottom ] <length-percentage> ]
    /// ```
    pub fn position(&self) -> MatcherRef {
        self.cached("position", || {
            let lp = self.length_percentage();
            let horizontal = keywords(&["left", "center", "right"]);
            let vertical = keywords(&["top", "center", "bottom"]);

            let one = alt(vec![
                keywords(&["left", "center", "right", "top", "bottom"]),
                Arc::clone(&lp),
            ]);
            let two = juxt(vec![
                alt(vec![Arc::clone(&horizontal), Arc::clone(&lp)]),
                alt(vec![Arc::clone(&vertical), Arc::clone(&lp)]),
            ]);
            let two_keywords: MatcherRef =
                Arc::new(UnorderedGroup::all_of(vec![horizontal, vertical]));
            let four: MatcherRef = Arc::new(UnorderedGroup::all_of(vec![
                juxt(vec![keywords(&["left", "right"]), Arc::clone(&lp)]),
                juxt(vec![keywords(&["top", "bottom"]), lp]),
            ]));
            alt(vec![four, two_keywords, two, one])
        })
    }

    /// [`<bg-position>`](https://www.w3.org/TR/css-backgrounds-3/#typedef-bg-position):
    /// a [`position`](Self::position) that also allows three values, as in
    /// `right 10px top`.
    ///
    /// ```text
    /// [ center | [ left | right ] <length-percentage>? ] &&
    /// [ center | [ top | bottom ] <length-percentage>? ]
    /// ```
    pub fn bg_position(&self) -> MatcherRef {
        self.cached("bg-position", || {
            let lp = self.length_percentage();
            let center = keywords(&["center"]);
            let three: MatcherRef = Arc::new(UnorderedGroup::all_of(vec![
                alt(vec![
                    Arc::clone(&center),
                    juxt(vec![keywords(&["left", "right"]), lp.optional()]),
                ]),
                alt(vec![
                    center,
                    juxt(vec![keywords(&["top", "bottom"]), lp.optional()]),
                ]),
            ]));
            alt(vec![self.position(), three])
        })
    }
}
