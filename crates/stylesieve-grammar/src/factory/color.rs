//! [CSS Color 4](https://www.w3.org/TR/css-color-4/) `<color>`.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use stylesieve_syntax::{CSSToken, TokenKind};

use crate::ext::MatcherExt;
use crate::matcher::MatcherRef;
use crate::token::TokenMatcher;

use super::{MatcherFactory, alt, delim, function, juxt, keywords};

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

/// [§ 19.2 System Colors](https://www.w3.org/TR/css-color-4/#css-system-colors)
const SYSTEM_COLORS: &[&str] = &[
    "accentcolor", "accentcolortext", "activetext", "buttonborder", "buttonface", "buttontext",
    "canvas", "canvastext", "field", "fieldtext", "graytext", "highlight", "highlighttext",
    "linktext", "mark", "marktext", "selecteditem", "selecteditemtext", "visitedtext",
];

/// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern is valid")
});

impl MatcherFactory {
    /// [`<color>`](https://www.w3.org/TR/css-color-4/#color-syntax)
    pub fn color(&self) -> MatcherRef {
        self.cached("color", || {
            alt(vec![
                self.color_keyword(),
                self.hex_color(),
                self.rgb(),
                self.hsl(),
                self.hwb(),
            ])
        })
    }

    fn color_keyword(&self) -> MatcherRef {
        self.cached("color-keyword", || {
            alt(vec![
                keywords(NAMED_COLORS),
                keywords(&["transparent", "currentcolor"]),
                keywords(SYSTEM_COLORS),
            ])
        })
    }

    fn hex_color(&self) -> MatcherRef {
        self.cached("hex-color", || {
            Arc::new(TokenMatcher::with_predicate(TokenKind::Hash, |t| {
                matches!(t, CSSToken::Hash { value, .. } if HEX_COLOR.is_match(value))
            }))
        })
    }

    /// `<alpha-value> = <number> | <percentage>`, or `none` in modern syntax.
    fn alpha(&self, modern: bool) -> MatcherRef {
        let value = self.number_percentage();
        let value = if modern {
            alt(vec![value, keywords(&["none"])])
        } else {
            value
        };
        if modern {
            juxt(vec![delim('/'), value]).optional()
        } else {
            juxt(vec![self.comma(), value]).optional()
        }
    }

    /// `<hue> = <number> | <angle>`
    fn hue(&self) -> MatcherRef {
        self.cached("hue", || alt(vec![self.number(), self.angle()]))
    }

    /// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    fn rgb(&self) -> MatcherRef {
        self.cached("rgb", || {
            let comma = self.comma();
            let legacy = |channel: MatcherRef| {
                juxt(vec![
                    Arc::clone(&channel),
                    Arc::clone(&comma),
                    Arc::clone(&channel),
                    Arc::clone(&comma),
                    channel,
                    self.alpha(false),
                ])
            };
            let channel = alt(vec![self.number(), self.percentage(), keywords(&["none"])]);
            let modern = juxt(vec![channel.count(3, 3), self.alpha(true)]);
            let arguments = alt(vec![
                legacy(self.number()),
                legacy(self.percentage()),
                modern,
            ]);
            alt(vec![
                function("rgb", Arc::clone(&arguments)),
                function("rgba", arguments),
            ])
        })
    }

    /// [§ 7.1 The HSL notation](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
    fn hsl(&self) -> MatcherRef {
        self.cached("hsl", || {
            let comma = self.comma();
            let legacy = juxt(vec![
                self.hue(),
                Arc::clone(&comma),
                self.percentage(),
                comma,
                self.percentage(),
                self.alpha(false),
            ]);
            let arguments = alt(vec![legacy, self.hue_channels()]);
            alt(vec![
                function("hsl", Arc::clone(&arguments)),
                function("hsla", arguments),
            ])
        })
    }

    /// [§ 8.1 The HWB notation](https://www.w3.org/TR/css-color-4/#the-hwb-notation)
    fn hwb(&self) -> MatcherRef {
        self.cached("hwb", || function("hwb", self.hue_channels()))
    }

    /// Modern `[<hue> | none] [<percentage> | <number> | none]{2} [/ <alpha>]?`
    fn hue_channels(&self) -> MatcherRef {
        self.cached("hue-channels", || {
            let none = keywords(&["none"]);
            let channel = alt(vec![self.percentage(), self.number(), Arc::clone(&none)]);
            juxt(vec![
                alt(vec![self.hue(), none]),
                channel.count(2, 2),
                self.alpha(true),
            ])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_lengths() {
        for ok in ["fff", "ffff", "a0b1c2", "a0b1c2d3"] {
            assert!(HEX_COLOR.is_match(ok), "{ok}");
        }
        for bad in ["ff", "fffff", "fffffff", "ggg"] {
            assert!(!HEX_COLOR.is_match(bad), "{bad}");
        }
    }
}
