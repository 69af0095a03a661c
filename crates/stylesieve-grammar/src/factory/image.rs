//! [CSS Images 3](https://www.w3.org/TR/css-images-3/) `<image>` and gradients.

use std::sync::Arc;

use crate::ext::MatcherExt;
use crate::matcher::MatcherRef;
use crate::unordered::UnorderedGroup;

use super::{MatcherFactory, alt, function, juxt, keywords};

impl MatcherFactory {
    /// `<image> = <url> | <gradient>`
    pub fn image(&self) -> MatcherRef {
        self.cached("image", || alt(vec![self.url("image"), self.gradient()]))
    }

    /// [§ 3 Gradients](https://www.w3.org/TR/css-images-3/#gradients)
    pub fn gradient(&self) -> MatcherRef {
        self.cached("gradient", || {
            let linear = self.linear_gradient_arguments();
            let radial = self.radial_gradient_arguments();
            alt(vec![
                function("linear-gradient", Arc::clone(&linear)),
                function("repeating-linear-gradient", linear),
                function("radial-gradient", Arc::clone(&radial)),
                function("repeating-radial-gradient", radial),
            ])
        })
    }

    /// ```text
    /// <color-stop-list> = <linear-color-stop> , [ <linear-color-hint>? , <linear-color-stop> ]#
    /// <linear-color-stop> = <color> <length-percentage>{0,2}
    /// <linear-color-hint> = <length-percentage>
    /// ```
    fn color_stop_list(&self) -> MatcherRef {
        self.cached("color-stop-list", || {
            let comma = self.comma();
            let stop = juxt(vec![self.color(), self.length_percentage().count(0, 2)]);
            let hint = juxt(vec![self.length_percentage(), Arc::clone(&comma)]);
            juxt(vec![
                Arc::clone(&stop),
                juxt(vec![comma, hint.optional(), stop]).plus(),
            ])
        })
    }

    /// `[ <angle> | to <side-or-corner> ]? , <color-stop-list>`
    fn linear_gradient_arguments(&self) -> MatcherRef {
        self.cached("linear-gradient-arguments", || {
            let side_or_corner: MatcherRef = Arc::new(UnorderedGroup::some_of(vec![
                keywords(&["left", "right"]),
                keywords(&["top", "bottom"]),
            ]));
            let direction = alt(vec![
                self.angle(),
                juxt(vec![keywords(&["to"]), side_or_corner]),
            ]);
            juxt(vec![
                juxt(vec![direction, self.comma()]).optional(),
                self.color_stop_list(),
            ])
        })
    }

    /// ```text
    /// [ [ <ending-shape> || <size> ] [ at <position> ]? , | at <position> , ]?
    /// <color-stop-list>
    /// ```
    fn radial_gradient_arguments(&self) -> MatcherRef {
        self.cached("radial-gradient-arguments", || {
            let extent = keywords(&[
                "closest-corner",
                "closest-side",
                "farthest-corner",
                "farthest-side",
            ]);
            let size = alt(vec![
                extent,
                self.length(),
                self.length_percentage().count(2, 2),
            ]);
            let shape = keywords(&["circle", "ellipse"]);
            let at_position = juxt(vec![keywords(&["at"]), self.position()]);
            let shape_and_size: MatcherRef =
                Arc::new(UnorderedGroup::some_of(vec![shape, size]));
            let ending = alt(vec![
                juxt(vec![shape_and_size, at_position.optional()]),
                at_position,
            ]);
            juxt(vec![
                juxt(vec![ending, self.comma()]).optional(),
                self.color_stop_list(),
            ])
        })
    }
}
