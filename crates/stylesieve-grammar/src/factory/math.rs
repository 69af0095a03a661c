//! [§ 10 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#math)
//!
//! ```text
//! <calc-sum>     = <calc-product> [ [ '+' | '-' ] <calc-product> ]*
//! <calc-product> = <calc-value> [ [ '*' | '/' ] <calc-value> ]*
//! <calc-value>   = <number> | <dimension> | <percentage> |
//!                  <calc-keyword> | ( <calc-sum> )
//! ```
//!
//! Each numeric type gets its own `<calc-sum>`, where `<dimension>` is that
//! type's raw production. Units are not checked against each other.

use std::sync::Arc;

use crate::ext::MatcherExt;
use crate::matcher::MatcherRef;

use super::{MatcherFactory, alt, block, delims, function, juxt, keywords};

/// [§ 10.7.1 Numeric constants](https://www.w3.org/TR/css-values-4/#calc-constants)
const CALC_CONSTANTS: [&str; 5] = ["e", "pi", "infinity", "-infinity", "nan"];

/// [§ 10.3 Stepped Value Functions](https://www.w3.org/TR/css-values-4/#round-func)
const ROUNDING_STRATEGIES: [&str; 4] = ["nearest", "up", "down", "to-zero"];

impl MatcherFactory {
    /// `raw` or any math function producing the same type.
    ///
    /// `key` names the type (`"length"`, `"angle-percentage"`, ...) and keys
    /// the cache, so each type is built once.
    pub fn math_function(&self, key: &str, raw: MatcherRef) -> MatcherRef {
        self.cached(&format!("math:{key}"), || {
            let sum = self.calc_sum(key, &raw);
            let mut choices = vec![raw];
            choices.extend(self.math_functions(key, &sum, false));
            alt(choices)
        })
    }

    /// `<calc-sum>` over `raw`, built through the recursive-production
    /// protocol with `<calc-value>` as the forward cell.
    pub fn calc_sum(&self, key: &str, raw: &MatcherRef) -> MatcherRef {
        self.recursive(
            &format!("calc-sum:{key}"),
            |value| {
                let product = juxt(vec![
                    Arc::clone(value),
                    juxt(vec![delims("*/"), Arc::clone(value)]).star(),
                ]);
                let ws = self.significant_whitespace();
                let additive = juxt(vec![Arc::clone(&ws), delims("+-"), ws]);
                juxt(vec![
                    Arc::clone(&product),
                    juxt(vec![additive, product]).star(),
                ])
            },
            |sum| {
                let mut values = vec![Arc::clone(raw)];
                if key != "number" {
                    values.push(self.raw_number());
                }
                values.push(keywords(&CALC_CONSTANTS));
                values.push(block('(', Arc::clone(sum)));
                values.extend(self.math_functions(key, sum, true));
                alt(values)
            },
        )
    }

    /// The math functions whose result has type `key`, with `sum` as the
    /// argument production.
    ///
    /// Inside an expression (`nested`), number-producing functions are
    /// allowed for every type, since numbers combine with any type.
    fn math_functions(&self, key: &str, sum: &MatcherRef, nested: bool) -> Vec<MatcherRef> {
        let mut functions = self.type_preserving_functions(sum);
        if nested || key == "number" || key == "integer" {
            functions.extend(self.number_functions(sum));
        }
        if key.starts_with("angle") {
            functions.extend(self.angle_functions());
        }
        functions
    }

    fn type_preserving_functions(&self, sum: &MatcherRef) -> Vec<MatcherRef> {
        let comma = self.comma();
        let list = sum.hash();
        let pair = juxt(vec![Arc::clone(sum), Arc::clone(&comma), Arc::clone(sum)]);
        let sum_or_none = alt(vec![Arc::clone(sum), keywords(&["none"])]);

        vec![
            function("calc", Arc::clone(sum)),
            function("min", Arc::clone(&list)),
            function("max", Arc::clone(&list)),
            function(
                "clamp",
                juxt(vec![
                    Arc::clone(&sum_or_none),
                    Arc::clone(&comma),
                    Arc::clone(sum),
                    Arc::clone(&comma),
                    sum_or_none,
                ]),
            ),
            function(
                "round",
                juxt(vec![
                    juxt(vec![keywords(&ROUNDING_STRATEGIES), Arc::clone(&comma)]).optional(),
                    Arc::clone(sum),
                    juxt(vec![comma, Arc::clone(sum)]).optional(),
                ]),
            ),
            function("mod", Arc::clone(&pair)),
            function("rem", pair),
            function("abs", Arc::clone(sum)),
            function("hypot", list),
        ]
    }

    fn number_functions(&self, sum: &MatcherRef) -> Vec<MatcherRef> {
        let comma = self.comma();
        let number = self.calc_sum("number", &self.raw_number());
        let angle = self.calc_sum("angle", &self.raw_angle());

        vec![
            function("sign", Arc::clone(sum)),
            function("sin", Arc::clone(&angle)),
            function("cos", Arc::clone(&angle)),
            function("tan", angle),
            function(
                "pow",
                juxt(vec![Arc::clone(&number), Arc::clone(&comma), Arc::clone(&number)]),
            ),
            function("sqrt", Arc::clone(&number)),
            function(
                "log",
                juxt(vec![
                    Arc::clone(&number),
                    juxt(vec![comma, Arc::clone(&number)]).optional(),
                ]),
            ),
            function("exp", number),
        ]
    }

    fn angle_functions(&self) -> Vec<MatcherRef> {
        let number = self.calc_sum("number", &self.raw_number());
        // atan2() takes two values of any one type.
        let any = alt(vec![
            Arc::clone(&number),
            self.calc_sum("length", &self.raw_length()),
            self.calc_sum("angle", &self.raw_angle()),
            self.calc_sum("percentage", &self.raw_percentage()),
            self.calc_sum("time", &self.raw_time()),
            self.calc_sum("frequency", &self.raw_frequency()),
        ]);

        vec![
            function("asin", Arc::clone(&number)),
            function("acos", Arc::clone(&number)),
            function("atan", number),
            function("atan2", juxt(vec![Arc::clone(&any), self.comma(), any])),
        ]
    }
}

#[cfg(test)]
mod tests {
    use stylesieve_syntax::parse_component_values;

    use crate::matcher::MatchOptions;

    use super::*;

    #[test]
    fn calc_sum_is_cached_per_type() {
        let factory = MatcherFactory::new();
        let raw = factory.raw_length();
        let a = factory.calc_sum("length", &raw);
        let b = factory.calc_sum("length", &raw);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn additive_operator_needs_whitespace() {
        let factory = MatcherFactory::new();
        let length = factory.length();
        let options = MatchOptions::default();
        assert!(length.match_against(&parse_component_values("calc(1px + 2px)"), options).is_some());
        assert!(length.match_against(&parse_component_values("calc(1px+2px)"), options).is_none());
    }
}
