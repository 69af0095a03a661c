//! The result of one successful partial match.

use std::ops::Range;
use std::sync::Arc;

use serde::Serialize;
use stylesieve_syntax::ComponentValue;

/// One way a matcher matched a span of a component value list.
///
/// Positions are indices into the list the match was produced against.
/// `end` is the end of the matched content; `next` additionally includes the
/// insignificant whitespace skipped after it, and is where the following
/// matcher starts. A zero-length match has `start == end == next`.
///
/// Named matches (see [`MatcherExt::capture`](crate::MatcherExt::capture))
/// form a tree: [`captures`](Self::captures) holds the outermost named
/// matches found inside this one, each of which holds its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GrammarMatch {
    start: usize,
    end: usize,
    next: usize,
    name: Option<Arc<str>>,
    /// Path of indices from the list the caller matched against down into
    /// the function or block this match's positions refer to.
    scope: Vec<usize>,
    captures: Vec<GrammarMatch>,
}

impl GrammarMatch {
    /// A match of `start..end`, continuing at `next`.
    #[must_use]
    pub fn new(start: usize, end: usize, next: usize) -> Self {
        debug_assert!(start <= end && end <= next, "{start} <= {end} <= {next}");
        Self {
            start,
            end,
            next,
            name: None,
            scope: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// A zero-length match at `position`.
    #[must_use]
    pub fn empty(position: usize) -> Self {
        Self::new(position, position, position)
    }

    /// Combine consecutive sub-matches into one match starting at `start`.
    ///
    /// The content ends where the last non-empty part ends; the next position
    /// is taken from the last part.
    pub(crate) fn sequence<'m>(
        start: usize,
        parts: impl IntoIterator<Item = &'m GrammarMatch>,
    ) -> Self {
        let mut end = start;
        let mut next = start;
        let mut captures = Vec::new();
        for part in parts {
            if !part.is_empty() {
                end = part.end;
            }
            next = part.next;
            part.lift_into(&mut captures);
        }
        let mut combined = Self::new(start, end, next.max(end));
        combined.captures = captures;
        combined
    }

    /// Index of the first matched value.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Index one past the last matched value.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Where matching continues after this match.
    #[must_use]
    pub const fn next(&self) -> usize {
        self.next
    }

    /// Number of values consumed, including trailing skipped whitespace.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.next - self.start
    }

    /// The matched content range, excluding trailing skipped whitespace.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of matched values, excluding trailing skipped whitespace.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if nothing was matched.
    ///
    /// A present match is not proof that input was consumed: optional and
    /// starred grammar parts legitimately match nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The capture name, if this match is a named capture.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The outermost named matches inside this one.
    #[must_use]
    pub fn captures(&self) -> &[Self] {
        &self.captures
    }

    /// Direct captures with the given name.
    pub fn captures_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Self> + 's {
        self.captures.iter().filter(move |c| c.name() == Some(name))
    }

    /// Every capture with the given name at any depth, in document order.
    #[must_use]
    pub fn find_all(&self, name: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        self.walk(name, &mut found);
        found
    }

    fn walk<'s>(&'s self, name: &str, found: &mut Vec<&'s Self>) {
        for capture in &self.captures {
            if capture.name() == Some(name) {
                found.push(capture);
            }
            capture.walk(name, found);
        }
    }

    /// Nesting path into functions and blocks, relative to the list the
    /// top-level match was produced against.
    #[must_use]
    pub fn scope(&self) -> &[usize] {
        &self.scope
    }

    /// The matched values, resolved against the list the top-level match was
    /// produced against.
    ///
    /// Returns `None` if `root` is not that list (the scope does not lead to
    /// a function or block, or the range is out of bounds).
    #[must_use]
    pub fn values<'v>(&self, root: &'v [ComponentValue]) -> Option<&'v [ComponentValue]> {
        let mut list = root;
        for &index in &self.scope {
            list = list.get(index)?.nested()?;
        }
        list.get(self.range())
    }

    /// Attach a capture name.
    #[must_use]
    pub(crate) fn named(mut self, name: Arc<str>) -> Self {
        let inner = std::mem::take(&mut self.captures);
        let mut lifted = Vec::new();
        if self.name.is_some() {
            // Already named: keep it as the single child of the new name.
            let mut child = self.clone();
            child.captures = inner;
            lifted.push(child);
        } else {
            lifted = inner;
        }
        self.name = Some(name);
        self.captures = lifted;
        self
    }

    /// Replace the next position, keeping content and captures.
    #[must_use]
    pub(crate) fn with_next(mut self, next: usize) -> Self {
        self.next = next.max(self.end);
        self
    }

    /// Wrap this match's captures as the captures of a single value at
    /// `index` (a function or block) in the enclosing list.
    pub(crate) fn nest_captures(&self, index: usize) -> Vec<Self> {
        let mut captures = Vec::new();
        self.lift_into(&mut captures);
        for capture in &mut captures {
            capture.push_scope(index);
        }
        captures
    }

    pub(crate) fn with_captures(mut self, captures: Vec<Self>) -> Self {
        self.captures = captures;
        self
    }

    fn push_scope(&mut self, index: usize) {
        self.scope.insert(0, index);
        for capture in &mut self.captures {
            capture.push_scope(index);
        }
    }

    /// Contribute this match to a parent's capture list: itself if named,
    /// otherwise its own captures.
    fn lift_into(&self, captures: &mut Vec<Self>) {
        if self.name.is_some() {
            captures.push(self.clone());
        } else {
            captures.extend(self.captures.iter().cloned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_ends_at_last_non_empty_part() {
        let a = GrammarMatch::new(0, 1, 2);
        let b = GrammarMatch::empty(2);
        let seq = GrammarMatch::sequence(0, [&a, &b]);
        assert_eq!(seq.range(), 0..1);
        assert_eq!(seq.next(), 2);
    }

    #[test]
    fn naming_a_named_match_nests_it() {
        let inner = GrammarMatch::new(0, 1, 1).named("a".into());
        let outer = inner.named("b".into());
        assert_eq!(outer.name(), Some("b"));
        assert_eq!(outer.captures().len(), 1);
        assert_eq!(outer.captures()[0].name(), Some("a"));
    }

    #[test]
    fn nested_scope_resolves_into_functions() {
        let values = stylesieve_syntax::parse_component_values("a f(b c)");
        let capture = GrammarMatch::new(2, 3, 3).named("x".into());
        let holder = GrammarMatch::empty(0).with_captures(vec![capture]);
        let lifted = holder.nest_captures(2);
        assert_eq!(lifted[0].scope(), &[2]);
        let resolved = lifted[0].values(&values).unwrap();
        assert_eq!(stylesieve_syntax::to_css_string(resolved), "c");
    }
}
