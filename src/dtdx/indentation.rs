//! Indentation tracking for the DTDX scanner
//!
//! Like Python, DTDX nests blocks by indentation. The scanner measures the leading
//! whitespace of every non-blank line and compares it against a stack of the widths seen
//! so far.
//!
//! # Algorithm
//!
//! 1. Measure the line: a space adds 1, a tab advances to the next multiple of
//!    [`TAB_WIDTH`].
//! 2. Compare with the top of the stack:
//!    - equal: nothing happens
//!    - greater: push the width and emit one indent
//!    - less: pop while the width is smaller than the top, one dedent per pop; the width
//!      must then equal the new top, otherwise the dedent is inconsistent
//! 3. At end of input the scanner measures a width of 0, closing every open level.
//!
//! # Example
//!
//! Widths `[0, 4, 8, 4, 0]` on consecutive lines give
//! `[indent, indent, dedent, dedent]`, and a stack `[0, 4, 8]` followed by a line of
//! width 2 gives `[dedent, dedent]` then an inconsistent dedent (expecting 0, found 2).

/// Columns a tab advances to.
pub const TAB_WIDTH: usize = 4;

/// Width of a run of leading whitespace.
///
/// # Panics
///
/// Panics if `whitespace` contains anything but spaces and tabs; the scanner only
/// measures text it consumed with `accept_run(" \t")`.
pub fn measure(whitespace: &str) -> usize {
    whitespace.chars().fold(0, |width, c| match c {
        ' ' => width + 1,
        '\t' => width + TAB_WIDTH - width % TAB_WIDTH,
        other => unreachable!("unexpected {other:?} in indentation"),
    })
}

/// Widths of the currently open indentation levels.
///
/// Strictly increasing from a base of 0 that is never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStack {
    widths: Vec<usize>,
}

impl IndentStack {
    pub fn new() -> Self {
        IndentStack { widths: vec![0] }
    }

    /// Width of the innermost open level.
    pub fn top(&self) -> usize {
        self.widths.last().copied().unwrap_or(0)
    }

    pub fn push(&mut self, width: usize) {
        debug_assert!(width > self.top(), "indent widths must increase");
        self.widths.push(width);
    }

    /// Closes the innermost level and returns its width.
    ///
    /// # Panics
    ///
    /// Panics when only the base level is left.
    pub fn pop(&mut self) -> usize {
        assert!(self.widths.len() > 1, "the base indentation level is never popped");
        self.widths.pop().unwrap_or(0)
    }

    /// Number of levels open above the base.
    pub fn depth(&self) -> usize {
        self.widths.len() - 1
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_count_one_column() {
        assert_eq!(measure(""), 0);
        assert_eq!(measure(" "), 1);
        assert_eq!(measure("    "), 4);
    }

    #[test]
    fn test_tabs_round_to_next_stop() {
        assert_eq!(measure("\t"), 4);
        assert_eq!(measure("  \t"), 4);
        assert_eq!(measure("   \t"), 4);
        assert_eq!(measure("    \t"), 8);
        assert_eq!(measure("\t\t"), 8);
        assert_eq!(measure("\t "), 5);
    }

    #[test]
    fn test_stack_starts_at_base() {
        let stack = IndentStack::new();
        assert_eq!(stack.top(), 0);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.widths(), &[0]);
    }

    #[test]
    fn test_push_and_pop() {
        let mut stack = IndentStack::new();
        stack.push(4);
        stack.push(8);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(), 8);
        assert_eq!(stack.top(), 4);
    }

    #[test]
    #[should_panic(expected = "never popped")]
    fn test_base_is_never_popped() {
        IndentStack::new().pop();
    }
}
