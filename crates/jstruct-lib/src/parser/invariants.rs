//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    #[inline]
    pub(super) fn ensure_progress(&self) {
        assert!(
            self.debug_fuel.get() != 0,
            "parser is stuck: too many lookaheads"
        );
        self.debug_fuel.set(self.debug_fuel.get() - 1);
    }

    /// Callers dispatch on the current token before descending.
    #[inline]
    pub(super) fn assert_current(&mut self, expected_kind: SyntaxKind) {
        let current_kind = self.current();
        assert_eq!(
            current_kind, expected_kind,
            "production entered on {current_kind:?}, expected {expected_kind:?}"
        );
    }

    /// A parse that ran to completion closed every body and declaration it opened.
    #[inline]
    pub(super) fn assert_all_closed(&self) {
        assert_eq!(self.depth, 0, "nesting depth not unwound");
        assert!(
            self.delimiter_stack.is_empty(),
            "{} class bodies left open",
            self.delimiter_stack.len()
        );
        assert!(
            self.type_names.is_empty(),
            "type declarations left open: {:?}",
            self.type_names
        );
    }
}
