//! Pass/fail sinks for assertion results.
use core::cell::{Cell, RefCell};

/// Result of a single assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(String),
}

impl Outcome {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
    #[must_use]
    pub fn is_fail(&self) -> bool {
        !self.is_pass()
    }
    /// The failure message, if the assertion failed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Pass => None,
            Outcome::Fail(message) => Some(message),
        }
    }
}

/// The host test framework's side of an assertion.
///
/// Every assertion reports exactly once: `success` is `true` for a pass, and `message` carries
/// the failure description plus a document excerpt otherwise.
pub trait Reporter {
    fn report(&self, success: bool, message: String);
}

impl<F> Reporter for F
where
    F: Fn(bool, String),
{
    fn report(&self, success: bool, message: String) {
        self(success, message);
    }
}

/// Panics on the first failed assertion, which fails the surrounding `#[test]`.
#[derive(Debug, Default)]
pub struct PanicReporter {
    passed: Cell<usize>,
}

impl PanicReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Number of assertions that passed so far.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.passed.get()
    }
}

impl Reporter for PanicReporter {
    fn report(&self, success: bool, message: String) {
        assert!(success, "{message}");
        self.passed.set(self.passed.get() + 1);
    }
}

/// Records every outcome instead of acting on it.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    outcomes: RefCell<Vec<Outcome>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.borrow().clone()
    }
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.borrow().iter().filter(|o| o.is_pass()).count()
    }
    /// Messages of all failed assertions, in reporting order.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.outcomes
            .borrow()
            .iter()
            .filter_map(|outcome| outcome.message().map(str::to_string))
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, success: bool, message: String) {
        let outcome = if success {
            Outcome::Pass
        } else {
            Outcome::Fail(message)
        };
        self.outcomes.borrow_mut().push(outcome);
    }
}
