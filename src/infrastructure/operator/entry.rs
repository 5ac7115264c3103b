//! Concrete operator behind the inbound port.

/// Parses configuration, wires process-backed services and runs the
/// requested use-case. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Operator;

impl Operator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}
