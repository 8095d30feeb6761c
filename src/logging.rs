// ============================================================================
// Logging
// Optional fmt subscriber for the crate's tracing events
// ============================================================================
//
// The library only emits events: trace! for decimal truncation and integer
// overflow widening, debug! for decimal division by zero, rejected dimension
// mismatches and newly cached prefixed units. Applications that already
// install a subscriber need nothing from this module.

use tracing::Level;

/// Install a global fmt subscriber at `DEBUG`.
///
/// Returns `false` if a global subscriber was already set; calling this more
/// than once is harmless.
pub fn init() -> bool {
    init_with_level(Level::DEBUG)
}

/// Install a global fmt subscriber showing events up to `level`.
pub fn init_with_level(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Number;

    #[test]
    fn test_init_is_idempotent() {
        init_with_level(Level::TRACE);
        assert!(!init());
        // Overflow widening emits a trace event through the installed subscriber.
        let sum = &Number::from(i64::MAX) + &Number::from(1);
        assert!(matches!(sum, Number::Double(_)));
    }
}
