//! Per-call configuration. There is no process-wide state: every entry
//! point takes its own `ParseSettings` by value.

/// Options controlling resource bounds and indentation comparison. Passed
/// into every entry point; the engine holds none of this itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSettings {
    /// Maximum reader-stack depth, or `None` to disable the check.
    pub max_reading_stack: Option<u32>,
    /// Characters between cancellation polls. `0` disables polling.
    pub cancellation_check_interval: u32,
    /// Visual width a tab contributes when comparing indentation.
    pub tab_visual_width: u32,
    /// Whether the infinite-loop guard is armed.
    pub infinite_loop_guard: bool,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            max_reading_stack: Some(64),
            cancellation_check_interval: 256,
            tab_visual_width: 4,
            infinite_loop_guard: true,
        }
    }
}

/// A cooperative cancellation signal, polled every
/// `cancellation_check_interval` characters.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

impl CancelSignal for () {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F: Fn() -> bool> CancelSignal for F {
    fn is_cancelled(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_external_interface_table() {
        let s = ParseSettings::default();
        assert_eq!(s.max_reading_stack, Some(64));
        assert_eq!(s.cancellation_check_interval, 256);
        assert_eq!(s.tab_visual_width, 4);
        assert!(s.infinite_loop_guard);
    }

    #[test]
    fn unit_cancel_signal_never_fires() {
        assert!(!().is_cancelled());
    }
}
