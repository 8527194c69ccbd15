//! Control cycle state machine.
//!
//! # State Transitions
//! ```text
//! Idle → Sampling → Evaluating
//! Evaluating → Mutating      (usage > threshold)
//! Evaluating → CoolingDown   (otherwise)
//! Mutating → Publishing      (values rewritten and publishing enabled)
//! Mutating → CoolingDown     (otherwise)
//! Publishing → CoolingDown
//! CoolingDown → Idle         (after the fixed pause)
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CyclePhase {
    Idle,
    Sampling,
    Evaluating,
    Mutating,
    Publishing,
    CoolingDown,
}

impl CyclePhase {
    /// Next phase. `breached` is read when leaving `Evaluating`, `publish`
    /// when leaving `Mutating`.
    pub fn next(self, breached: bool, publish: bool) -> CyclePhase {
        match self {
            CyclePhase::Idle => CyclePhase::Sampling,
            CyclePhase::Sampling => CyclePhase::Evaluating,
            CyclePhase::Evaluating if breached => CyclePhase::Mutating,
            CyclePhase::Evaluating => CyclePhase::CoolingDown,
            CyclePhase::Mutating if publish => CyclePhase::Publishing,
            CyclePhase::Mutating => CyclePhase::CoolingDown,
            CyclePhase::Publishing => CyclePhase::CoolingDown,
            CyclePhase::CoolingDown => CyclePhase::Idle,
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CyclePhase::Idle => "idle",
            CyclePhase::Sampling => "sampling",
            CyclePhase::Evaluating => "evaluating",
            CyclePhase::Mutating => "mutating",
            CyclePhase::Publishing => "publishing",
            CyclePhase::CoolingDown => "cooling-down",
        };
        f.write_str(name)
    }
}
