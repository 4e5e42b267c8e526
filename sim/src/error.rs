//! Engine error types

use foresight_battle::SideId;
use thiserror::Error;

/// Everything that can go wrong inside the simulation core
///
/// Pipeline and orchestrator failures are recorded into the operation's error
/// list alongside a best-effort result. Session-boundary failures are returned
/// as `Err` from the rejected operation, which leaves state untouched so the
/// caller can correct the precondition and retry. Nothing here is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A side key did not name a participant in this battle
    #[error("invalid side reference: {0}")]
    InvalidSideReference(String),

    /// A side has no combatant able to act
    #[error("side {0} has no able active combatant")]
    NoActiveCombatant(SideId),

    /// A move identifier was not resolvable via the metadata provider
    #[error("unknown move: {0}")]
    UnknownMove(String),

    /// An operation was called in a phase that does not accept it
    #[error("{op} rejected: {reason}")]
    InvalidStateTransition {
        op: &'static str,
        reason: String,
    },

    /// A decision resolution did not match the queued entry
    #[error("resolution does not match pending decision at index {index}")]
    InvalidDecisionResolution { index: usize },
}

impl EngineError {
    /// Shorthand for a rejected state transition
    pub fn rejected(op: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidStateTransition {
            op,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::NoActiveCombatant(SideId::P2);
        assert_eq!(err.to_string(), "side p2 has no able active combatant");

        let err = EngineError::rejected("advance", "2 pending decisions");
        assert_eq!(err.to_string(), "advance rejected: 2 pending decisions");

        let err = EngineError::UnknownMove("Splash".to_string());
        assert_eq!(err.to_string(), "unknown move: Splash");
    }
}
