//! Construction error types.

use thiserror::Error;

use crate::types::{EventId, StateId};

/// A rejected builder call.
///
/// Every rejection latches the machine's sticky create-error flag; the
/// full list of recorded errors is available through
/// [`Machine::create_errors`](crate::Machine::create_errors).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Application state ids must be `>= 0`; negatives are reserved.
    #[error("state id {0} is reserved; application state ids must be >= 0")]
    NegativeStateId(StateId),

    /// A state with this id was already created on the machine.
    #[error("state {0} already exists")]
    DuplicateState(StateId),

    /// The catch event id cannot be used for an application transition.
    #[error("event id {event} on state {state} is reserved for catch transitions")]
    ReservedEvent { state: StateId, event: EventId },

    /// The any-state cannot be entered, so it is not a valid target.
    #[error("transition on state {state} for event {event} targets the any-state")]
    AnyStateTarget { state: StateId, event: EventId },

    /// A sub-transition must nest a concrete state; sentinel targets are
    /// not meaningful inside a nest.
    #[error("sub-transition on state {state} for event {event} must target a concrete state id, got {target}")]
    SubTargetNotConcrete {
        state: StateId,
        event: EventId,
        target: StateId,
    },

    /// The any-state has no position in a nest, so it cannot own
    /// sub-transitions.
    #[error("the any-state cannot own sub-transitions (event {event})")]
    SubFromAnyState { event: EventId },
}
