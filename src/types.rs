//! Core identifiers, reserved sentinels, and the execution outcome enum.

/// Application-chosen state identifier. Valid application ids are `>= 0`;
/// negative values are reserved sentinels.
pub type StateId = i32;

/// Application-chosen event identifier.
pub type EventId = i32;

/// Target sentinel: the transition fires but the object stays in its
/// current state. Also used as a complex state's "no automatic descent"
/// marker for its initial substate.
pub const STATE_SAME: StateId = -1;

/// Target sentinel: leave the current substate and remain in the parent
/// state, one nest level up.
pub const STATE_PARENT: StateId = -2;

/// Id of the synthetic any-state. Its transitions are consulted only when
/// no state in the active nest matched the event. Never a valid target.
pub const STATE_ANY: StateId = -3;

/// Reserved event id carried by catch transitions. Feeding it to
/// [`Machine::execute`](crate::Machine::execute) is rejected with
/// [`ExecutionResult::NoTransition`].
pub const EVENT_CATCH: EventId = -1;

/// Conventional event id for externally driven timeouts. The engine gives
/// it no special treatment; timer infrastructure lives in the host.
pub const EVENT_TIMEOUT: EventId = 0xFFFF_BEEF_u32 as i32;

/// Maximum depth of the active state nest. A cursor holds at most this
/// many nested states; transitions that would push past it fail closed
/// with [`ExecutionResult::InternalFailure`].
pub const MAX_NEST_DEPTH: usize = 4;

/// Outcome of a single [`Machine::execute`](crate::Machine::execute) call.
///
/// This is a classification, not an error channel: `NoTransition` and
/// `ActionFailure` are ordinary outcomes the host loop is expected to
/// branch on, and both leave the cursor untouched.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    /// A transition fired and the active nest changed.
    NewState,
    /// A transition matched and ran, but the object stays where it was
    /// (the target was [`STATE_SAME`]).
    NoChange,
    /// No transition in the active nest or the any-state matched.
    NoTransition,
    /// A transition action returned `false` and the owning state has no
    /// catch transition.
    ActionFailure,
    /// The nest would exceed [`MAX_NEST_DEPTH`]. Unrecoverable without
    /// resetting the cursor.
    InternalFailure,
}
