//! Fluent construction API for machine definitions.
//!
//! A machine is declared state by state:
//!
//! ```
//! use nestfsm::{action, MachineBuilder};
//!
//! const IDLE: i32 = 1;
//! const RINGING: i32 = 2;
//! const EVENT_INBOUND: i32 = 10;
//!
//! let machine = MachineBuilder::<Vec<&'static str>, ()>::new()
//!     .state(IDLE)
//!     .transition(
//!         EVENT_INBOUND,
//!         None,
//!         RINGING,
//!         vec![action(|log: &mut Vec<&'static str>, _| {
//!             log.push("ring");
//!             true
//!         })],
//!     )
//!     .done()
//!     .state(RINGING)
//!     .done()
//!     .build();
//!
//! assert!(!machine.has_create_error());
//! ```
//!
//! Malformed calls do not panic and do not abort the chain. They latch a
//! sticky create-error flag, record a [`BuildError`], and leave a dead
//! handle behind so the rest of the fluent chain stays a no-op for that
//! state. Check [`Machine::has_create_error`] (or inspect
//! [`Machine::create_errors`]) once construction is finished.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::BuildError;
use crate::handlers::{ActionFn, GuardFn};
use crate::machine::{Machine, State, Transition};
use crate::types::{EventId, StateId, EVENT_CATCH, STATE_ANY, STATE_SAME};

/// Builder for an immutable [`Machine`].
pub struct MachineBuilder<C, M> {
    states: Vec<State<C, M>>,
    index: HashMap<StateId, usize>,
    create_error: bool,
    errors: Vec<BuildError>,
}

impl<C, M> MachineBuilder<C, M> {
    /// Creates an empty builder with the create-error flag clear.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
            create_error: false,
            errors: Vec::new(),
        }
    }

    /// Starts declaring a simple state.
    ///
    /// Rejected (latching the create-error flag and returning a dead
    /// handle) if `id` is negative or already taken.
    pub fn state(self, id: StateId) -> StateBuilder<C, M> {
        self.add_state(id, false, STATE_SAME)
    }

    /// Starts declaring a complex state that may host substates.
    ///
    /// Entering it automatically descends into `initial_substate` unless
    /// that is [`STATE_SAME`](crate::STATE_SAME). The substate id is not
    /// validated here; resolution is deferred to execution.
    pub fn complex_state(self, id: StateId, initial_substate: StateId) -> StateBuilder<C, M> {
        self.add_state(id, true, initial_substate)
    }

    /// Starts declaring the machine's any-state, whose transitions are
    /// consulted only when nothing in the active nest matched an event.
    ///
    /// Idempotent: a second call hands back the existing any-state so
    /// more transitions can be added to it.
    pub fn any_state(mut self) -> StateBuilder<C, M> {
        if let Some(&slot) = self.index.get(&STATE_ANY) {
            return StateBuilder {
                builder: self,
                slot: Some(slot),
            };
        }
        let slot = self.states.len();
        self.states.push(State::new(STATE_ANY));
        self.index.insert(STATE_ANY, slot);
        StateBuilder {
            builder: self,
            slot: Some(slot),
        }
    }

    /// True if any builder call has been rejected so far.
    pub fn has_create_error(&self) -> bool {
        self.create_error
    }

    /// Finishes construction.
    ///
    /// Always yields a machine, even after rejected calls; the sticky
    /// flag and the recorded errors travel with it so a fluent caller
    /// cannot lose them.
    pub fn build(self) -> Machine<C, M> {
        Machine {
            states: self.states,
            index: self.index,
            create_error: self.create_error,
            errors: self.errors,
        }
    }

    fn add_state(mut self, id: StateId, complex: bool, initial_substate: StateId) -> StateBuilder<C, M> {
        if id < 0 {
            self.reject(BuildError::NegativeStateId(id));
            return StateBuilder {
                builder: self,
                slot: None,
            };
        }
        if self.index.contains_key(&id) {
            self.reject(BuildError::DuplicateState(id));
            return StateBuilder {
                builder: self,
                slot: None,
            };
        }
        let mut state = State::new(id);
        state.complex = complex;
        state.initial_substate = initial_substate;
        let slot = self.states.len();
        self.states.push(state);
        self.index.insert(id, slot);
        StateBuilder {
            builder: self,
            slot: Some(slot),
        }
    }

    fn reject(&mut self, err: BuildError) {
        tracing::warn!(%err, "machine construction call rejected");
        self.create_error = true;
        self.errors.push(err);
    }
}

impl<C, M> Default for MachineBuilder<C, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped builder for one state's hooks and transitions.
///
/// A `StateBuilder` whose creation was rejected is *dead*: every call on
/// it is a no-op, mirroring the behavior of attaching to a null handle.
pub struct StateBuilder<C, M> {
    builder: MachineBuilder<C, M>,
    slot: Option<usize>,
}

impl<C, M> StateBuilder<C, M> {
    /// Sets the state's entry hook. Ignored on the any-state, which is
    /// never entered.
    pub fn entry(mut self, f: impl Fn(&mut C) + Send + Sync + 'static) -> Self {
        if let Some(state) = self.live_state() {
            if state.id == STATE_ANY {
                tracing::warn!("entry hook on the any-state is never invoked; ignored");
            } else {
                state.entry = Some(Arc::new(f));
            }
        }
        self
    }

    /// Sets the state's exit hook. Ignored on the any-state, which is
    /// never exited.
    pub fn exit(mut self, f: impl Fn(&mut C) + Send + Sync + 'static) -> Self {
        if let Some(state) = self.live_state() {
            if state.id == STATE_ANY {
                tracing::warn!("exit hook on the any-state is never invoked; ignored");
            } else {
                state.exit = Some(Arc::new(f));
            }
        }
        self
    }

    /// Appends a transition with at most one guard.
    ///
    /// Rejected if `event` is the reserved catch id or `target` is the
    /// any-state.
    pub fn transition(
        self,
        event: EventId,
        guard: Option<GuardFn<C, M>>,
        target: StateId,
        actions: Vec<ActionFn<C, M>>,
    ) -> Self {
        let guards = guard.into_iter().collect();
        self.attach(event, guards, target, actions, false)
    }

    /// Appends a transition gated on any number of guards, all of which
    /// must pass. Same restrictions as [`StateBuilder::transition`].
    pub fn transition_multi(
        self,
        event: EventId,
        guards: Vec<GuardFn<C, M>>,
        target: StateId,
        actions: Vec<ActionFn<C, M>>,
    ) -> Self {
        self.attach(event, guards, target, actions, false)
    }

    /// Appends a sub-transition: on firing, the target nests inside this
    /// state instead of replacing it. The nest is left again by
    /// transitioning to [`STATE_PARENT`](crate::STATE_PARENT).
    ///
    /// The target must be a concrete state id, and the any-state cannot
    /// own sub-transitions; either violation is rejected at build time.
    pub fn transition_sub(
        self,
        event: EventId,
        guard: Option<GuardFn<C, M>>,
        target: StateId,
        actions: Vec<ActionFn<C, M>>,
    ) -> Self {
        let guards = guard.into_iter().collect();
        self.attach(event, guards, target, actions, true)
    }

    /// Creates this state's catch transition, fired when a normal
    /// transition's action fails. At most one per state; a second call is
    /// silently ignored. Catch actions run unconditionally and their
    /// return values are not examined.
    pub fn catch(mut self, target: StateId, actions: Vec<ActionFn<C, M>>) -> Self {
        if let Some(state) = self.live_state() {
            if state.catch().is_some() {
                return self;
            }
            state.transitions.push(Transition {
                event: EVENT_CATCH,
                target,
                is_sub: false,
                guards: Vec::new(),
                actions,
            });
        }
        self
    }

    /// Returns to the machine builder.
    pub fn done(self) -> MachineBuilder<C, M> {
        self.builder
    }

    fn attach(
        mut self,
        event: EventId,
        guards: Vec<GuardFn<C, M>>,
        target: StateId,
        actions: Vec<ActionFn<C, M>>,
        is_sub: bool,
    ) -> Self {
        let Some(slot) = self.slot else {
            return self;
        };
        let owner = self.builder.states[slot].id;
        if event == EVENT_CATCH {
            self.builder.reject(BuildError::ReservedEvent {
                state: owner,
                event,
            });
            return self;
        }
        if target == STATE_ANY {
            self.builder.reject(BuildError::AnyStateTarget {
                state: owner,
                event,
            });
            return self;
        }
        if is_sub {
            if owner == STATE_ANY {
                self.builder.reject(BuildError::SubFromAnyState { event });
                return self;
            }
            if target < 0 {
                self.builder.reject(BuildError::SubTargetNotConcrete {
                    state: owner,
                    event,
                    target,
                });
                return self;
            }
        }
        self.builder.states[slot].transitions.push(Transition {
            event,
            target,
            is_sub,
            guards,
            actions,
        });
        self
    }

    fn live_state(&mut self) -> Option<&mut State<C, M>> {
        self.slot.map(|slot| &mut self.builder.states[slot])
    }
}
