//! Immutable machine definition.
//!
//! The definition is an insertion-ordered graph of states, each owning an
//! ordered list of transitions; insertion order is the evaluation order
//! and first match wins, so no hash-keyed transition table is used.
//! Construction goes through [`MachineBuilder`](crate::MachineBuilder);
//! once built, the machine never changes and may be shared across any
//! number of objects (and threads).

use std::collections::HashMap;

use crate::error::BuildError;
use crate::handlers::{ActionFn, GuardFn, HookFn};
use crate::types::{EventId, StateId, EVENT_CATCH, STATE_SAME};

/// One transition owned by a state.
pub(crate) struct Transition<C, M> {
    /// Event id this transition matches. `EVENT_CATCH` marks the owner's
    /// catch transition.
    pub(crate) event: EventId,
    /// Target state id, or a sentinel (`STATE_SAME`, `STATE_PARENT`).
    pub(crate) target: StateId,
    /// True if the target nests inside the owning state instead of
    /// replacing it.
    pub(crate) is_sub: bool,
    /// All guards must pass for the transition to be selected.
    pub(crate) guards: Vec<GuardFn<C, M>>,
    /// Run in order once the transition is selected.
    pub(crate) actions: Vec<ActionFn<C, M>>,
}

/// One state record.
pub(crate) struct State<C, M> {
    pub(crate) id: StateId,
    pub(crate) entry: Option<HookFn<C>>,
    pub(crate) exit: Option<HookFn<C>>,
    pub(crate) transitions: Vec<Transition<C, M>>,
    /// True if this state may host substates.
    pub(crate) complex: bool,
    /// Substate entered automatically when this state is entered.
    /// `STATE_SAME` means no automatic descent.
    pub(crate) initial_substate: StateId,
}

impl<C, M> State<C, M> {
    pub(crate) fn new(id: StateId) -> Self {
        Self {
            id,
            entry: None,
            exit: None,
            transitions: Vec::new(),
            complex: false,
            initial_substate: STATE_SAME,
        }
    }

    /// The state's catch transition, if one was created.
    pub(crate) fn catch(&self) -> Option<&Transition<C, M>> {
        self.transitions.iter().find(|t| t.event == EVENT_CATCH)
    }
}

/// An immutable finite-state-machine definition.
///
/// Generic over the application context type `C` and the per-event
/// message type `M`. The machine holds no per-object data; drive objects
/// through it by pairing it with one
/// [`ObjectState`](crate::ObjectState) cursor per object.
pub struct Machine<C, M> {
    pub(crate) states: Vec<State<C, M>>,
    pub(crate) index: HashMap<StateId, usize>,
    pub(crate) create_error: bool,
    pub(crate) errors: Vec<BuildError>,
}

impl<C, M> Machine<C, M> {
    /// Resolves a state by id.
    pub(crate) fn state(&self, id: StateId) -> Option<&State<C, M>> {
        self.index.get(&id).map(|&slot| &self.states[slot])
    }

    /// Returns true if a state with the given id exists.
    pub fn has_state(&self, id: StateId) -> bool {
        self.index.contains_key(&id)
    }

    /// Sticky flag: true if any builder call was rejected while this
    /// machine was constructed. Execution on such a machine stays safe
    /// (missing pieces are treated as non-matches) but is unlikely to do
    /// what the application meant.
    pub fn has_create_error(&self) -> bool {
        self.create_error
    }

    /// Every rejection recorded during construction, in order.
    pub fn create_errors(&self) -> &[BuildError] {
        &self.errors
    }
}
