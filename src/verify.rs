//! Static machine verification.
//!
//! A best-effort reachability check run after construction: it finds
//! states that no transition ever enters, and transition targets that
//! can never be left again. It does not reason about guards, cycles, or
//! nesting, and it is deterministic and side-effect-free.

use crate::machine::Machine;
use crate::types::{StateId, STATE_ANY, STATE_SAME};

/// A finding reported by [`Machine::verify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyError {
    /// No transition anywhere targets this state.
    NoEntry,
    /// This state is a transition target but has no transition leading to
    /// a different state.
    NoExit,
}

impl<C, M> Machine<C, M> {
    /// Checks every state for enterability and every transition target
    /// for exitability, reporting findings through `report` in machine
    /// declaration order. Returns true if nothing was found.
    ///
    /// Sentinel targets are ignored; the any-state is exempt from the
    /// enterability check (it cannot be entered by design) while its
    /// transitions count for everyone else's.
    pub fn verify(&self, mut report: impl FnMut(StateId, VerifyError)) -> bool {
        let mut ok = true;

        for state in &self.states {
            if state.id == STATE_ANY {
                continue;
            }
            if !self.is_state_entered(state.id) {
                ok = false;
                report(state.id, VerifyError::NoEntry);
            }
        }

        // One finding per offending transition, so a dead-end state
        // entered from several places is reported several times.
        for state in &self.states {
            for transition in &state.transitions {
                if transition.target >= 0 && !self.is_state_exited(transition.target) {
                    ok = false;
                    report(transition.target, VerifyError::NoExit);
                }
            }
        }

        ok
    }

    fn is_state_entered(&self, id: StateId) -> bool {
        self.states
            .iter()
            .any(|state| state.transitions.iter().any(|t| t.target == id))
    }

    fn is_state_exited(&self, id: StateId) -> bool {
        self.state(id).is_some_and(|state| {
            state
                .transitions
                .iter()
                .any(|t| t.target != id && t.target != STATE_SAME)
        })
    }
}
