//! Event execution.
//!
//! One [`Machine::execute`] call runs three phases:
//!
//! 1. **Match**: walk the active nest from outermost to innermost and
//!    take the first transition (in insertion order) whose event id
//!    matches and whose guards all pass. If nothing in the nest matched,
//!    consult the any-state.
//! 2. **Actions**: run the matched transition's actions in order. A
//!    `false` return aborts the rest and hands over to the owning
//!    state's catch transition, whose actions all run with their return
//!    values ignored.
//! 3. **State change**: record the previous state, run exit hooks from
//!    the innermost state up to the match depth, adjust the nest, then
//!    run entry hooks downwards, descending automatically into initial
//!    substates of complex states.
//!
//! Transition actions run before any exit or entry hook. Exits run
//! innermost to outermost; entries run outermost to innermost.
//!
//! This path performs no heap allocation, and the cursor is written only
//! after the action phase has settled, so `NoTransition`, `NoChange` and
//! `ActionFailure` all leave the cursor exactly as it was.

use crate::cursor::ObjectState;
use crate::machine::{Machine, State, Transition};
use crate::types::{
    EventId, ExecutionResult, EVENT_CATCH, MAX_NEST_DEPTH, STATE_ANY, STATE_PARENT, STATE_SAME,
};

impl<C, M> Machine<C, M> {
    /// Feeds one event to one object.
    ///
    /// `ctx` is handed to every guard, action, and hook; `msg` to guards
    /// and actions only. The engine neither inspects nor retains either.
    /// Callbacks must not re-enter `execute` on the same cursor.
    pub fn execute(
        &self,
        object: &mut ObjectState,
        event: EventId,
        ctx: &mut C,
        msg: &M,
    ) -> ExecutionResult {
        if event == EVENT_CATCH {
            return ExecutionResult::NoTransition;
        }

        // Match phase. Outermost states take precedence: transitions on a
        // parent state are inherited by everything nested inside it.
        let mut matched: Option<(usize, &State<C, M>, &Transition<C, M>)> = None;
        for depth in 0..=object.depth {
            let Some(state) = self.state(object.nest[depth]) else {
                return ExecutionResult::NoTransition;
            };
            if let Some(transition) = matching_transition(state, event, ctx, msg) {
                matched = Some((depth, state, transition));
                break;
            }
        }
        if matched.is_none() {
            if let Some(any_state) = self.state(STATE_ANY) {
                if let Some(transition) = matching_transition(any_state, event, ctx, msg) {
                    matched = Some((0, any_state, transition));
                }
            }
        }
        let Some((match_depth, owner, transition)) = matched else {
            tracing::debug!(event, current = object.current_state(), "no transition");
            return ExecutionResult::NoTransition;
        };

        // Action phase. The sub flag is taken from the matched transition
        // before any catch adoption.
        let is_sub = transition.is_sub;
        let mut target = transition.target;
        let mut actions_passed = true;
        for action in &transition.actions {
            if !action(ctx, msg) {
                actions_passed = false;
                break;
            }
        }
        if !actions_passed {
            let Some(catch) = owner.catch() else {
                tracing::debug!(event, state = owner.id, "action failed, no catch");
                return ExecutionResult::ActionFailure;
            };
            tracing::debug!(event, state = owner.id, "action failed, running catch");
            for action in &catch.actions {
                let _ = action(ctx, msg);
            }
            target = catch.target;
        }
        if target == STATE_SAME {
            return ExecutionResult::NoChange;
        }

        tracing::debug!(
            event,
            from = object.current_state(),
            target,
            is_sub,
            "transition fired"
        );

        // State change phase.
        object.previous = object.nest[object.depth];

        if is_sub {
            // The current state is not exited; the target nests inside it.
            if object.depth + 1 >= MAX_NEST_DEPTH {
                return ExecutionResult::InternalFailure;
            }
            object.depth += 1;
        } else {
            for depth in (match_depth..=object.depth).rev() {
                if let Some(exiting) = self.state(object.nest[depth]) {
                    if let Some(hook) = &exiting.exit {
                        hook(ctx);
                    }
                }
            }
            if target == STATE_PARENT {
                if object.depth > 0 {
                    object.depth -= 1;
                }
            } else {
                object.depth = match_depth;
            }
        }

        if target == STATE_PARENT {
            return ExecutionResult::NewState;
        }

        // Entry, descending into initial substates of complex states.
        loop {
            object.nest[object.depth] = target;
            let Some(entered) = self.state(target) else {
                break;
            };
            if let Some(hook) = &entered.entry {
                hook(ctx);
            }
            if entered.complex && entered.initial_substate != STATE_SAME {
                if object.depth + 1 >= MAX_NEST_DEPTH {
                    return ExecutionResult::InternalFailure;
                }
                object.depth += 1;
                target = entered.initial_substate;
            } else {
                break;
            }
        }

        ExecutionResult::NewState
    }
}

/// Scans a state's transitions for the first one matching the event
/// whose guards all pass. Guards stop evaluating at the first `false`;
/// a failed guard moves the scan on to the next candidate.
fn matching_transition<'a, C, M>(
    state: &'a State<C, M>,
    event: EventId,
    ctx: &mut C,
    msg: &M,
) -> Option<&'a Transition<C, M>> {
    'candidates: for transition in &state.transitions {
        if transition.event != event {
            continue;
        }
        for guard in &transition.guards {
            if !guard(ctx, msg) {
                continue 'candidates;
            }
        }
        return Some(transition);
    }
    None
}
