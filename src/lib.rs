//! Embeddable hierarchical finite-state-machine engine.
//!
//! `nestfsm` separates a machine *definition* from the *objects* that
//! move through it. The definition is declared once at run time (states
//! keyed by integer ids, transitions keyed by event ids, guard and
//! action chains, nested substates) and is immutable from then on; any
//! number of objects can be driven through one shared definition, each
//! carrying its own small [`ObjectState`] cursor.
//!
//! The engine is intentionally minimal:
//! - Everything is synchronous. Every callback (guard, action, entry,
//!   exit) runs to completion on the calling thread; there are no
//!   internal queues, timers, or background workers.
//! - The engine mutates only the cursor. Side effects belong to the
//!   caller's actions and hooks, reached through an application context
//!   the engine passes along without inspecting.
//! - [`Machine::execute`] reports what happened as a plain
//!   [`ExecutionResult`] value. An unmatched event or a failed action is
//!   an ordinary outcome for the host to branch on, not an `Err`.
//!
//! ## Quick start
//!
//! A fragment of a telephone driver:
//!
//! ```
//! use nestfsm::{action, ExecutionResult, MachineBuilder, ObjectState};
//!
//! const IDLE: i32 = 1;
//! const RINGING: i32 = 2;
//! const TALKING: i32 = 3;
//!
//! const EVENT_INBOUND: i32 = 10;
//! const EVENT_OFFHOOK: i32 = 11;
//!
//! #[derive(Default)]
//! struct Phone {
//!     ringer_on: bool,
//! }
//!
//! let machine = MachineBuilder::<Phone, ()>::new()
//!     .state(IDLE)
//!     .transition(
//!         EVENT_INBOUND,
//!         None,
//!         RINGING,
//!         vec![action(|phone: &mut Phone, _| {
//!             phone.ringer_on = true;
//!             true
//!         })],
//!     )
//!     .done()
//!     .state(RINGING)
//!     .exit(|phone| phone.ringer_on = false)
//!     .transition(EVENT_OFFHOOK, None, TALKING, vec![])
//!     .done()
//!     .state(TALKING)
//!     .done()
//!     .build();
//! assert!(!machine.has_create_error());
//!
//! let mut cursor = ObjectState::new(IDLE, IDLE);
//! let mut phone = Phone::default();
//!
//! let result = machine.execute(&mut cursor, EVENT_INBOUND, &mut phone, &());
//! assert_eq!(result, ExecutionResult::NewState);
//! assert!(phone.ringer_on);
//! assert_eq!(cursor.current_state(), RINGING);
//!
//! let result = machine.execute(&mut cursor, EVENT_OFFHOOK, &mut phone, &());
//! assert_eq!(result, ExecutionResult::NewState);
//! assert!(!phone.ringer_on);
//! assert_eq!(cursor.current_state(), TALKING);
//! assert_eq!(cursor.previous_state(), RINGING);
//! ```
//!
//! ## Guards and alternative transitions
//!
//! A state may carry several transitions for the same event. They are
//! tried in insertion order, and a guard returning `false` moves the
//! search on to the next candidate, so later transitions act as
//! fallbacks for earlier, more specific ones:
//!
//! ```
//! use nestfsm::{guard, ExecutionResult, MachineBuilder, ObjectState, EVENT_TIMEOUT};
//!
//! const DIALING: i32 = 3;
//! const ORIGINATING: i32 = 4;
//! const ERROR: i32 = 5;
//!
//! struct Dial {
//!     digits: usize,
//! }
//!
//! let machine = MachineBuilder::<Dial, ()>::new()
//!     .state(DIALING)
//!     .transition(
//!         EVENT_TIMEOUT,
//!         Some(guard(|dial: &mut Dial, _| dial.digits > 0)),
//!         ORIGINATING,
//!         vec![],
//!     )
//!     .transition(EVENT_TIMEOUT, None, ERROR, vec![])
//!     .done()
//!     .state(ORIGINATING)
//!     .done()
//!     .state(ERROR)
//!     .done()
//!     .build();
//!
//! let mut cursor = ObjectState::new(DIALING, DIALING);
//! let mut dial = Dial { digits: 0 };
//! let result = machine.execute(&mut cursor, EVENT_TIMEOUT, &mut dial, &());
//! assert_eq!(result, ExecutionResult::NewState);
//! assert_eq!(cursor.current_state(), ERROR);
//! ```
//!
//! ## Nested states
//!
//! A state created with [`MachineBuilder::complex_state`] may host
//! substates. Entering it automatically descends into its initial
//! substate (entry hooks firing outermost first), and a transition found
//! on a parent state fires even while the object sits in a substate, so
//! substates inherit their parents' event handling. When such an
//! inherited transition fires, exit hooks run from the innermost state
//! outwards. A nest is also entered explicitly through
//! [`StateBuilder::transition_sub`] and left again by transitioning to
//! [`STATE_PARENT`].
//!
//! The nest is bounded by [`MAX_NEST_DEPTH`]; transitions that would
//! push past it fail closed with [`ExecutionResult::InternalFailure`]
//! rather than reallocate.
//!
//! ## Failure handling
//!
//! An action returning `false` aborts the remaining actions of its
//! transition. If the owning state has a catch transition (see
//! [`StateBuilder::catch`]), its actions all run with their return
//! values ignored and the object moves to the catch's target; otherwise
//! the call reports [`ExecutionResult::ActionFailure`] and the cursor is
//! untouched. Builder mistakes never panic either: they latch a sticky
//! create-error flag queryable via [`Machine::has_create_error`].
//!
//! ## Host loop pattern
//!
//! The engine owns no event source. A host (an actor, a poll loop, a
//! connection handler) receives or derives events, feeds them in via
//! [`Machine::execute`], and decides what each outcome means for the
//! application. Timer infrastructure also stays in the host: arrange for
//! a timer expiry to deliver [`EVENT_TIMEOUT`] (or any event id of your
//! choosing) and the machine handles it like any other event.
//!
//! ## Sharing
//!
//! A built [`Machine`] is immutable and always `Send + Sync`: callbacks
//! are stored behind `Send + Sync` trait objects, and the context and
//! message types appear only as call arguments, never as stored data.
//! One definition can therefore serve objects on many threads
//! concurrently, whatever the context type is. Each cursor must only
//! ever be driven by one thread at a time, and callbacks must not
//! re-enter `execute` on the cursor currently being driven.

pub mod builder;
pub mod cursor;
mod engine;
pub mod error;
pub mod handlers;
pub mod machine;
pub mod types;
pub mod verify;

pub use builder::{MachineBuilder, StateBuilder};
pub use cursor::ObjectState;
pub use error::BuildError;
pub use handlers::{action, guard, ActionFn, GuardFn, HookFn};
pub use machine::Machine;
pub use types::{
    EventId, ExecutionResult, StateId, EVENT_CATCH, EVENT_TIMEOUT, MAX_NEST_DEPTH, STATE_ANY,
    STATE_PARENT, STATE_SAME,
};
pub use verify::VerifyError;
