//! Callback type aliases for guards, actions, and state hooks.
//!
//! The engine is generic over an application context type `C` and a
//! per-event message type `M`; it passes both through to callbacks
//! unchanged and never inspects or retains them.

use std::sync::Arc;

/// Transition guard. Evaluated before a transition is selected; returning
/// `false` makes the engine keep searching for an alternative transition
/// with the same event id.
pub type GuardFn<C, M> = Arc<dyn Fn(&mut C, &M) -> bool + Send + Sync>;

/// Transition action. Runs once the transition has been selected.
/// Returning `false` aborts the remaining actions and triggers the owning
/// state's catch transition, if any.
pub type ActionFn<C, M> = Arc<dyn Fn(&mut C, &M) -> bool + Send + Sync>;

/// State entry/exit hook. Receives the application context only.
pub type HookFn<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// Wraps a closure as a [`GuardFn`].
pub fn guard<C, M>(f: impl Fn(&mut C, &M) -> bool + Send + Sync + 'static) -> GuardFn<C, M> {
    Arc::new(f)
}

/// Wraps a closure as an [`ActionFn`].
pub fn action<C, M>(f: impl Fn(&mut C, &M) -> bool + Send + Sync + 'static) -> ActionFn<C, M> {
    Arc::new(f)
}
