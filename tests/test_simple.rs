//! Flat-machine behavior: transition selection, guards, catch recovery,
//! and the any-state fallback.

use nestfsm::{
    action, guard, ActionFn, ExecutionResult, GuardFn, MachineBuilder, ObjectState, EVENT_CATCH,
    EVENT_TIMEOUT,
};

const IDLE: i32 = 1;
const RINGING: i32 = 2;
const DIALING: i32 = 3;
const ORIGINATING: i32 = 4;
const ERROR: i32 = 5;

const EVENT_INBOUND: i32 = 10;
const EVENT_ERR: i32 = 99;

#[derive(Default)]
struct Trace {
    calls: Vec<&'static str>,
    have_digits: bool,
}

fn act(name: &'static str) -> ActionFn<Trace, ()> {
    action(move |trace: &mut Trace, _| {
        trace.calls.push(name);
        true
    })
}

fn failing(name: &'static str) -> ActionFn<Trace, ()> {
    action(move |trace: &mut Trace, _| {
        trace.calls.push(name);
        false
    })
}

fn have_digits() -> GuardFn<Trace, ()> {
    guard(|trace: &mut Trace, _| trace.have_digits)
}

#[test]
fn simple_transition_fires_action() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .transition(EVENT_INBOUND, None, RINGING, vec![act("a")])
        .done()
        .state(RINGING)
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, IDLE);
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_INBOUND, &mut trace, &());
    assert_eq!(result, ExecutionResult::NewState);
    assert_eq!(trace.calls, vec!["a"]);
    assert_eq!(cursor.current_state(), RINGING);
    assert_eq!(cursor.previous_state(), IDLE);
    assert_eq!(cursor.nest_depth(), 0);
}

fn dialing_machine() -> nestfsm::Machine<Trace, ()> {
    MachineBuilder::<Trace, ()>::new()
        .state(DIALING)
        .transition(
            EVENT_TIMEOUT,
            Some(have_digits()),
            ORIGINATING,
            vec![act("ring")],
        )
        .transition(EVENT_TIMEOUT, None, ERROR, vec![act("tone")])
        .done()
        .state(ORIGINATING)
        .done()
        .state(ERROR)
        .done()
        .build()
}

#[test]
fn failed_guard_falls_through_to_alternative() {
    let machine = dialing_machine();
    let mut cursor = ObjectState::new(DIALING, DIALING);
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_TIMEOUT, &mut trace, &());
    assert_eq!(result, ExecutionResult::NewState);
    assert_eq!(trace.calls, vec!["tone"]);
    assert_eq!(cursor.current_state(), ERROR);
}

#[test]
fn passing_guard_takes_the_first_transition() {
    let machine = dialing_machine();
    let mut cursor = ObjectState::new(DIALING, DIALING);
    let mut trace = Trace {
        have_digits: true,
        ..Trace::default()
    };

    let result = machine.execute(&mut cursor, EVENT_TIMEOUT, &mut trace, &());
    assert_eq!(result, ExecutionResult::NewState);
    assert_eq!(trace.calls, vec!["ring"]);
    assert_eq!(cursor.current_state(), ORIGINATING);
}

#[test]
fn action_failure_runs_the_catch_transition() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .transition(EVENT_INBOUND, None, RINGING, vec![failing("a_fail")])
        .catch(ERROR, vec![act("hangup")])
        .done()
        .state(RINGING)
        .done()
        .state(ERROR)
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, IDLE);
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_INBOUND, &mut trace, &());
    assert_eq!(result, ExecutionResult::NewState);
    assert_eq!(trace.calls, vec!["a_fail", "hangup"]);
    assert_eq!(cursor.current_state(), ERROR);
    assert_eq!(cursor.previous_state(), IDLE);
}

#[test]
fn action_failure_without_catch_leaves_cursor_untouched() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .transition(EVENT_INBOUND, None, RINGING, vec![failing("a_fail")])
        .done()
        .state(RINGING)
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, 7);
    let before = cursor;
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_INBOUND, &mut trace, &());
    assert_eq!(result, ExecutionResult::ActionFailure);
    assert_eq!(cursor, before);
    assert_eq!(trace.calls, vec!["a_fail"]);
}

#[test]
fn any_state_handles_events_nothing_else_matched() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .done()
        .state(ERROR)
        .entry(|trace: &mut Trace| trace.calls.push("err.entry"))
        .done()
        .any_state()
        .transition(EVENT_ERR, None, ERROR, vec![act("idle_system")])
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, IDLE);
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_ERR, &mut trace, &());
    assert_eq!(result, ExecutionResult::NewState);
    assert_eq!(cursor.current_state(), ERROR);
    assert_eq!(trace.calls, vec!["idle_system", "err.entry"]);
}

#[test]
fn any_state_match_still_exits_the_current_state() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .exit(|trace: &mut Trace| trace.calls.push("idle.exit"))
        .done()
        .state(ERROR)
        .entry(|trace: &mut Trace| trace.calls.push("err.entry"))
        .done()
        .any_state()
        .transition(EVENT_ERR, None, ERROR, vec![act("idle_system")])
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, IDLE);
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_ERR, &mut trace, &());
    assert_eq!(result, ExecutionResult::NewState);
    assert_eq!(trace.calls, vec!["idle_system", "idle.exit", "err.entry"]);
}

#[test]
fn nest_transitions_shadow_the_any_state() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .transition(EVENT_ERR, None, RINGING, vec![act("specific")])
        .done()
        .state(RINGING)
        .done()
        .state(ERROR)
        .done()
        .any_state()
        .transition(EVENT_ERR, None, ERROR, vec![act("fallback")])
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, IDLE);
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_ERR, &mut trace, &());
    assert_eq!(result, ExecutionResult::NewState);
    assert_eq!(cursor.current_state(), RINGING);
    assert_eq!(trace.calls, vec!["specific"]);
}

#[test]
fn same_target_reports_no_change() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .exit(|trace: &mut Trace| trace.calls.push("idle.exit"))
        .transition(EVENT_INBOUND, None, nestfsm::STATE_SAME, vec![act("a")])
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, 7);
    let before = cursor;
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_INBOUND, &mut trace, &());
    assert_eq!(result, ExecutionResult::NoChange);
    assert_eq!(cursor, before);
    // The action ran, but no exit or entry work happened.
    assert_eq!(trace.calls, vec!["a"]);
}

#[test]
fn unknown_event_reports_no_transition() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .transition(EVENT_INBOUND, None, RINGING, vec![act("a")])
        .done()
        .state(RINGING)
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, IDLE);
    let before = cursor;
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, 4242, &mut trace, &());
    assert_eq!(result, ExecutionResult::NoTransition);
    assert_eq!(cursor, before);
    assert!(trace.calls.is_empty());
}

#[test]
fn catch_event_id_is_rejected_as_input() {
    let machine = MachineBuilder::<Trace, ()>::new()
        .state(IDLE)
        .transition(EVENT_INBOUND, None, ERROR, vec![failing("a_fail")])
        .catch(ERROR, vec![act("hangup")])
        .done()
        .state(ERROR)
        .done()
        .build();

    let mut cursor = ObjectState::new(IDLE, IDLE);
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_CATCH, &mut trace, &());
    assert_eq!(result, ExecutionResult::NoTransition);
    assert!(trace.calls.is_empty());
}

#[test]
fn message_reaches_guards_and_actions() {
    struct Digit(u8);

    let machine = MachineBuilder::<Trace, Digit>::new()
        .state(DIALING)
        .transition(
            EVENT_INBOUND,
            Some(guard(|_, digit: &Digit| digit.0 < 10)),
            nestfsm::STATE_SAME,
            vec![action(|trace: &mut Trace, digit: &Digit| {
                trace.calls.push(if digit.0 == 5 { "five" } else { "other" });
                true
            })],
        )
        .done()
        .build();

    let mut cursor = ObjectState::new(DIALING, DIALING);
    let mut trace = Trace::default();

    let result = machine.execute(&mut cursor, EVENT_INBOUND, &mut trace, &Digit(5));
    assert_eq!(result, ExecutionResult::NoChange);
    let result = machine.execute(&mut cursor, EVENT_INBOUND, &mut trace, &Digit(42));
    assert_eq!(result, ExecutionResult::NoTransition);
    assert_eq!(trace.calls, vec!["five"]);
}
