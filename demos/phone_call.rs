//! Drives a small telephone out-dialer machine from a scripted event
//! feed, showing the host-loop pattern: the host owns the event source,
//! feeds events in, and reacts to the outcome of each call.
//!
//! Run with `cargo run --example phone_call`.

use nestfsm::{
    action, guard, ExecutionResult, Machine, MachineBuilder, ObjectState, EVENT_TIMEOUT,
    STATE_SAME,
};

const IDLE: i32 = 0;
const ORIGINATE_CALL: i32 = 1;
const DIALING_START: i32 = 2;
const DIALING_DIGIT: i32 = 3;
const DIALING_DELAY: i32 = 4;
const TALKING: i32 = 5;
const ERROR: i32 = 6;

const EVENT_ORIGINATE: i32 = 100;
const EVENT_DIALING_DONE: i32 = 101;
const EVENT_ERROR_TONE: i32 = 102;
const EVENT_HANGUP: i32 = 103;

#[derive(Default)]
struct PhoneLine {
    digits_remaining: u32,
    dialing_done: bool,
}

fn state_name(id: i32) -> &'static str {
    match id {
        IDLE => "idle",
        ORIGINATE_CALL => "originate-call",
        DIALING_START => "dialing-start",
        DIALING_DIGIT => "dialing-digit",
        DIALING_DELAY => "dialing-delay",
        TALKING => "talking",
        ERROR => "error",
        other => {
            tracing::warn!(other, "unnamed state");
            "?"
        }
    }
}

fn out_dialer() -> Machine<PhoneLine, ()> {
    MachineBuilder::<PhoneLine, ()>::new()
        .state(IDLE)
        .transition(
            EVENT_ORIGINATE,
            None,
            ORIGINATE_CALL,
            vec![action(|_line: &mut PhoneLine, _| {
                tracing::info!("playing dialtone");
                true
            })],
        )
        .catch(
            ERROR,
            vec![action(|_line: &mut PhoneLine, _| {
                tracing::info!("hanging up");
                true
            })],
        )
        .done()
        .complex_state(ORIGINATE_CALL, DIALING_START)
        .transition(
            EVENT_ERROR_TONE,
            None,
            IDLE,
            vec![action(|_line: &mut PhoneLine, _| {
                tracing::info!("hanging up");
                true
            })],
        )
        .transition(EVENT_DIALING_DONE, None, TALKING, vec![])
        .done()
        .state(DIALING_START)
        .entry(|_line| tracing::info!("starting dialing timer"))
        .transition(
            EVENT_TIMEOUT,
            None,
            DIALING_DIGIT,
            vec![action(|line: &mut PhoneLine, _| {
                line.digits_remaining = 3;
                tracing::info!("playing first digit");
                true
            })],
        )
        .done()
        .state(DIALING_DIGIT)
        .entry(|_line| tracing::info!("starting digit timer"))
        .exit(|_line| tracing::info!("playing silence"))
        .transition(EVENT_TIMEOUT, None, DIALING_DELAY, vec![])
        .done()
        .state(DIALING_DELAY)
        .entry(|_line| tracing::info!("starting inter-digit timer"))
        .transition(
            EVENT_TIMEOUT,
            Some(guard(|line: &mut PhoneLine, _| line.digits_remaining > 0)),
            DIALING_DIGIT,
            vec![action(|line: &mut PhoneLine, _| {
                line.digits_remaining -= 1;
                tracing::info!(remaining = line.digits_remaining, "playing next digit");
                true
            })],
        )
        .transition(
            EVENT_TIMEOUT,
            None,
            STATE_SAME,
            vec![action(|line: &mut PhoneLine, _| {
                line.dialing_done = true;
                true
            })],
        )
        .done()
        .state(TALKING)
        .entry(|_line| tracing::info!("call connected"))
        .transition(EVENT_HANGUP, None, IDLE, vec![])
        .done()
        .state(ERROR)
        .transition(EVENT_HANGUP, None, IDLE, vec![])
        .done()
        .build()
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let machine = out_dialer();
    assert!(!machine.has_create_error());

    let clean = machine.verify(|state, kind| {
        tracing::warn!(state = state_name(state), ?kind, "verification finding");
    });
    tracing::info!(clean, "verification done");

    let mut cursor = ObjectState::new(IDLE, IDLE);
    let mut line = PhoneLine::default();

    // Timer expiries arrive as ordinary timeout events; a real host would
    // arm timers in the entry hooks instead of scripting them.
    let mut feed = vec![
        EVENT_ORIGINATE,
        EVENT_TIMEOUT, // dialing-start -> first digit
        EVENT_TIMEOUT, // digit done, inter-digit delay
        EVENT_HANGUP,  // nothing handles this mid-dial
        EVENT_TIMEOUT, // next digit
        EVENT_TIMEOUT,
        EVENT_TIMEOUT,
        EVENT_TIMEOUT,
        EVENT_TIMEOUT,
        EVENT_TIMEOUT,
        EVENT_TIMEOUT, // no digits left: machine flags dialing done
    ];

    while !feed.is_empty() {
        let event = feed.remove(0);
        let result = machine.execute(&mut cursor, event, &mut line, &());
        tracing::info!(
            event,
            ?result,
            state = state_name(cursor.current_state()),
            depth = cursor.nest_depth(),
            "step"
        );

        // The delay state cannot transition its parent by itself; it
        // raises a flag and the host converts it into an event.
        if line.dialing_done {
            line.dialing_done = false;
            feed.insert(0, EVENT_DIALING_DONE);
        }
    }

    let result = machine.execute(&mut cursor, EVENT_HANGUP, &mut line, &());
    assert_eq!(result, ExecutionResult::NewState);
    println!(
        "final state: {} (previously {})",
        state_name(cursor.current_state()),
        state_name(cursor.previous_state())
    );
}
