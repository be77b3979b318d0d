use std::sync::mpsc;
use std::time::Duration;

use quizrun::timer::{format_countdown, Countdown, ThreadCountdown, TimerEvent};

const PERIOD: Duration = Duration::from_millis(50);

#[test]
fn test_ticks_once_per_second_of_duration() {
    let (tx, rx) = mpsc::channel();
    let mut countdown = ThreadCountdown::with_period(tx, PERIOD);

    let id = countdown.start(3);

    for _ in 0..3 {
        let ev = rx.recv_timeout(Duration::from_secs(2)).expect("missing tick");
        assert_eq!(ev, TimerEvent::Tick(id));
    }
    // The thread stops by itself after the last tick
    assert!(rx.recv_timeout(PERIOD * 4).is_err());
}

#[test]
fn test_cancel_stops_ticks() {
    let (tx, rx) = mpsc::channel();
    let mut countdown = ThreadCountdown::with_period(tx, Duration::from_millis(200));

    let id = countdown.start(5);
    countdown.cancel(id);

    assert!(rx.recv_timeout(Duration::from_millis(600)).is_err());
}

#[test]
fn test_starting_again_replaces_previous_timer() {
    let (tx, rx) = mpsc::channel();
    let mut countdown = ThreadCountdown::with_period(tx, Duration::from_millis(200));

    let first = countdown.start(5);
    let second = countdown.start(2);
    assert_ne!(first, second);

    let ticks: Vec<TimerEvent> = (0..2)
        .map(|_| rx.recv_timeout(Duration::from_secs(2)).expect("missing tick"))
        .collect();
    assert_eq!(ticks, vec![TimerEvent::Tick(second); 2]);
    assert!(rx.recv_timeout(Duration::from_millis(600)).is_err());
}

#[test]
fn test_cancel_of_unknown_id_keeps_active_timer() {
    let (tx, rx) = mpsc::channel();
    let mut countdown = ThreadCountdown::with_period(tx, PERIOD);

    let id = countdown.start(1);
    countdown.cancel(id + 100);

    assert_eq!(
        rx.recv_timeout(Duration::from_secs(2)).expect("missing tick"),
        TimerEvent::Tick(id)
    );
}

#[test]
fn test_format_countdown() {
    assert_eq!(format_countdown(0), "0s");
    assert_eq!(format_countdown(20), "20s");
    assert_eq!(format_countdown(75), "1m 15s");
}
