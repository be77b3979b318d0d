use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub type TimerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed on the timer with this id.
    Tick(TimerId),
}

/// A cancellable once-per-second ticker.
///
/// Implementations must cancel any running countdown before starting a
/// new one, so at most one is live.
pub trait Countdown {
    fn start(&mut self, seconds: u32) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

/// Runs each countdown on its own thread and reports ticks on a channel.
pub struct ThreadCountdown {
    tx: mpsc::Sender<TimerEvent>,
    period: Duration,
    next_id: TimerId,
    active: Option<(TimerId, Arc<AtomicBool>)>,
}

impl ThreadCountdown {
    pub fn new(tx: mpsc::Sender<TimerEvent>) -> Self {
        Self::with_period(tx, Duration::from_secs(1))
    }

    pub fn with_period(tx: mpsc::Sender<TimerEvent>, period: Duration) -> Self {
        Self {
            tx,
            period,
            next_id: 1,
            active: None,
        }
    }

    fn stop_active(&mut self) {
        if let Some((id, cancel)) = self.active.take() {
            cancel.store(true, Ordering::SeqCst);
            log::debug!("timer {} cancelled", id);
        }
    }
}

impl Countdown for ThreadCountdown {
    fn start(&mut self, seconds: u32) -> TimerId {
        self.stop_active();

        let id = self.next_id;
        self.next_id += 1;

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let tx = self.tx.clone();
        let period = self.period;

        thread::spawn(move || {
            for _ in 0..seconds {
                thread::sleep(period);
                if flag.load(Ordering::SeqCst) {
                    return;
                }
                if tx.send(TimerEvent::Tick(id)).is_err() {
                    return;
                }
            }
        });

        log::debug!("timer {} started for {}s", id, seconds);
        self.active = Some((id, cancel));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if matches!(self.active, Some((active, _)) if active == id) {
            self.stop_active();
        }
    }
}

impl Drop for ThreadCountdown {
    fn drop(&mut self) {
        self.stop_active();
    }
}

pub fn format_countdown(secs: u32) -> String {
    let minutes = secs / 60;
    let seconds = secs % 60;
    if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
