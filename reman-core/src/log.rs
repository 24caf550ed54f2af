//! A minimal, opt-in event logger for debugging the manager itself.
//!
//! Events are handed off to a bounded channel and drained by a dedicated
//! background thread, so recording one never extends how long a caller
//! holds the state mutex. Disabled unless the `REMAN_LOG` environment
//! variable is set, in which case events are printed to stderr as they
//! drain.

use std::env;
use std::fmt;
use std::thread;

use crossbeam_channel::{self, Sender};

#[derive(Debug)]
pub(crate) enum Event {
    Connected { tid: usize },
    Disconnected { tid: usize },
    Claimed { tid: usize },
    Requested { tid: usize },
    Granted { tid: usize },
    RolledBack { tid: usize },
    Blocked { tid: usize },
    Released { tid: usize },
    Detected { deadlocked: usize },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Connected { tid } => write!(f, "thread {} connected", tid),
            Event::Disconnected { tid } => write!(f, "thread {} disconnected", tid),
            Event::Claimed { tid } => write!(f, "thread {} recorded a claim", tid),
            Event::Requested { tid } => write!(f, "thread {} recorded a request", tid),
            Event::Granted { tid } => write!(f, "thread {} granted its request", tid),
            Event::RolledBack { tid } => write!(f, "thread {} rolled back an unsafe tentative grant", tid),
            Event::Blocked { tid } => write!(f, "thread {} suspended on the condition variable", tid),
            Event::Released { tid } => write!(f, "thread {} released resources", tid),
            Event::Detected { deadlocked } => write!(f, "detection found {} deadlocked thread(s)", deadlocked),
        }
    }
}

#[derive(Clone)]
pub(crate) struct Logger {
    sender: Option<Sender<Event>>,
}

impl Logger {
    pub(crate) fn new() -> Self {
        if env::var_os("REMAN_LOG").is_none() {
            return Logger { sender: None };
        }

        let (sender, receiver) = crossbeam_channel::bounded::<Event>(256);
        thread::Builder::new()
            .name("reman-log".into())
            .spawn(move || {
                for event in receiver {
                    eprintln!("[reman] {}", event);
                }
            })
            .expect("failed to spawn reman log thread");

        Logger {
            sender: Some(sender),
        }
    }

    /// Records an event. `f` is only invoked when logging is enabled, so
    /// constructing the `Event` never costs anything on the default path.
    #[inline]
    pub(crate) fn log(&self, f: impl FnOnce() -> Event) {
        if let Some(sender) = &self.sender {
            // A full channel means the log thread is lagging; drop rather
            // than block a caller holding the state mutex on diagnostics.
            let _ = sender.try_send(f());
        }
    }
}
