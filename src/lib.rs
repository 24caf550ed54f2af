#![doc(html_root_url = "https://docs.rs/reman/0.1.0")]

//! `reman`: a deadlock avoidance and detection resource manager for a
//! fixed set of cooperating worker threads, with a fixed set of
//! single-instance resources.
//!
//! This crate is a thin facade over [`reman_core`]: the matrix
//! state-machine, the banker's-algorithm safety oracle, the independent
//! detection pass, and the blocking request/release protocol all live
//! there. See [`Manager`] for the entry point.
//!
//! ```no_run
//! use reman::Manager;
//!
//! let manager = Manager::new(2, 1, false).unwrap();
//! manager.connect(0).unwrap();
//! manager.request(&[1]).unwrap();
//! manager.release(&[1]).unwrap();
//! manager.disconnect().unwrap();
//! ```

pub use reman_core::{Manager, ReManError, MAXR, MAXT};
