//! A single thread requesting and releasing resources sequentially, with
//! avoidance off, never blocks and leaves the state as it started.

use reman_core::Manager;

#[test]
fn sequential_grant_returns_state_to_start() {
    let manager = Manager::new(1, 2, false).unwrap();
    manager.connect(0).unwrap();

    manager.request(&[1, 0]).unwrap();
    manager.request(&[0, 1]).unwrap();
    manager.release(&[1, 1]).unwrap();

    manager.disconnect().unwrap();
}

#[test]
fn empty_request_succeeds_without_touching_available() {
    let manager = Manager::new(1, 3, false).unwrap();
    manager.connect(0).unwrap();

    manager.request(&[0, 0, 0]).unwrap();

    manager.disconnect().unwrap();
}
