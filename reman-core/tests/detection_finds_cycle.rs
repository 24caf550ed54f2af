//! With avoidance off, two threads requesting each other's held resource
//! block forever on a genuine circular wait, and `detect()` reports both
//! as deadlocked. Detection is read-only: state is unchanged after the
//! call, and a second call returns the same answer.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use reman_core::Manager;

#[test]
fn circular_wait_is_detected_and_detection_is_idempotent() {
    let manager = Arc::new(Manager::new(2, 2, false).unwrap());
    let barrier = Arc::new(Barrier::new(2));

    {
        let manager = Arc::clone(&manager);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            manager.connect(0).unwrap();
            manager.request(&[1, 0]).unwrap(); // holds R0
            barrier.wait();
            let _ = manager.request(&[0, 1]); // blocks forever: never returns
        });
    }

    {
        let manager = Arc::clone(&manager);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            manager.connect(1).unwrap();
            manager.request(&[0, 1]).unwrap(); // holds R1
            barrier.wait();
            let _ = manager.request(&[1, 0]); // blocks forever: never returns
        });
    }

    // Let both threads reach their barrier, issue their second (doomed)
    // request, and actually land on the condition variable.
    thread::sleep(Duration::from_millis(150));

    let first = manager.detect();
    let second = manager.detect();

    assert_eq!(first, 2);
    assert_eq!(second, first, "detect() must be idempotent");
}
