//! A thread that disconnects while holding a resource releases it and
//! broadcasts, unblocking a waiter whose need is now satisfiable.
//!
//! Disconnecting must also reset the slot to fully empty, not just undo
//! its current holdings: a resource it had claimed but never actually
//! requested must not leave a stale `Need` behind for whichever thread
//! reconnects into that slot next.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use reman_core::Manager;

#[test]
fn disconnect_while_holding_unblocks_a_waiter() {
    let manager = Arc::new(Manager::new(2, 1, false).unwrap());

    manager.connect(0).unwrap();
    manager.request(&[1]).unwrap();

    let waiter = {
        let manager = Arc::clone(&manager);
        thread::spawn(move || {
            manager.connect(1).unwrap();
            manager.request(&[1]).unwrap();
            manager.disconnect().unwrap();
        })
    };

    thread::sleep(Duration::from_millis(100));

    manager.disconnect().unwrap();

    waiter.join().expect("waiter thread panicked");
}

#[test]
fn disconnect_clears_need_for_claimed_but_unused_resources() {
    let manager = Manager::new(1, 2, true).unwrap();

    manager.connect(0).unwrap();
    manager.claim(&[1, 1]).unwrap();
    manager.request(&[1, 0]).unwrap(); // holds R0; R1 stays claimed but untouched
    manager.disconnect().unwrap(); // auto-releases R0 and must reset the whole slot

    // Reconnecting into the same slot without claiming anything this
    // session should start with Need all-zero, so any nonzero request
    // exceeds it. A stale Need row surviving the previous session would
    // let this request through instead.
    manager.connect(0).unwrap();
    let err = manager.request(&[0, 1]).unwrap_err();
    assert!(err.is_exceeds_claim());

    manager.disconnect().unwrap();
}
