//! A request that exceeds the thread's remaining need under avoidance
//! fails with `ExceedsClaim` and never suspends or mutates state.

use reman_core::Manager;

#[test]
fn request_beyond_need_fails_without_blocking() {
    let manager = Manager::new(1, 1, true).unwrap();
    manager.connect(0).unwrap();
    manager.claim(&[0]).unwrap();

    let err = manager.request(&[1]).unwrap_err();
    assert!(err.is_exceeds_claim());

    // The thread is still connected and can make progress normally,
    // which would not be true if the failed request had left a stale
    // outstanding `Req` entry behind.
    manager.claim(&[1]).unwrap();
    manager.request(&[1]).unwrap();
    manager.release(&[1]).unwrap();
    manager.disconnect().unwrap();
}

#[test]
fn claim_while_avoidance_disabled_is_not_available() {
    let manager = Manager::new(1, 1, false).unwrap();
    manager.connect(0).unwrap();

    let err = manager.claim(&[1]).unwrap_err();
    assert!(err.is_not_available());
}
