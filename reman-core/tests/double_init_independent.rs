//! `Manager::new` is an ordinary constructor rather than a process-wide
//! singleton, so two independent managers can coexist in one process
//! without interfering, each bound to its own thread identities.

use reman_core::Manager;

#[test]
fn two_managers_coexist_independently() {
    let first = Manager::new(1, 1, false).unwrap();
    let second = Manager::new(1, 1, false).unwrap();

    first.connect(0).unwrap();
    second.connect(0).unwrap();

    first.request(&[1]).unwrap();
    // Would fail if `second` shared state with `first`: the resource is
    // still free from `second`'s point of view.
    second.request(&[1]).unwrap();

    first.release(&[1]).unwrap();
    second.release(&[1]).unwrap();

    first.disconnect().unwrap();
    second.disconnect().unwrap();
}

#[test]
fn rejects_out_of_range_counts() {
    assert!(Manager::new(0, 1, false).is_err());
    assert!(Manager::new(1, 0, false).is_err());
    assert!(Manager::new(reman_core::MAXT + 1, 1, false).is_err());
    assert!(Manager::new(1, reman_core::MAXR + 1, false).is_err());
}
