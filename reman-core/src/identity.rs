//! Thread identity binding.
//!
//! A calling thread proves which slot it occupies by checking a
//! thread-local binding rather than passing its index as a parameter to
//! every operation. The thread-local holds a small `Vec<(ManagerId,
//! usize)>` of bindings, since a thread may be a participant in more than
//! one independent manager at once (e.g. two `Manager`s alive in the same
//! test binary), and a manager only trusts the slot index back from a
//! thread if its own id is present among them.

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Opaque identifier distinguishing one `Manager` instance from another.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ManagerId(usize);

static NEXT_MANAGER_ID: AtomicUsize = AtomicUsize::new(1);

impl ManagerId {
    pub(crate) fn fresh() -> Self {
        ManagerId(NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

thread_local! {
    static BOUND_SLOTS: RefCell<Vec<(ManagerId, usize)>> = RefCell::new(Vec::new());
}

/// Returns the slot this thread is bound to under `owner`, if any.
pub(crate) fn current(owner: ManagerId) -> Option<usize> {
    BOUND_SLOTS.with(|slots| {
        slots
            .borrow()
            .iter()
            .find(|&&(id, _)| id == owner)
            .map(|&(_, tid)| tid)
    })
}

/// Binds this thread to `tid` under `owner`. Callers are responsible for
/// rejecting a rebind to the same manager before calling this (see
/// `Manager::connect`, which checks `Conn[t]` under the state lock first).
pub(crate) fn bind(owner: ManagerId, tid: usize) {
    BOUND_SLOTS.with(|slots| slots.borrow_mut().push((owner, tid)));
}

/// Clears this thread's binding to `owner`, if it currently holds one.
/// A no-op if the thread has no binding to that manager.
pub(crate) fn unbind(owner: ManagerId) {
    BOUND_SLOTS.with(|slots| slots.borrow_mut().retain(|&(id, _)| id != owner));
}
