//! State store: the matrices and vectors guarded by the
//! manager's single mutex, plus the validation helpers every public
//! operation runs before it touches them.

use crate::error::ReManError;

/// Upper bound on thread count accepted by [`crate::Manager::new`].
pub const MAXT: usize = 64;
/// Upper bound on resource count accepted by [`crate::Manager::new`].
pub const MAXR: usize = 128;

/// All mutable manager state, living behind one `Mutex` (see `Manager::state`).
///
/// Entries are stored as `u32` rather than `bool` even though every public
/// boundary restricts them to `{0,1}`: the safety and detection algorithms
/// are written against general bounded demand, and only the validators here
/// enforce the single-instance restriction.
pub(crate) struct State {
    pub(crate) available: Vec<u32>,
    pub(crate) claim: Vec<Vec<u32>>,
    pub(crate) allocation: Vec<Vec<u32>>,
    pub(crate) request: Vec<Vec<u32>>,
    pub(crate) need: Vec<Vec<u32>>,
    pub(crate) connected: Vec<bool>,
}

impl State {
    pub(crate) fn new(t_count: usize, r_count: usize) -> Self {
        State {
            available: vec![1; r_count],
            claim: vec![vec![0; r_count]; t_count],
            allocation: vec![vec![0; r_count]; t_count],
            request: vec![vec![0; r_count]; t_count],
            need: vec![vec![0; r_count]; t_count],
            connected: vec![false; t_count],
        }
    }

    /// Resets slot `t` to empty: returns every resource it holds to
    /// `available`, and zeroes its `claim`, `request`, and `need` rows so
    /// the invariant that a disconnected slot is all-zero holds regardless
    /// of what it had claimed or requested before disconnecting. Does not
    /// touch `connected[t]`. Used only by `disconnect`.
    pub(crate) fn clear_holdings(&mut self, t: usize) {
        for r in 0..self.available.len() {
            let held = self.allocation[t][r];
            if held > 0 {
                self.available[r] += held;
                self.allocation[t][r] = 0;
            }
            self.claim[t][r] = 0;
            self.request[t][r] = 0;
            self.need[t][r] = 0;
        }
    }
}

/// Validates that `v` has exactly `r_count` entries, each in `{0,1}`.
pub(crate) fn validate_bit_vector(v: &[u32], r_count: usize) -> Result<(), ReManError> {
    if v.len() != r_count {
        return Err(ReManError::invalid_argument(format!(
            "expected a vector of length {}, got {}",
            r_count,
            v.len()
        )));
    }
    if let Some((r, bad)) = v.iter().enumerate().find(|&(_, &x)| x > 1) {
        return Err(ReManError::invalid_argument(format!(
            "entry {} for resource {} is not in {{0,1}}",
            bad, r
        )));
    }
    Ok(())
}
