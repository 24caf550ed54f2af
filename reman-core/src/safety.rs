//! Safety oracle: classic banker's-algorithm feasibility check.
//!
//! Pure function over a snapshot; used only when avoidance is enabled, to
//! decide whether a tentatively-committed allocation leaves the system in a
//! state from which every connected thread can still finish: a `work`
//! vector seeded from `available`, a `finish` flag per thread, and
//! repeated passes until no new thread finishes.

/// Returns `true` iff some order of completion exists in which every
/// thread's `need[t]` can be satisfied out of the resources freed by
/// threads that finished before it.
///
/// `need[t] <= work` and `work += allocation[t]` are both done
/// componentwise. Disconnected threads are represented with all-zero
/// `need`/`allocation` rows and so finish trivially on the first pass
/// without special-casing here.
pub(crate) fn is_safe(available: &[u32], allocation: &[Vec<u32>], need: &[Vec<u32>]) -> bool {
    let t_count = allocation.len();
    let mut work = available.to_vec();
    let mut finish = vec![false; t_count];

    loop {
        let mut progressed = false;

        for t in 0..t_count {
            if finish[t] {
                continue;
            }

            if row_fits(&need[t], &work) {
                for (w, a) in work.iter_mut().zip(&allocation[t]) {
                    *w += a;
                }
                finish[t] = true;
                progressed = true;
            }
        }

        if !progressed {
            break;
        }
    }

    finish.into_iter().all(|f| f)
}

/// `lhs <= rhs` componentwise.
fn row_fits(lhs: &[u32], rhs: &[u32]) -> bool {
    lhs.iter().zip(rhs).all(|(l, r)| l <= r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_system_is_trivially_safe() {
        assert!(is_safe(&[1, 1], &[], &[]));
    }

    #[test]
    fn fully_satisfiable_need_is_safe() {
        // Thread 0 has nothing left to ask for; work already covers it.
        let available = vec![0, 1];
        let allocation = vec![vec![1, 0], vec![0, 0]];
        let need = vec![vec![0, 0], vec![1, 1]];
        assert!(is_safe(&available, &allocation, &need));
    }

    #[test]
    fn mutual_unresolvable_need_is_unsafe() {
        // Neither thread's need fits in what's left, and neither can
        // finish to free more.
        let available = vec![0, 0];
        let allocation = vec![vec![1, 0], vec![0, 1]];
        let need = vec![vec![0, 1], vec![1, 0]];
        assert!(!is_safe(&available, &allocation, &need));
    }
}
