//! Detection oracle: the independent reachability check behind `detect`.
//!
//! Shares the fixed-point shape of [`crate::safety::is_safe`] but differs
//! in two ways: disconnected threads start already finished (they hold
//! nothing and can block no one), and the predicate that lets a thread
//! finish is its outstanding *request*, not its remaining *need* — a
//! thread with no pending request finishes on the first pass regardless
//! of how much it still might claim later. Pure and side-effect-free: it
//! never mutates the snapshot it's given.

/// Returns the count of threads that cannot finish: the size of the
/// deadlocked set, or `0` if there is none.
pub(crate) fn count_deadlocked(
    available: &[u32],
    allocation: &[Vec<u32>],
    request: &[Vec<u32>],
    connected: &[bool],
) -> usize {
    let t_count = allocation.len();
    let mut work = available.to_vec();
    let mut finish: Vec<bool> = connected.iter().map(|&c| !c).collect();

    loop {
        let mut progressed = false;

        for t in 0..t_count {
            if finish[t] {
                continue;
            }

            if row_fits(&request[t], &work) {
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

    finish.into_iter().filter(|&f| !f).count()
}

fn row_fits(lhs: &[u32], rhs: &[u32]) -> bool {
    lhs.iter().zip(rhs).all(|(l, r)| l <= r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_requests_means_no_deadlock() {
        let available = vec![0, 0];
        let allocation = vec![vec![1, 0], vec![0, 1]];
        let request = vec![vec![0, 0], vec![0, 0]];
        let connected = vec![true, true];
        assert_eq!(count_deadlocked(&available, &allocation, &request, &connected), 0);
    }

    #[test]
    fn circular_wait_is_detected() {
        // Thread 0 holds R0, wants R1. Thread 1 holds R1, wants R0.
        let available = vec![0, 0];
        let allocation = vec![vec![1, 0], vec![0, 1]];
        let request = vec![vec![0, 1], vec![1, 0]];
        let connected = vec![true, true];
        assert_eq!(count_deadlocked(&available, &allocation, &request, &connected), 2);
    }

    #[test]
    fn disconnected_threads_are_ignored() {
        let available = vec![0, 0];
        let allocation = vec![vec![1, 0], vec![0, 1]];
        let request = vec![vec![0, 1], vec![1, 0]];
        let connected = vec![true, false];
        // Thread 1 starts pre-finished because it's disconnected, so it
        // contributes nothing further and is excluded from the deadlocked
        // count regardless of what its (stale) allocation row says. Thread
        // 0 still wants R1, which nothing frees, so it alone is reported.
        assert_eq!(count_deadlocked(&available, &allocation, &request, &connected), 1);
    }
}
