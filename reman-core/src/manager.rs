//! Lifecycle (C6) and request/release protocol (C5): the `Manager` type
//! that ties the state store, thread identity binding, and the safety and
//! detection oracles together behind one mutex and one condition variable.

use std::sync::{Condvar, Mutex};

use crate::detect;
use crate::error::ReManError;
use crate::identity::{self, ManagerId};
use crate::log::{Event, Logger};
use crate::safety;
use crate::state::{validate_bit_vector, State, MAXR, MAXT};

/// A resource manager mediating a fixed set of single-instance resources
/// among a fixed set of cooperating worker threads.
///
/// Construct with [`Manager::new`], share across threads behind an `Arc`,
/// have each participating thread call [`Manager::connect`] once before any
/// other per-thread operation, and [`Manager::disconnect`] last.
pub struct Manager {
    id: ManagerId,
    t_count: usize,
    r_count: usize,
    avoid: bool,
    state: Mutex<State>,
    cond: Condvar,
    logger: Logger,
}

impl Manager {
    /// Constructs a new manager for `t_count` threads and `r_count`
    /// single-instance resources. `avoid` selects whether [`Manager::request`]
    /// additionally runs the safety oracle before granting.
    ///
    /// Fails if either count is zero or exceeds [`MAXT`]/[`MAXR`].
    pub fn new(t_count: usize, r_count: usize, avoid: bool) -> Result<Manager, ReManError> {
        if t_count == 0 || t_count > MAXT {
            return Err(ReManError::invalid_argument(format!(
                "thread count {} is out of range [1, {}]",
                t_count, MAXT
            )));
        }
        if r_count == 0 || r_count > MAXR {
            return Err(ReManError::invalid_argument(format!(
                "resource count {} is out of range [1, {}]",
                r_count, MAXR
            )));
        }

        Ok(Manager {
            id: ManagerId::fresh(),
            t_count,
            r_count,
            avoid,
            state: Mutex::new(State::new(t_count, r_count)),
            cond: Condvar::new(),
            logger: Logger::new(),
        })
    }

    /// Number of thread slots this manager was constructed with.
    pub fn t_count(&self) -> usize {
        self.t_count
    }

    /// Number of resources this manager was constructed with.
    pub fn r_count(&self) -> usize {
        self.r_count
    }

    /// Whether this manager was configured for deadlock avoidance.
    pub fn avoidance_enabled(&self) -> bool {
        self.avoid
    }

    /// Returns the slot the calling thread is bound to, or
    /// [`ReManError::not_connected`] if it has no binding to this manager.
    fn bound_tid(&self) -> Result<usize, ReManError> {
        identity::current(self.id).ok_or_else(ReManError::not_connected)
    }

    /// Binds the calling thread to slot `t`. Fails if `t` is out of range
    /// or already occupied by a live participant.
    pub fn connect(&self, t: usize) -> Result<(), ReManError> {
        if t >= self.t_count {
            return Err(ReManError::invalid_argument(format!(
                "thread id {} is out of range [0, {})",
                t, self.t_count
            )));
        }

        {
            let mut state = self.state.lock().unwrap();
            if state.connected[t] {
                return Err(ReManError::already_connected());
            }
            state.connected[t] = true;
        }

        identity::bind(self.id, t);
        self.logger.log(|| Event::Connected { tid: t });
        Ok(())
    }

    /// Unbinds the calling thread, releasing any resources it still holds
    /// and broadcasting so waiters whose need is now satisfiable re-check.
    pub fn disconnect(&self) -> Result<(), ReManError> {
        let t = self.bound_tid()?;

        {
            let mut state = self.state.lock().unwrap();
            state.connected[t] = false;
            state.clear_holdings(t);
            self.cond.notify_all();
        }

        identity::unbind(self.id);
        self.logger.log(|| Event::Disconnected { tid: t });
        Ok(())
    }

    /// Declares the calling thread's upper bound on simultaneous holdings.
    /// Only meaningful (and only permitted) when avoidance is enabled; must
    /// be called before the thread's first `request` to have any effect on
    /// the safety oracle. May be called more than once; each call overwrites
    /// the previous claim, provided the resulting `Need` stays non-negative.
    pub fn claim(&self, c: &[u32]) -> Result<(), ReManError> {
        let t = self.bound_tid()?;

        if !self.avoid {
            return Err(ReManError::not_available());
        }

        validate_bit_vector(c, self.r_count)?;

        {
            let mut state = self.state.lock().unwrap();

            let mut need_row = Vec::with_capacity(self.r_count);
            for r in 0..self.r_count {
                let alloc = state.allocation[t][r];
                if c[r] < alloc {
                    return Err(ReManError::invalid_argument(format!(
                        "claim {} for resource {} is below the {} already allocated",
                        c[r], r, alloc
                    )));
                }
                need_row.push(c[r] - alloc);
            }

            state.claim[t] = c.to_vec();
            state.need[t] = need_row;
        }

        self.logger.log(|| Event::Claimed { tid: t });
        Ok(())
    }

    /// Requests resources `v`, blocking until they can be granted.
    ///
    /// With avoidance off, grants as soon as `v` is covered by the
    /// available vector. With avoidance on, additionally consults the
    /// safety oracle on every candidate grant and rolls back and retries if
    /// granting would leave the system unsafe. Never suspends on a failing
    /// validation: an `InvalidArgument` or `ExceedsClaim` is returned with
    /// state left exactly as it was found.
    pub fn request(&self, v: &[u32]) -> Result<(), ReManError> {
        let t = self.bound_tid()?;
        validate_bit_vector(v, self.r_count)?;

        let mut state = self.state.lock().unwrap();

        if self.avoid {
            for r in 0..self.r_count {
                if v[r] > state.need[t][r] {
                    return Err(ReManError::exceeds_claim());
                }
            }
        }

        for r in 0..self.r_count {
            state.request[t][r] = v[r];
        }
        self.logger.log(|| Event::Requested { tid: t });

        loop {
            let feasible = (0..self.r_count).all(|r| v[r] <= state.available[r]);

            if !feasible {
                self.logger.log(|| Event::Blocked { tid: t });
                state = self.cond.wait(state).unwrap();
                continue;
            }

            if !self.avoid {
                for r in 0..self.r_count {
                    state.available[r] -= v[r];
                    state.allocation[t][r] += v[r];
                    state.request[t][r] = 0;
                }
                self.logger.log(|| Event::Granted { tid: t });
                return Ok(());
            }

            // Tentative commit so the safety oracle can evaluate the
            // resulting state; rolled back exactly if unsafe.
            for r in 0..self.r_count {
                state.available[r] -= v[r];
                state.allocation[t][r] += v[r];
                state.need[t][r] -= v[r];
            }

            if safety::is_safe(&state.available, &state.allocation, &state.need) {
                for r in 0..self.r_count {
                    state.request[t][r] = 0;
                }
                self.logger.log(|| Event::Granted { tid: t });
                return Ok(());
            }

            for r in 0..self.r_count {
                state.available[r] += v[r];
                state.allocation[t][r] -= v[r];
                state.need[t][r] += v[r];
            }
            self.logger.log(|| Event::RolledBack { tid: t });
            state = self.cond.wait(state).unwrap();
        }
    }

    /// Releases resources `v`, never blocks, and broadcasts so any waiter
    /// whose request is now feasible re-checks.
    pub fn release(&self, v: &[u32]) -> Result<(), ReManError> {
        let t = self.bound_tid()?;
        validate_bit_vector(v, self.r_count)?;

        {
            let mut state = self.state.lock().unwrap();

            for r in 0..self.r_count {
                if v[r] > state.allocation[t][r] {
                    return Err(ReManError::invalid_argument(format!(
                        "release of {} for resource {} exceeds the {} currently held",
                        v[r], r, state.allocation[t][r]
                    )));
                }
            }

            for r in 0..self.r_count {
                state.allocation[t][r] -= v[r];
                state.available[r] += v[r];
                if self.avoid {
                    state.need[t][r] += v[r];
                }
            }

            self.cond.notify_all();
        }

        self.logger.log(|| Event::Released { tid: t });
        Ok(())
    }

    /// Returns the number of threads currently in a deadlocked set (`0`
    /// means none). Pure and side-effect-free; does not require the
    /// calling thread to be connected.
    pub fn detect(&self) -> usize {
        let state = self.state.lock().unwrap();
        let n = detect::count_deadlocked(
            &state.available,
            &state.allocation,
            &state.request,
            &state.connected,
        );
        drop(state);
        self.logger.log(|| Event::Detected { deadlocked: n });
        n
    }

    /// Prints a labeled snapshot of resource counts, the available vector,
    /// and the claim, allocation, and request matrices to stdout.
    pub fn print(&self, title: &str) {
        let state = self.state.lock().unwrap();

        println!("##########################");
        println!("{}", title);
        println!("##########################");
        println!("Resource Count: {}", self.r_count);
        println!("Thread Count: {}", self.t_count);

        println!("Available (Free) Information:");
        print_header(self.r_count);
        print_row(&state.available);

        println!("Claim:");
        print!("    ");
        print_header(self.r_count);
        for t in 0..self.t_count {
            print!("T{}: ", t);
            print_row(&state.claim[t]);
        }

        println!("Allocation:");
        print!("    ");
        print_header(self.r_count);
        for t in 0..self.t_count {
            print!("T{}: ", t);
            print_row(&state.allocation[t]);
        }

        println!("Request:");
        print!("    ");
        print_header(self.r_count);
        for t in 0..self.t_count {
            print!("T{}: ", t);
            print_row(&state.request[t]);
        }

        println!("##########################");
    }
}

fn print_header(r_count: usize) {
    for r in 0..r_count {
        print!("R{} ", r);
    }
    println!();
}

fn print_row(row: &[u32]) {
    for x in row {
        print!("{}  ", x);
    }
    println!();
}

#[cfg(test)]
impl Manager {
    /// Checks the matrices' structural invariants against the live state.
    /// White-box: only used from this crate's own fuzz test below, which is
    /// why it reaches straight into `State` rather than going through the
    /// public API.
    fn assert_invariants(&self) {
        let state = self.state.lock().unwrap();

        for r in 0..self.r_count {
            let holders = (0..self.t_count).filter(|&t| state.allocation[t][r] == 1).count();
            assert!(holders <= 1, "resource {} held by {} threads at once", r, holders);
            assert_eq!(
                state.available[r] as usize + holders,
                1,
                "available + held != total for resource {}",
                r
            );
        }

        for t in 0..self.t_count {
            for r in 0..self.r_count {
                assert!(state.allocation[t][r] <= 1, "entry out of range: Alloc[{}][{}] > 1", t, r);
                assert!(state.request[t][r] <= 1, "entry out of range: Req[{}][{}] > 1", t, r);

                if self.avoid {
                    assert_eq!(
                        state.need[t][r],
                        state.claim[t][r] - state.allocation[t][r],
                        "need != claim - allocation for thread {} resource {}",
                        t,
                        r
                    );
                }

                if !state.connected[t] {
                    assert_eq!(state.allocation[t][r], 0, "disconnected thread {} still holds {}", t, r);
                    assert_eq!(state.request[t][r], 0, "disconnected thread {} still requests {}", t, r);
                    assert_eq!(state.need[t][r], 0, "disconnected thread {} still has need {}", t, r);
                }
            }
        }
    }
}
