//! Demo driver: three worker threads with hardcoded claim/request/release
//! sequences, plus a monitor loop that polls for deadlocks. Not part of
//! the core library; it only exercises it.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use docopt::Docopt;
use reman_core::Manager;
use serde::Deserialize;

const USAGE: &str = "
reman-demo: exercises the reman resource manager with three workers.

Usage:
    reman-demo [<avoid>]
    reman-demo (-h | --help)

Options:
    -h --help   Show this screen.

<avoid> is 0 (avoidance disabled, the default) or 1 (avoidance enabled).
";

#[derive(Debug, Deserialize)]
struct Args {
    arg_avoid: Option<String>,
}

const NUM_RESOURCES: usize = 5;
const NUM_THREADS: usize = 3;
const MONITOR_POLLS: usize = 10;

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let avoid = args.arg_avoid.as_deref() == Some("1");
    if avoid {
        println!("Deadlock avoidance enabled.");
    } else {
        println!("Deadlock avoidance disabled.");
    }

    let manager = Arc::new(
        Manager::new(NUM_THREADS, NUM_RESOURCES, avoid).expect("failed to initialize manager"),
    );

    let workers = vec![
        spawn_worker(Arc::clone(&manager), 0, worker_one),
        spawn_worker(Arc::clone(&manager), 1, worker_two),
        spawn_worker(Arc::clone(&manager), 2, worker_three),
    ];

    let mut deadlocked = 0;
    for _ in 0..MONITOR_POLLS {
        thread::sleep(Duration::from_secs(1));
        manager.print("Current System State");
        let n = manager.detect();
        if n > 0 {
            println!("Deadlock detected! Number of deadlocked threads: {}", n);
            manager.print("System State at Deadlock");
            deadlocked = n;
            break; // exit the monitor loop after detecting deadlock
        }
    }

    if deadlocked == 0 {
        for worker in workers {
            worker.join().expect("worker thread panicked");
            println!("joined");
        }
    }
}

fn spawn_worker(
    manager: Arc<Manager>,
    tid: usize,
    body: fn(&Manager, usize),
) -> thread::JoinHandle<()> {
    thread::spawn(move || body(&manager, tid))
}

fn print_vec(tid: usize, label: &str, v: &[u32]) {
    let entries: Vec<String> = v.iter().map(u32::to_string).collect();
    println!("Thread {}, {}, [{}]", tid, label, entries.join(","));
}

/// Claims R1 and R2, requests R2 then R1, releases in the order taken.
fn worker_one(manager: &Manager, tid: usize) {
    manager.connect(tid).unwrap();

    // `claim` only has an effect (and only succeeds) when avoidance is
    // enabled, so a `NotAvailable` here is expected and not fatal.
    let _ = manager.claim(&[0, 1, 1, 0, 0]);

    let request1 = [0, 0, 1, 0, 0];
    print_vec(tid, "REQ", &request1);
    manager.request(&request1).unwrap();

    thread::sleep(Duration::from_secs(5));

    let request2 = [0, 1, 0, 0, 0];
    print_vec(tid, "REQ", &request2);
    manager.request(&request2).unwrap();

    let release1 = [0, 0, 1, 0, 0];
    print_vec(tid, "REL", &release1);
    manager.release(&release1).unwrap();

    let release2 = [0, 1, 0, 0, 0];
    print_vec(tid, "REL", &release2);
    manager.release(&release2).unwrap();

    manager.disconnect().unwrap();
}

/// Claims R0 and R1, requests R1 then R0.
fn worker_two(manager: &Manager, tid: usize) {
    manager.connect(tid).unwrap();
    let _ = manager.claim(&[1, 1, 0, 0, 0]);

    let request1 = [0, 1, 0, 0, 0];
    print_vec(tid, "REQ", &request1);
    manager.request(&request1).unwrap();

    thread::sleep(Duration::from_secs(3));

    let request2 = [1, 0, 0, 0, 0];
    print_vec(tid, "REQ", &request2);
    manager.request(&request2).unwrap();

    let release1 = [1, 0, 0, 0, 0];
    print_vec(tid, "REL", &release1);
    manager.release(&release1).unwrap();

    let release2 = [0, 1, 0, 0, 0];
    print_vec(tid, "REL", &release2);
    manager.release(&release2).unwrap();

    manager.disconnect().unwrap();
}

/// Claims R0 and R1, requests R0 then R1 — the mirror image of
/// `worker_two`'s order, which is what makes the avoidance-off run
/// deadlock-prone.
fn worker_three(manager: &Manager, tid: usize) {
    manager.connect(tid).unwrap();
    let _ = manager.claim(&[1, 1, 0, 0, 0]);

    let request1 = [1, 0, 0, 0, 0];
    print_vec(tid, "REQ", &request1);
    manager.request(&request1).unwrap();

    thread::sleep(Duration::from_secs(1));

    let request2 = [0, 1, 0, 0, 0];
    print_vec(tid, "REQ", &request2);
    manager.request(&request2).unwrap();

    let release1 = [0, 1, 0, 0, 0];
    print_vec(tid, "REL", &release1);
    manager.release(&release1).unwrap();

    let release2 = [1, 0, 0, 0, 0];
    print_vec(tid, "REL", &release2);
    manager.release(&release2).unwrap();

    manager.disconnect().unwrap();
}
