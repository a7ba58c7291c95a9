use std::thread;
use std::time::{Duration, Instant};

use crate::{
    Attempt, CancelToken, MineError, MineEvent, MineLimits, MiningJob, QrError, Target, Verdict,
};

#[test]
fn max_target_finds_first_structurally_valid_nonce() {
    let mut job = MiningJob::new("hello", Target::MAX);
    let mut events = Vec::new();

    let solution = job
        .run(&MineLimits::new(), &CancelToken::new(), |e| events.push(e))
        .unwrap();

    assert_eq!(solution.nonce, 31);
    assert_eq!(solution.attempts, 32);
    assert_eq!(solution.version, 1);
    assert!(solution.density >= 0.30);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], MineEvent::Progress { attempts: 0, .. }));
    assert_eq!(events[1], MineEvent::Found { nonce: 31, attempts: 32 });
    assert_eq!(job.next_nonce(), 32);
}

#[test]
fn single_attempts_walk_the_nonce_space() {
    let mut job = MiningJob::new("hello", Target::MAX);

    let Attempt::Rejected { nonce, verdict } = job.attempt().unwrap() else {
        panic!("nonce 0 is too sparse");
    };
    assert_eq!(nonce, 0);
    assert!(matches!(verdict, Verdict::DensityOutOfRange(_)));
    assert_eq!(job.attempts(), 1);

    let mut job = MiningJob::new("hello", Target::MAX).starting_at(31);
    assert!(matches!(job.attempt().unwrap(), Attempt::Found(s) if s.nonce == 31));
}

#[test]
fn payload_appends_little_endian_nonce() {
    let job = MiningJob::new("ab", Target::MAX);
    assert_eq!(job.payload_for(0x0102), b"ab\x02\x01\0\0\0\0\0\0");
}

#[test]
fn attempt_budget_and_progress() {
    let mut job = MiningJob::new("hello", Target::ZERO);
    let mut progress = Vec::new();

    let err = job
        .run(&MineLimits::new().max_attempts(2500), &CancelToken::new(), |e| {
            if let MineEvent::Progress { attempts, .. } = e {
                progress.push(attempts);
            }
        })
        .unwrap_err();

    assert_eq!(err, MineError::AttemptsExhausted { attempts: 2500 });
    assert_eq!(progress, [0, 1000, 2000]);
}

#[test]
fn cancelled_before_start() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = MiningJob::new("hello", Target::MAX)
        .run(&MineLimits::new(), &cancel, |_| {})
        .unwrap_err();
    assert_eq!(err, MineError::Cancelled { attempts: 0 });
}

#[test]
fn zero_target_is_cancellable_from_another_thread() {
    let cancel = CancelToken::new();
    let remote = cancel.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        remote.cancel();
    });

    let started = Instant::now();
    let result = MiningJob::new("block", Target::ZERO).run(&MineLimits::new(), &cancel, |_| {});
    canceller.join().unwrap();

    assert!(matches!(result, Err(MineError::Cancelled { .. })));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn zero_target_stops_at_deadline() {
    let started = Instant::now();
    let result = MiningJob::new("block", Target::ZERO).run(
        &MineLimits::new().timeout(Duration::from_millis(100)),
        &CancelToken::new(),
        |_| {},
    );

    assert!(matches!(result, Err(MineError::DeadlineExceeded { .. })));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn nonce_space_runs_out() {
    let mut job = MiningJob::new("hello", Target::ZERO).starting_at(u64::MAX);

    assert!(matches!(job.attempt(), Ok(Attempt::Rejected { nonce: u64::MAX, .. })));
    assert_eq!(job.attempt(), Err(MineError::NonceSpaceExhausted));
}

#[test]
fn oversized_header() {
    let mut job = MiningJob::new(vec![0; 3910], Target::MAX);
    assert!(matches!(
        job.attempt(),
        Err(MineError::Capacity(QrError::CapacityExceeded { len: 3918, .. }))
    ));
}
