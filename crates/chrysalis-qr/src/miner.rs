//! Nonce search over bitmap matrices.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::ecc::EccLevel;
use crate::error::QrError;
use crate::matrix::BitmapMatrix;
use crate::target::{TARGET_LEN, Target};
use crate::validate::{Verdict, matrix_hash, validate};

/// Nonce bytes appended (little-endian) to the header.
pub const NONCE_LEN: usize = 8;

/// Attempts between two [`MineEvent::Progress`] notifications.
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Shared cancellation flag. Clones observe the same flag, so one can be
/// handed to another thread while the miner or VM polls the other.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Bounds on a mining run. Unbounded by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MineLimits {
    pub(crate) max_attempts: Option<u64>,
    pub(crate) timeout: Option<Duration>,
}

impl MineLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after this many attempts.
    pub fn max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Stop once this much wall-clock time has passed.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn get_max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MineError {
    #[error("mining cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },
    #[error("no solution within {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },
    #[error("mining deadline passed after {attempts} attempts")]
    DeadlineExceeded { attempts: u64 },
    #[error("nonce space exhausted")]
    NonceSpaceExhausted,
    #[error(transparent)]
    Capacity(#[from] QrError),
}

/// A nonce whose matrix passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub nonce: u64,
    /// Attempts made by the job so far, this one included.
    pub attempts: u64,
    pub hash: [u8; TARGET_LEN],
    pub version: u8,
    pub density: f64,
    pub noise: f64,
}

/// Result of a single [`MiningJob::attempt`].
#[derive(Clone, Debug, PartialEq)]
pub enum Attempt {
    Found(Solution),
    Rejected { nonce: u64, verdict: Verdict },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MineEvent {
    Progress { attempts: u64, elapsed: Duration },
    Found { nonce: u64, attempts: u64 },
}

/// Search state for one header and target.
#[derive(Clone, Debug)]
pub struct MiningJob {
    header: Vec<u8>,
    target: Target,
    next_nonce: u64,
    attempts: u64,
    exhausted: bool,
}

impl MiningJob {
    pub fn new(header: impl Into<Vec<u8>>, target: Target) -> Self {
        Self {
            header: header.into(),
            target,
            next_nonce: 0,
            attempts: 0,
            exhausted: false,
        }
    }

    /// Resume the search at `nonce` instead of zero.
    pub fn starting_at(mut self, nonce: u64) -> Self {
        self.next_nonce = nonce;
        self
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Nonce the next attempt will try.
    pub fn next_nonce(&self) -> u64 {
        self.next_nonce
    }

    /// `header ‖ nonce` as hashed into the matrix.
    pub fn payload_for(&self, nonce: u64) -> Vec<u8> {
        let mut payload = Vec::with_capacity(self.header.len() + NONCE_LEN);
        payload.extend_from_slice(&self.header);
        payload.extend_from_slice(&nonce.to_le_bytes());
        payload
    }

    /// Try the next nonce.
    pub fn attempt(&mut self) -> Result<Attempt, MineError> {
        if self.exhausted {
            return Err(MineError::NonceSpaceExhausted);
        }

        let nonce = self.next_nonce;
        let matrix = BitmapMatrix::build(&self.payload_for(nonce), EccLevel::H)?;
        self.attempts += 1;
        match self.next_nonce.checked_add(1) {
            Some(next) => self.next_nonce = next,
            None => self.exhausted = true,
        }

        let verdict = validate(&matrix, &self.target);
        if !verdict.is_accepted() {
            return Ok(Attempt::Rejected { nonce, verdict });
        }

        Ok(Attempt::Found(Solution {
            nonce,
            attempts: self.attempts,
            hash: matrix_hash(&matrix),
            version: matrix.version(),
            density: matrix.density(),
            noise: matrix.noise(),
        }))
    }

    /// Attempt until a solution is found or a limit stops the search.
    ///
    /// Cancellation and limits are checked before every attempt. Progress
    /// is reported before attempts 0, 1000, 2000 and so on. Limits count
    /// attempts made by this call, not earlier ones.
    pub fn run(
        &mut self,
        limits: &MineLimits,
        cancel: &CancelToken,
        mut on_event: impl FnMut(MineEvent),
    ) -> Result<Solution, MineError> {
        let started = Instant::now();
        let mut made = 0u64;

        loop {
            if cancel.is_cancelled() {
                return Err(MineError::Cancelled { attempts: made });
            }
            if limits.max_attempts.is_some_and(|max| made >= max) {
                return Err(MineError::AttemptsExhausted { attempts: made });
            }
            if limits.timeout.is_some_and(|t| started.elapsed() >= t) {
                return Err(MineError::DeadlineExceeded { attempts: made });
            }

            if made % PROGRESS_INTERVAL == 0 {
                on_event(MineEvent::Progress {
                    attempts: made,
                    elapsed: started.elapsed(),
                });
            }

            let attempt = self.attempt()?;
            made += 1;
            if let Attempt::Found(solution) = attempt {
                on_event(MineEvent::Found {
                    nonce: solution.nonce,
                    attempts: made,
                });
                return Ok(solution);
            }
        }
    }
}
