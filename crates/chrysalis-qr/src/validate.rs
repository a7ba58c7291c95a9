//! Acceptance rules for mined matrices.

use std::fmt;

use chrysalis_crypto::sha256;

use crate::matrix::BitmapMatrix;
use crate::target::{TARGET_LEN, Target};

pub const MIN_DENSITY: f64 = 0.30;
pub const MAX_DENSITY: f64 = 0.80;
pub const MAX_NOISE: f64 = 0.20;

/// Outcome of [`validate`], naming the first rule that failed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    Accepted,
    DensityOutOfRange(f64),
    TooNoisy(f64),
    AboveTarget,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::DensityOutOfRange(d) => write!(
                f,
                "density {d:.4} outside [{MIN_DENSITY:.2}, {MAX_DENSITY:.2}]"
            ),
            Self::TooNoisy(n) => write!(f, "noise {n:.4} above {MAX_NOISE:.2}"),
            Self::AboveTarget => f.write_str("hash above target"),
        }
    }
}

/// SHA-256 over the row-major module bytes.
pub fn matrix_hash(matrix: &BitmapMatrix) -> [u8; TARGET_LEN] {
    sha256(matrix.modules())
}

/// Structural predicate with caller thresholds. The upper density bound is
/// always [`MAX_DENSITY`].
pub fn check_mining_criteria(matrix: &BitmapMatrix, min_density: f64, max_noise: f64) -> bool {
    structural_verdict(matrix, min_density, max_noise).is_accepted()
}

fn structural_verdict(matrix: &BitmapMatrix, min_density: f64, max_noise: f64) -> Verdict {
    let density = matrix.density();
    if !(min_density..=MAX_DENSITY).contains(&density) {
        return Verdict::DensityOutOfRange(density);
    }
    if matrix.noise() > max_noise {
        return Verdict::TooNoisy(matrix.noise());
    }
    Verdict::Accepted
}

/// Check structure first, then the hash.
pub fn validate(matrix: &BitmapMatrix, target: &Target) -> Verdict {
    let verdict = structural_verdict(matrix, MIN_DENSITY, MAX_NOISE);
    if !verdict.is_accepted() {
        return verdict;
    }
    if target.accepts(&matrix_hash(matrix)) {
        Verdict::Accepted
    } else {
        Verdict::AboveTarget
    }
}

pub fn is_valid(matrix: &BitmapMatrix, target: &Target) -> bool {
    validate(matrix, target).is_accepted()
}
