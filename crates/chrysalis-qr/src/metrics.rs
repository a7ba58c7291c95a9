//! Statistics that decide whether a matrix looks plausible.

/// A module is noisy when more than this many of its 8 neighbors differ.
const NOISY_NEIGHBORS: usize = 5;

pub(crate) fn density(modules: &[u8]) -> f64 {
    if modules.is_empty() {
        return 0.0;
    }
    let set = modules.iter().filter(|&&m| m != 0).count();
    set as f64 / modules.len() as f64
}

/// Noisy interior modules over *all* modules.
///
/// The outermost ring is never counted but still contributes to the
/// denominator.
pub(crate) fn noise(modules: &[u8], side: usize) -> f64 {
    if side < 3 {
        return 0.0;
    }

    let at = |row: usize, col: usize| modules[row * side + col] != 0;
    let mut noisy = 0usize;

    for y in 1..side - 1 {
        for x in 1..side - 1 {
            let current = at(y, x);
            let mut different = 0;
            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    if (ny, nx) != (y, x) && at(ny, nx) != current {
                        different += 1;
                    }
                }
            }
            if different > NOISY_NEIGHBORS {
                noisy += 1;
            }
        }
    }

    noisy as f64 / (side * side) as f64
}
