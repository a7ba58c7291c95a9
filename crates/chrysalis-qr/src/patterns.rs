//! Structural patterns stamped before any data is placed.

use crate::ecc::EccLevel;
use crate::matrix::Grid;

const FINDER_SIZE: usize = 7;
const ALIGNMENT_SIZE: usize = 5;
/// Distance of the alignment pattern's top-left corner from the far edge.
const ALIGNMENT_INSET: usize = 9;
const TIMING_LINE: usize = 6;
const TIMING_MARGIN: usize = 8;
const FORMAT_BITS: usize = 15;

/// Three 7×7 finders: top-left, bottom-left, top-right.
///
/// Border ring and 3×3 core set, the ring between them clear.
pub(crate) fn stamp_finders(grid: &mut Grid) {
    let far = grid.side() - FINDER_SIZE;
    for (top, left) in [(0, 0), (far, 0), (0, far)] {
        for r in 0..FINDER_SIZE {
            for c in 0..FINDER_SIZE {
                let border = r == 0 || r == FINDER_SIZE - 1 || c == 0 || c == FINDER_SIZE - 1;
                let core = (2..=4).contains(&r) && (2..=4).contains(&c);
                grid.set(top + r, left + c, border || core);
            }
        }
    }
}

/// One hollow 5×5 square near the bottom-right corner.
pub(crate) fn stamp_alignment(grid: &mut Grid) {
    let origin = grid.side() - ALIGNMENT_INSET;
    let last = ALIGNMENT_SIZE - 1;
    for i in 0..ALIGNMENT_SIZE {
        for j in 0..ALIGNMENT_SIZE {
            grid.set(origin + i, origin + j, i == 0 || i == last || j == 0 || j == last);
        }
    }
}

/// Alternating modules along row 6 and column 6, between the finders.
pub(crate) fn stamp_timing(grid: &mut Grid) {
    for i in TIMING_MARGIN..grid.side() - TIMING_MARGIN {
        let on = i % 2 == 0;
        grid.set(TIMING_LINE, i, on);
        grid.set(i, TIMING_LINE, on);
    }
}

/// Format word, least-significant bit first.
///
/// Bits 0-5 run down column 8, bits 6-7 continue one row lower (skipping
/// the timing row), bits 8-14 run along row 8 toward the right edge.
pub(crate) fn stamp_format(grid: &mut Grid, ecc: EccLevel) {
    let word = ecc.format_word();
    let side = grid.side();
    for i in 0..FORMAT_BITS {
        let on = (word >> i) & 1 == 1;
        let (row, col) = match i {
            0..6 => (i, 8),
            6..8 => (i + 1, 8),
            _ => (8, side - FORMAT_BITS + i),
        };
        grid.set(row, col, on);
    }
}
