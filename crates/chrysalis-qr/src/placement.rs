use crate::matrix::Grid;

/// Place payload bits into every module not already set.
///
/// Bits are taken most-significant first within each byte. The walk covers
/// two-column bands starting at the right edge; the first band sweeps
/// bottom to top and each following band reverses direction. Within a row
/// of a band the right column is visited first. Set modules belong to a
/// pattern and are skipped; clear ones are free to take data.
pub(crate) fn embed(grid: &mut Grid, data: &[u8]) {
    let total_bits = data.len() * 8;
    if total_bits == 0 {
        return;
    }

    let side = grid.side();
    let mut placed = 0;
    let mut upward = true;
    let mut right = side - 1;

    loop {
        for step in 0..side {
            let row = if upward { side - 1 - step } else { step };
            for col in (right.saturating_sub(1)..=right).rev() {
                if grid.is_set(row, col) {
                    continue;
                }
                grid.set(row, col, bit_at(data, placed));
                placed += 1;
                if placed == total_bits {
                    return;
                }
            }
        }

        if right < 2 {
            return;
        }
        right -= 2;
        upward = !upward;
    }
}

#[inline]
fn bit_at(data: &[u8], index: usize) -> bool {
    (data[index / 8] >> (7 - index % 8)) & 1 == 1
}
