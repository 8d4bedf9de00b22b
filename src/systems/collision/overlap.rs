//! Batched overlap kernels
//!
//! Inputs are world-space corner arrays (top-left / bottom-right), one entry
//! per entity or wall. Every kernel fills a `BoolMatrix` in one sweep; there
//! is no per-pair dispatch. All tests are strict: boxes that only share an
//! edge do not overlap, so resting contact does not retrigger every tick.

use crate::core::geometry::{strictly_overlaps, Vec2};

use super::matrix::BoolMatrix;

/// N x N passive-vs-passive overlap. Symmetric, diagonal always false.
pub fn passive_passive_overlap(tl: &[Vec2], br: &[Vec2], out: &mut BoolMatrix) {
    debug_assert_eq!(tl.len(), br.len());
    let n = tl.len();
    out.reset(n, n);
    out.fill_rows(|i, row| {
        let (a_tl, a_br) = (tl[i], br[i]);
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = i != j && strictly_overlaps(a_tl, a_br, tl[j], br[j]);
        }
    });
}

/// N x N active-vs-passive overlap: cell [i, j] says entity i's active box
/// reaches entity j's passive box. Not symmetric. Rows whose active box has
/// a non-positive extent are all false, as is the diagonal.
pub fn active_passive_overlap(
    active_tl: &[Vec2],
    active_br: &[Vec2],
    passive_tl: &[Vec2],
    passive_br: &[Vec2],
    out: &mut BoolMatrix,
) {
    debug_assert_eq!(active_tl.len(), passive_tl.len());
    let n = active_tl.len();
    out.reset(n, n);
    out.fill_rows(|i, row| {
        let (a_tl, a_br) = (active_tl[i], active_br[i]);
        // Inert (or inverted) reach box
        if !(a_br.x > a_tl.x && a_br.y > a_tl.y) {
            return;
        }
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = i != j && strictly_overlaps(a_tl, a_br, passive_tl[j], passive_br[j]);
        }
    });
}

/// N x M passive-vs-wall overlap
pub fn passive_wall_overlap(
    passive_tl: &[Vec2],
    passive_br: &[Vec2],
    wall_tl: &[Vec2],
    wall_br: &[Vec2],
    out: &mut BoolMatrix,
) {
    debug_assert_eq!(wall_tl.len(), wall_br.len());
    let (n, m) = (passive_tl.len(), wall_tl.len());
    out.reset(n, m);
    out.fill_rows(|i, row| {
        let (p_tl, p_br) = (passive_tl[i], passive_br[i]);
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = strictly_overlaps(p_tl, p_br, wall_tl[j], wall_br[j]);
        }
    });
}
