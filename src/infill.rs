use crate::grid::{LabelGrid, LabelId};
use log::{debug, info};

/// Lookback of the first growth pass.
pub const INITIAL_LOOKBACK: usize = 3;

/// Infills above which the lookback is pulled back down.
pub const BURST_INFILLS: usize = 50;

/// Infills up to which the lookback keeps widening.
pub const TRICKLE_INFILLS: usize = 20;

/// How far below the widest lookback used so far a burst resets to.
pub const LOOKBACK_REDUCTION: usize = 5;

/// Widest lookback at which a burst still resets to `INITIAL_LOOKBACK`.
pub const RESET_FLOOR: usize = LOOKBACK_REDUCTION + 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// decreasing x
    Left,
    /// decreasing y
    Up,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthReport {
    pub passes: usize,
    pub infills: usize,
    pub max_lookback: usize,
}

/// One growth pass over the whole grid, in place. Returns the number of cells
/// written.
///
/// Cells are visited x ascending then y ascending; cells written earlier in
/// the pass are seen by later scans.
pub fn infill_pass(grid: &mut LabelGrid, lookback: usize) -> usize {
    let mut infills = 0;

    for x in 0..grid.columns() {
        for y in 0..grid.rows() {
            let Some(id) = grid.label_id(x, y) else {
                continue;
            };

            infills += grow_along(grid, x, y, id, lookback, Axis::Left);

            infills += grow_along(grid, x, y, id, lookback, Axis::Up);
        }
    }

    infills
}

fn grow_along(
    grid: &mut LabelGrid,
    x: usize,
    y: usize,
    id: LabelId,
    lookback: usize,
    axis: Axis,
) -> usize {
    let origin = match axis {
        Axis::Left => x,
        Axis::Up => y,
    };

    let cell = |i: usize| match axis {
        Axis::Left => (i, y),
        Axis::Up => (x, i),
    };

    let mut has_gap = false;

    let mut target = None;

    for step in 1..=lookback.min(origin) {
        let i = origin - step;

        let (cx, cy) = cell(i);

        match grid.label_id(cx, cy) {
            None => has_gap = true,
            // same label on both ends, claim the whole gap
            Some(other) if other == id => {
                target = Some(i);

                break;
            }
            // different label, claim our half
            Some(_) => {
                target = Some(origin - (origin - i) / 2);

                break;
            }
        }
    }

    let Some(target) = target else {
        return 0;
    };

    if !has_gap || target == origin {
        return 0;
    }

    for i in target..origin {
        let (cx, cy) = cell(i);

        grid.fill(cx, cy, id);
    }

    origin - target
}

/// Lookback for the pass after one that used `lookback` and wrote `infills`
/// cells, or `None` once growth has converged.
///
/// An empty pass widens the lookback and growth stops as soon as it reaches
/// `pix_growth_max`, so no pass ever runs at the widened maximum.
pub fn next_lookback(
    lookback: usize,
    max_lookback: usize,
    infills: usize,
    pix_growth_max: usize,
) -> Option<usize> {
    let below_max = lookback < pix_growth_max;

    match infills {
        0 if below_max => Some(lookback + 1).filter(|&next| next < pix_growth_max),
        0 => None,
        n if n > BURST_INFILLS && below_max => Some(if max_lookback > RESET_FLOOR {
            max_lookback - LOOKBACK_REDUCTION
        } else {
            INITIAL_LOOKBACK
        }),
        n if n <= TRICKLE_INFILLS && below_max => Some(lookback + 1),
        _ => Some(lookback),
    }
}

/// Repeats growth passes with an adaptive lookback until an empty pass would
/// widen it to the maximum, or a pass at the maximum writes nothing.
pub fn grow(grid: &mut LabelGrid, pix_growth_max: usize) -> GrowthReport {
    info!("Expanding points to fill (this may take a few minutes)");

    let mut lookback = INITIAL_LOOKBACK;

    let mut report = GrowthReport {
        max_lookback: lookback,
        ..GrowthReport::default()
    };

    loop {
        let infills = infill_pass(grid, lookback);

        report.passes += 1;

        report.infills += infills;

        if infills > 0 {
            info!(
                "k: {lookback}/{}:{pix_growth_max} infilled cells: {infills}",
                report.max_lookback
            );
        } else {
            debug!("k: {lookback} no infills");
        }

        let Some(next) = next_lookback(lookback, report.max_lookback, infills, pix_growth_max)
        else {
            break;
        };

        lookback = next;

        report.max_lookback = report.max_lookback.max(lookback);
    }

    report
}
