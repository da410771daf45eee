//! Balanced grid layout computation

use turngrid_core::{Error, Result};

/// A balanced one- or two-row grid layout for an ordered image sequence
///
/// Invariants: `per_row.iter().sum() == image_count`, `rows` is 1 or 2, and
/// `max_columns` equals the longest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub max_columns: usize,
    pub per_row: Vec<usize>,
}

/// Compute the grid layout for `image_count` images
///
/// Up to four images sit in a single row. Larger counts split into two rows:
/// equal halves when even, one extra image on top when odd, so the shorter
/// bottom row can be centered.
///
/// # Errors
/// `EmptyInput` when `image_count` is zero; callers treat this as "nothing to
/// composite" and skip rather than abort.
pub fn compute_grid_layout(image_count: usize) -> Result<GridLayout> {
    if image_count == 0 {
        return Err(Error::EmptyInput("no images to lay out".to_string()));
    }

    if image_count <= 4 {
        return Ok(GridLayout {
            rows: 1,
            max_columns: image_count,
            per_row: vec![image_count],
        });
    }

    let top = image_count.div_ceil(2);
    let bottom = image_count - top;
    Ok(GridLayout {
        rows: 2,
        max_columns: top.max(bottom),
        per_row: vec![top, bottom],
    })
}
