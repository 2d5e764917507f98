//! Responsive grid and popup sizing, as pure functions of the viewport.
//!
//! egui is immediate mode, so recomputing from the current screen rect every
//! frame subsumes "recompute on resize". Nothing here is persisted.

use crate::constants::{
    BLOCK_MAX_HEIGHT_FRACTION, CONTAINER_FRACTION, GAP_FRACTION, MAX_COLUMNS, POPUP_FRACTION,
    VISIBLE_ROWS,
};
use eframe::egui::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub block_size: f32,
    pub gap: f32,
    pub columns: usize,
}

/// Derives the tile grid from the viewport: exactly two rows fit in 80% of
/// the height, the gap is 5% of a tile, the column count is clamped to
/// [1, 4], and the tile is re-derived to exactly fill the chosen columns
/// within 80% of the width, capped at 40% of the viewport height.
pub fn grid_layout(viewport: Vec2) -> GridLayout {
    let container_width = viewport.x * CONTAINER_FRACTION;
    let container_height = viewport.y * CONTAINER_FRACTION;

    let mut block_size = container_height / VISIBLE_ROWS;
    let gap = block_size * GAP_FRACTION;
    block_size = (container_height - gap) / VISIBLE_ROWS;

    let columns = ((container_width + gap) / (block_size + gap)).floor() as usize;
    let columns = columns.clamp(1, MAX_COLUMNS);

    block_size = (container_width - (columns - 1) as f32 * gap) / columns as f32;

    GridLayout {
        block_size: block_size.min(viewport.y * BLOCK_MAX_HEIGHT_FRACTION),
        gap,
        columns,
    }
}

/// Popup side length: 90% of the smaller viewport dimension.
pub fn popup_size(viewport: Vec2) -> f32 {
    viewport.x.min(viewport.y) * POPUP_FRACTION
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    #[test]
    fn columns_stay_clamped() {
        assert_eq!(grid_layout(vec2(320.0, 1200.0)).columns, 1);
        assert_eq!(grid_layout(vec2(5000.0, 600.0)).columns, MAX_COLUMNS);
    }

    #[test]
    fn two_rows_and_gap_fit_in_the_container_height() {
        for (w, h) in [(1280.0, 720.0), (1920.0, 1080.0), (800.0, 1200.0)] {
            let viewport = vec2(w, h);
            let layout = grid_layout(viewport);
            let rows_height = layout.block_size * VISIBLE_ROWS + layout.gap;
            assert!(
                rows_height <= viewport.y * CONTAINER_FRACTION + 0.5,
                "{w}x{h}: rows take {rows_height}"
            );
        }
    }

    #[test]
    fn block_size_respects_height_cap() {
        for (w, h) in [(1280.0, 720.0), (3000.0, 500.0), (640.0, 480.0)] {
            let layout = grid_layout(vec2(w, h));
            assert!(layout.block_size <= h * BLOCK_MAX_HEIGHT_FRACTION + f32::EPSILON);
            assert!(layout.block_size > 0.0);
        }
    }

    #[test]
    fn chosen_columns_exactly_fill_wide_containers() {
        let viewport = vec2(2000.0, 900.0);
        let layout = grid_layout(viewport);
        let width = layout.block_size * layout.columns as f32
            + layout.gap * (layout.columns - 1) as f32;
        // The height cap may shrink tiles below the exact fill; without it the
        // row spans the container width.
        assert!(width <= viewport.x * CONTAINER_FRACTION + 0.5);
    }

    #[test]
    fn gap_is_a_twentieth_of_the_pre_cap_tile() {
        let viewport = vec2(1280.0, 1000.0);
        let layout = grid_layout(viewport);
        let expected = viewport.y * CONTAINER_FRACTION / VISIBLE_ROWS * GAP_FRACTION;
        assert!((layout.gap - expected).abs() < 0.01);
    }

    #[test]
    fn popup_takes_ninety_percent_of_the_smaller_dimension() {
        assert_eq!(popup_size(vec2(1000.0, 600.0)), 540.0);
        assert_eq!(popup_size(vec2(500.0, 900.0)), 450.0);
    }
}
