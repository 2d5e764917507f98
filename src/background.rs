//! Animated decorative background: a full-window grid of soft gradient
//! tiles waving sinusoidally, displaced away from the pointer, plus falling
//! petals.
//!
//! The motion is a pure function of (time, pointer, viewport); the painter
//! just replays it every frame behind all panels.

use crate::constants::{
    COLOR_BACKDROP, COLOR_PETAL, COLOR_TILE_BORDER, COLOR_TILE_LIGHT, COLOR_TILE_PINK,
    MAX_SPREAD_DISTANCE, SPREAD_RADIUS, TILE_HEIGHT, TILE_WIDTH, WAVE_AMPLITUDE,
    WAVE_DELAY_FACTOR, WAVE_DURATION,
};
use eframe::egui::{self, epaint, pos2, vec2, Color32, Painter, Pos2, Rect, Stroke, Vec2};
use rand::Rng;

/// Midpoint of the tile gradient, used for the off-diagonal corners.
const COLOR_TILE_MID: Color32 = Color32::from_rgb(253, 235, 244);

/// One falling petal, parameterized once at startup.
pub struct Petal {
    /// Horizontal position as a fraction of the viewport width.
    pub left_frac: f32,
    /// Seconds before the first fall starts.
    pub delay: f32,
    /// Seconds for one full fall.
    pub duration: f32,
    /// Width in pixels; petals are half as tall as they are wide.
    pub size: f32,
}

impl Petal {
    pub fn scatter(count: usize) -> Vec<Petal> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| Petal {
                left_frac: rng.gen_range(0.0..1.0),
                delay: rng.gen_range(0.0..5.0),
                duration: rng.gen_range(15.0..25.0),
                size: rng.gen_range(5.0..15.0),
            })
            .collect()
    }

    /// Fraction of the current fall completed, in [0, 1), or `None` before
    /// the first fall starts.
    fn progress(&self, time: f32) -> Option<f32> {
        let elapsed = time - self.delay;
        (elapsed >= 0.0).then(|| (elapsed / self.duration).fract())
    }
}

/// Radial displacement of a point away from the pointer: squared falloff
/// within [`SPREAD_RADIUS`], zero beyond it.
pub fn spread_offset(center: Pos2, pointer: Option<Pos2>) -> Vec2 {
    let Some(pointer) = pointer else {
        return Vec2::ZERO;
    };
    let delta = center - pointer;
    let distance = delta.length();
    if distance >= SPREAD_RADIUS || distance == 0.0 {
        return Vec2::ZERO;
    }
    let force = ((SPREAD_RADIUS - distance) / SPREAD_RADIUS).powi(2);
    delta / distance * MAX_SPREAD_DISTANCE * force
}

/// Vertical wave excursion of the tile at (column, row), staggered by grid
/// position. Zero at the period boundaries, [`WAVE_AMPLITUDE`] upward at the
/// half period.
pub fn wave_offset(column: usize, row: usize, time: f32) -> f32 {
    let delay = (column + row) as f32 * WAVE_DELAY_FACTOR;
    let phase = (time - delay) / WAVE_DURATION * std::f32::consts::PI;
    -WAVE_AMPLITUDE * phase.sin().powi(2)
}

/// Paints the whole background into `rect`.
pub fn paint(painter: &Painter, rect: Rect, pointer: Option<Pos2>, time: f32, petals: &[Petal]) {
    painter.rect_filled(rect, 0.0, COLOR_BACKDROP);

    let columns = (rect.width() / TILE_WIDTH).ceil() as usize;
    let rows = (rect.height() / TILE_HEIGHT).ceil() as usize;

    for row in 0..rows {
        for column in 0..columns {
            let min = pos2(
                rect.left() + column as f32 * TILE_WIDTH,
                rect.top() + row as f32 * TILE_HEIGHT,
            );
            let center = min + vec2(TILE_WIDTH, TILE_HEIGHT) / 2.0;
            let offset =
                spread_offset(center, pointer) + vec2(0.0, wave_offset(column, row, time));
            let tile = Rect::from_min_size(min + offset, vec2(TILE_WIDTH, TILE_HEIGHT));
            gradient_tile(painter, tile);
        }
    }

    for petal in petals {
        let Some(progress) = petal.progress(time) else {
            continue;
        };
        // From just above the top edge to just below the bottom one.
        let y = rect.top() + (progress * 1.1 - 0.05) * rect.height();
        let wobble = (progress * 4.0 * std::f32::consts::TAU).sin() * petal.size * 0.5;
        let center = pos2(rect.left() + petal.left_frac * rect.width() + wobble, y);
        painter.add(epaint::Shape::ellipse_filled(
            center,
            vec2(petal.size / 2.0, petal.size / 4.0),
            COLOR_PETAL,
        ));
    }
}

fn gradient_tile(painter: &Painter, rect: Rect) {
    let mut mesh = epaint::Mesh::default();
    mesh.colored_vertex(rect.left_top(), COLOR_TILE_LIGHT);
    mesh.colored_vertex(rect.right_top(), COLOR_TILE_MID);
    mesh.colored_vertex(rect.right_bottom(), COLOR_TILE_PINK);
    mesh.colored_vertex(rect.left_bottom(), COLOR_TILE_MID);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, COLOR_TILE_BORDER));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_PETALS;

    #[test]
    fn spread_is_zero_without_a_pointer_and_beyond_the_radius() {
        assert_eq!(spread_offset(pos2(100.0, 100.0), None), Vec2::ZERO);
        assert_eq!(
            spread_offset(pos2(1000.0, 0.0), Some(pos2(0.0, 0.0))),
            Vec2::ZERO
        );
    }

    #[test]
    fn spread_falls_off_with_distance_and_stays_bounded() {
        let pointer = Some(pos2(0.0, 0.0));
        let near = spread_offset(pos2(10.0, 0.0), pointer).length();
        let far = spread_offset(pos2(400.0, 0.0), pointer).length();
        assert!(near > far);
        assert!(near <= MAX_SPREAD_DISTANCE);
        // Displacement points away from the pointer.
        assert!(spread_offset(pos2(10.0, 0.0), pointer).x > 0.0);
    }

    #[test]
    fn wave_peaks_at_half_period() {
        assert_eq!(wave_offset(0, 0, 0.0), 0.0);
        let peak = wave_offset(0, 0, WAVE_DURATION / 2.0);
        assert!((peak + WAVE_AMPLITUDE).abs() < 1e-4);
        // Staggered tiles are out of phase.
        assert_ne!(wave_offset(0, 0, 1.0), wave_offset(5, 5, 1.0));
    }

    #[test]
    fn petal_progress_waits_for_its_delay_then_wraps() {
        let petal = Petal {
            left_frac: 0.5,
            delay: 2.0,
            duration: 10.0,
            size: 8.0,
        };
        assert_eq!(petal.progress(1.0), None);
        assert_eq!(petal.progress(2.0), Some(0.0));
        assert_eq!(petal.progress(7.0), Some(0.5));
        assert_eq!(petal.progress(17.0), Some(0.5));
    }

    #[test]
    fn scatter_produces_the_requested_flurry() {
        let petals = Petal::scatter(NUM_PETALS);
        assert_eq!(petals.len(), NUM_PETALS);
        assert!(petals
            .iter()
            .all(|p| (0.0..1.0).contains(&p.left_frac) && p.duration >= 15.0));
    }
}
