//! Centralized constants for capacities, layout ratios, and colors.
//!
//! This module consolidates the magic numbers used throughout the application
//! to improve maintainability and provide semantic meaning to values.

use eframe::egui::Color32;

// =============================================================================
// CAPACITY LIMITS
// =============================================================================

/// Maximum number of collection blocks the gallery can hold.
pub const MAX_BLOCKS: usize = 12;

/// Maximum number of media items a single block can hold.
pub const MAX_MEDIA_PER_BLOCK: usize = 20;

// =============================================================================
// GRID LAYOUT RATIOS
// =============================================================================

/// Number of block rows that must fit in the visible gallery area.
pub const VISIBLE_ROWS: f32 = 2.0;

/// Fraction of the viewport used for the gallery container (width and height).
pub const CONTAINER_FRACTION: f32 = 0.8;

/// Gap between grid tiles, as a fraction of the tile size.
pub const GAP_FRACTION: f32 = 0.05;

/// Maximum number of grid columns.
pub const MAX_COLUMNS: usize = 4;

/// Cap on tile size as a fraction of viewport height.
pub const BLOCK_MAX_HEIGHT_FRACTION: f32 = 0.4;

/// Popup side length as a fraction of the smaller viewport dimension.
pub const POPUP_FRACTION: f32 = 0.9;

// =============================================================================
// POPUP INTERIOR RATIOS
// =============================================================================

/// Main media pane side length as a fraction of the popup size.
pub const MAIN_MEDIA_FRACTION: f32 = 0.7;

/// Thumbnail strip tile side length as a fraction of the popup size.
pub const THUMBNAIL_FRACTION: f32 = 0.3;

/// Gap between strip thumbnails, as a fraction of the thumbnail size.
pub const THUMBNAIL_GAP_FRACTION: f32 = 0.05;

/// Size of the prev/next arrow buttons inside the popup.
pub const ARROW_BUTTON_SIZE: f32 = 36.0;

// =============================================================================
// HEADER AND CHROME
// =============================================================================

/// Diameter of the logo and profile medallions as a fraction of viewport width.
pub const MEDALLION_FRACTION: f32 = 0.15;

/// Scale applied to a medallion when it is toggled enlarged.
pub const MEDALLION_ENLARGED_SCALE: f32 = 1.25;

/// Height of the scroll progress bar at the top of the window.
pub const PROGRESS_BAR_HEIGHT: f32 = 4.0;

/// Scroll offset past which the scroll-to-top button appears.
pub const SCROLL_TOP_THRESHOLD: f32 = 300.0;

/// Width of the slide-out navigation menus.
pub const MENU_WIDTH: f32 = 200.0;

/// Seconds an open navigation menu stays up without pointer activity.
pub const MENU_AUTO_CLOSE_SECS: f32 = 3.0;

/// Seconds a status line message stays visible.
pub const STATUS_LINE_SECS: f32 = 4.0;

// =============================================================================
// WINDOW CONSTANTS
// =============================================================================

/// Initial window width when the application starts.
pub const INITIAL_WINDOW_WIDTH: f32 = 1100.0;

/// Initial window height when the application starts.
pub const INITIAL_WINDOW_HEIGHT: f32 = 760.0;

// =============================================================================
// BACKGROUND EFFECT CONSTANTS
// =============================================================================

/// Width of one background gradient tile.
pub const TILE_WIDTH: f32 = 60.0;

/// Height of one background gradient tile.
pub const TILE_HEIGHT: f32 = 30.0;

/// Radius around the pointer within which tiles are displaced.
pub const SPREAD_RADIUS: f32 = 500.0;

/// Maximum displacement of a tile at the pointer position.
pub const MAX_SPREAD_DISTANCE: f32 = 7.5;

/// Period of the tile wave motion, in seconds.
pub const WAVE_DURATION: f32 = 3.0;

/// Wave phase offset per tile grid step, in seconds.
pub const WAVE_DELAY_FACTOR: f32 = 0.035;

/// Peak vertical excursion of the tile wave, in pixels.
pub const WAVE_AMPLITUDE: f32 = 10.0;

/// Number of falling petals.
pub const NUM_PETALS: usize = 40;

// =============================================================================
// COLORS
// =============================================================================

/// Base background fill behind the gradient tiles.
pub const COLOR_BACKDROP: Color32 = Color32::from_rgb(252, 231, 243);

/// Light corner of a gradient tile.
pub const COLOR_TILE_LIGHT: Color32 = Color32::WHITE;

/// Pink corner of a gradient tile.
pub const COLOR_TILE_PINK: Color32 = Color32::from_rgb(251, 207, 232);

/// Border stroke of a gradient tile.
pub const COLOR_TILE_BORDER: Color32 = Color32::from_rgb(229, 231, 235);

/// Fill of a falling petal.
pub const COLOR_PETAL: Color32 = Color32::from_rgb(251, 207, 232);

/// Track of the scroll progress bar.
pub const COLOR_PROGRESS_TRACK: Color32 = Color32::from_rgb(252, 231, 243);

/// Fill of the scroll progress bar.
pub const COLOR_PROGRESS_FILL: Color32 = Color32::from_rgb(249, 168, 212);

/// Fill behind a media pane while it has nothing to show.
pub const COLOR_MEDIA_BACKDROP: Color32 = Color32::from_rgb(229, 231, 235);

/// Fill of a painted placeholder tile.
pub const COLOR_PLACEHOLDER: Color32 = Color32::from_rgb(209, 213, 219);

/// Indicator color for media that failed to load.
pub const COLOR_MEDIA_ERROR: Color32 = Color32::from_rgb(239, 68, 68);

/// Ring drawn around the strip thumbnail matching the paged index.
pub const COLOR_STRIP_RING: Color32 = Color32::from_rgb(236, 72, 153);

/// Scrim behind the popup.
pub const COLOR_POPUP_SCRIM: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);

/// Scrim behind the enlarged single-media view.
pub const COLOR_POPUP_SCRIM_HEAVY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 192);
