//! Terminal UI components.
//!
//! - [`render`]: toolbar row, editor and preview panes, footer bars
//! - [`style`]: light and dark palettes

pub mod style;

mod render;
mod status;

pub use render::{line_number_width, render, split_panes};

/// Rows taken by the toolbar, status bar and toast/prompt row.
pub const CHROME_ROWS: u16 = 3;

/// Visible buffer lines in the editor pane for a terminal `height` rows tall.
pub fn editor_viewport_height(height: u16) -> usize {
    // Pane borders take one row above and below.
    usize::from(height.saturating_sub(CHROME_ROWS + 2))
}
