pub mod panels;
pub mod state;
pub mod theme;

pub use panels::{UiActions, draw_help_overlay, draw_panels};
pub use state::UiState;
pub use theme::apply_theme;
