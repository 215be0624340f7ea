pub mod help;
pub mod hud;
pub mod overlay;
pub mod shortcuts;
pub mod tooltips;

pub use help::help_overlay;
pub use hud::hud_overlay;
pub use overlay::{cursor_overlay, rain_overlay, sync_cursor_visibility};
pub use shortcuts::handle_shortcuts;

pub const HUD_EDGE_PADDING: f32 = 12.0;
pub const TITLE_SIZE: f32 = 28.0;
pub const TOOLTIP_OFFSET: f32 = 14.0;
