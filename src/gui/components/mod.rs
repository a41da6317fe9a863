//! GUI components

pub mod format_table;
pub mod status_bar;
pub mod url_input;
pub mod video_info;

// Re-export for convenience
pub use format_table::format_table;
pub use status_bar::{status_bar, status_for};
pub use url_input::url_input;
pub use video_info::video_info;
