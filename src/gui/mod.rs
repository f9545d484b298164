mod actions;
mod app;
mod error_modal;
mod json_modal;
mod overview;
mod placeholder;
mod sidebar;
mod top_bar;

pub use actions::{
    ActionQueue,
    ExportRequest,
};
pub use app::DatacleanApp;
