pub mod aggregate;
pub mod classify;
pub mod errors;
pub mod export;
pub mod http;
pub mod models;
pub mod narration;
pub mod session;
pub mod submission;
pub mod tasks;
pub mod view_state;

pub use aggregate::{
    aggregate,
    AggregateStats,
};
pub use errors::{
    DatacleanError,
    GuardRejection,
};
pub use models::{
    Analysis,
    FileSet,
    Finding,
    ResultRecord,
    ResultSet,
    SelectedFile,
};
pub use session::{
    Action,
    Notice,
    Session,
    SessionView,
};
pub use view_state::Section;
