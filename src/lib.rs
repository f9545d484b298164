pub mod config;
pub mod core;
pub mod gui;
pub mod logging;
pub mod persistence;
pub mod services;

pub use config::Settings;
pub use core::{
    DatacleanError,
    Session,
};
