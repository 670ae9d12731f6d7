//! User interface module - terminal output for the command line.

pub mod formatter;

pub use formatter::{
    display_error, display_status, display_success, display_version_change,
    format_version_change,
};
