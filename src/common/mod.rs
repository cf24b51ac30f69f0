#![forbid(unsafe_code)]

pub use command::{run_checked, CommandRunner, ExternalCommand, SystemRunner};
pub use error::Error;
pub use layout::{Layout, Tools};

pub mod command;
pub mod error;
pub mod layout;
