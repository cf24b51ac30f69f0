#[macro_use]
mod macros;
pub(crate) mod cli;
pub(crate) mod common;
pub(crate) mod iana;
pub(crate) mod icu;
pub(crate) mod log;
pub(crate) mod system;

mod update;

pub use update::main as update_tzdata_main;
