#![forbid(unsafe_code)]

use crate::cli::{help, TzdataAction, TzdataOptions};
use crate::common::{Error, Layout, SystemRunner, Tools};
use crate::icu::ExternalIcuBuild;
use crate::log::{dev_info, user_error};

use pipeline::{Scratch, Updater};

mod pipeline;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn update_process() -> Result<(), Error> {
    crate::log::TzdataLogger::new("update-tzdata: ").into_global_logger();

    dev_info!("development logs are enabled");

    match TzdataOptions::from_env() {
        Ok(options) => match options.action {
            TzdataAction::Help => {
                println_ignore_io_error!("{}", help::long_help_message());
                std::process::exit(0);
            }
            TzdataAction::Version => {
                println_ignore_io_error!("update-tzdata {VERSION}");
                std::process::exit(0);
            }
            TzdataAction::Run => {
                let layout = Layout::from_env()?;
                dev_info!("using Android checkout at {}", layout.build_top.display());
                layout.check()?;
                let tools = Tools::from_env();

                let scratch = Scratch::create()?;
                dev_info!("scratch directory is {}", scratch.root().display());

                let icu = ExternalIcuBuild::new(&layout, &tools, scratch.icu_build_dir());
                Updater::new(layout, tools, scratch, SystemRunner::inherit(), icu).run()
            }
        },
        Err(e) => {
            eprintln_ignore_io_error!("{e}\n{}", help::USAGE_MSG);
            std::process::exit(1);
        }
    }
}

pub fn main() {
    match update_process() {
        Ok(()) => (),
        Err(error) => {
            user_error!("{error}");
            std::process::exit(1);
        }
    }
}
