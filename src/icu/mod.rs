//! Rebuilding ICU's time zone resources from the same IANA release.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::common::{run_checked, CommandRunner, Error, ExternalCommand, Layout, Tools};
use crate::log::{dev_info, user_info};
use crate::system::file::{copy_file, copy_into, create_dir, find_matching};

pub trait IcuBuilder {
    fn build(&mut self, runner: &mut dyn CommandRunner, tarball: &Path) -> Result<(), Error>;
}

/// Drives ICU's own build tooling inside a scratch build directory.
#[derive(Clone, Debug)]
pub struct ExternalIcuBuild {
    icu4c_dir: PathBuf,
    build_dir: PathBuf,
    make: OsString,
    jobs: usize,
}

impl ExternalIcuBuild {
    pub fn new(layout: &Layout, tools: &Tools, build_dir: PathBuf) -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            icu4c_dir: layout.icu4c_dir(),
            build_dir,
            make: tools.make.clone(),
            jobs,
        }
    }

    fn tzcode_dir(&self) -> PathBuf {
        self.build_dir.join("tools/tzcode")
    }

    /// Configure ICU's tools in a fresh build directory.
    fn prepare(&self, runner: &mut dyn CommandRunner) -> Result<(), Error> {
        create_dir(&self.build_dir)?;

        user_info!("Configuring ICU tools...");
        let configure = ExternalCommand::new(self.icu4c_dir.join("source/runConfigureICU"))
            .arg("Linux")
            .env("ICU_DATA_BUILTIN_DIR", "")
            .current_dir(&self.build_dir);
        run_checked(runner, &configure)?;
        Ok(())
    }

    /// Produce zoneinfo64.txt from the tarball and install it in the ICU source tree.
    fn make_tz_data_files(
        &self,
        runner: &mut dyn CommandRunner,
        tarball: &Path,
    ) -> Result<(), Error> {
        let tzcode_dir = self.tzcode_dir();
        create_dir(&tzcode_dir)?;
        // the tzcode makefile expects the bin directory to exist
        create_dir(&self.build_dir.join("bin"))?;
        copy_into(tarball, &tzcode_dir)?;

        user_info!("Making ICU tz data files...");
        // tzcode does not build in parallel
        let make = ExternalCommand::new(&self.make)
            .arg("-j1")
            .arg("-C")
            .arg(&tzcode_dir);
        run_checked(runner, &make)?;

        let zoneinfo = tzcode_dir.join("zoneinfo64.txt");
        let txt_data_dir = self.icu4c_dir.join("source/data/misc");
        user_info!("Copying zoneinfo64.txt to {} ...", txt_data_dir.display());
        copy_file(&zoneinfo, &txt_data_dir.join("zoneinfo64.txt"))
    }

    /// Regenerate the .dat file and copy it to its checked-in location.
    fn make_and_copy_dat_files(&self, runner: &mut dyn CommandRunner) -> Result<(), Error> {
        let make = ExternalCommand::new(&self.make)
            .arg(format!("-j{}", self.jobs))
            .current_dir(&self.build_dir);
        run_checked(runner, &make)?;

        let out_dir = self.build_dir.join("data/out/tmp");
        let mut dat_files = find_matching(&out_dir, "icudt??l.dat")?;
        if dat_files.len() != 1 {
            return Err(Error::IcuDataFile {
                dir: out_dir,
                found: dat_files.len(),
            });
        }
        let dat_file = dat_files.remove(0);

        let stubdata_dir = self.icu4c_dir.join("source/stubdata");
        user_info!(
            "Copying {} to {} ...",
            dat_file.display(),
            stubdata_dir.display()
        );
        copy_into(&dat_file, &stubdata_dir)?;
        Ok(())
    }
}

impl IcuBuilder for ExternalIcuBuild {
    fn build(&mut self, runner: &mut dyn CommandRunner, tarball: &Path) -> Result<(), Error> {
        dev_info!("building ICU data in {}", self.build_dir.display());
        self.prepare(runner)?;
        self.make_tz_data_files(runner, tarball)?;
        self.make_and_copy_dat_files(runner)
    }
}
