use std::path::{Path, PathBuf};

use crate::common::{run_checked, CommandRunner, Error, ExternalCommand, Layout, Tools};
use crate::iana::{find_tarball, region_files, unpack_tarball, version_from_tarball, Manifest};
use crate::icu::IcuBuilder;
use crate::log::{dev_info, user_info};
use crate::system::file::{copy_file, create_dir, create_temporary_dir};

#[cfg(test)]
mod tests;

/// Per-run working directory. It is left behind for inspection when the run ends.
#[derive(Clone, Debug)]
pub(crate) struct Scratch {
    root: PathBuf,
}

impl Scratch {
    pub(crate) fn create() -> Result<Self, Error> {
        let root = create_temporary_dir("tzdata")?;
        Ok(Self { root })
    }

    #[cfg(test)]
    pub(crate) fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    fn extracted_iana_dir(&self) -> PathBuf {
        self.root.join("extracted_iana")
    }

    fn zic_output_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    fn classes_dir(&self) -> PathBuf {
        self.root.join("classes")
    }

    fn setup_file(&self) -> PathBuf {
        self.root.join("setup")
    }

    pub(crate) fn icu_build_dir(&self) -> PathBuf {
        self.root.join("icu")
    }
}

/// Runs the whole update, stopping at the first failing step.
pub(crate) struct Updater<R: CommandRunner, I: IcuBuilder> {
    layout: Layout,
    tools: Tools,
    scratch: Scratch,
    runner: R,
    icu: I,
}

impl<R: CommandRunner, I: IcuBuilder> Updater<R, I> {
    pub(crate) fn new(layout: Layout, tools: Tools, scratch: Scratch, runner: R, icu: I) -> Self {
        Self {
            layout,
            tools,
            scratch,
            runner,
            icu,
        }
    }

    pub(crate) fn run(&mut self) -> Result<(), Error> {
        user_info!(
            "Found source data file structure in {} ...",
            self.layout.input_data_dir.display()
        );

        let tarball = find_tarball(&self.layout.iana_input_dir())?;
        user_info!("Found IANA time zone data {} ...", tarball.display());
        user_info!(
            "Found android output dir in {} ...",
            self.layout.output_data_dir.display()
        );
        user_info!("Found icu in {} ...", self.layout.icu4c_dir().display());

        self.build_tzdata(&tarball)?;
        self.build_icu_data(&tarball)?;
        self.build_tzlookup()?;

        user_info!(
            "Look in {} and {} for new data files",
            self.layout.output_data_dir.display(),
            self.layout.icu4c_dir().display()
        );
        Ok(())
    }

    fn build_tzdata(&mut self, tarball: &Path) -> Result<(), Error> {
        let version = version_from_tarball(tarball)?;

        let extracted_dir = self.extract_tarball(tarball)?;
        let zic_output_dir = self.run_zic(&extracted_dir)?;
        let setup_file = self.write_setup_file(&extracted_dir)?;
        self.run_zone_compactor(&setup_file, &zic_output_dir, &extracted_dir, &version)
    }

    fn extract_tarball(&self, tarball: &Path) -> Result<PathBuf, Error> {
        user_info!("Extracting...");
        let extracted_dir = self.scratch.extracted_iana_dir();
        create_dir(&extracted_dir)?;
        unpack_tarball(tarball, &extracted_dir)?;
        Ok(extracted_dir)
    }

    fn run_zic(&mut self, extracted_dir: &Path) -> Result<PathBuf, Error> {
        user_info!("Calling zic(1)...");
        let zic_output_dir = self.scratch.zic_output_dir();
        create_dir(&zic_output_dir)?;

        let zic = ExternalCommand::new(&self.tools.zic)
            .arg("-d")
            .arg(&zic_output_dir)
            .args(region_files(extracted_dir));
        run_checked(&mut self.runner, &zic)?;
        Ok(zic_output_dir)
    }

    /// Write the list of zones and links that ZoneCompactor should process.
    fn write_setup_file(&self, extracted_dir: &Path) -> Result<PathBuf, Error> {
        let setup_file = self.scratch.setup_file();
        let manifest = Manifest::from_region_files(region_files(extracted_dir))?;
        manifest.write_to(&setup_file)?;
        dev_info!(
            "wrote {} links and {} zones to {}",
            manifest.links().count(),
            manifest.zones().count(),
            setup_file.display()
        );
        Ok(setup_file)
    }

    fn run_zone_compactor(
        &mut self,
        setup_file: &Path,
        zic_output_dir: &Path,
        extracted_dir: &Path,
        version: &str,
    ) -> Result<(), Error> {
        user_info!("Calling ZoneCompactor to update tzdata to {version}...");
        let classes_dir = self.scratch.classes_dir();
        create_dir(&classes_dir)?;

        let javac = ExternalCommand::new(&self.tools.javac)
            .arg("-d")
            .arg(&classes_dir)
            .arg(self.layout.zone_compactor_source());
        run_checked(&mut self.runner, &javac)?;

        let java = ExternalCommand::new(&self.tools.java)
            .arg("-cp")
            .arg(&classes_dir)
            .arg("ZoneCompactor")
            .arg(setup_file)
            .arg(zic_output_dir)
            .arg(extracted_dir.join("zone.tab"))
            .arg(self.layout.iana_output_dir())
            .arg(version);
        run_checked(&mut self.runner, &java)?;
        Ok(())
    }

    fn build_icu_data(&mut self, tarball: &Path) -> Result<(), Error> {
        self.icu.build(&mut self.runner, tarball)
    }

    /// tzlookup.xml is maintained by hand, so it is copied as is.
    fn build_tzlookup(&self) -> Result<(), Error> {
        copy_file(&self.layout.tzlookup_input(), &self.layout.tzlookup_output())
    }
}
