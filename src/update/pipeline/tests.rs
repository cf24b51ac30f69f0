use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use super::{Scratch, Updater};
use crate::common::command::fake::FakeRunner;
use crate::common::{CommandRunner, Error, ExternalCommand, Layout, Tools};
use crate::iana::{write_test_tarball, REGIONS};
use crate::icu::IcuBuilder;
use crate::system::file::create_temporary_dir;

const EUROPE: &str = "\
Zone\tEurope/London\t-0:01:15 -\tLMT\t1847 Dec  1
\t\t\t0:00\tGB-Eire\t%s\t1968 Oct 27
Link\tEurope/London\tEurope/Jersey
";

const BACKWARD: &str = "\
Link\tEurope/London\tGB
Link\tEurope/London\tEurope/Jersey
";

const TZLOOKUP: &[u8] = b"<timezones ianaversion=\"2025a\">\n</timezones>\n";

#[derive(Default)]
struct RecordingIcu {
    tarballs: Vec<PathBuf>,
    fail: bool,
}

impl IcuBuilder for RecordingIcu {
    fn build(&mut self, _runner: &mut dyn CommandRunner, tarball: &Path) -> Result<(), Error> {
        self.tarballs.push(tarball.to_owned());
        if self.fail {
            return Err(Error::CommandFailed {
                command: "make".to_string(),
                code: Some(2),
            });
        }
        Ok(())
    }
}

/// A throwaway Android checkout with everything the update reads.
struct Checkout {
    root: PathBuf,
    layout: Layout,
}

impl Checkout {
    fn new(tarball_name: Option<&str>) -> Self {
        let root = create_temporary_dir("tzdata-checkout").unwrap();
        let layout = Layout::new(root.join("aosp"));

        fs::create_dir_all(layout.zone_compactor_source().parent().unwrap()).unwrap();
        fs::write(layout.zone_compactor_source(), b"class ZoneCompactor {}").unwrap();
        fs::create_dir_all(&layout.output_data_dir).unwrap();
        fs::create_dir_all(layout.iana_input_dir()).unwrap();
        if let Some(name) = tarball_name {
            write_release(&layout.iana_input_dir().join(name));
        }
        fs::create_dir_all(layout.tzlookup_input().parent().unwrap()).unwrap();
        fs::write(layout.tzlookup_input(), TZLOOKUP).unwrap();

        layout.check().unwrap();
        Self { root, layout }
    }

    fn tarball(&self) -> PathBuf {
        self.layout.iana_input_dir().join("tzdata2025a.tar.gz")
    }

    fn updater<I: IcuBuilder>(&self, runner: FakeRunner, icu: I) -> Updater<FakeRunner, I> {
        let scratch = Scratch::at(self.root.join("scratch"));
        Updater::new(
            self.layout.clone(),
            Tools::default(),
            scratch,
            runner,
            icu,
        )
    }

    fn scratch(&self) -> PathBuf {
        self.root.join("scratch")
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

const ZONE_TAB: &str = "GB\t+513030-0000731\tEurope/London\n";

/// A small IANA release: every region file plus zone.tab.
fn write_release(path: &Path) {
    let mut files: Vec<(&str, &str)> = REGIONS
        .iter()
        .map(|region| {
            let text = match *region {
                "europe" => EUROPE,
                "backward" => BACKWARD,
                _ => "# no zones here\n",
            };
            (*region, text)
        })
        .collect();
    files.push(("zone.tab", ZONE_TAB));
    write_test_tarball(path, &files);
}

#[test]
fn runs_every_step_in_order() {
    let checkout = Checkout::new(Some("tzdata2025a.tar.gz"));
    let mut updater = checkout.updater(FakeRunner::new(), RecordingIcu::default());

    updater.run().unwrap();

    let scratch = checkout.scratch();
    let extracted = scratch.join("extracted_iana");
    let classes = scratch.join("classes");
    assert_eq!(updater.runner.programs(), ["zic", "javac", "java"]);

    assert_eq!(
        fs::read_to_string(extracted.join("europe")).unwrap(),
        EUROPE
    );
    assert_eq!(
        fs::read_to_string(extracted.join("zone.tab")).unwrap(),
        ZONE_TAB
    );
    assert_eq!(
        updater.runner.commands[0],
        ExternalCommand::new("zic")
            .arg("-d")
            .arg(scratch.join("data"))
            .args(REGIONS.iter().map(|r| extracted.join(r)))
    );
    assert_eq!(
        updater.runner.commands[1],
        ExternalCommand::new("javac")
            .arg("-d")
            .arg(&classes)
            .arg(checkout.layout.zone_compactor_source())
    );
    assert_eq!(
        updater.runner.commands[2],
        ExternalCommand::new("java")
            .arg("-cp")
            .arg(&classes)
            .arg("ZoneCompactor")
            .arg(scratch.join("setup"))
            .arg(scratch.join("data"))
            .arg(extracted.join("zone.tab"))
            .arg(checkout.layout.iana_output_dir())
            .arg("tzdata2025a")
    );

    assert_eq!(
        fs::read_to_string(scratch.join("setup")).unwrap(),
        "\
Link Europe/London Europe/Jersey
Link Europe/London GB
Europe/Jersey
Europe/London
GB
"
    );

    assert_eq!(updater.icu.tarballs, vec![checkout.tarball()]);
    assert_eq!(
        fs::read(checkout.layout.tzlookup_output()).unwrap(),
        TZLOOKUP
    );
}

#[test]
fn missing_tarball_fails_before_any_tool_runs() {
    let checkout = Checkout::new(None);
    let mut updater = checkout.updater(FakeRunner::new(), RecordingIcu::default());

    let result = updater.run();

    assert!(matches!(result, Err(Error::TarballNotFound(_))));
    assert!(updater.runner.commands.is_empty());
    assert!(updater.icu.tarballs.is_empty());
    assert!(!checkout.layout.tzlookup_output().exists());
}

#[test]
fn unversioned_tarball_fails_before_any_tool_runs() {
    let checkout = Checkout::new(Some("tzdata.tar.gz"));
    let mut updater = checkout.updater(FakeRunner::new(), RecordingIcu::default());

    let result = updater.run();

    assert!(matches!(result, Err(Error::InvalidTarballName(_))));
    assert!(updater.runner.commands.is_empty());
}

#[test]
fn zic_failure_stops_the_run() {
    let checkout = Checkout::new(Some("tzdata2025a.tar.gz"));
    let runner = FakeRunner::new().failing_on("zic");
    let mut updater = checkout.updater(runner, RecordingIcu::default());

    let result = updater.run();

    assert!(matches!(result, Err(Error::CommandFailed { code: Some(1), .. })));
    assert_eq!(updater.runner.programs(), ["zic"]);
    assert!(updater.icu.tarballs.is_empty());
    assert!(!checkout.scratch().join("setup").exists());
    assert!(!checkout.layout.tzlookup_output().exists());
}

#[test]
fn corrupt_tarball_stops_the_run_before_any_tool() {
    let checkout = Checkout::new(Some("tzdata2025a.tar.gz"));
    fs::write(checkout.tarball(), b"truncated download").unwrap();
    let mut updater = checkout.updater(FakeRunner::new(), RecordingIcu::default());

    match updater.run() {
        Err(Error::Io(Some(path), _)) => assert_eq!(path, checkout.tarball()),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(updater.runner.commands.is_empty());
    assert!(updater.icu.tarballs.is_empty());
    assert!(!checkout.layout.tzlookup_output().exists());
}

#[test]
fn helper_build_failure_skips_helper_and_icu() {
    let checkout = Checkout::new(Some("tzdata2025a.tar.gz"));
    let runner = FakeRunner::new().failing_on("javac");
    let mut updater = checkout.updater(runner, RecordingIcu::default());

    assert!(updater.run().is_err());
    assert_eq!(updater.runner.programs(), ["zic", "javac"]);
    assert!(updater.icu.tarballs.is_empty());
}

#[test]
fn icu_failure_leaves_tzlookup_alone() {
    let checkout = Checkout::new(Some("tzdata2025a.tar.gz"));
    let icu = RecordingIcu {
        fail: true,
        ..Default::default()
    };
    let mut updater = checkout.updater(FakeRunner::new(), icu);

    let result = updater.run();

    assert!(matches!(result, Err(Error::CommandFailed { .. })));
    assert_eq!(updater.icu.tarballs.len(), 1);
    assert!(!checkout.layout.tzlookup_output().exists());
}

#[test]
fn missing_tzlookup_input_is_fatal() {
    let checkout = Checkout::new(Some("tzdata2025a.tar.gz"));
    fs::remove_file(checkout.layout.tzlookup_input()).unwrap();
    let mut updater = checkout.updater(FakeRunner::new(), RecordingIcu::default());

    match updater.run() {
        Err(Error::Io(Some(path), _)) => assert_eq!(path, checkout.layout.tzlookup_input()),
        other => panic!("unexpected result: {other:?}"),
    }
}
