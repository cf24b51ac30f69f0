use std::{ffi::OsString, path::PathBuf};

use super::Error;

pub const BUILD_TOP_VAR: &str = "ANDROID_BUILD_TOP";

/// Every location the update reads from or writes to, derived from the Android build root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub build_top: PathBuf,
    pub timezone_dir: PathBuf,
    pub zone_compactor_dir: PathBuf,
    pub input_data_dir: PathBuf,
    pub output_data_dir: PathBuf,
    pub icu_dir: PathBuf,
}

impl Layout {
    pub fn new(build_top: impl Into<PathBuf>) -> Self {
        let build_top = build_top.into();
        let timezone_dir = build_top.join("system/timezone");

        Self {
            zone_compactor_dir: timezone_dir.join("zone_compactor"),
            input_data_dir: timezone_dir.join("input_data"),
            output_data_dir: timezone_dir.join("output_data"),
            icu_dir: build_top.join("external/icu"),
            timezone_dir,
            build_top,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::from_build_top(std::env::var_os(BUILD_TOP_VAR))
    }

    fn from_build_top(build_top: Option<OsString>) -> Result<Self, Error> {
        match build_top {
            Some(top) if !top.is_empty() => Ok(Self::new(top)),
            _ => Err(Error::BuildTopNotSet),
        }
    }

    /// Fail before any work is done when the checkout is missing a required directory.
    pub fn check(&self) -> Result<(), Error> {
        for (what, path) in [
            ("system/timezone", &self.timezone_dir),
            ("system/timezone/zone_compactor", &self.zone_compactor_dir),
            ("system/timezone/output_data", &self.output_data_dir),
        ] {
            if !path.is_dir() {
                return Err(Error::DirectoryNotFound {
                    what,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn iana_input_dir(&self) -> PathBuf {
        self.input_data_dir.join("iana")
    }

    pub fn iana_output_dir(&self) -> PathBuf {
        self.output_data_dir.join("iana")
    }

    pub fn tzlookup_input(&self) -> PathBuf {
        self.input_data_dir.join("android/tzlookup.xml")
    }

    pub fn tzlookup_output(&self) -> PathBuf {
        self.output_data_dir.join("android/tzlookup.xml")
    }

    pub fn zone_compactor_source(&self) -> PathBuf {
        self.zone_compactor_dir
            .join("main/java/ZoneCompactor.java")
    }

    pub fn icu4c_dir(&self) -> PathBuf {
        self.icu_dir.join("icu4c")
    }
}

/// Names of the external programs, each overridable from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tools {
    pub zic: OsString,
    pub javac: OsString,
    pub java: OsString,
    pub make: OsString,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            zic: "zic".into(),
            javac: "javac".into(),
            java: "java".into(),
            make: "make".into(),
        }
    }
}

impl Tools {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let pick = |name: &str, default: OsString| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };

        let defaults = Self::default();
        Self {
            zic: pick("TZDATA_ZIC", defaults.zic),
            javac: pick("TZDATA_JAVAC", defaults.javac),
            java: pick("TZDATA_JAVA", defaults.java),
            make: pick("TZDATA_MAKE", defaults.make),
        }
    }
}
