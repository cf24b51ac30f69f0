//! The IANA side of the update: finding the release tarball and reading its region files.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::common::Error;
use crate::system::file::find_matching;

pub use manifest::Manifest;
pub use record::Record;

mod manifest;
mod record;

/// Region files handed to zic and scanned for the setup manifest.
///
/// `backward` and `backzone` deliberately come last so that zic lets them
/// override what came before (and each other).
pub const REGIONS: &[&str] = &[
    "africa",
    "antarctica",
    "asia",
    "australasia",
    "etcetera",
    "europe",
    "northamerica",
    "southamerica",
    "backward",
    "backzone",
];

const TARBALL_PATTERN: &str = "tzdata*.tar.gz";

/// Locate the single IANA data release in `dir`.
pub fn find_tarball(dir: &Path) -> Result<PathBuf, Error> {
    let mut candidates = find_matching(dir, TARBALL_PATTERN)?;
    match candidates.len() {
        0 => Err(Error::TarballNotFound(dir.to_owned())),
        1 => Ok(candidates.remove(0)),
        _ => Err(Error::AmbiguousTarball(dir.to_owned(), candidates)),
    }
}

/// `tzdata2025a.tar.gz` becomes `tzdata2025a`.
pub fn version_from_tarball(tarball: &Path) -> Result<String, Error> {
    let invalid = || Error::InvalidTarballName(tarball.to_owned());

    let name = tarball
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;
    let start = name.find("tzdata").ok_or_else(invalid)?;
    let rest = &name[start..];
    let end = rest.rfind(".tar.gz").ok_or_else(invalid)?;

    if end <= "tzdata".len() {
        return Err(invalid());
    }

    Ok(rest[..end].to_string())
}

/// Unpack the gzip'd release into `dest`, which must already exist.
pub fn unpack_tarball(tarball: &Path, dest: &Path) -> Result<(), Error> {
    let file = File::open(tarball).map_err(Error::at(tarball))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive.unpack(dest).map_err(Error::at(tarball))
}

pub fn region_files(extracted_dir: &Path) -> Vec<PathBuf> {
    REGIONS.iter().map(|region| extracted_dir.join(region)).collect()
}

/// Write a `.tar.gz` holding `files` at the archive root.
#[cfg(test)]
pub(crate) fn write_test_tarball(path: &Path, files: &[(&str, &str)]) {
    use flate2::{write::GzEncoder, Compression};

    let encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, contents.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}
