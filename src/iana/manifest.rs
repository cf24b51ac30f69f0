use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::common::Error;

use super::Record;

/// The ZoneCompactor work list: every alias and every zone name, sorted and deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    // kept as rendered `Link <target> <alias>` lines so they sort exactly as written
    links: BTreeSet<String>,
    zones: BTreeSet<String>,
}

impl Manifest {
    pub fn new() -> Self {
        Default::default()
    }

    /// Union the records of every region file. Later regions do not replace
    /// earlier ones here; zic alone applies the override order.
    pub fn from_region_files<I, P>(files: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut manifest = Self::new();
        for file in files {
            let file = file.as_ref();
            let bytes = fs::read(file).map_err(Error::at(file))?;
            manifest.add_region_text(&String::from_utf8_lossy(&bytes));
        }
        Ok(manifest)
    }

    pub fn add_region_text(&mut self, text: &str) {
        for line in text.lines() {
            self.add_record(Record::parse(line));
        }
    }

    pub fn add_record(&mut self, record: Record<'_>) {
        match record {
            Record::Zone { name } => {
                self.zones.insert(name.to_string());
            }
            Record::Link { target, alias } => {
                self.links.insert(format!("Link {target} {alias}"));
                self.zones.insert(alias.to_string());
            }
            Record::Ignored => {}
        }
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(String::as_str)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.links().chain(self.zones()) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<(), Error> {
        fs::write(path, self.render()).map_err(Error::at(path))
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use crate::common::Error;
    use crate::system::file::create_temporary_dir;
    use pretty_assertions::assert_eq;
    use std::fs;

    const EUROPE: &str = "\
# Zone\tNAME\t\tSTDOFF\tRULES\tFORMAT\t[UNTIL]
Rule\tEU\t1981\tmax\t-\tMar\tlastSun\t 1:00u\t1:00\tS
Zone\tEurope/Zurich\t0:34:08 -\tLMT\t1853 Jul 16
\t\t\t0:29:46\t-\tBMT\t1894 Jun
\t\t\t1:00\tSwiss\tCE%sT\t1981
\t\t\t1:00\tEU\tCE%sT
Zone\tEurope/Berlin\t0:53:28 -\tLMT\t1893 Apr
\t\t\t1:00\tEU\tCE%sT
Link\tEurope/Zurich\tEurope/Busingen
Link\tEurope/Zurich\tEurope/Vaduz
";

    const BACKWARD: &str = "\
Link\tEurope/Zurich\tEurope/Vaduz
Link\tEurope/Berlin\tEurope/Oslo
Link\tEtc/UTC\tUTC
";

    const BACKZONE: &str = "\
Zone\tEurope/Oslo\t0:43:00 -\tLMT\t1895 Jan  1
\t\t\t1:00\tNorway\tCE%sT
";

    fn manifest() -> Manifest {
        let mut manifest = Manifest::new();
        for text in [EUROPE, BACKWARD, BACKZONE] {
            manifest.add_region_text(text);
        }
        manifest
    }

    #[test]
    fn renders_links_then_zones() {
        assert_eq!(
            manifest().render(),
            "\
Link Etc/UTC UTC
Link Europe/Berlin Europe/Oslo
Link Europe/Zurich Europe/Busingen
Link Europe/Zurich Europe/Vaduz
Europe/Berlin
Europe/Busingen
Europe/Oslo
Europe/Vaduz
Europe/Zurich
UTC
"
        );
    }

    #[test]
    fn entries_are_sorted_and_unique() {
        let manifest = manifest();
        let links: Vec<_> = manifest.links().collect();
        let zones: Vec<_> = manifest.zones().collect();

        let mut expected_links = links.clone();
        expected_links.sort();
        expected_links.dedup();
        assert_eq!(links, expected_links);

        let mut expected_zones = zones.clone();
        expected_zones.sort();
        expected_zones.dedup();
        assert_eq!(zones, expected_zones);

        // Europe/Oslo is both a Link alias and a backzone Zone
        assert_eq!(zones.iter().filter(|z| **z == "Europe/Oslo").count(), 1);
    }

    #[test]
    fn every_alias_is_a_zone() {
        let manifest = manifest();
        let zones: Vec<_> = manifest.zones().collect();
        for link in manifest.links() {
            let alias = link.rsplit(' ').next().unwrap();
            assert!(zones.contains(&alias), "{alias} missing from zones");
        }
    }

    #[test]
    fn region_order_does_not_change_the_result() {
        let mut reversed = Manifest::new();
        for text in [BACKZONE, BACKWARD, EUROPE] {
            reversed.add_region_text(text);
        }
        assert_eq!(reversed.render(), manifest().render());
    }

    #[test]
    fn reads_and_writes_files_deterministically() {
        let dir = create_temporary_dir("tzdata-manifest").unwrap();
        let files = [dir.join("europe"), dir.join("backward"), dir.join("backzone")];
        for (file, text) in files.iter().zip([EUROPE, BACKWARD, BACKZONE]) {
            fs::write(file, text).unwrap();
        }

        let first = dir.join("setup-1");
        let second = dir.join("setup-2");
        Manifest::from_region_files(&files)
            .unwrap()
            .write_to(&first)
            .unwrap();
        Manifest::from_region_files(&files)
            .unwrap()
            .write_to(&second)
            .unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
        assert_eq!(fs::read_to_string(&first).unwrap(), manifest().render());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_region_file_is_fatal() {
        let dir = create_temporary_dir("tzdata-manifest").unwrap();
        let missing = dir.join("antarctica");
        match Manifest::from_region_files([&missing]) {
            Err(Error::Io(Some(path), _)) => assert_eq!(path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn empty_input_gives_empty_manifest() {
        let mut manifest = Manifest::new();
        manifest.add_region_text("# nothing but comments\n\n");
        assert_eq!(manifest.render(), "");
    }
}
