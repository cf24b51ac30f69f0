/// One line of an IANA region file, as far as the setup manifest cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Record<'a> {
    Zone { name: &'a str },
    Link { target: &'a str, alias: &'a str },
    Ignored,
}

impl<'a> Record<'a> {
    /// Whitespace separated fields with the keyword first. Rules, comments,
    /// zone continuation lines and records with missing fields are ignored.
    pub fn parse(line: &'a str) -> Self {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some("Zone"), Some(name), _) => Record::Zone { name },
            (Some("Link"), Some(target), Some(alias)) => Record::Link { target, alias },
            _ => Record::Ignored,
        }
    }
}
