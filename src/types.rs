use std::fmt;
use std::str::FromStr;

use crate::errors::DirectiveError;

/// Operating-system family a directive targets.
///
/// Selects the default executables and options from the metadata table and
/// the shell used when a directive runs with `shell = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsName {
    Posix,
    Nt,
}

impl OsName {
    /// The family of the host this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) { OsName::Nt } else { OsName::Posix }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OsName::Posix => "posix",
            OsName::Nt => "nt",
        }
    }
}

impl Default for OsName {
    fn default() -> Self {
        OsName::current()
    }
}

impl fmt::Display for OsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsName {
    type Err = DirectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posix" => Ok(OsName::Posix),
            "nt" => Ok(OsName::Nt),
            other => Err(DirectiveError::UnknownSystem(other.to_string())),
        }
    }
}

/// LyX document variant.
///
/// `Handout` and `Comments` builds are drafts and go to the temp directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocType {
    #[default]
    Plain,
    Handout,
    Comments,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Plain => "",
            DocType::Handout => "handout",
            DocType::Comments => "comments",
        }
    }

    pub fn is_plain(self) -> bool {
        self == DocType::Plain
    }
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(DocType::Plain),
            "handout" => Ok(DocType::Handout),
            "comments" => Ok(DocType::Comments),
            other => Err(format!(
                "invalid document type: {other} (expected \"handout\", \"comments\" or empty)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_names_round_trip() {
        for os in [OsName::Posix, OsName::Nt] {
            assert_eq!(os.as_str().parse::<OsName>().unwrap(), os);
        }
    }

    #[test]
    fn unknown_os_is_rejected() {
        match "darwin".parse::<OsName>() {
            Err(DirectiveError::UnknownSystem(name)) => assert_eq!(name, "darwin"),
            other => panic!("expected UnknownSystem, got {:?}", other),
        }
    }

    #[test]
    fn padded_os_name_is_rejected() {
        match " posix\n".parse::<OsName>() {
            Err(DirectiveError::UnknownSystem(name)) => assert_eq!(name, " posix\n"),
            other => panic!("expected UnknownSystem, got {:?}", other),
        }
        assert!("Posix".parse::<OsName>().is_err());
    }

    #[test]
    fn doc_type_is_case_sensitive() {
        assert_eq!("handout".parse::<DocType>(), Ok(DocType::Handout));
        assert!("Handout".parse::<DocType>().is_err());
    }
}
