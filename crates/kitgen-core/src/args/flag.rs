//! Typed schema for the flags the orchestrator understands

use std::fmt;

/// Expected value type of a known flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    String,
}

/// Flags with a declared type. Anything else passes through untyped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Force,
    Silent,
    Help,
    Version,
    AppName,
    OutDir,
}

impl Flag {
    pub const ALL: [Flag; 6] = [
        Flag::Force,
        Flag::Silent,
        Flag::Help,
        Flag::Version,
        Flag::AppName,
        Flag::OutDir,
    ];

    /// Canonical key used in the argument bag
    pub fn key(&self) -> &'static str {
        match self {
            Flag::Force => "force",
            Flag::Silent => "silent",
            Flag::Help => "help",
            Flag::Version => "version",
            Flag::AppName => "appName",
            Flag::OutDir => "outDir",
        }
    }

    pub fn kind(&self) -> FlagKind {
        match self {
            Flag::Force | Flag::Silent | Flag::Help | Flag::Version => FlagKind::Bool,
            Flag::AppName | Flag::OutDir => FlagKind::String,
        }
    }

    pub fn short(&self) -> Option<char> {
        match self {
            Flag::Help => Some('h'),
            Flag::Version => Some('v'),
            _ => None,
        }
    }

    /// One-line description for the help listing
    pub fn description(&self) -> &'static str {
        match self {
            Flag::Force => "Overwrite existing files in the output directory",
            Flag::Silent => "Suppress warnings and status output",
            Flag::Help => "Show this help listing",
            Flag::Version => "Print the version",
            Flag::AppName => "Name of the generated application",
            Flag::OutDir => "Directory the project is generated into",
        }
    }

    /// Look up a long flag name (exact, case-sensitive)
    /// Long lookup also takes a short alias spelled long, so `--h` is `--help`
    pub fn from_long(name: &str) -> Option<Flag> {
        if let Some(flag) = Flag::ALL.into_iter().find(|f| f.key() == name) {
            return Some(flag);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Flag::from_short(c),
            _ => None,
        }
    }

    pub fn from_short(c: char) -> Option<Flag> {
        Flag::ALL.into_iter().find(|f| f.short() == Some(c))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.key())
    }
}

/// Parse a boolean flag value; only `true` and `false` are accepted
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
