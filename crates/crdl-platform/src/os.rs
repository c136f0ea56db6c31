//! Operating system detection.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Operating system types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OS {
    Windows,
    Macos,
    Linux,
    Unknown,
}

impl OS {
    pub fn as_str(&self) -> &'static str {
        match self {
            OS::Windows => "windows",
            OS::Macos => "macos",
            OS::Linux => "linux",
            OS::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OS {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win32" => Ok(OS::Windows),
            "macos" | "darwin" | "osx" => Ok(OS::Macos),
            "linux" => Ok(OS::Linux),
            other => Err(Error::UnknownOS(other.to_string())),
        }
    }
}

/// Detect the operating system this binary runs on.
pub fn detect() -> OS {
    std::env::consts::OS.parse().unwrap_or(OS::Unknown)
}
