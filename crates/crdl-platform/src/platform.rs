//! Mapping of (os, arch) onto snapshot archive coordinates.

use std::fmt;

use crate::arch::{self, Arch};
use crate::error::{Error, Result};
use crate::os::{self, OS};

/// An operating system and CPU architecture pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: OS,
    pub arch: Arch,
}

/// Where a platform's builds live in the snapshot archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    /// Top-level directory of the archive, e.g. `Linux_x64`.
    pub prefix: &'static str,
    /// File name of the zipped build inside each position directory.
    pub artifact: &'static str,
}

const SUPPORTED: [(OS, Arch, PlatformKey); 5] = [
    (OS::Windows, Arch::ARM64, PlatformKey { prefix: "Win_Arm64", artifact: "chrome-win.zip" }),
    (OS::Windows, Arch::X86_64, PlatformKey { prefix: "Win_x64", artifact: "chrome-win.zip" }),
    (OS::Linux, Arch::X86_64, PlatformKey { prefix: "Linux_x64", artifact: "chrome-linux.zip" }),
    (OS::Macos, Arch::X86_64, PlatformKey { prefix: "Mac", artifact: "chrome-mac.zip" }),
    (OS::Macos, Arch::ARM64, PlatformKey { prefix: "Mac_Arm", artifact: "chrome-mac.zip" }),
];

impl Platform {
    pub fn new(os: OS, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// The platform of the running process.
    pub fn current() -> Self {
        Self::new(os::detect(), arch::detect())
    }

    /// Look the platform up in the fixed table of supported builds.
    pub fn resolve(&self) -> Result<PlatformKey> {
        SUPPORTED
            .iter()
            .find(|(os, arch, _)| *os == self.os && *arch == self.arch)
            .map(|(_, _, key)| *key)
            .ok_or_else(|| Error::UnsupportedPlatform {
                os: self.os.to_string(),
                arch: self.arch.to_string(),
            })
    }

    /// Every platform the archive publishes builds for.
    pub fn supported() -> impl Iterator<Item = Platform> {
        SUPPORTED.iter().map(|(os, arch, _)| Platform::new(*os, *arch))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.os, self.arch)
    }
}
