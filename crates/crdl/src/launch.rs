//! Starting an unpacked build.
//!
//! Zip extraction does not always keep the executable bit, so on unix the
//! build's tree is fixed up first: shared objects and extensionless files
//! get mode 0o755.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use crdl_fs::grant_recursive;
use crdl_platform::Command;
use crdl_platform::os::OS;
use tracing::debug;

const EXEC_MODE: u32 = 0o755;

/// Whether a file needs the executable bit.
pub fn needs_exec_bit(name: &str) -> bool {
    name.contains(".so") || !name.contains('.')
}

#[derive(Debug, Clone, Copy)]
pub struct Launcher {
    os: OS,
}

impl Launcher {
    pub fn new(os: OS) -> Self {
        Self { os }
    }

    fn fixup_root(&self, entry: &Path) -> Option<PathBuf> {
        match self.os {
            OS::Linux => Some(entry.join("chrome-linux")),
            OS::Macos => Some(entry.join("chrome-mac")),
            OS::Windows | OS::Unknown => None,
        }
    }

    /// Grant the executable bit where needed. Returns how many files changed.
    pub fn prepare(&self, entry: &Path) -> Result<usize> {
        let Some(root) = self.fixup_root(entry) else {
            return Ok(0);
        };
        let granted = grant_recursive(&root, EXEC_MODE, &needs_exec_bit)
            .with_context(|| format!("failed to fix permissions under {}", root.display()))?;
        debug!("made {granted} files under {} executable", root.display());
        Ok(granted)
    }

    pub fn command(&self, entry: &Path) -> Result<Command> {
        let command = match self.os {
            OS::Windows => Command::new(entry.join("chrome-win").join("chrome.exe")),
            OS::Linux => Command::new(entry.join("chrome-linux").join("chrome")),
            OS::Macos => Command::new("open").arg(entry.join("chrome-mac").join("Chromium.app")),
            OS::Unknown => bail!("cannot launch a build on an unknown operating system"),
        };
        Ok(command.current_dir(entry))
    }

    /// Fix up permissions and start the build. The process is not waited on.
    pub fn launch(&self, entry: &Path) -> Result<()> {
        self.prepare(entry)?;
        let command = self.command(entry)?;
        debug!("starting {} {:?}", command.program(), command.args());
        command
            .spawn_detached()
            .with_context(|| format!("failed to launch the build in {}", entry.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn exec_bit_predicate() {
        assert!(needs_exec_bit("chrome"));
        assert!(needs_exec_bit("chrome_crashpad_handler"));
        assert!(needs_exec_bit("libEGL.so"));
        assert!(needs_exec_bit("libvulkan.so.1"));
        assert!(!needs_exec_bit("resources.pak"));
        assert!(!needs_exec_bit("icudtl.dat"));
    }

    #[test]
    fn command_per_os() {
        let entry = Path::new("/c/chromium_119_Linux_x64");

        let linux = Launcher::new(OS::Linux).command(entry).unwrap();
        assert_eq!(
            Path::new(linux.program()),
            entry.join("chrome-linux").join("chrome")
        );
        assert!(linux.args().is_empty());

        let windows = Launcher::new(OS::Windows).command(entry).unwrap();
        assert_eq!(
            Path::new(windows.program()),
            entry.join("chrome-win").join("chrome.exe")
        );

        let mac = Launcher::new(OS::Macos).command(entry).unwrap();
        assert_eq!(mac.program(), "open");
        assert_eq!(
            mac.args(),
            vec![entry.join("chrome-mac").join("Chromium.app").to_string_lossy().into_owned()]
        );

        assert!(Launcher::new(OS::Unknown).command(entry).is_err());
    }

    #[test]
    fn windows_needs_no_fixup() {
        let dir = tempdir().unwrap();
        assert_eq!(Launcher::new(OS::Windows).prepare(dir.path()).unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn prepare_grants_exec_bit_selectively() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path().join("chrome-linux");
        fs::create_dir_all(root.join("locales")).unwrap();
        for name in ["chrome", "libEGL.so", "resources.pak", "locales/en-US.pak"] {
            fs::write(root.join(name), name).unwrap();
            fs::set_permissions(root.join(name), fs::Permissions::from_mode(0o644)).unwrap();
        }
        std::os::unix::fs::symlink("chrome", root.join("chromium")).unwrap();

        let granted = Launcher::new(OS::Linux).prepare(dir.path()).unwrap();
        assert_eq!(granted, 2);

        let mode = |name: &str| fs::metadata(root.join(name)).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode("chrome"), 0o755);
        assert_eq!(mode("libEGL.so"), 0o755);
        assert_eq!(mode("resources.pak"), 0o644);
        assert_eq!(mode("locales/en-US.pak"), 0o644);
    }

    #[test]
    fn missing_build_tree_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Launcher::new(OS::Linux).prepare(dir.path()).is_err());
    }
}
