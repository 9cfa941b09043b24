/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::ReadError;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Environment variable naming a directory of potential files.
pub const FORCE_PARAM_PATH: &str = "FORCE_PARAM_PATH";

/// Directories searched, in order, for the files a force field refers to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self { Default::default() }

    /// The directory holding the `.frc` file, then `extra` (if any).
    pub fn for_frc(frc_path: &Path, extra: Option<&Path>) -> Self {
        let mut out = SearchPath::new();
        match frc_path.parent() {
            Some(dir) if dir != Path::new("") => out.push(dir),
            _ => out.push("."),
        };
        if let Some(dir) = extra {
            out.push(dir);
        }
        out
    }

    pub fn push(&mut self, dir: impl AsRef<Path>) -> &mut Self {
        self.dirs.push(dir.as_ref().to_owned());
        self
    }

    /// Appends the directory named by an environment variable, if it is set and not empty.
    pub fn push_env(&mut self, key: impl AsRef<OsStr>) -> &mut Self {
        if let Some(dir) = non_empty_env(key) {
            self.dirs.push(dir.into());
        }
        self
    }

    pub fn dirs(&self) -> &[PathBuf] { &self.dirs }

    /// The first existing file called `name` in any of the directories.
    ///
    /// Absolute paths are used as-is.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ReadError> {
        let candidates = match Path::new(name).is_absolute() {
            true => vec![PathBuf::from(name)],
            false => self.dirs.iter().map(|dir| dir.join(name)).collect(),
        };
        for path in &candidates {
            if path.is_file() {
                trace!("found {:?} at {}", name, path.display());
                return Ok(path.clone());
            }
        }
        Err(ReadError::NotFound { name: name.to_string(), tried: candidates })
    }
}

fn non_empty_env(key: impl AsRef<OsStr>) -> Option<OsString> {
    match std::env::var_os(key) {
        None => None,
        Some(s) => match s.is_empty() {
            true => None,
            false => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn search_order() {
        let first = TempDir::new("eamkit-ff-io").unwrap();
        let second = TempDir::new("eamkit-ff-io").unwrap();
        std::fs::write(second.path().join("Cu.funcfl"), "").unwrap();
        std::fs::write(second.path().join("Au.funcfl"), "").unwrap();
        std::fs::write(first.path().join("Au.funcfl"), "").unwrap();

        let frc = first.path().join("test.frc");
        let search = SearchPath::for_frc(&frc, Some(second.path()));
        assert_eq!(search.dirs(), &[first.path().to_owned(), second.path().to_owned()]);

        assert_eq!(search.resolve("Au.funcfl").unwrap(), first.path().join("Au.funcfl"));
        assert_eq!(search.resolve("Cu.funcfl").unwrap(), second.path().join("Cu.funcfl"));

        let absolute = second.path().join("Cu.funcfl");
        assert_eq!(search.resolve(absolute.to_str().unwrap()).unwrap(), absolute);

        match search.resolve("Ag.funcfl") {
            Err(ReadError::NotFound { name, tried }) => {
                assert_eq!(name, "Ag.funcfl");
                assert_eq!(tried, vec![first.path().join("Ag.funcfl"), second.path().join("Ag.funcfl")]);
            },
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn bare_frc_name() {
        let search = SearchPath::for_frc(Path::new("test.frc"), None);
        assert_eq!(search.dirs(), &[PathBuf::from(".")]);
    }

    #[test]
    fn env_dirs() {
        const KEY: &str = "EAMKIT_FF_IO_TEST_SEARCH_DIR";
        std::env::set_var(KEY, "/some/where");
        let mut search = SearchPath::new();
        search.push_env(KEY).push_env("EAMKIT_FF_IO_TEST_SURELY_UNSET");
        assert_eq!(search.dirs(), &[PathBuf::from("/some/where")]);

        std::env::set_var(KEY, "");
        assert_eq!(SearchPath::new().push_env(KEY).dirs().len(), 0);
    }
}
