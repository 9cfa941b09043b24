/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use ansi_term::Colour;
use log::{Level, LevelFilter};
use std::fmt;
use std::path::{Path, PathBuf};

// crates whose output is raised to Trace by `-v`
const OUR_CRATES: &[&str] = &[
    "eamkit_tasks",
    "eamkit_potentials",
    "eamkit_types",
    "eamkit_ff_io",
    "eamkit_tasks_config",
];

/// Builder-style setup for logging
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
}

impl GlobalLogger {
    /// Also write the log to a file.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; the level will be truncated
    /// to the most extreme value supported.
    pub fn verbosity(&mut self, level: i32) -> &mut Self
    {
        self.verbosity = match level > 0 {
            true => Verbosity::Loud,
            false => Verbosity::Default,
        };
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Default, Loud }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

impl GlobalLogger {
    /// Install the logger.  This can only succeed once per process.
    pub fn apply(&mut self) -> FailResult<()>
    {
        use std::time::Instant;

        let ours = match self.verbosity {
            Verbosity::Default => LevelFilter::Info,
            Verbosity::Loud => LevelFilter::Trace,
        };

        let start = Instant::now();
        let mut dispatch = fern::Dispatch::new()
            .format(move |out, message, record| {
                let t = start.elapsed();
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_millis(),
                    record.target(),
                    ColorizedLevel(record.level()),
                    message))
            })
            .level(LevelFilter::Warn);

        for &name in OUR_CRATES {
            dispatch = dispatch.level_for(name, ours);
        }
        // stdout is reserved for results
        dispatch = dispatch.chain(std::io::stderr());

        if let Some(path) = self.path.as_ref() {
            dispatch = dispatch.chain(fern::log_file(path)?);
        }

        dispatch.apply()?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.0 {
            Level::Error => Colour::Red.bold(),
            Level::Warn  => Colour::Red.normal(),
            Level::Info  => Colour::Cyan.bold(),
            Level::Debug => Colour::Yellow.dimmed(),
            Level::Trace => Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(self.0.to_string()))
    }
}
