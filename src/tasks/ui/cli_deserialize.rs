/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::ui::logging::GlobalLogger;

use clap::{App, Arg, ArgMatches};
use eamkit_tasks_config::{Settings, YamlRead};
use std::path::PathBuf;

/// A group of command line arguments that knows how to add itself to a clap app
/// and how to read itself back out of the matches.
pub trait CliDeserialize: Sized {
    fn augment_clap_app<'a, 'b>(app: App<'a, 'b>) -> (App<'a, 'b>, ClapDeserializer<Self>)
    {
        let app = Self::_augment_clap_app(app);
        let token = ClapDeserializer(Default::default());
        (app, token)
    }

    /// Don't use this. Call 'augment_clap_app' instead.
    fn _augment_clap_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b>;
    /// Don't use this. Call 'resolve_args' on the ClapDeserializer instead.
    fn _resolve_args(matches: &ArgMatches<'_>) -> FailResult<Self>;
}

/// Token of "proof" that a clap app was augmented to be capable of deserializing A.
pub struct ClapDeserializer<A>(std::marker::PhantomData<A>);

impl<A> ClapDeserializer<A>
where A: CliDeserialize,
{
    /// Deserialize the arguments.  This may perform IO such as eagerly reading input files.
    pub fn resolve_args(self, matches: &ArgMatches<'_>) -> FailResult<A>
    { A::_resolve_args(matches) }
}

// Tuple as product combinator
impl<A, B> CliDeserialize for (A, B)
where
    A: CliDeserialize,
    B: CliDeserialize,
{
    fn _augment_clap_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b>
    {
        let app = A::_augment_clap_app(app);
        let app = B::_augment_clap_app(app);
        app
    }

    fn _resolve_args(matches: &ArgMatches<'_>) -> FailResult<Self>
    { Ok((A::_resolve_args(matches)?, B::_resolve_args(matches)?)) }
}

//--------------------------------------------------------------------------------------

/// `-v` and `--log FILE`.
#[derive(Debug, Clone)]
pub struct LogArgs {
    pub verbosity: i32,
    pub log_file: Option<PathBuf>,
}

impl CliDeserialize for LogArgs {
    fn _augment_clap_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.args(&[
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("log more details from the eamkit crates"),
            Arg::with_name("log_file")
                .long("log")
                .takes_value(true)
                .value_name("FILE")
                .help("also write the log to this file"),
        ])
    }

    fn _resolve_args(m: &ArgMatches<'_>) -> FailResult<Self>
    { Ok(LogArgs {
        verbosity: m.occurrences_of("verbose") as i32,
        log_file: m.value_of("log_file").map(PathBuf::from),
    })}
}

impl LogArgs {
    pub fn start_logging(&self) -> FailResult<()> {
        let mut logger = GlobalLogger::default();
        logger.verbosity(self.verbosity);
        if let Some(path) = &self.log_file {
            logger.path(path);
        }
        logger.apply()
    }
}

/// `-c CONFIG` and the `.frc` file.
#[derive(Debug, Clone)]
pub struct ForceFieldArgs {
    pub settings: Settings,
    pub frc_path: PathBuf,
}

impl CliDeserialize for ForceFieldArgs {
    fn _augment_clap_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.args(&[
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .value_name("CONFIG")
                .help("settings yaml (all settings have defaults)"),
            Arg::with_name("frc")
                .required(true)
                .value_name("FRC")
                .help("EAM force field file, listing the atom types and their potential files"),
        ])
    }

    fn _resolve_args(m: &ArgMatches<'_>) -> FailResult<Self>
    {
        let settings = match m.value_of("config") {
            Some(path) => {
                let file = path_abs::FileRead::open(path)?;
                Settings::from_reader(file)?
            },
            None => Settings::default(),
        };
        let frc_path = match m.value_of("frc") {
            Some(path) => PathBuf::from(path),
            None => bail!("missing force field file"),
        };
        Ok(ForceFieldArgs { settings, frc_path })
    }
}
