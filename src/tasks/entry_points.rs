/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{FailResult, VersionInfo};
use crate::{compute_cluster, load_force_field, Xyz};
use crate::ui::cli_deserialize::{CliDeserialize, ForceFieldArgs, LogArgs};

use clap::{App, Arg};
use std::ffi::OsStr;
use std::io::Write;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.causes() {
            error!("{}", cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        } else {
            error!("\
                (If you found the above error message to be particularly lacking in \
                detail, try again with RUST_BACKTRACE=1)\
            ");
        }
        std::process::exit(1);
    });
}

fn print_json<T: serde::Serialize>(value: &T) -> FailResult<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, value)?;
    writeln!(lock)?;
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct PairTable {
    types: (String, String),
    cutoff: f64,
    explicitly_set: bool,
    r: Vec<f64>,
    phi: Vec<f64>,
    dphi: Vec<f64>,
}

// %% CRATES: binary: eamkit-pair-table %%
pub fn pair_table(version: VersionInfo) {
    wrap_result_main(|| {
        let (app, de) = CliDeserialize::augment_clap_app({
            App::new("eamkit-pair-table")
                .version(version.version)
                .about("Tabulate the EAM pair potential between every two types of a force field.")
        });
        let matches = app.get_matches();
        let (log, ff_args): (LogArgs, ForceFieldArgs) = de.resolve_args(&matches)?;
        log.start_logging()?;

        let mut ff = load_force_field(&ff_args.settings.force_field, &ff_args.frc_path)?;
        ff.eam.initialize(&ff.registry)?;

        let points = ff_args.settings.driver.table_points;
        ensure!(points >= 2, "driver.table-points must be at least 2");

        let types: Vec<_> = ff.eam.registered_types().collect();
        let mut tables = vec![];
        for (index, &a) in types.iter().enumerate() {
            for &b in &types[index..] {
                let cutoff = ff.eam.cutoff_radius_for((a, b));
                let interaction = match ff.eam.pair_potential(a, b) {
                    Some(x) => x,
                    None => bail!("no pair potential for {} - {}", ff.registry.name(a), ff.registry.name(b)),
                };
                let r: Vec<_> = (0..points).map(|i| cutoff * i as f64 / (points - 1) as f64).collect();
                let (phi, dphi): (Vec<_>, Vec<_>) = r.iter().map(|&r| interaction.phi.value_and_derivative_at(r)).unzip();
                tables.push(PairTable {
                    types: (ff.registry.name(a).to_string(), ff.registry.name(b).to_string()),
                    cutoff,
                    explicitly_set: interaction.explicitly_set,
                    r, phi, dphi,
                });
            }
        }
        print_json(&tables)
    });
}

// %% CRATES: binary: eamkit-cluster-energy %%
pub fn cluster_energy(version: VersionInfo) {
    wrap_result_main(|| {
        let (app, de) = CliDeserialize::augment_clap_app({
            App::new("eamkit-cluster-energy")
                .version(version.version)
                .about("EAM energy and forces of a finite cluster of atoms.")
                .args(&[
                    Arg::with_name("structure")
                        .long("structure")
                        .short("s")
                        .required(true)
                        .takes_value(true)
                        .value_name("XYZ")
                        .help("xyz file whose symbols are atom type names from the force field"),
                ])
        });
        let matches = app.get_matches();
        let (log, ff_args): (LogArgs, ForceFieldArgs) = de.resolve_args(&matches)?;
        log.start_logging()?;

        let xyz = match matches.value_of("structure") {
            Some(path) => Xyz::load(path)?,
            None => bail!("missing --structure"),
        };
        let mut ff = load_force_field(&ff_args.settings.force_field, &ff_args.frc_path)?;
        let types = xyz.symbols.iter()
            .map(|sym| ff.type_named(sym))
            .collect::<FailResult<Vec<_>>>()?;

        info!("Computing {} atoms from {:?}", xyz.carts.len(), xyz.title);
        let out = compute_cluster(
            &mut ff.eam,
            &ff.registry,
            &xyz.carts,
            &types,
            ff_args.settings.driver.particle_pot,
        )?;
        print_json(&out)
    });
}
