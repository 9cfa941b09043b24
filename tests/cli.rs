/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use eamkit_assert_close::assert_close;

use failure::Error;
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempdir::TempDir;

const CU: &str = "\
Cu from a test
29 63.546 3.615 FCC
5 0.1 5 0.5 2.0
0.0 -0.1 -0.2 -0.3 -0.4
4.0 3.0 2.0 1.0 0.0
0.5 0.4 0.3 0.2 0.1
";

const AU: &str = "\
Au from a test
79 196.97 4.08 FCC
5 0.1 5 0.5 2.0
0.0 -0.2 -0.3 -0.35 -0.4
5.0 4.0 3.0 2.0 1.0
0.6 0.45 0.3 0.15 0.05
";

const FRC: &str = "\
! test force field
#AtomTypes
Cu 63.55 Cu.funcfl
Au 196.97 Au.funcfl

#BaseTypes
Cu_surf Cu
";

fn setup() -> Result<TempDir, Error> {
    let dir = TempDir::new("eamkit-cli")?;
    std::fs::write(dir.path().join("Cu.funcfl"), CU)?;
    std::fs::write(dir.path().join("Au.funcfl"), AU)?;
    std::fs::write(dir.path().join("test.frc"), FRC)?;
    std::fs::write(dir.path().join("settings.yaml"), "driver:\n  particle-pot: true\n  table-points: 5\n")?;
    std::fs::write(dir.path().join("trimer.xyz"), "\
3
trimer
Cu 0.0 0.0 0.0
Au 1.2 0.0 0.0
Cu_surf 0.3 1.1 0.0
")?;
    Ok(dir)
}

fn run(bin: &str, dir: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> Value {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn cluster_energy() {
    let dir = setup().unwrap();
    let output = run(env!("CARGO_BIN_EXE_eamkit-cluster-energy"), dir.path(), &[
        "-c", "settings.yaml", "test.frc", "--structure", "trimer.xyz",
    ]);
    let json = stdout_json(&output);

    let energy = json["energy"].as_f64().unwrap();
    let embedding = json["embedding-energy"].as_f64().unwrap();
    let pair = json["pair-energy"].as_f64().unwrap();
    assert_close!(energy, embedding + pair);

    let forces = json["forces"].as_array().unwrap();
    assert_eq!(forces.len(), 3);
    for k in 0..3 {
        let net: f64 = forces.iter().map(|f| f[k].as_f64().unwrap()).sum();
        assert_close!(abs=1e-9, net, 0.0);
    }
    assert_eq!(json["particle-pot"].as_array().unwrap().len(), 3);
    assert_eq!(json["densities"].as_array().unwrap().len(), 3);
}

#[test]
fn cluster_energy_unknown_type() {
    let dir = setup().unwrap();
    std::fs::write(dir.path().join("bad.xyz"), "1\n\nAg 0 0 0\n").unwrap();
    let output = run(env!("CARGO_BIN_EXE_eamkit-cluster-energy"), dir.path(), &[
        "test.frc", "-s", "bad.xyz",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Ag"));
}

#[test]
fn pair_table() {
    let dir = setup().unwrap();
    let output = run(env!("CARGO_BIN_EXE_eamkit-pair-table"), dir.path(), &[
        "--config", "settings.yaml", "test.frc",
    ]);
    let json = stdout_json(&output);

    // Cu, Au and Cu_surf, each with itself and the ones after it
    let tables = json.as_array().unwrap();
    assert_eq!(tables.len(), 6);
    for table in tables {
        assert_eq!(table["cutoff"].as_f64(), Some(2.0));
        assert_eq!(table["r"].as_array().unwrap().len(), 5);
        assert_eq!(table["phi"][0].as_f64(), Some(0.0));
        assert_eq!(table["explicitly-set"].as_bool(), Some(false));
    }
}
