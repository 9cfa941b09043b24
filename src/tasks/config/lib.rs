/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

// Crate where serde_yaml code for the 'tasks' crate is monomorphized.
//
// The functions here also make use of serde_ignored to catch typos in the config.

// NOTE: Please make sure to use the YamlRead trait!
//       DO NOT USE serde_yaml::from_{reader,value,etc.} OUTSIDE THIS CRATE.

#[macro_use] extern crate serde_derive;
#[macro_use] extern crate log;

use std::io::Read;
use std::path::PathBuf;

/// Provides an alternative to serde_yaml::from_reader where all of the
/// expensive codegen has already been performed in this crate.
pub trait YamlRead: for<'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, serde_yaml::Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, serde_yaml::Error> {
        // serde_ignored needs a Deserializer, and serde_yaml only gives us one for Value.
        Self::from_value(value_from_dyn_reader(r)?)
    }

    fn from_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error>;
}

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn from_value(value: serde_yaml::Value) -> Result<$Type, serde_yaml::Error> {
                serde_ignored::deserialize(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                )
            }
        }
    };
}

derive_yaml_read!{serde_yaml::Value}

fn value_from_dyn_reader(r: &mut dyn Read) -> Result<serde_yaml::Value, serde_yaml::Error>
{ serde_yaml::from_reader(r) }

/// Root settings object.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default)]
    pub force_field: ForceFieldOptions,

    #[serde(default)]
    pub driver: DriverSettings,
}
derive_yaml_read!{Settings}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ForceFieldOptions {
    /// How the pair term between unlike types is formed: `Johnson` or `Daw`.
    ///
    /// Read case-insensitively.  Anything else is accepted here, and only
    /// rejected once forces are computed.
    #[serde(default = "_force_field__eam_mixing_method")]
    pub eam_mixing_method: String,

    /// Pairs farther apart than this never interact, regardless of the
    /// cutoffs in the potential files.
    #[serde(default)]
    pub eam_cutoff: Option<f64>,

    /// Directory searched for potential files that are not found next to
    /// the `.frc` file.  `$FORCE_PARAM_PATH` is searched after this.
    #[serde(default)]
    pub force_param_path: Option<PathBuf>,
}
fn _force_field__eam_mixing_method() -> String { "Johnson".to_string() }

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct DriverSettings {
    /// Also report each atom's share of the energy.
    #[serde(default)]
    pub particle_pot: bool,

    /// Number of samples written per pair potential by `eamkit-pair-table`.
    #[serde(default = "_driver__table_points")]
    pub table_points: usize,
}
fn _driver__table_points() -> usize { 101 }

// --------------------------------------------------------

impl Default for Settings {
    fn default() -> Self { from_empty_mapping().unwrap() }
}

impl Default for ForceFieldOptions {
    fn default() -> Self { from_empty_mapping().unwrap() }
}

impl Default for DriverSettings {
    fn default() -> Self { from_empty_mapping().unwrap() }
}

fn from_empty_mapping<T: for<'de> serde::Deserialize<'de>>() -> serde_yaml::Result<T> {
    use serde_yaml::{from_value, Value, Mapping};
    from_value(Value::Mapping(Mapping::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // (fails if a field has neither a default nor an Option type)
        let settings = Settings::default();
        assert_eq!(settings.force_field.eam_mixing_method, "Johnson");
        assert_eq!(settings.force_field.eam_cutoff, None);
        assert_eq!(settings.driver.particle_pot, false);
    }

    #[test]
    fn read() {
        let text = "\
force-field:
  eam-mixing-method: daw
  eam-cutoff: 6.5
  force-param-path: /opt/potentials
driver:
  particle-pot: true
";
        let settings = Settings::from_reader(text.as_bytes()).unwrap();
        assert_eq!(settings.force_field, ForceFieldOptions {
            eam_mixing_method: "daw".into(),
            eam_cutoff: Some(6.5),
            force_param_path: Some("/opt/potentials".into()),
        });
        assert!(settings.driver.particle_pot);
        assert_eq!(settings.driver.table_points, 101);
    }

    #[test]
    fn typos_are_not_fatal() {
        let text = "force-field:\n  eam-mixing-methd: Daw\n";
        let settings = Settings::from_reader(text.as_bytes()).unwrap();
        assert_eq!(settings.force_field.eam_mixing_method, "Johnson");
    }

    #[test]
    fn unknown_mixing_methods_are_kept() {
        let text = "force-field: { eam-mixing-method: Bogus }";
        let settings = Settings::from_reader(text.as_bytes()).unwrap();
        assert_eq!(settings.force_field.eam_mixing_method, "Bogus");
    }
}
