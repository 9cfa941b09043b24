/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! High level code: reading a force field off disk, driving the EAM engine
//! over a cluster of atoms, and the command line programs.

#[macro_use] extern crate log;
#[macro_use] extern crate failure;
#[macro_use] extern crate serde_derive;

pub type FailResult<T> = Result<T, failure::Error>;

mod driver;
mod force_field;
mod ui;
mod xyz;
pub mod entry_points;

pub use crate::driver::{compute_cluster, ClusterOutput};
pub use crate::force_field::{load_force_field, LoadedForceField};
pub use crate::xyz::Xyz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: &'static str,
}

#[cfg(test)]
mod test_util {
    pub fn uniform(a: f64, b: f64) -> f64 { ::rand::random::<f64>() * (b - a) + a }

    pub fn num_derivative(interval: f64, x: f64, mut f: impl FnMut(f64) -> f64) -> f64 {
        (f(x + interval / 2.0) - f(x - interval / 2.0)) / interval
    }
}
