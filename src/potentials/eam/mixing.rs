/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use super::EamAtomData;
use crate::util::max_of;

use eamkit_spline::{CubicSpline, SplineError};
use std::fmt;

/// Converts `Z_i Z_j / r` (elementary charges, Angstroms) to kcal/mol.
pub const CHARGE_CONVERSION: f64 = 331.999296;

/// How the pair term between two different types is formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixingMethod {
    /// Density-weighted average of the two types' own pair potentials.
    Johnson,
    /// A pair potential built from the product of the effective charges.
    Daw,
    Unknown(String),
}

impl MixingMethod {
    /// Case-insensitive.  Never fails; unrecognized names become `Unknown`.
    pub fn parse(s: &str) -> MixingMethod {
        match &s.trim().to_uppercase()[..] {
            "JOHNSON" => MixingMethod::Johnson,
            "DAW" => MixingMethod::Daw,
            _ => MixingMethod::Unknown(s.to_string()),
        }
    }
}

impl fmt::Display for MixingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixingMethod::Johnson => write!(f, "Johnson"),
            MixingMethod::Daw => write!(f, "Daw"),
            MixingMethod::Unknown(s) => write!(f, "unknown ({:?})", s),
        }
    }
}

/// `phi(r) = K Z_a(r) Z_b(r) / r`, tabulated on the finer of the two grids,
/// out to the farthest extent of either type's tables.
///
/// Each effective charge is zero beyond its own type's cutoff, and `phi(0) = 0`.
pub(crate) fn derived_phi(a: &EamAtomData, b: &EamAtomData) -> Result<CubicSpline, SplineError> {
    let rmax = max_of(&[a.rcut, a.nr as f64 * a.dr, b.rcut, b.nr as f64 * b.dr]);
    let dr = f64::min(a.dr, b.dr);
    let nr = (rmax / dr + 0.5) as usize;

    let rs: Vec<f64> = (0..nr).map(|i| i as f64 * dr).collect();
    let phis = rs.iter().enumerate().map(|(i, &r)| match i {
        0 => 0.0,
        _ => {
            let za = if r <= a.rcut { a.z.value_at(r) } else { 0.0 };
            let zb = if r <= b.rcut { b.z.value_at(r) } else { 0.0 };
            CHARGE_CONVERSION * za * zb / r
        },
    }).collect();

    CubicSpline::new(rs, phis)
}

#[test]
fn parse() {
    assert_eq!(MixingMethod::parse("johnson"), MixingMethod::Johnson);
    assert_eq!(MixingMethod::parse("DAW"), MixingMethod::Daw);
    assert_eq!(MixingMethod::parse(" Daw "), MixingMethod::Daw);
    assert_eq!(MixingMethod::parse("Johnsen"), MixingMethod::Unknown("Johnsen".into()));
}
