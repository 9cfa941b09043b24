/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::eam::{EamFamily, EvbParam};

#[derive(Debug, Clone, PartialEq)]
pub struct LjParam {
    pub epsilon: f64,
    pub sigma: f64,
    pub soft_pot: bool,
}

/// Sutton-Chen parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ScParam {
    pub c: f64,
    pub m: f64,
    pub n: f64,
    pub alpha: f64,
    pub epsilon: f64,
}

/// A named parameter block attached to an atom type.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    LennardJones(LjParam),
    Charge(f64),
    SuttonChen(ScParam),
    Eam(EamFamily),
    Evb(EvbParam),
    Scalar(f64),
    Text(String),
}

impl Property {
    /// Human readable name of the payload shape, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Property::LennardJones(_) => "Lennard-Jones parameters",
            Property::Charge(_) => "a charge",
            Property::SuttonChen(_) => "Sutton-Chen parameters",
            Property::Eam(_) => "EAM parameters",
            Property::Evb(_) => "EVB parameters",
            Property::Scalar(_) => "a scalar",
            Property::Text(_) => "text",
        }
    }
}
