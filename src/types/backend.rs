/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::eam::{EamFamily, EamKind};
use crate::property::{LjParam, ScParam};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct BackendError(pub String);

/// Lower-level numeric code that must learn about every completed atom type.
///
/// [`AtomTypeRegistry::complete`](crate::AtomTypeRegistry::complete) calls
/// `register_type` once, followed by one call for each applicable parameter set.
pub trait NumericBackend {
    fn register_type(&mut self, ident: u32, name: &str) -> Result<(), BackendError>;

    fn register_lennard_jones(&mut self, _ident: u32, _param: &LjParam) -> Result<(), BackendError>
    { Ok(()) }

    fn register_electrostatic(&mut self, _ident: u32) -> Result<(), BackendError>
    { Ok(()) }

    fn register_charge(&mut self, _ident: u32, _charge: f64) -> Result<(), BackendError>
    { Ok(()) }

    fn register_eam(&mut self, _ident: u32, _param: &EamFamily) -> Result<(), BackendError>
    { Ok(()) }

    fn register_sutton_chen(&mut self, _ident: u32, _param: &ScParam) -> Result<(), BackendError>
    { Ok(()) }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Type { ident: u32, name: String },
    LennardJones { ident: u32, param: LjParam },
    Electrostatic { ident: u32 },
    Charge { ident: u32, charge: f64 },
    Eam { ident: u32, kind: EamKind },
    SuttonChen { ident: u32, param: ScParam },
}

/// A backend that accepts everything and remembers what it was told, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub registrations: Vec<Registration>,
}

impl RecordingBackend {
    pub fn new() -> Self { Default::default() }

    pub fn idents(&self) -> Vec<u32> {
        self.registrations.iter()
            .filter_map(|r| match *r {
                Registration::Type { ident, .. } => Some(ident),
                _ => None,
            })
            .collect()
    }
}

impl NumericBackend for RecordingBackend {
    fn register_type(&mut self, ident: u32, name: &str) -> Result<(), BackendError> {
        self.registrations.push(Registration::Type { ident, name: name.to_string() });
        Ok(())
    }

    fn register_lennard_jones(&mut self, ident: u32, param: &LjParam) -> Result<(), BackendError> {
        self.registrations.push(Registration::LennardJones { ident, param: param.clone() });
        Ok(())
    }

    fn register_electrostatic(&mut self, ident: u32) -> Result<(), BackendError> {
        self.registrations.push(Registration::Electrostatic { ident });
        Ok(())
    }

    fn register_charge(&mut self, ident: u32, charge: f64) -> Result<(), BackendError> {
        self.registrations.push(Registration::Charge { ident, charge });
        Ok(())
    }

    fn register_eam(&mut self, ident: u32, param: &EamFamily) -> Result<(), BackendError> {
        self.registrations.push(Registration::Eam { ident, kind: param.kind() });
        Ok(())
    }

    fn register_sutton_chen(&mut self, ident: u32, param: &ScParam) -> Result<(), BackendError> {
        self.registrations.push(Registration::SuttonChen { ident, param: param.clone() });
        Ok(())
    }
}
