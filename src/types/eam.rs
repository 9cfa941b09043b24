/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! EAM parameter families, and typed access to the ones attached to an atom type.
//!
//! A type's family lives in its `"EAM"` property.  The EVB family additionally
//! carries a set of Morse coupling constants in an `"EVB"` property.

use crate::TypeError;
use crate::capability::Capability;
use crate::property::Property;
use crate::registry::{AtomTypeId, AtomTypeRegistry};

use eamkit_spline::CubicSpline;
use std::fmt;

pub const EAM_PROPERTY: &str = "EAM";
pub const EVB_PROPERTY: &str = "EVB";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LatticeType {
    Fcc,
    Bcc,
    Hcp,
    /// The oxygen families have no lattice.
    Unspecified,
    Other(String),
}

impl LatticeType {
    /// Case-insensitive.
    pub fn parse(s: &str) -> LatticeType {
        match &s.trim().to_uppercase()[..] {
            "FCC" => LatticeType::Fcc,
            "BCC" => LatticeType::Bcc,
            "HCP" => LatticeType::Hcp,
            "" => LatticeType::Unspecified,
            other => LatticeType::Other(other.to_string()),
        }
    }

    /// Lattice constant of a metal with nearest neighbor distance `re`.
    ///
    /// Anything but BCC and HCP is treated as FCC.
    pub fn lattice_constant(&self, re: f64) -> f64 {
        match self {
            LatticeType::Hcp => re,
            LatticeType::Bcc => 2.0 * re / f64::sqrt(3.0),
            _ => 2.0 * re / f64::sqrt(2.0),
        }
    }
}

impl fmt::Display for LatticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatticeType::Fcc => write!(f, "FCC"),
            LatticeType::Bcc => write!(f, "BCC"),
            LatticeType::Hcp => write!(f, "HCP"),
            LatticeType::Unspecified => Ok(()),
            LatticeType::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Tabulated single-element potential in DYNAMO "funcfl" form.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncflParam {
    pub lattice_type: LatticeType,
    pub lattice_constant: f64,
    pub nrho: usize,
    pub drho: f64,
    pub nr: usize,
    pub dr: f64,
    pub rcut: f64,
    /// Effective charge `Z(r)` on the grid `i * dr`.
    pub z: Vec<f64>,
    /// Electron density `rho(r)` on the grid `i * dr`.
    pub rho: Vec<f64>,
    /// Embedding functional `F(rho)` on the grid `i * drho`.
    pub f: Vec<f64>,
}

/// Coefficients shared by all of Zhou's analytic forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ZhouParam {
    pub re: f64,
    pub fe: f64,
    pub alpha: f64,
    pub beta: f64,
    pub a: f64,
    pub b: f64,
    pub kappa: f64,
    pub lambda: f64,
}

/// The embedding function of Zhou's metal potentials.
#[derive(Debug, Clone, PartialEq)]
pub struct ZhouEmbedding {
    pub rhoe: f64,
    pub fn_coeffs: Vec<f64>,
    pub f_coeffs: Vec<f64>,
    pub eta: f64,
    pub f_e: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZhouMetalParam {
    pub lattice_type: LatticeType,
    pub lattice_constant: f64,
    pub zhou: ZhouParam,
    pub embedding: ZhouEmbedding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zhou2004Param {
    pub metal: ZhouMetalParam,
    pub rhos: f64,
    pub rhol: f64,
    pub rhoh: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zhou2005Param {
    pub metal: ZhouMetalParam,
    pub rhos: f64,
    pub f3plus: f64,
    pub f3minus: f64,
}

/// The embedding function of Zhou's 2005 oxygen potential.
#[derive(Debug, Clone, PartialEq)]
pub struct OxygenEmbedding {
    pub gamma: f64,
    pub nu: f64,
    pub orho_limits: Vec<f64>,
    pub orho_e: Vec<f64>,
    pub of: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZhouOxygenParam {
    pub lattice_constant: f64,
    pub zhou: ZhouParam,
    pub embedding: OxygenEmbedding,
}

/// Morse-type coupling constants of the EVB oxygen family.
#[derive(Debug, Clone, PartialEq)]
pub struct EvbParam {
    pub r0: f64,
    pub d0: f64,
    pub beta0: f64,
    pub rc: f64,
    pub c: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EamFamily {
    Funcfl(FuncflParam),
    Zhou2001(ZhouMetalParam),
    Zhou2004(Zhou2004Param),
    Zhou2005(Zhou2005Param),
    Zhou2005Oxygen(ZhouOxygenParam),
    EvbOxygen(ZhouOxygenParam),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EamKind {
    Funcfl,
    Zhou2001,
    Zhou2004,
    Zhou2005,
    Zhou2005Oxygen,
    EvbOxygen,
}

impl fmt::Display for EamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EamKind::Funcfl => "Funcfl",
            EamKind::Zhou2001 => "Zhou2001",
            EamKind::Zhou2004 => "Zhou2004",
            EamKind::Zhou2005 => "Zhou2005",
            EamKind::Zhou2005Oxygen => "Zhou2005Oxygen",
            EamKind::EvbOxygen => "EVB",
        };
        f.write_str(s)
    }
}

impl EamFamily {
    pub fn kind(&self) -> EamKind {
        match self {
            EamFamily::Funcfl(_) => EamKind::Funcfl,
            EamFamily::Zhou2001(_) => EamKind::Zhou2001,
            EamFamily::Zhou2004(_) => EamKind::Zhou2004,
            EamFamily::Zhou2005(_) => EamKind::Zhou2005,
            EamFamily::Zhou2005Oxygen(_) => EamKind::Zhou2005Oxygen,
            EamFamily::EvbOxygen(_) => EamKind::EvbOxygen,
        }
    }

    pub fn lattice_type(&self) -> &LatticeType {
        match self {
            EamFamily::Funcfl(p) => &p.lattice_type,
            EamFamily::Zhou2001(p) => &p.lattice_type,
            EamFamily::Zhou2004(p) => &p.metal.lattice_type,
            EamFamily::Zhou2005(p) => &p.metal.lattice_type,
            EamFamily::Zhou2005Oxygen(_) |
            EamFamily::EvbOxygen(_) => &LatticeType::Unspecified,
        }
    }

    pub fn lattice_constant(&self) -> f64 {
        match self {
            EamFamily::Funcfl(p) => p.lattice_constant,
            EamFamily::Zhou2001(p) => p.lattice_constant,
            EamFamily::Zhou2004(p) => p.metal.lattice_constant,
            EamFamily::Zhou2005(p) => p.metal.lattice_constant,
            EamFamily::Zhou2005Oxygen(p) |
            EamFamily::EvbOxygen(p) => p.lattice_constant,
        }
    }
}

impl AtomTypeRegistry {
    pub fn eam(&self, id: AtomTypeId) -> EamAdapter<'_> { EamAdapter { registry: self, id } }
    pub fn eam_mut(&mut self, id: AtomTypeId) -> EamAdapterMut<'_> { EamAdapterMut { registry: self, id } }
}

/// Read access to the EAM parameters of an atom type.
///
/// Every getter fails if the type is not EAM, or if its family does not have
/// the requested parameter.
#[derive(Copy, Clone)]
pub struct EamAdapter<'a> {
    registry: &'a AtomTypeRegistry,
    id: AtomTypeId,
}

impl<'a> EamAdapter<'a> {
    pub fn id(&self) -> AtomTypeId { self.id }
    pub fn name(&self) -> &'a str { self.registry.name(self.id) }

    pub fn is_eam(&self) -> bool { self.registry.is_eam(self.id) }

    pub fn eam_param(&self) -> Result<&'a EamFamily, TypeError> {
        if !self.is_eam() {
            return Err(TypeError::NotEam(self.name().to_string()));
        }
        match self.registry.property(self.id, EAM_PROPERTY) {
            Some(Property::Eam(family)) => Ok(family),
            Some(_) => Err(TypeError::WrongPayload {
                atom_type: self.name().to_string(),
                property: EAM_PROPERTY.to_string(),
                expected: "EAM parameters",
            }),
            None => Err(TypeError::MissingParameters {
                atom_type: self.name().to_string(),
                property: EAM_PROPERTY,
            }),
        }
    }

    pub fn eam_kind(&self) -> Result<EamKind, TypeError> { Ok(self.eam_param()?.kind()) }
    pub fn lattice_type(&self) -> Result<&'a LatticeType, TypeError> { Ok(self.eam_param()?.lattice_type()) }
    pub fn lattice_constant(&self) -> Result<f64, TypeError> { Ok(self.eam_param()?.lattice_constant()) }

    fn wrong_family(&self, expected: &'static str, found: &EamFamily) -> TypeError {
        TypeError::WrongFamily {
            atom_type: self.name().to_string(),
            expected,
            found: found.kind(),
        }
    }

    pub fn funcfl(&self) -> Result<&'a FuncflParam, TypeError> {
        match self.eam_param()? {
            EamFamily::Funcfl(p) => Ok(p),
            other => Err(self.wrong_family("Funcfl", other)),
        }
    }

    /// Coefficients common to every Zhou family (including oxygen and EVB).
    pub fn zhou(&self) -> Result<&'a ZhouParam, TypeError> {
        match self.eam_param()? {
            EamFamily::Zhou2001(p) => Ok(&p.zhou),
            EamFamily::Zhou2004(p) => Ok(&p.metal.zhou),
            EamFamily::Zhou2005(p) => Ok(&p.metal.zhou),
            EamFamily::Zhou2005Oxygen(p) |
            EamFamily::EvbOxygen(p) => Ok(&p.zhou),
            other => Err(self.wrong_family("Zhou", other)),
        }
    }

    fn zhou_metal(&self) -> Result<&'a ZhouMetalParam, TypeError> {
        match self.eam_param()? {
            EamFamily::Zhou2001(p) => Ok(p),
            EamFamily::Zhou2004(p) => Ok(&p.metal),
            EamFamily::Zhou2005(p) => Ok(&p.metal),
            other => Err(self.wrong_family("Zhou2001, Zhou2004 or Zhou2005", other)),
        }
    }

    fn zhou2004(&self) -> Result<&'a Zhou2004Param, TypeError> {
        match self.eam_param()? {
            EamFamily::Zhou2004(p) => Ok(p),
            other => Err(self.wrong_family("Zhou2004", other)),
        }
    }

    fn zhou2005(&self) -> Result<&'a Zhou2005Param, TypeError> {
        match self.eam_param()? {
            EamFamily::Zhou2005(p) => Ok(p),
            other => Err(self.wrong_family("Zhou2005", other)),
        }
    }

    fn oxygen(&self) -> Result<&'a OxygenEmbedding, TypeError> {
        match self.eam_param()? {
            EamFamily::Zhou2005Oxygen(p) |
            EamFamily::EvbOxygen(p) => Ok(&p.embedding),
            other => Err(self.wrong_family("Zhou2005Oxygen", other)),
        }
    }

    pub fn evb(&self) -> Result<&'a EvbParam, TypeError> {
        match self.eam_param()? {
            EamFamily::EvbOxygen(_) => {},
            other => return Err(self.wrong_family("EVB", other)),
        }
        match self.registry.property(self.id, EVB_PROPERTY) {
            Some(Property::Evb(p)) => Ok(p),
            Some(_) => Err(TypeError::WrongPayload {
                atom_type: self.name().to_string(),
                property: EVB_PROPERTY.to_string(),
                expected: "EVB parameters",
            }),
            None => Err(TypeError::MissingParameters {
                atom_type: self.name().to_string(),
                property: EVB_PROPERTY,
            }),
        }
    }

    // Funcfl

    pub fn nrho(&self) -> Result<usize, TypeError> { Ok(self.funcfl()?.nrho) }
    pub fn drho(&self) -> Result<f64, TypeError> { Ok(self.funcfl()?.drho) }
    pub fn nr(&self) -> Result<usize, TypeError> { Ok(self.funcfl()?.nr) }
    pub fn dr(&self) -> Result<f64, TypeError> { Ok(self.funcfl()?.dr) }
    pub fn rcut(&self) -> Result<f64, TypeError> { Ok(self.funcfl()?.rcut) }
    pub fn z_values(&self) -> Result<&'a [f64], TypeError> { Ok(&self.funcfl()?.z) }
    pub fn rho_values(&self) -> Result<&'a [f64], TypeError> { Ok(&self.funcfl()?.rho) }
    pub fn f_values(&self) -> Result<&'a [f64], TypeError> { Ok(&self.funcfl()?.f) }

    /// `Z(r)`, tabulated on `i * dr`.
    pub fn z_spline(&self) -> Result<CubicSpline, TypeError> {
        let p = self.funcfl()?;
        self.table_spline("Z(r)", p.nr, p.dr, &p.z)
    }

    /// `rho(r)`, tabulated on `i * dr`.
    pub fn rho_spline(&self) -> Result<CubicSpline, TypeError> {
        let p = self.funcfl()?;
        self.table_spline("rho(r)", p.nr, p.dr, &p.rho)
    }

    /// `F(rho)`, tabulated on `i * drho`.
    pub fn f_spline(&self) -> Result<CubicSpline, TypeError> {
        let p = self.funcfl()?;
        self.table_spline("F(rho)", p.nrho, p.drho, &p.f)
    }

    fn table_spline(&self, table: &'static str, n: usize, dx: f64, ys: &[f64]) -> Result<CubicSpline, TypeError> {
        let xs = (0..n).map(|i| i as f64 * dx).collect();
        CubicSpline::new(xs, ys.to_vec())
            .map_err(|source| TypeError::Table { atom_type: self.name().to_string(), table, source })
    }

    // Zhou

    pub fn re(&self) -> Result<f64, TypeError> { Ok(self.zhou()?.re) }
    pub fn fe(&self) -> Result<f64, TypeError> { Ok(self.zhou()?.fe) }
    pub fn alpha(&self) -> Result<f64, TypeError> { Ok(self.zhou()?.alpha) }
    pub fn beta(&self) -> Result<f64, TypeError> { Ok(self.zhou()?.beta) }
    pub fn a(&self) -> Result<f64, TypeError> { Ok(self.zhou()?.a) }
    pub fn b(&self) -> Result<f64, TypeError> { Ok(self.zhou()?.b) }
    pub fn kappa(&self) -> Result<f64, TypeError> { Ok(self.zhou()?.kappa) }
    pub fn lambda(&self) -> Result<f64, TypeError> { Ok(self.zhou()?.lambda) }

    pub fn rhoe(&self) -> Result<f64, TypeError> { Ok(self.zhou_metal()?.embedding.rhoe) }
    pub fn fn_coeffs(&self) -> Result<&'a [f64], TypeError> { Ok(&self.zhou_metal()?.embedding.fn_coeffs) }
    pub fn f_coeffs(&self) -> Result<&'a [f64], TypeError> { Ok(&self.zhou_metal()?.embedding.f_coeffs) }
    pub fn eta(&self) -> Result<f64, TypeError> { Ok(self.zhou_metal()?.embedding.eta) }
    pub fn f_e(&self) -> Result<f64, TypeError> { Ok(self.zhou_metal()?.embedding.f_e) }

    pub fn rhos(&self) -> Result<f64, TypeError> {
        match self.eam_param()? {
            EamFamily::Zhou2004(p) => Ok(p.rhos),
            EamFamily::Zhou2005(p) => Ok(p.rhos),
            other => Err(self.wrong_family("Zhou2004 or Zhou2005", other)),
        }
    }

    pub fn rhol(&self) -> Result<f64, TypeError> { Ok(self.zhou2004()?.rhol) }
    pub fn rhoh(&self) -> Result<f64, TypeError> { Ok(self.zhou2004()?.rhoh) }
    pub fn f3plus(&self) -> Result<f64, TypeError> { Ok(self.zhou2005()?.f3plus) }
    pub fn f3minus(&self) -> Result<f64, TypeError> { Ok(self.zhou2005()?.f3minus) }

    pub fn gamma(&self) -> Result<f64, TypeError> { Ok(self.oxygen()?.gamma) }
    pub fn nu(&self) -> Result<f64, TypeError> { Ok(self.oxygen()?.nu) }
    pub fn orho_limits(&self) -> Result<&'a [f64], TypeError> { Ok(&self.oxygen()?.orho_limits) }
    pub fn orho_e(&self) -> Result<&'a [f64], TypeError> { Ok(&self.oxygen()?.orho_e) }
    pub fn of(&self) -> Result<&'a [Vec<f64>], TypeError> { Ok(&self.oxygen()?.of) }

    // EVB

    pub fn r_morse(&self) -> Result<f64, TypeError> { Ok(self.evb()?.r0) }
    pub fn d_morse(&self) -> Result<f64, TypeError> { Ok(self.evb()?.d0) }
    pub fn beta_morse(&self) -> Result<f64, TypeError> { Ok(self.evb()?.beta0) }
    pub fn coupling(&self) -> Result<f64, TypeError> { Ok(self.evb()?.c) }
    pub fn r_coupling(&self) -> Result<f64, TypeError> { Ok(self.evb()?.rc) }
    pub fn sigma_coupling(&self) -> Result<f64, TypeError> { Ok(self.evb()?.sigma) }
}

/// Attaches EAM families to an atom type.
///
/// Each `make_*` method discards whatever EAM family the type had before.
pub struct EamAdapterMut<'a> {
    registry: &'a mut AtomTypeRegistry,
    id: AtomTypeId,
}

impl<'a> EamAdapterMut<'a> {
    pub fn as_ref(&self) -> EamAdapter<'_> { self.registry.eam(self.id) }

    fn attach(&mut self, family: EamFamily, evb: Option<EvbParam>) -> Result<(), TypeError> {
        let id = self.id;
        self.registry.remove_property(id, EAM_PROPERTY)?;
        self.registry.remove_property(id, EVB_PROPERTY)?;

        trace!("attaching {} parameters to {}", family.kind(), self.registry.name(id));
        self.registry.add_property(id, EAM_PROPERTY, Property::Eam(family))?;
        if let Some(evb) = evb {
            self.registry.add_property(id, EVB_PROPERTY, Property::Evb(evb))?;
        }
        self.registry.set_capability(id, Capability::Eam, true)
    }

    pub fn make_funcfl(&mut self, param: FuncflParam) -> Result<(), TypeError> {
        self.attach(EamFamily::Funcfl(param), None)
    }

    pub fn make_zhou2001(&mut self, lattice_type: &str, zhou: ZhouParam, embedding: ZhouEmbedding) -> Result<(), TypeError> {
        let metal = zhou_metal(lattice_type, zhou, embedding);
        self.attach(EamFamily::Zhou2001(metal), None)
    }

    pub fn make_zhou2004(
        &mut self,
        lattice_type: &str,
        zhou: ZhouParam,
        embedding: ZhouEmbedding,
        rhos: f64,
        rhol: f64,
        rhoh: f64,
    ) -> Result<(), TypeError> {
        let metal = zhou_metal(lattice_type, zhou, embedding);
        self.attach(EamFamily::Zhou2004(Zhou2004Param { metal, rhos, rhol, rhoh }), None)
    }

    pub fn make_zhou2005(
        &mut self,
        lattice_type: &str,
        zhou: ZhouParam,
        embedding: ZhouEmbedding,
        rhos: f64,
        f3plus: f64,
        f3minus: f64,
    ) -> Result<(), TypeError> {
        let metal = zhou_metal(lattice_type, zhou, embedding);
        self.attach(EamFamily::Zhou2005(Zhou2005Param { metal, rhos, f3plus, f3minus }), None)
    }

    pub fn make_zhou2005_oxygen(&mut self, zhou: ZhouParam, embedding: OxygenEmbedding) -> Result<(), TypeError> {
        let lattice_constant = zhou.re;
        let param = ZhouOxygenParam { lattice_constant, zhou, embedding };
        self.attach(EamFamily::Zhou2005Oxygen(param), None)
    }

    pub fn make_evb_oxygen(&mut self, evb: EvbParam, zhou: ZhouParam, embedding: OxygenEmbedding) -> Result<(), TypeError> {
        let lattice_constant = zhou.re;
        let param = ZhouOxygenParam { lattice_constant, zhou, embedding };
        self.attach(EamFamily::EvbOxygen(param), Some(evb))
    }
}

fn zhou_metal(lattice_type: &str, zhou: ZhouParam, embedding: ZhouEmbedding) -> ZhouMetalParam {
    let lattice_type = match LatticeType::parse(lattice_type) {
        LatticeType::Unspecified => LatticeType::Fcc,
        other => other,
    };
    let lattice_constant = lattice_type.lattice_constant(zhou.re);
    ZhouMetalParam { lattice_type, lattice_constant, zhou, embedding }
}
