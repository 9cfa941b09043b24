/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Per-pair and per-particle contexts passed to the engine by the force loop.

use eamkit_array_types::V3;
use eamkit_types::AtomTypeId;
use enum_map::EnumMap;

#[derive(enum_map::Enum)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InteractionFamily {
    Vanderwaals,
    Electrostatic,
    Metallic,
    Hydrogenbonding,
}

/// Energy accumulators, one per interaction family.
pub type PotentialFamilies = EnumMap<InteractionFamily, f64>;

/// Everything the engine reads or accumulates for one ordered pair of atoms.
///
/// The driver copies its per-atom accumulators in, and copies them back out
/// after the call.
#[derive(Debug, Clone)]
pub struct InteractionData {
    pub atypes: (AtomTypeId, AtomTypeId),
    /// Separation vector from atom 1 to atom 2.
    pub d: V3,
    pub rij: f64,
    /// In the density pass, the density each atom contributes at the other's
    /// site (`rho1` comes from atom 1 and belongs to atom 2).  In the force
    /// pass, the total density at each atom.
    pub rho1: f64,
    pub rho2: f64,
    /// Embedding energies and their derivatives from the functional pass.
    pub frho1: f64,
    pub frho2: f64,
    pub dfrho1: f64,
    pub dfrho2: f64,
    /// Force on atom 1.
    pub f1: V3,
    pub pot: PotentialFamilies,
    pub vpair: f64,
    pub particle_pot1: f64,
    pub particle_pot2: f64,
    pub do_particle_pot: bool,
}

impl InteractionData {
    pub fn new(atypes: (AtomTypeId, AtomTypeId), d: V3) -> Self {
        InteractionData {
            atypes, d,
            rij: d.norm(),
            rho1: 0.0, rho2: 0.0,
            frho1: 0.0, frho2: 0.0,
            dfrho1: 0.0, dfrho2: 0.0,
            f1: V3::zero(),
            pot: EnumMap::default(),
            vpair: 0.0,
            particle_pot1: 0.0, particle_pot2: 0.0,
            do_particle_pot: false,
        }
    }
}

/// Everything the engine reads or accumulates for a single atom.
#[derive(Debug, Clone)]
pub struct SelfData {
    pub atype: AtomTypeId,
    /// Total density at this atom, from the density pass.
    pub rho: f64,
    pub frho: f64,
    pub dfrhodrho: f64,
    pub pot: PotentialFamilies,
    pub particle_pot: f64,
    pub do_particle_pot: bool,
}

impl SelfData {
    pub fn new(atype: AtomTypeId, rho: f64) -> Self {
        SelfData {
            atype, rho,
            frho: 0.0,
            dfrhodrho: 0.0,
            pot: EnumMap::default(),
            particle_pot: 0.0,
            do_particle_pot: false,
        }
    }
}
