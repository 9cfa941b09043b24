/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The embedded atom method.
//!
//! The energy of a metal is written as
//!
//! ```text
//! E = sum_i F_i(rho_i) + 1/2 sum_{i != j} phi_ij(r_ij),     rho_i = sum_{j != i} rho_j(r_ij)
//! ```
//!
//! Evaluating it takes three passes over the system, each of which must be
//! complete before the next begins:
//!
//! 1. [`Eam::calc_density`] over every pair, to accumulate `rho_i`;
//! 2. [`Eam::calc_functional`] over every atom, to evaluate `F_i` and `dF_i/drho`;
//! 3. [`Eam::calc_force`] over every ordered pair, for the pair term and the forces.
//!
//! The tables are built once, lazily, on first use.  After that the engine is
//! read-only, and the `&self` forms of the three passes may be called from any
//! number of threads.
//!
//! # Citations
//!
//! * **EAM:** M. S. Daw and M. I. Baskes, Phys. Rev. B 29, 6443 (1984)
//! * **Johnson mixing:** R. A. Johnson, Phys. Rev. B 39, 12554 (1989)

use eamkit_spline::{CubicSpline, SplineError};
use eamkit_types::{AtomTypeId, AtomTypeRegistry, TypeError};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

mod data;
mod mixing;

pub use self::data::{InteractionData, InteractionFamily, PotentialFamilies, SelfData};
pub use self::mixing::MixingMethod;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EamError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("could not build the EAM pair potential for the {a} - {b} interaction")]
    PairTable {
        a: String,
        b: String,
        #[source] source: SplineError,
    },

    #[error("EAM has no data for {0:?}; it was never registered as an EAM type")]
    UnregisteredType(AtomTypeId),

    #[error("EAM could not find mixing data for the {a} - {b} interaction")]
    MissingMixingData { a: String, b: String },

    #[error("EAM force calculation hit a mixing method it doesn't know about: {0:?}")]
    UnknownMixingMethod(String),

    #[error("EAM tables were used before they were initialized")]
    NotInitialized,

    #[error("explicit EAM interactions must be supplied before the tables are initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EamOptions {
    /// `"Johnson"` or `"Daw"` (case-insensitive).  Anything else is only
    /// reported once a force is requested.
    pub mixing_method: String,
    /// Pairs farther apart than this are skipped entirely.
    pub cutoff: Option<f64>,
}

impl Default for EamOptions {
    fn default() -> Self {
        EamOptions { mixing_method: "Johnson".to_string(), cutoff: None }
    }
}

/// Splines derived from the parameters of a single EAM atom type.
#[derive(Debug, Clone)]
pub struct EamAtomData {
    pub name: String,
    pub rho: CubicSpline,
    pub f: CubicSpline,
    pub z: CubicSpline,
    pub rcut: f64,
    pub(crate) dr: f64,
    pub(crate) nr: usize,
}

/// The pair potential between two types.
#[derive(Debug)]
pub struct EamInteraction {
    pub phi: CubicSpline,
    /// Supplied as a table rather than derived from the two types' effective charges.
    pub explicitly_set: bool,
}

/// A tabulated pair potential `phi(i * dr)` for `i in 0..nr`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplicitInteraction {
    pub atypes: (AtomTypeId, AtomTypeId),
    pub dr: f64,
    pub nr: usize,
    pub phi: Vec<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Uninitialized,
    Initialized,
}

#[derive(Debug)]
pub struct Eam {
    options: EamOptions,
    state: State,
    mixing_method: MixingMethod,
    type_data: BTreeMap<AtomTypeId, EamAtomData>,
    // Both orderings of a pair share one Arc.
    mixing: HashMap<(AtomTypeId, AtomTypeId), Arc<EamInteraction>>,
    explicit: Vec<ExplicitInteraction>,
}

impl Eam {
    pub fn new(options: EamOptions) -> Self {
        let mixing_method = MixingMethod::parse(&options.mixing_method);
        Eam {
            options,
            state: State::Uninitialized,
            mixing_method,
            type_data: BTreeMap::new(),
            mixing: HashMap::new(),
            explicit: vec![],
        }
    }

    pub fn set_cutoff_radius(&mut self, cutoff: f64) {
        self.options.cutoff = Some(cutoff);
    }

    pub fn cutoff_radius(&self) -> Option<f64> { self.options.cutoff }

    /// Queue a tabulated pair potential, which takes precedence over the derived one.
    pub fn add_explicit_interaction(
        &mut self,
        a: AtomTypeId,
        b: AtomTypeId,
        dr: f64,
        nr: usize,
        phi: Vec<f64>,
    ) -> Result<(), EamError> {
        self.set_explicit_interactions(vec![ExplicitInteraction { atypes: (a, b), dr, nr, phi }])
    }

    pub fn set_explicit_interactions(
        &mut self,
        interactions: impl IntoIterator<Item=ExplicitInteraction>,
    ) -> Result<(), EamError> {
        if self.is_initialized() {
            return Err(EamError::AlreadyInitialized);
        }
        self.explicit.extend(interactions);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool { self.state == State::Initialized }
    pub fn mixing_method(&self) -> &MixingMethod { &self.mixing_method }
    pub fn num_registered_types(&self) -> usize { self.type_data.len() }
    pub fn atom_data(&self, atype: AtomTypeId) -> Option<&EamAtomData> { self.type_data.get(&atype) }
    pub fn registered_types(&self) -> impl Iterator<Item=AtomTypeId> + '_ { self.type_data.keys().cloned() }

    pub fn pair_potential(&self, a: AtomTypeId, b: AtomTypeId) -> Option<&Arc<EamInteraction>> {
        self.mixing.get(&(a, b))
    }
}

//--------------------------------------------------------------------------------------
// Table construction

impl Eam {
    /// Build every table.  Does nothing if the tables were already built.
    pub fn initialize(&mut self, registry: &AtomTypeRegistry) -> Result<(), EamError> {
        if self.is_initialized() {
            return Ok(());
        }

        self.mixing_method = MixingMethod::parse(&self.options.mixing_method);
        if let MixingMethod::Unknown(method) = &self.mixing_method {
            warn!("Unrecognized EAM mixing method {:?}. Force evaluation will fail.", method);
        }

        for atype in registry.ids() {
            if registry.is_eam(atype) {
                self.add_type(registry, atype)?;
            }
        }

        for interaction in self.explicit.clone() {
            self.apply_explicit_interaction(registry, interaction)?;
        }

        info!(
            "Initialized EAM tables for {} types ({} mixing).",
            self.type_data.len(), self.mixing_method,
        );
        self.state = State::Initialized;
        Ok(())
    }

    fn add_type(&mut self, registry: &AtomTypeRegistry, atype: AtomTypeId) -> Result<(), EamError> {
        if self.type_data.contains_key(&atype) {
            debug!("EAM already had an entry for {}", registry.name(atype));
            return Ok(());
        }

        let adapter = registry.eam(atype);
        let data = EamAtomData {
            name: adapter.name().to_string(),
            rho: adapter.rho_spline()?,
            f: adapter.f_spline()?,
            z: adapter.z_spline()?,
            rcut: adapter.rcut()?,
            dr: adapter.dr()?,
            nr: adapter.nr()?,
        };
        trace!("EAM type {}: rcut = {}, {} r samples", data.name, data.rcut, data.nr);
        self.type_data.insert(atype, data);

        let partners: Vec<_> = self.type_data.keys().cloned().collect();
        for other in partners {
            if self.mixing.get(&(atype, other)).map_or(false, |m| m.explicitly_set) {
                continue;
            }
            let (a, b) = (&self.type_data[&atype], &self.type_data[&other]);
            let phi = mixing::derived_phi(a, b).map_err(|source| EamError::PairTable {
                a: a.name.clone(),
                b: b.name.clone(),
                source,
            })?;
            self.insert_pair((atype, other), EamInteraction { phi, explicitly_set: false });
        }
        Ok(())
    }

    fn apply_explicit_interaction(
        &mut self,
        registry: &AtomTypeRegistry,
        interaction: ExplicitInteraction,
    ) -> Result<(), EamError> {
        let ExplicitInteraction { atypes: (a, b), dr, nr, phi } = interaction;
        self.add_type(registry, a)?;
        self.add_type(registry, b)?;

        let rs = (0..nr).map(|i| i as f64 * dr).collect();
        let phi = CubicSpline::new(rs, phi).map_err(|source| EamError::PairTable {
            a: registry.name(a).to_string(),
            b: registry.name(b).to_string(),
            source,
        })?;
        debug!("Explicit EAM interaction for {} - {}", registry.name(a), registry.name(b));
        self.insert_pair((a, b), EamInteraction { phi, explicitly_set: true });
        Ok(())
    }

    fn insert_pair(&mut self, (a, b): (AtomTypeId, AtomTypeId), interaction: EamInteraction) {
        let interaction = Arc::new(interaction);
        self.mixing.insert((b, a), interaction.clone());
        self.mixing.insert((a, b), interaction);
    }
}

//--------------------------------------------------------------------------------------
// The three passes

impl Eam {
    /// Density pass for one pair.  Builds the tables if necessary.
    pub fn calc_density(&mut self, registry: &AtomTypeRegistry, idat: &mut InteractionData) -> Result<(), EamError> {
        self.initialize(registry)?;
        self.density_contribution(idat)
    }

    /// Functional pass for one atom.  Builds the tables if necessary.
    pub fn calc_functional(&mut self, registry: &AtomTypeRegistry, sdat: &mut SelfData) -> Result<(), EamError> {
        self.initialize(registry)?;
        self.embedding(sdat)
    }

    /// Force pass for one ordered pair.  Builds the tables if necessary.
    pub fn calc_force(&mut self, registry: &AtomTypeRegistry, idat: &mut InteractionData) -> Result<(), EamError> {
        self.initialize(registry)?;
        self.pair_force(idat)
    }

    /// The larger of the two types' cutoffs, or zero for types that are not EAM.
    pub fn suggested_cutoff_radius(
        &mut self,
        registry: &AtomTypeRegistry,
        atypes: (AtomTypeId, AtomTypeId),
    ) -> Result<f64, EamError> {
        self.initialize(registry)?;
        Ok(self.cutoff_radius_for(atypes))
    }

    pub fn cutoff_radius_for(&self, (a, b): (AtomTypeId, AtomTypeId)) -> f64 {
        let rcut = |atype| self.type_data.get(&atype).map_or(0.0, |data| data.rcut);
        f64::max(rcut(a), rcut(b))
    }

    fn check_initialized(&self) -> Result<(), EamError> {
        match self.state {
            State::Initialized => Ok(()),
            State::Uninitialized => Err(EamError::NotInitialized),
        }
    }

    fn data(&self, atype: AtomTypeId) -> Result<&EamAtomData, EamError> {
        self.type_data.get(&atype).ok_or(EamError::UnregisteredType(atype))
    }

    fn beyond_cutoff(&self, rij: f64) -> bool {
        self.options.cutoff.map_or(false, |cutoff| rij > cutoff)
    }

    /// Adds the density contributed by atom 1 to `idat.rho1`, and by atom 2 to `idat.rho2`.
    ///
    /// Each type only contributes inside of its own cutoff.
    pub fn density_contribution(&self, idat: &mut InteractionData) -> Result<(), EamError> {
        self.check_initialized()?;
        if self.beyond_cutoff(idat.rij) {
            return Ok(());
        }

        let data1 = self.data(idat.atypes.0)?;
        let data2 = self.data(idat.atypes.1)?;
        if idat.rij < data1.rcut {
            idat.rho1 += data1.rho.value_at(idat.rij);
        }
        if idat.rij < data2.rcut {
            idat.rho2 += data2.rho.value_at(idat.rij);
        }
        Ok(())
    }

    /// Evaluates `F(rho)` and its derivative at the atom's accumulated density.
    pub fn embedding(&self, sdat: &mut SelfData) -> Result<(), EamError> {
        self.check_initialized()?;
        let data = self.data(sdat.atype)?;

        let (frho, dfrhodrho) = data.f.value_and_derivative_at(sdat.rho);
        sdat.frho = frho;
        sdat.dfrhodrho = dfrhodrho;

        sdat.pot[InteractionFamily::Metallic] += frho;
        if sdat.do_particle_pot {
            sdat.particle_pot += frho;
        }
        Ok(())
    }

    /// Pair energy, and the force on atom 1 from both the pair term and the
    /// embedding terms.
    pub fn pair_force(&self, idat: &mut InteractionData) -> Result<(), EamError> {
        self.check_initialized()?;
        if self.beyond_cutoff(idat.rij) {
            return Ok(());
        }

        let (t1, t2) = idat.atypes;
        let r = idat.rij;
        let data1 = self.data(t1)?;
        let data2 = self.data(t2)?;

        let (mut rha, mut drha, mut pha, mut dpha) = (0.0, 0.0, 0.0, 0.0);
        let (mut rhb, mut drhb, mut phb, mut dphb) = (0.0, 0.0, 0.0, 0.0);
        if r < data1.rcut {
            let (value, deriv) = data1.rho.value_and_derivative_at(r);
            rha = value;
            drha = deriv;
            let (value, deriv) = self.mixer(t1, t1)?.phi.value_and_derivative_at(r);
            pha = value;
            dpha = deriv;
        }
        if r < data2.rcut {
            let (value, deriv) = data2.rho.value_and_derivative_at(r);
            rhb = value;
            drhb = deriv;
            let (value, deriv) = self.mixer(t2, t2)?.phi.value_and_derivative_at(r);
            phb = value;
            dphb = deriv;
        }

        let (phab, dvpdr) = match &self.mixing_method {
            MixingMethod::Johnson => {
                let (mut phab, mut dvpdr) = (0.0, 0.0);
                if r < data1.rcut {
                    phab += 0.5 * (rhb / rha) * pha;
                    dvpdr += 0.5 * ((rhb / rha) * dpha + pha * ((drhb / rha) - (rhb * drha / rha / rha)));
                }
                if r < data2.rcut {
                    phab += 0.5 * (rha / rhb) * phb;
                    dvpdr += 0.5 * ((rha / rhb) * dphb + phb * ((drha / rhb) - (rha * drhb / rhb / rhb)));
                }
                (phab, dvpdr)
            },
            MixingMethod::Daw => self.mixer(t1, t2)?.phi.value_and_derivative_at(r),
            MixingMethod::Unknown(method) => {
                return Err(EamError::UnknownMixingMethod(method.clone()));
            },
        };

        let dudr = drhb * idat.dfrho1 + drha * idat.dfrho2 + dvpdr;
        idat.f1 += idat.d * (dudr / r);

        if idat.do_particle_pot {
            // The energy each atom would lose if the other one vanished,
            // taking away its share of the density.
            idat.particle_pot1 += data2.f.value_at(idat.rho2 - rha) - idat.frho2;
            idat.particle_pot2 += data1.f.value_at(idat.rho1 - rhb) - idat.frho1;
        }

        idat.pot[InteractionFamily::Metallic] += phab;
        idat.vpair += phab;
        Ok(())
    }

    fn mixer(&self, a: AtomTypeId, b: AtomTypeId) -> Result<&EamInteraction, EamError> {
        match self.mixing.get(&(a, b)) {
            Some(mixer) => Ok(mixer),
            None => Err(EamError::MissingMixingData {
                a: self.data(a)?.name.clone(),
                b: self.data(b)?.name.clone(),
            }),
        }
    }
}
