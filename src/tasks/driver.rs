/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Drives the three EAM passes over a finite cluster (no periodic images).

use crate::FailResult;

use eamkit_array_types::V3;
use eamkit_potentials::{Eam, InteractionData, SelfData};
use eamkit_types::{AtomTypeId, AtomTypeRegistry};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterOutput {
    pub energy: f64,
    pub embedding_energy: f64,
    pub pair_energy: f64,
    pub forces: Vec<V3>,
    /// Total density at each atom.
    pub densities: Vec<f64>,
    /// Each atom's share of the energy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_pot: Option<Vec<f64>>,
}

pub fn compute_cluster(
    eam: &mut Eam,
    registry: &AtomTypeRegistry,
    carts: &[V3],
    types: &[AtomTypeId],
    do_particle_pot: bool,
) -> FailResult<ClusterOutput> {
    ensure!(carts.len() == types.len(), "{} positions but {} types", carts.len(), types.len());
    let n = carts.len();

    // Density pass, each unordered pair once.
    let mut rho = vec![0.0; n];
    for i in 0..n {
        for j in i + 1..n {
            let mut idat = InteractionData::new((types[i], types[j]), carts[j] - carts[i]);
            eam.calc_density(registry, &mut idat)?;
            rho[j] += idat.rho1;
            rho[i] += idat.rho2;
        }
    }

    // Functional pass.
    let mut embedding_energy = 0.0;
    let mut frho = vec![0.0; n];
    let mut dfrho = vec![0.0; n];
    let mut particle_pot = vec![0.0; n];
    for i in 0..n {
        let mut sdat = SelfData::new(types[i], rho[i]);
        sdat.do_particle_pot = do_particle_pot;
        eam.calc_functional(registry, &mut sdat)?;
        frho[i] = sdat.frho;
        dfrho[i] = sdat.dfrhodrho;
        particle_pot[i] += sdat.particle_pot;
        embedding_energy += sdat.frho;
    }
    trace!("embedding energy: {}", embedding_energy);

    // Force pass, over ordered pairs so that each visit yields the force on atom i.
    let mut pair_energy = 0.0;
    let mut forces = vec![V3::zero(); n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let mut idat = InteractionData::new((types[i], types[j]), carts[j] - carts[i]);
            idat.rho1 = rho[i];
            idat.rho2 = rho[j];
            idat.frho1 = frho[i];
            idat.frho2 = frho[j];
            idat.dfrho1 = dfrho[i];
            idat.dfrho2 = dfrho[j];
            idat.do_particle_pot = do_particle_pot;
            eam.calc_force(registry, &mut idat)?;

            forces[i] += idat.f1;
            pair_energy += 0.5 * idat.vpair;
            particle_pot[i] += 0.5 * (idat.vpair + idat.particle_pot1);
            particle_pot[j] += 0.5 * idat.particle_pot2;
        }
    }

    let energy = embedding_energy + pair_energy;
    debug!("{} atoms: E = {} (embedding {}, pair {})", n, energy, embedding_energy, pair_energy);
    Ok(ClusterOutput {
        energy,
        embedding_energy,
        pair_energy,
        forces,
        densities: rho,
        particle_pot: match do_particle_pot {
            true => Some(particle_pot),
            false => None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{num_derivative, uniform};

    use eamkit_assert_close::assert_close;
    use eamkit_potentials::EamOptions;
    use eamkit_types::eam::{FuncflParam, LatticeType};

    // Smooth tables, with every density and distance of the test clusters inside them.
    fn smooth_funcfl(scale: f64) -> FuncflParam {
        let (nr, dr) = (11, 0.3);
        let (nrho, drho) = (21, 0.25);
        let rs = (0..nr).map(|i| i as f64 * dr);
        let rhos = (0..nrho).map(|i| i as f64 * drho);
        FuncflParam {
            lattice_type: LatticeType::Fcc,
            lattice_constant: 3.6,
            nrho, drho, nr, dr,
            rcut: 2.8,
            z: rs.clone().map(|r| scale * 1.5 * (1.0 - r / 3.0).powi(2)).collect(),
            rho: rs.map(|r| scale * 0.8 * f64::exp(-r)).collect(),
            f: rhos.map(|rho| rho * rho - 2.0 * rho).collect(),
        }
    }

    fn registry() -> (AtomTypeRegistry, AtomTypeId, AtomTypeId) {
        let mut reg = AtomTypeRegistry::new();
        let a = reg.add_type("A", 1).unwrap();
        let b = reg.add_type("B", 2).unwrap();
        reg.eam_mut(a).make_funcfl(smooth_funcfl(1.0)).unwrap();
        reg.eam_mut(b).make_funcfl(smooth_funcfl(1.2)).unwrap();
        (reg, a, b)
    }

    // A tetrahedron with edges between about 1.6 and 2.2.
    fn cluster() -> Vec<V3> {
        let jitter = || V3::from_fn(|_| uniform(-0.05, 0.05));
        vec![
            V3([0.0, 0.0, 0.0]) + jitter(),
            V3([1.9, 0.0, 0.0]) + jitter(),
            V3([0.95, 1.6, 0.0]) + jitter(),
            V3([0.95, 0.55, 1.5]) + jitter(),
        ]
    }

    fn check_forces(method: &str) {
        let (reg, a, b) = registry();
        let types = vec![a, b, a, b];
        let carts = cluster();
        let mut eam = Eam::new(EamOptions { mixing_method: method.into(), cutoff: None });

        let out = compute_cluster(&mut eam, &reg, &carts, &types, false).unwrap();
        for atom in 0..carts.len() {
            for k in 0..3 {
                let energy_at = |x: f64| {
                    let mut carts = carts.clone();
                    carts[atom][k] = x;
                    compute_cluster(&mut eam, &reg, &carts, &types, false).unwrap().energy
                };
                let numerical = -num_derivative(1e-5, carts[atom][k], energy_at);
                assert_close!(rel=1e-5, abs=1e-7, out.forces[atom][k], numerical);
            }
        }
    }

    #[test]
    fn johnson_forces_are_energy_gradient() { check_forces("Johnson"); }

    #[test]
    fn daw_forces_are_energy_gradient() { check_forces("Daw"); }

    #[test]
    fn energy_accounting() {
        let (reg, a, b) = registry();
        let types = vec![a, b, b, a];
        let carts = cluster();
        let mut eam = Eam::new(Default::default());

        let out = compute_cluster(&mut eam, &reg, &carts, &types, true).unwrap();
        assert_close!(out.energy, out.embedding_energy + out.pair_energy);

        let net_force = out.forces.iter().fold(V3::zero(), |acc, &f| acc + f);
        assert_close!(abs=1e-9, net_force, V3::zero());

        // densities are pairwise sums of the other atoms' contributions
        let mut expected = 0.0;
        for j in 1..4 {
            let data = eam.atom_data(types[j]).unwrap();
            expected += data.rho.value_at((carts[j] - carts[0]).norm());
        }
        assert_close!(out.densities[0], expected);

        let particle_pot = out.particle_pot.unwrap();
        assert_eq!(particle_pot.len(), 4);
        assert!(particle_pot.iter().all(|x| x.is_finite()));

        let out = compute_cluster(&mut eam, &reg, &carts, &types, false).unwrap();
        assert_eq!(out.particle_pot, None);
    }

    #[test]
    fn isolated_atoms() {
        let (reg, a, b) = registry();
        let mut eam = Eam::new(Default::default());
        let carts = vec![V3([0.0; 3]), V3([10.0, 0.0, 0.0])];
        let out = compute_cluster(&mut eam, &reg, &carts, &[a, b], false).unwrap();
        assert_eq!(out.densities, vec![0.0, 0.0]);
        assert_eq!(out.pair_energy, 0.0);
        assert_eq!(out.forces, vec![V3::zero(); 2]);
        // F(0) for both types
        assert_close!(out.energy, 0.0);
    }

    #[test]
    fn mismatched_lengths() {
        let (reg, a, _) = registry();
        let mut eam = Eam::new(Default::default());
        assert!(compute_cluster(&mut eam, &reg, &[V3::zero()], &[a, a], false).is_err());
    }
}
