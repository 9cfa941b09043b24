/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use eamkit_ff_io::{CrossTable, FrcFile, FuncflFile, SearchPath, FORCE_PARAM_PATH};
use eamkit_potentials::{Eam, EamOptions};
use eamkit_tasks_config::ForceFieldOptions;
use eamkit_types::{AtomTypeId, AtomTypeRegistry, RecordingBackend};
use std::path::Path;

/// Everything built from a `.frc` file.
#[derive(Debug)]
pub struct LoadedForceField {
    pub registry: AtomTypeRegistry,
    pub eam: Eam,
    /// What each type reported on completion.
    pub backend: RecordingBackend,
}

impl LoadedForceField {
    pub fn type_named(&self, name: &str) -> FailResult<AtomTypeId> {
        match self.registry.find(name) {
            Some(id) => Ok(id),
            None => bail!("the force field has no atom type named {:?}", name),
        }
    }
}

/// Read a `.frc` file and every potential file it mentions.
///
/// Potential files are looked for next to the `.frc` file, then in
/// `options.force_param_path`, then in `$FORCE_PARAM_PATH`.  All types are
/// completed before returning; the engine's tables are built lazily.
pub fn load_force_field(options: &ForceFieldOptions, frc_path: &Path) -> FailResult<LoadedForceField> {
    let frc = FrcFile::load(frc_path)?;

    let mut search = SearchPath::for_frc(frc_path, options.force_param_path.as_deref());
    search.push_env(FORCE_PARAM_PATH);

    let mut registry = AtomTypeRegistry::new();
    for entry in &frc.atom_types {
        let path = search.resolve(&entry.potential_file)?;
        let funcfl = FuncflFile::load(&path)?;

        let id = registry.add_type(&entry.name, entry.ident)?;
        if funcfl.mass != entry.mass {
            debug!(
                "{}: using the mass from {} ({}) instead of {}",
                entry.name, path.display(), funcfl.mass, entry.mass,
            );
        }
        registry.set_mass(id, funcfl.mass)?;
        registry.eam_mut(id).make_funcfl(funcfl.to_param())?;
    }

    link_base_types(&mut registry, &frc)?;

    let mut backend = RecordingBackend::new();
    registry.complete_all(&mut backend)?;

    let mut eam = Eam::new(EamOptions {
        mixing_method: options.eam_mixing_method.clone(),
        cutoff: options.eam_cutoff,
    });

    for entry in &frc.cross_interactions {
        let (a, b) = &entry.atom_types;
        let path = search.resolve(&entry.table_file)?;
        let table = CrossTable::load(&path)?;
        let find = |name: &str| registry.find(name).ok_or_else(|| format_err!("unknown atom type {:?}", name));
        eam.add_explicit_interaction(find(a)?, find(b)?, table.dr, table.nr, table.phi)?;
    }

    info!(
        "Read {} atom types ({} derived, {} explicit cross interactions) from {}",
        frc.atom_types.len(), frc.base_types.len(), frc.cross_interactions.len(), frc_path.display(),
    );
    Ok(LoadedForceField { registry, eam, backend })
}

// A base's capabilities are copied at link time, so a chain must be linked
// from its root outward.
fn link_base_types(registry: &mut AtomTypeRegistry, frc: &FrcFile) -> FailResult<()> {
    let mut next_ident = registry.ids().filter_map(|id| registry.get(id).ident()).max().unwrap_or(0) + 1;
    for entry in &frc.base_types {
        if registry.find(&entry.name).is_none() {
            registry.add_type(&entry.name, next_ident)?;
            next_ident += 1;
        }
    }

    let mut pending: Vec<_> = frc.base_types.iter().collect();
    while !pending.is_empty() {
        let ready = pending.iter().position(|entry| {
            !pending.iter().any(|other| other.name == entry.base)
        });
        let entry = match ready {
            Some(index) => pending.remove(index),
            None => {
                let names: Vec<_> = pending.iter().map(|e| e.name.as_str()).collect();
                bail!("base types form a cycle among: {}", names.join(", "));
            },
        };

        let find = |name: &str| registry.find(name).ok_or_else(|| format_err!("unknown atom type {:?}", name));
        let (id, base) = (find(&entry.name)?, find(&entry.base)?);
        trace!("{} uses {} as its base", entry.name, entry.base);
        registry.use_base(id, base)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eamkit_potentials::InteractionData;
    use eamkit_array_types::V3;
    use eamkit_assert_close::assert_close;
    use eamkit_types::Registration;
    use tempdir::TempDir;

    fn write_funcfl(dir: &Path, name: &str, mass: f64, z0: f64) {
        let text = format!("\
{name} test potential
29 {mass} 3.615 FCC
5 0.1 5 0.5 2.0
0.0 -0.1 -0.2 -0.3 -0.4
{z0} 3.0 2.0 1.0 0.0
0.5 0.4 0.3 0.2 0.1
", name = name, mass = mass, z0 = z0);
        std::fs::write(dir.join(format!("{}.funcfl", name)), text).unwrap();
    }

    const FRC: &str = "\
! test force field
#AtomTypes
Cu 63.55 Cu.funcfl
Au 196.97 Au.funcfl

#BaseTypes
Cu_surf Cu_bulk
Cu_bulk Cu

#EAMCrossInteractions
Cu Au CuAu.phi
";

    #[test]
    fn load() {
        let dir = TempDir::new("eamkit-tasks").unwrap();
        let params = TempDir::new("eamkit-tasks").unwrap();
        write_funcfl(dir.path(), "Cu", 63.546, 4.0);
        // only found through the configured directory
        write_funcfl(params.path(), "Au", 196.97, 5.0);
        std::fs::write(dir.path().join("CuAu.phi"), "Cu-Au\n3 1.0\n9.0 8.0 7.0\n").unwrap();
        let frc_path = dir.path().join("test.frc");
        std::fs::write(&frc_path, FRC).unwrap();

        let options = ForceFieldOptions {
            force_param_path: Some(params.path().to_owned()),
            ..Default::default()
        };
        let mut ff = load_force_field(&options, &frc_path).unwrap();

        let cu = ff.type_named("Cu").unwrap();
        let au = ff.type_named("Au").unwrap();
        let bulk = ff.type_named("Cu_bulk").unwrap();
        let surf = ff.type_named("Cu_surf").unwrap();
        assert!(ff.type_named("Ag").is_err());

        // the potential file's mass wins
        assert_eq!(ff.registry.mass(cu), 63.546);
        assert_eq!(ff.registry.mass(surf), 63.546);
        assert_eq!(ff.registry.all_your_base(surf), vec![surf, bulk, cu]);
        assert!(ff.registry.is_eam(surf));
        assert_eq!(ff.registry.get(bulk).ident(), Some(3));
        assert_eq!(ff.registry.get(surf).ident(), Some(4));
        assert_eq!(ff.backend.idents(), vec![1, 2, 3, 4]);
        assert!(ff.backend.registrations.iter().any(|r| match r {
            Registration::Eam { ident: 4, .. } => true,
            _ => false,
        }));

        ff.eam.initialize(&ff.registry).unwrap();
        let cross = ff.eam.pair_potential(cu, au).unwrap();
        assert!(cross.explicitly_set);
        assert_close!(cross.phi.value_at(1.0), 8.0);

        let mut idat = InteractionData::new((surf, cu), V3([1.0, 0.0, 0.0]));
        ff.eam.calc_density(&ff.registry, &mut idat).unwrap();
        assert_close!(idat.rho1, 0.3);
        assert_close!(idat.rho2, 0.3);
    }

    #[test]
    fn missing_potential_file() {
        let dir = TempDir::new("eamkit-tasks").unwrap();
        write_funcfl(dir.path(), "Cu", 63.546, 4.0);
        let frc_path = dir.path().join("test.frc");
        std::fs::write(&frc_path, FRC).unwrap();

        let err = load_force_field(&Default::default(), &frc_path).unwrap_err();
        assert!(err.to_string().contains("Au.funcfl"), "{}", err);
    }

    #[test]
    fn base_type_cycle() {
        let dir = TempDir::new("eamkit-tasks").unwrap();
        write_funcfl(dir.path(), "Cu", 63.546, 4.0);
        let frc_path = dir.path().join("test.frc");
        std::fs::write(&frc_path, "#AtomTypes\nCu 63.5 Cu.funcfl\n#BaseTypes\nA B\nB A\n").unwrap();

        let err = load_force_field(&Default::default(), &frc_path).unwrap_err();
        assert!(err.to_string().contains("cycle"), "{}", err);
    }
}
