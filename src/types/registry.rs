/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::TypeError;
use crate::backend::{BackendError, NumericBackend};
use crate::capability::{Capability, MergePolicy};
use crate::property::Property;

use enum_map::EnumMap;
use std::collections::{BTreeMap, HashMap};

/// Index of an atom type in an [`AtomTypeRegistry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomTypeId(usize);

impl AtomTypeId {
    pub fn index(self) -> usize { self.0 }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TypeState {
    UnderConstruction,
    /// Registered with a numeric backend.  No further modification is possible.
    Completed,
}

/// A species definition.
///
/// Only the data stored directly on this type is visible here; anything that may be
/// inherited from a base type must be queried through the registry.
#[derive(Debug, Clone)]
pub struct AtomType {
    ident: Option<u32>,
    name: String,
    flags: EnumMap<Capability, bool>,
    owned: EnumMap<Capability, bool>,
    // `Some` iff set locally.
    mass: Option<f64>,
    // A property is locally owned iff it is stored here.
    properties: BTreeMap<String, Property>,
    base: Option<AtomTypeId>,
    zigs: Vec<AtomTypeId>,
    state: TypeState,
}

impl AtomType {
    pub fn new(name: &str, ident: u32) -> AtomType {
        AtomType { ident: Some(ident), name: name.to_string(), ..AtomType::blank() }
    }

    fn blank() -> AtomType {
        AtomType {
            ident: None,
            name: String::new(),
            flags: EnumMap::default(),
            owned: EnumMap::default(),
            mass: None,
            properties: BTreeMap::new(),
            base: None,
            zigs: vec![],
            state: TypeState::UnderConstruction,
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn ident(&self) -> Option<u32> { self.ident }
    pub fn state(&self) -> TypeState { self.state }
    pub fn base(&self) -> Option<AtomTypeId> { self.base }
    pub fn zigs(&self) -> &[AtomTypeId] { &self.zigs }

    /// Whether the capability was set on this type itself.
    pub fn owns(&self, capability: Capability) -> bool { self.owned[capability] }

    pub fn local_property(&self, name: &str) -> Option<&Property> { self.properties.get(name) }

    // Only meaningful for types that are not in a registry yet.
    pub fn set_name(&mut self, name: &str) { self.name = name.to_string(); }
    pub fn set_ident(&mut self, ident: u32) { self.ident = Some(ident); }
}

/// Owner of all atom types.
#[derive(Debug, Clone, Default)]
pub struct AtomTypeRegistry {
    types: Vec<AtomType>,
    by_name: HashMap<String, AtomTypeId>,
    by_ident: BTreeMap<u32, AtomTypeId>,
}

impl AtomTypeRegistry {
    pub fn new() -> Self { Default::default() }

    pub fn add_type(&mut self, name: &str, ident: u32) -> Result<AtomTypeId, TypeError> {
        self.insert(AtomType::new(name, ident))
    }

    /// Add a type built elsewhere (e.g. by [`AtomTypeRegistry::copy_all_data`]).
    ///
    /// Names and idents must be unique among the types that have them.
    pub fn insert(&mut self, atom_type: AtomType) -> Result<AtomTypeId, TypeError> {
        if !atom_type.name.is_empty() && self.by_name.contains_key(&atom_type.name) {
            return Err(TypeError::DuplicateName(atom_type.name));
        }
        if let Some(ident) = atom_type.ident {
            if self.by_ident.contains_key(&ident) {
                return Err(TypeError::DuplicateIdent(ident));
            }
        }

        let id = AtomTypeId(self.types.len());
        if !atom_type.name.is_empty() {
            self.by_name.insert(atom_type.name.clone(), id);
        }
        if let Some(ident) = atom_type.ident {
            self.by_ident.insert(ident, id);
        }
        if let Some(base) = atom_type.base {
            self.types[base.0].zigs.push(id);
        }
        trace!("new atom type {:?} (ident {:?})", atom_type.name, atom_type.ident);
        self.types.push(atom_type);
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<AtomTypeId> { self.by_name.get(name).cloned() }
    pub fn find_ident(&self, ident: u32) -> Option<AtomTypeId> { self.by_ident.get(&ident).cloned() }

    pub fn get(&self, id: AtomTypeId) -> &AtomType { &self.types[id.0] }
    pub fn name(&self, id: AtomTypeId) -> &str { &self.types[id.0].name }

    pub fn ids(&self) -> impl ExactSizeIterator<Item=AtomTypeId> { (0..self.types.len()).map(AtomTypeId) }
    pub fn len(&self) -> usize { self.types.len() }
    pub fn is_empty(&self) -> bool { self.types.is_empty() }

    fn editable(&mut self, id: AtomTypeId) -> Result<&mut AtomType, TypeError> {
        let atom_type = &mut self.types[id.0];
        match atom_type.state {
            TypeState::Completed => Err(TypeError::AlreadyCompleted(atom_type.name.clone())),
            TypeState::UnderConstruction => Ok(atom_type),
        }
    }
}

/// Capabilities.
impl AtomTypeRegistry {
    /// Set a capability flag and take local ownership of it.
    pub fn set_capability(&mut self, id: AtomTypeId, capability: Capability, value: bool) -> Result<(), TypeError> {
        let atom_type = self.editable(id)?;
        atom_type.flags[capability] = value;
        atom_type.owned[capability] = true;
        Ok(())
    }

    pub fn is_capable(&self, id: AtomTypeId, capability: Capability) -> bool {
        let atom_type = &self.types[id.0];
        match (atom_type.base, capability.merge_policy()) {
            (Some(base), MergePolicy::Override) if !atom_type.owned[capability] => {
                self.is_capable(base, capability)
            },
            (Some(base), MergePolicy::Or) => {
                atom_type.flags[capability] || self.is_capable(base, capability)
            },
            _ => atom_type.flags[capability],
        }
    }

    pub fn is_eam(&self, id: AtomTypeId) -> bool { self.is_capable(id, Capability::Eam) }

    pub fn is_multipole(&self, id: AtomTypeId) -> bool {
        self.is_capable(id, Capability::Dipole) || self.is_capable(id, Capability::Quadrupole)
    }

    pub fn is_electrostatic(&self, id: AtomTypeId) -> bool {
        self.is_capable(id, Capability::Charge) || self.is_multipole(id)
    }

    pub fn is_metal(&self, id: AtomTypeId) -> bool {
        self.is_capable(id, Capability::SuttonChen) || self.is_eam(id)
    }
}

/// Properties and mass.
impl AtomTypeRegistry {
    /// Store (or replace) a property, taking local ownership of it.
    pub fn add_property(&mut self, id: AtomTypeId, name: &str, payload: Property) -> Result<(), TypeError> {
        self.editable(id)?.properties.insert(name.to_string(), payload);
        Ok(())
    }

    /// Drop a locally stored property.  Later lookups fall through to the base.
    pub fn remove_property(&mut self, id: AtomTypeId, name: &str) -> Result<Option<Property>, TypeError> {
        Ok(self.editable(id)?.properties.remove(name))
    }

    /// Look up a property on this type, or else on the nearest base that has it.
    pub fn property(&self, id: AtomTypeId, name: &str) -> Option<&Property> {
        let atom_type = &self.types[id.0];
        match atom_type.properties.get(name) {
            Some(property) => Some(property),
            None => atom_type.base.and_then(|base| self.property(base, name)),
        }
    }

    /// Names of the locally stored properties, sorted.
    pub fn property_names(&self, id: AtomTypeId) -> Vec<&str> {
        self.types[id.0].properties.keys().map(|s| &s[..]).collect()
    }

    pub fn set_mass(&mut self, id: AtomTypeId, mass: f64) -> Result<(), TypeError> {
        self.editable(id)?.mass = Some(mass);
        Ok(())
    }

    /// Mass, delegating to the base when not set locally.  Zero when nothing in the chain sets it.
    pub fn mass(&self, id: AtomTypeId) -> f64 {
        let atom_type = &self.types[id.0];
        match (atom_type.mass, atom_type.base) {
            (Some(mass), _) => mass,
            (None, Some(base)) => self.mass(base),
            (None, None) => 0.0,
        }
    }
}

/// Base types.
impl AtomTypeRegistry {
    /// Make `base` supply defaults to `id`.
    ///
    /// Capabilities that `id` does not own are merged into its resident flags right away,
    /// according to each capability's [`MergePolicy`].
    pub fn use_base(&mut self, id: AtomTypeId, base: AtomTypeId) -> Result<(), TypeError> {
        self.editable(id)?;
        if self.all_your_base(base).contains(&id) {
            return Err(TypeError::BaseCycle {
                atom_type: self.name(id).to_string(),
                base: self.name(base).to_string(),
            });
        }

        let resolved: Vec<(Capability, bool)> = {
            Capability::ALL.iter()
                .map(|&cap| (cap, self.is_capable(base, cap)))
                .collect()
        };

        if let Some(old) = self.types[id.0].base {
            self.types[old.0].zigs.retain(|&zig| zig != id);
        }
        self.types[base.0].zigs.push(id);

        let atom_type = &mut self.types[id.0];
        atom_type.base = Some(base);
        for (cap, from_base) in resolved {
            match cap.merge_policy() {
                MergePolicy::Override => if !atom_type.owned[cap] {
                    atom_type.flags[cap] = from_base;
                },
                MergePolicy::Or => atom_type.flags[cap] |= from_base,
            }
        }
        Ok(())
    }

    pub fn base(&self, id: AtomTypeId) -> Option<AtomTypeId> { self.types[id.0].base }

    /// The chain of types from `id` to its root, inclusive at both ends.
    pub fn all_your_base(&self, id: AtomTypeId) -> Vec<AtomTypeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(base) = self.types[current.0].base {
            chain.push(base);
            current = base;
        }
        chain
    }

    /// Types that use `id` as their base.
    pub fn zigs(&self, id: AtomTypeId) -> &[AtomTypeId] { &self.types[id.0].zigs }

    /// A replica of an existing type, down to its base link, but with no name or ident.
    ///
    /// The result is under construction even if the original was complete.
    pub fn copy_all_data(&self, from: AtomTypeId) -> AtomType {
        let original = &self.types[from.0];
        AtomType {
            flags: original.flags.clone(),
            owned: original.owned.clone(),
            mass: original.mass,
            properties: original.properties.clone(),
            base: original.base,
            ..AtomType::blank()
        }
    }
}

/// Completion.
impl AtomTypeRegistry {
    pub fn state(&self, id: AtomTypeId) -> TypeState { self.types[id.0].state }

    /// Validate a type and register it with a numeric backend.
    ///
    /// Every capability that requires parameters must be able to resolve them
    /// (possibly from a base type), with the right shape.
    pub fn complete(&mut self, id: AtomTypeId, backend: &mut dyn NumericBackend) -> Result<(), TypeError> {
        let atom_type = self.editable(id)?;
        if atom_type.name.is_empty() {
            return Err(TypeError::MissingName(atom_type.ident));
        }
        let name = atom_type.name.clone();
        let ident = atom_type.ident.ok_or_else(|| TypeError::MissingIdent(name.clone()))?;

        let lj = self.required(id, Capability::LennardJones, "LennardJones", "Lennard-Jones parameters", |p| match p {
            Property::LennardJones(x) => Some(x),
            _ => None,
        })?;
        let charge = self.required(id, Capability::Charge, "Charge", "a charge", |p| match p {
            Property::Charge(x) => Some(*x),
            _ => None,
        })?;
        let eam = self.required(id, Capability::Eam, "EAM", "EAM parameters", |p| match p {
            Property::Eam(x) => Some(x),
            _ => None,
        })?;
        let sc = self.required(id, Capability::SuttonChen, "SC", "Sutton-Chen parameters", |p| match p {
            Property::SuttonChen(x) => Some(x),
            _ => None,
        })?;

        let rejected = |source: BackendError| TypeError::Backend { atom_type: name.clone(), source };
        backend.register_type(ident, &name).map_err(&rejected)?;
        if let Some(lj) = lj {
            backend.register_lennard_jones(ident, lj).map_err(&rejected)?;
        }
        if self.is_electrostatic(id) {
            backend.register_electrostatic(ident).map_err(&rejected)?;
        }
        if let Some(charge) = charge {
            backend.register_charge(ident, charge).map_err(&rejected)?;
        }
        if let Some(eam) = eam {
            backend.register_eam(ident, eam).map_err(&rejected)?;
        }
        if let Some(sc) = sc {
            backend.register_sutton_chen(ident, sc).map_err(&rejected)?;
        }

        debug!("completed atom type {} (ident {})", name, ident);
        self.types[id.0].state = TypeState::Completed;
        Ok(())
    }

    /// Complete every type that is not complete yet, in order of ident.
    pub fn complete_all(&mut self, backend: &mut dyn NumericBackend) -> Result<(), TypeError> {
        // types without an ident go last, so that they produce an error
        let mut order: Vec<_> = self.by_ident.values().cloned().collect();
        order.extend(self.ids().filter(|&id| self.types[id.0].ident.is_none()));

        for id in order {
            if self.state(id) == TypeState::UnderConstruction {
                self.complete(id, backend)?;
            }
        }
        Ok(())
    }

    // Resolves the payload that a capability requires, if the type has that capability.
    fn required<'a, T>(
        &'a self,
        id: AtomTypeId,
        capability: Capability,
        property: &'static str,
        expected: &'static str,
        extract: impl FnOnce(&'a Property) -> Option<T>,
    ) -> Result<Option<T>, TypeError> {
        if !self.is_capable(id, capability) {
            return Ok(None);
        }
        let payload = self.property(id, property).ok_or_else(|| TypeError::MissingProperty {
            atom_type: self.name(id).to_string(),
            capability,
            property,
        })?;
        match extract(payload) {
            Some(value) => Ok(Some(value)),
            None => Err(TypeError::WrongPayload {
                atom_type: self.name(id).to_string(),
                property: property.to_string(),
                expected,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RecordingBackend, Registration};
    use crate::property::LjParam;

    fn lj() -> Property {
        Property::LennardJones(LjParam { epsilon: 0.1, sigma: 3.0, soft_pot: false })
    }

    #[test]
    fn override_family_delegates() {
        let mut reg = AtomTypeRegistry::new();
        let base = reg.add_type("O", 1).unwrap();
        let derived = reg.add_type("O_spc", 2).unwrap();

        reg.set_capability(base, Capability::LennardJones, true).unwrap();
        reg.set_capability(derived, Capability::Charge, true).unwrap();
        reg.use_base(derived, base).unwrap();

        assert!(reg.is_capable(derived, Capability::LennardJones));
        assert!(reg.is_capable(derived, Capability::Charge));
        assert!(!reg.is_capable(base, Capability::Charge));

        // a change made to the base later is still seen
        reg.set_capability(base, Capability::LennardJones, false).unwrap();
        assert!(!reg.is_capable(derived, Capability::LennardJones));

        // locally owned overrides win, even when false
        reg.set_capability(base, Capability::Eam, true).unwrap();
        reg.set_capability(derived, Capability::Eam, false).unwrap();
        assert!(!reg.is_capable(derived, Capability::Eam));
    }

    #[test]
    fn or_family_accumulates() {
        let mut reg = AtomTypeRegistry::new();
        let base = reg.add_type("base", 1).unwrap();
        let derived = reg.add_type("derived", 2).unwrap();

        reg.set_capability(base, Capability::Dipole, true).unwrap();
        reg.set_capability(derived, Capability::Dipole, false).unwrap();
        reg.set_capability(derived, Capability::Quadrupole, true).unwrap();
        reg.use_base(derived, base).unwrap();

        for &cap in &Capability::ALL {
            if cap.merge_policy() == MergePolicy::Or {
                let local = reg.get(derived).flags[cap];
                assert_eq!(reg.is_capable(derived, cap), local || reg.is_capable(base, cap), "{:?}", cap);
            }
        }
        assert!(reg.is_capable(derived, Capability::Dipole));
        assert!(reg.is_capable(derived, Capability::Quadrupole));
        assert!(!reg.is_capable(base, Capability::Quadrupole));
        assert!(reg.is_multipole(derived));
        assert!(reg.is_electrostatic(derived));
    }

    #[test]
    fn multilevel_chain() {
        let mut reg = AtomTypeRegistry::new();
        let a = reg.add_type("a", 1).unwrap();
        let b = reg.add_type("b", 2).unwrap();
        let c = reg.add_type("c", 3).unwrap();
        reg.use_base(b, a).unwrap();
        reg.use_base(c, b).unwrap();

        reg.set_mass(a, 63.55).unwrap();
        reg.add_property(a, "EAM", Property::Text("a".into())).unwrap();
        reg.add_property(b, "EAM", Property::Text("b".into())).unwrap();

        assert_eq!(reg.all_your_base(c), vec![c, b, a]);
        assert_eq!(reg.all_your_base(a), vec![a]);
        assert_eq!(reg.zigs(a), &[b]);
        assert_eq!(reg.mass(c), 63.55);
        assert_eq!(reg.property(c, "EAM"), Some(&Property::Text("b".into())));
        assert_eq!(reg.property(c, "nope"), None);
    }

    #[test]
    fn remove_property_falls_through() {
        let mut reg = AtomTypeRegistry::new();
        let base = reg.add_type("base", 1).unwrap();
        let derived = reg.add_type("derived", 2).unwrap();
        reg.use_base(derived, base).unwrap();

        reg.add_property(base, "Charge", Property::Charge(-0.8)).unwrap();
        reg.add_property(derived, "Charge", Property::Charge(0.4)).unwrap();
        assert_eq!(reg.property(derived, "Charge"), Some(&Property::Charge(0.4)));
        assert_eq!(reg.property_names(derived), vec!["Charge"]);

        let removed = reg.remove_property(derived, "Charge").unwrap();
        assert_eq!(removed, Some(Property::Charge(0.4)));
        assert_eq!(reg.property(derived, "Charge"), Some(&Property::Charge(-0.8)));
        assert!(reg.property_names(derived).is_empty());

        // without a base there is nothing to fall back to
        reg.remove_property(base, "Charge").unwrap();
        assert_eq!(reg.property(base, "Charge"), None);
        assert_eq!(reg.mass(derived), 0.0);
    }

    #[test]
    fn bases_cannot_cycle() {
        let mut reg = AtomTypeRegistry::new();
        let a = reg.add_type("a", 1).unwrap();
        let b = reg.add_type("b", 2).unwrap();
        reg.use_base(b, a).unwrap();

        assert!(matches!(reg.use_base(a, b), Err(TypeError::BaseCycle { .. })));
        assert!(matches!(reg.use_base(a, a), Err(TypeError::BaseCycle { .. })));
        assert_eq!(reg.base(a), None);
    }

    #[test]
    fn rebasing_updates_zigs() {
        let mut reg = AtomTypeRegistry::new();
        let a = reg.add_type("a", 1).unwrap();
        let b = reg.add_type("b", 2).unwrap();
        let c = reg.add_type("c", 3).unwrap();
        reg.use_base(c, a).unwrap();
        reg.use_base(c, b).unwrap();
        assert!(reg.zigs(a).is_empty());
        assert_eq!(reg.zigs(b), &[c]);
    }

    #[test]
    fn duplicates() {
        let mut reg = AtomTypeRegistry::new();
        reg.add_type("Cu", 1).unwrap();
        assert_eq!(reg.add_type("Cu", 2), Err(TypeError::DuplicateName("Cu".into())));
        assert_eq!(reg.add_type("Au", 1), Err(TypeError::DuplicateIdent(1)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.find("Au"), None);
    }

    #[test]
    fn copy_all_data() {
        let mut reg = AtomTypeRegistry::new();
        let base = reg.add_type("base", 1).unwrap();
        let orig = reg.add_type("orig", 2).unwrap();
        reg.use_base(orig, base).unwrap();
        reg.set_capability(orig, Capability::Charge, true).unwrap();
        reg.add_property(orig, "Charge", Property::Charge(1.0)).unwrap();
        reg.set_mass(orig, 2.0).unwrap();
        reg.complete(orig, &mut RecordingBackend::new()).unwrap();

        let mut copy = reg.copy_all_data(orig);
        assert_eq!(copy.state(), TypeState::UnderConstruction);
        copy.set_name("copy");
        copy.set_ident(3);
        let copy = reg.insert(copy).unwrap();

        assert_eq!(reg.find("copy"), Some(copy));
        assert_eq!(reg.find_ident(3), Some(copy));
        assert_eq!(reg.base(copy), Some(base));
        assert_eq!(reg.zigs(base), &[orig, copy]);
        assert!(reg.is_capable(copy, Capability::Charge));
        assert_eq!(reg.mass(copy), 2.0);
        assert_eq!(reg.property(copy, "Charge"), Some(&Property::Charge(1.0)));
    }

    #[test]
    fn complete_registers_in_order() {
        let mut reg = AtomTypeRegistry::new();
        let id = reg.add_type("Na", 7).unwrap();
        reg.set_capability(id, Capability::LennardJones, true).unwrap();
        reg.set_capability(id, Capability::Charge, true).unwrap();
        reg.add_property(id, "LennardJones", lj()).unwrap();
        reg.add_property(id, "Charge", Property::Charge(1.0)).unwrap();

        let mut backend = RecordingBackend::new();
        reg.complete(id, &mut backend).unwrap();
        assert_eq!(backend.registrations, vec![
            Registration::Type { ident: 7, name: "Na".into() },
            Registration::LennardJones { ident: 7, param: LjParam { epsilon: 0.1, sigma: 3.0, soft_pot: false } },
            Registration::Electrostatic { ident: 7 },
            Registration::Charge { ident: 7, charge: 1.0 },
        ]);
        assert_eq!(reg.state(id), TypeState::Completed);

        // no way back
        let expected = Err(TypeError::AlreadyCompleted("Na".into()));
        assert_eq!(reg.complete(id, &mut backend), expected);
        assert_eq!(reg.set_mass(id, 1.0), expected);
        assert_eq!(reg.set_capability(id, Capability::Dipole, true), expected);
        assert_eq!(reg.add_property(id, "x", Property::Scalar(1.0)), expected);
        assert_eq!(reg.remove_property(id, "Charge").map(|_| ()), expected);
        assert_eq!(backend.idents(), vec![7]);
    }

    #[test]
    fn complete_checks_required_properties() {
        let mut reg = AtomTypeRegistry::new();
        let base = reg.add_type("base", 1).unwrap();
        let id = reg.add_type("X", 2).unwrap();
        reg.set_capability(id, Capability::LennardJones, true).unwrap();

        let mut backend = RecordingBackend::new();
        match reg.complete(id, &mut backend) {
            Err(TypeError::MissingProperty { atom_type, property, .. }) => {
                assert_eq!(atom_type, "X");
                assert_eq!(property, "LennardJones");
            },
            r => panic!("{:?}", r),
        }

        reg.add_property(id, "LennardJones", Property::Scalar(3.0)).unwrap();
        match reg.complete(id, &mut backend) {
            Err(e @ TypeError::WrongPayload { .. }) => {
                assert!(e.to_string().contains("X"));
            },
            r => panic!("{:?}", r),
        }

        // parameters resolved from a base are good enough
        reg.remove_property(id, "LennardJones").unwrap();
        reg.add_property(base, "LennardJones", lj()).unwrap();
        reg.use_base(id, base).unwrap();
        reg.complete(id, &mut backend).unwrap();
        assert!(backend.registrations.iter().all(|r| match r {
            Registration::Type { ident, .. } | Registration::LennardJones { ident, .. } => *ident == 2,
            _ => false,
        }));
    }

    #[test]
    fn complete_requires_identity() {
        let mut reg = AtomTypeRegistry::new();
        let mut nameless = AtomType::new("", 1);
        nameless.set_name("");
        let nameless = reg.insert(nameless).unwrap();
        assert_eq!(reg.complete(nameless, &mut RecordingBackend::new()), Err(TypeError::MissingName(Some(1))));

        let named = reg.add_type("named", 2).unwrap();
        let mut unidentified = reg.copy_all_data(named);
        unidentified.set_name("anon");
        let unidentified = reg.insert(unidentified).unwrap();
        assert_eq!(
            reg.complete(unidentified, &mut RecordingBackend::new()),
            Err(TypeError::MissingIdent("anon".into())),
        );
    }

    #[test]
    fn backend_rejection_is_an_error() {
        struct Grumpy;
        impl NumericBackend for Grumpy {
            fn register_type(&mut self, _: u32, _: &str) -> Result<(), BackendError> {
                Err(BackendError("no room".into()))
            }
        }

        let mut reg = AtomTypeRegistry::new();
        let id = reg.add_type("Cu", 1).unwrap();
        let err = reg.complete(id, &mut Grumpy).unwrap_err();
        assert!(matches!(err, TypeError::Backend { .. }));
        assert_eq!(reg.state(id), TypeState::UnderConstruction);
    }

    #[test]
    fn complete_all_in_ident_order() {
        let mut reg = AtomTypeRegistry::new();
        reg.add_type("c", 30).unwrap();
        let a = reg.add_type("a", 10).unwrap();
        reg.add_type("b", 20).unwrap();

        let mut backend = RecordingBackend::new();
        reg.complete(a, &mut backend).unwrap();
        reg.complete_all(&mut backend).unwrap();
        assert_eq!(backend.idents(), vec![10, 20, 30]);
        assert!(reg.ids().all(|id| reg.state(id) == TypeState::Completed));
    }
}
