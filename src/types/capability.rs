/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

/// A boolean trait of an atom type.
#[derive(enum_map::Enum)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Directional,
    LennardJones,
    Charge,
    Eam,
    SuttonChen,
    Flarb,

    Dipole,
    SplitDipole,
    Quadrupole,
    Sticky,
    StickyPower,
    GayBerne,
    Shape,
}

/// How a derived type combines a capability that it does not set itself with
/// the one resolved on its base.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MergePolicy {
    /// The base's value replaces the derived type's.
    Override,
    /// The derived type has the capability if either it or its base does.
    Or,
}

impl Capability {
    pub const ALL: [Capability; 13] = [
        Capability::Directional,
        Capability::LennardJones,
        Capability::Charge,
        Capability::Eam,
        Capability::SuttonChen,
        Capability::Flarb,
        Capability::Dipole,
        Capability::SplitDipole,
        Capability::Quadrupole,
        Capability::Sticky,
        Capability::StickyPower,
        Capability::GayBerne,
        Capability::Shape,
    ];

    /// Capabilities that define what a species *is* are overridden by the base;
    /// additive ones (multipoles, shapes, stickiness) accumulate.
    pub fn merge_policy(self) -> MergePolicy {
        match self {
            Capability::Directional |
            Capability::LennardJones |
            Capability::Charge |
            Capability::Eam |
            Capability::SuttonChen |
            Capability::Flarb => MergePolicy::Override,

            Capability::Dipole |
            Capability::SplitDipole |
            Capability::Quadrupole |
            Capability::Sticky |
            Capability::StickyPower |
            Capability::GayBerne |
            Capability::Shape => MergePolicy::Or,
        }
    }
}

#[test]
fn merge_families() {
    let overrides: Vec<_> = {
        Capability::ALL.iter().cloned()
            .filter(|c| c.merge_policy() == MergePolicy::Override)
            .collect()
    };
    assert_eq!(overrides, vec![
        Capability::Directional, Capability::LennardJones, Capability::Charge,
        Capability::Eam, Capability::SuttonChen, Capability::Flarb,
    ]);
    assert_eq!(Capability::Shape.merge_policy(), MergePolicy::Or);
    assert_eq!(Capability::GayBerne.merge_policy(), MergePolicy::Or);
}
