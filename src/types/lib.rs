/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Atom types: species definitions carrying capability flags and named parameter
//! blocks, with single-parent "base type" composition for sharing defaults.
//!
//! All types live in an [`AtomTypeRegistry`], which hands out [`AtomTypeId`]s.
//! Base links are ids into the same registry, so every query that needs to walk
//! a chain of bases is a method of the registry.

#[macro_use] extern crate log;

mod backend;
mod capability;
mod property;
mod registry;
pub mod eam;

pub use crate::backend::{BackendError, NumericBackend, RecordingBackend, Registration};
pub use crate::capability::{Capability, MergePolicy};
pub use crate::eam::{EamAdapter, EamAdapterMut, EamFamily, EamKind, LatticeType};
pub use crate::property::{LjParam, Property, ScParam};
pub use crate::registry::{AtomType, AtomTypeId, AtomTypeRegistry, TypeState};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TypeError {
    #[error("atom type {0} is already complete and can no longer be modified")]
    AlreadyCompleted(String),

    #[error("attempted to complete an atom type (ident {0:?}) without giving it a name")]
    MissingName(Option<u32>),

    #[error("attempted to complete atom type {0} without setting its ident")]
    MissingIdent(String),

    #[error("an atom type named {0} already exists")]
    DuplicateName(String),

    #[error("an atom type with ident {0} already exists")]
    DuplicateIdent(u32),

    #[error("cannot use {base} as the base of {atom_type}: the chain of bases would form a cycle")]
    BaseCycle { atom_type: String, base: String },

    #[error("atom type {atom_type} is {capability:?} but has no \"{property}\" property")]
    MissingProperty { atom_type: String, capability: Capability, property: &'static str },

    #[error("property \"{property}\" of atom type {atom_type} is not {expected}")]
    WrongPayload { atom_type: String, property: String, expected: &'static str },

    #[error("atom type {0} is not an EAM type")]
    NotEam(String),

    #[error("could not find \"{property}\" parameters for atom type {atom_type}")]
    MissingParameters { atom_type: String, property: &'static str },

    #[error("atom type {atom_type} is not a {expected} type (found {found})")]
    WrongFamily { atom_type: String, expected: &'static str, found: EamKind },

    #[error("bad {table} table for atom type {atom_type}")]
    Table {
        atom_type: String,
        table: &'static str,
        #[source] source: eamkit_spline::SplineError,
    },

    #[error("numeric backend rejected atom type {atom_type}")]
    Backend {
        atom_type: String,
        #[source] source: BackendError,
    },
}
