/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{ParseError, ReadError, Words};

use eamkit_types::eam::{FuncflParam, LatticeType};
use std::path::Path;

/// A DYNAMO `funcfl` potential file.
///
/// ```text
/// comment
/// atomic_number  mass  lattice_constant  [lattice_type]
/// nrho  drho  nr  dr  rcut
/// F(rho) values  (nrho of them)
/// Z(r) values    (nr of them)
/// rho(r) values  (nr of them)
/// ```
///
/// The tables may be spread over any number of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncflFile {
    pub comment: String,
    pub atomic_number: u32,
    pub mass: f64,
    pub lattice_constant: f64,
    pub lattice_type: LatticeType,
    pub nrho: usize,
    pub drho: f64,
    pub nr: usize,
    pub dr: f64,
    pub rcut: f64,
    pub f: Vec<f64>,
    pub z: Vec<f64>,
    pub rho: Vec<f64>,
}

impl FuncflFile {
    pub fn load(path: impl AsRef<Path>) -> Result<FuncflFile, ReadError> {
        let path = path.as_ref();
        let text = crate::read_text(path)?;
        Ok(FuncflFile::parse(&text, &path.display().to_string())?)
    }

    /// `file` is only used in error messages.
    pub fn parse(text: &str, file: &str) -> Result<FuncflFile, ParseError> {
        let mut lines = text.lines().enumerate();
        let comment = match lines.next() {
            Some((_, line)) => line.trim().to_string(),
            None => return Err(ParseError { file: file.into(), line: 1, message: "file is empty".into() }),
        };

        let mut header = Words::new(file, lines.next());
        let atomic_number = header.parse("atomic number")?;
        let mass = header.parse("mass")?;
        let lattice_constant = header.parse("lattice constant")?;
        let lattice_type = match header.next_word("lattice type") {
            Ok((_, word)) => LatticeType::parse(word),
            Err(_) => LatticeType::Unspecified,
        };

        let mut sizes = Words::new(file, lines.next());
        let nrho = sizes.parse("nrho")?;
        let drho = sizes.parse("drho")?;
        let nr = sizes.parse("nr")?;
        let dr = sizes.parse("dr")?;
        let rcut = sizes.parse("rcut")?;

        let mut tables = Words::new(file, lines);
        let f = tables.values(nrho, "F(rho)")?;
        let z = tables.values(nr, "Z(r)")?;
        let rho = tables.values(nr, "rho(r)")?;
        if tables.num_remaining() > 0 {
            warn!("{}: ignoring {} trailing values", file, tables.num_remaining());
        }

        trace!("{}: Z = {}, nrho = {}, nr = {}, rcut = {}", file, atomic_number, nrho, nr, rcut);
        Ok(FuncflFile {
            comment, atomic_number, mass, lattice_constant, lattice_type,
            nrho, drho, nr, dr, rcut, f, z, rho,
        })
    }

    pub fn to_param(&self) -> FuncflParam {
        FuncflParam {
            lattice_type: self.lattice_type.clone(),
            lattice_constant: self.lattice_constant,
            nrho: self.nrho,
            drho: self.drho,
            nr: self.nr,
            dr: self.dr,
            rcut: self.rcut,
            z: self.z.clone(),
            rho: self.rho.clone(),
            f: self.f.clone(),
        }
    }
}
