/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{ParseError, ReadError, Words};

use std::collections::BTreeMap;
use std::path::Path;

/// An EAM force field (`.frc`) file.
///
/// ```text
/// ! comment
/// #AtomTypes
/// ! name  mass   potential file
/// Cu      63.55  Cu.funcfl
/// Au      196.97 Au.funcfl
///
/// #BaseTypes
/// ! name  base
/// Cu_surf Cu
///
/// #EAMCrossInteractions
/// ! name1 name2  table file
/// Cu      Au     CuAu.phi
/// ```
///
/// A line beginning with `#` starts a new section; the section name is its
/// first word.  Lines beginning with `!` are comments.  Sections other than the
/// three above are skipped.  `AtomTypes` is required.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrcFile {
    pub atom_types: Vec<AtomTypeEntry>,
    pub base_types: Vec<BaseTypeEntry>,
    pub cross_interactions: Vec<CrossInteractionEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtomTypeEntry {
    pub name: String,
    /// Numbered from 1, in file order.
    pub ident: u32,
    pub mass: f64,
    pub potential_file: String,
}

/// Declares that `name` derives from `base`.
///
/// `name` may be an atom type of its own, or a new type that has no
/// parameters besides those it inherits.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTypeEntry {
    pub name: String,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossInteractionEntry {
    pub atom_types: (String, String),
    pub table_file: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Section {
    AtomTypes,
    BaseTypes,
    CrossInteractions,
    Other,
}

fn section_name(header: &str) -> &str {
    crate::split_words(header.trim_start_matches('#')).next().unwrap_or("")
}

impl Section {
    fn from_name(name: &str) -> Section {
        match name {
            "AtomTypes" => Section::AtomTypes,
            "BaseTypes" => Section::BaseTypes,
            "EAMCrossInteractions" => Section::CrossInteractions,
            _ => Section::Other,
        }
    }
}

impl FrcFile {
    pub fn load(path: impl AsRef<Path>) -> Result<FrcFile, ReadError> {
        let path = path.as_ref();
        let text = crate::read_text(path)?;
        Ok(FrcFile::parse(&text, &path.display().to_string())?)
    }

    pub fn parse(text: &str, file: &str) -> Result<FrcFile, ParseError> {
        let mut out = FrcFile::default();
        let mut section = None;
        let mut seen_atom_types = false;

        // name -> line, for error messages
        let mut atom_type_lines = BTreeMap::new();
        let mut base_lines = BTreeMap::new();
        let mut cross_lines = vec![];

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            if line.starts_with('#') {
                let name = section_name(line);
                let parsed = Section::from_name(name);
                if parsed == Section::Other {
                    debug!("{}:{}: skipping section {:?}", file, line_number, name);
                }
                seen_atom_types |= parsed == Section::AtomTypes;
                section = Some(parsed);
                continue;
            }
            if line.starts_with('!') || crate::split_words(line).next().is_none() {
                continue;
            }

            let mut words = Words::new(file, Some((index, line)));
            match section {
                None | Some(Section::Other) => {},

                Some(Section::AtomTypes) => {
                    let (_, name) = words.next_word("atom type name")?;
                    let mass = words.parse("mass")?;
                    let (_, potential_file) = words.next_word("potential file")?;
                    if atom_type_lines.insert(name.to_string(), line_number).is_some() {
                        return Err(words.error(line_number, format!("duplicate atom type {:?}", name)));
                    }
                    out.atom_types.push(AtomTypeEntry {
                        name: name.to_string(),
                        ident: out.atom_types.len() as u32 + 1,
                        mass,
                        potential_file: potential_file.to_string(),
                    });
                },

                Some(Section::BaseTypes) => {
                    let (_, name) = words.next_word("atom type name")?;
                    let (_, base) = words.next_word("base type name")?;
                    if base_lines.insert(name.to_string(), line_number).is_some() {
                        return Err(words.error(line_number, format!("{:?} was given two base types", name)));
                    }
                    out.base_types.push(BaseTypeEntry { name: name.to_string(), base: base.to_string() });
                },

                Some(Section::CrossInteractions) => {
                    let (_, a) = words.next_word("first atom type")?;
                    let (_, b) = words.next_word("second atom type")?;
                    let (_, table_file) = words.next_word("table file")?;
                    cross_lines.push(line_number);
                    out.cross_interactions.push(CrossInteractionEntry {
                        atom_types: (a.to_string(), b.to_string()),
                        table_file: table_file.to_string(),
                    });
                },
            }
        }

        let error = |line, message: String| ParseError { file: file.to_string(), line, message };
        if !seen_atom_types {
            return Err(error(text.lines().count(), "no AtomTypes section".to_string()));
        }

        let is_known = |name: &str| atom_type_lines.contains_key(name) || base_lines.contains_key(name);
        for entry in &out.base_types {
            if !is_known(entry.base.as_str()) {
                return Err(error(base_lines[&entry.name], format!("unknown base type {:?}", entry.base)));
            }
        }
        for (entry, &line) in out.cross_interactions.iter().zip(&cross_lines) {
            let (a, b) = &entry.atom_types;
            for name in &[a, b] {
                if !is_known(name.as_str()) {
                    return Err(error(line, format!("unknown atom type {:?}", name)));
                }
            }
        }
        Ok(out)
    }
}
