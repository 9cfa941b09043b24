/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{ParseError, ReadError, Words};
use std::path::Path;

/// An explicit pair potential between two types, `phi(i * dr)` for `i in 0..nr`.
///
/// ```text
/// comment
/// nr  dr
/// phi values (nr of them)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTable {
    pub comment: String,
    pub nr: usize,
    pub dr: f64,
    pub phi: Vec<f64>,
}

impl CrossTable {
    pub fn load(path: impl AsRef<Path>) -> Result<CrossTable, ReadError> {
        let path = path.as_ref();
        let text = crate::read_text(path)?;
        Ok(CrossTable::parse(&text, &path.display().to_string())?)
    }

    pub fn parse(text: &str, file: &str) -> Result<CrossTable, ParseError> {
        let mut lines = text.lines().enumerate();
        let comment = match lines.next() {
            Some((_, line)) => line.trim().to_string(),
            None => return Err(ParseError { file: file.into(), line: 1, message: "file is empty".into() }),
        };

        let mut sizes = Words::new(file, lines.next());
        let nr = sizes.parse("nr")?;
        let dr = sizes.parse("dr")?;

        let phi = Words::new(file, lines).values(nr, "phi(r)")?;
        Ok(CrossTable { comment, nr, dr, phi })
    }
}

#[test]
fn parse() {
    let table = CrossTable::parse("Cu-Au\n4 0.25\n3.0 2.0\n1.0 0.0\n", "CuAu.phi").unwrap();
    assert_eq!(table, CrossTable {
        comment: "Cu-Au".into(),
        nr: 4,
        dr: 0.25,
        phi: vec![3.0, 2.0, 1.0, 0.0],
    });

    let err = CrossTable::parse("Cu-Au\n4 0.25\n3.0 2.0\n", "CuAu.phi").unwrap_err();
    assert_eq!(err.line, 3);
}
