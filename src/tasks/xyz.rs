/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use eamkit_array_types::V3;
use std::io::prelude::*;
use std::path::Path;

/// A single XYZ frame.  The symbols are atom type names.
#[derive(Debug, Clone, PartialEq)]
pub struct Xyz {
    pub title: String,
    pub symbols: Vec<String>,
    pub carts: Vec<V3>,
}

impl Xyz {
    pub fn load(path: impl AsRef<Path>) -> FailResult<Xyz> {
        let path = path.as_ref();
        let text = path_abs::FileRead::open(path)?.read_string()?;
        Xyz::parse(&text).map_err(|e| e.context(format!("while reading {}", path.display())).into())
    }

    /// Reads the first frame.  Columns after the coordinates are ignored.
    pub fn parse(text: &str) -> FailResult<Xyz> {
        let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

        let count: usize = match lines.next() {
            Some((_, line)) => match line.trim().parse() {
                Ok(count) => count,
                Err(_) => bail!("line 1: expected an atom count, found {:?}", line.trim()),
            },
            None => bail!("empty xyz file"),
        };
        let title = match lines.next() {
            Some((_, line)) => line.trim().to_string(),
            None => bail!("line 2: missing title line"),
        };

        let mut symbols = Vec::with_capacity(count);
        let mut carts = Vec::with_capacity(count);
        for _ in 0..count {
            let (n, line) = match lines.next() {
                Some(x) => x,
                None => bail!("expected {} atoms, found {}", count, symbols.len()),
            };
            let words: Vec<_> = line.split_whitespace().collect();
            if words.len() < 4 {
                bail!("line {}: expected a symbol and three coordinates", n);
            }
            let mut coord = [0.0; 3];
            for k in 0..3 {
                coord[k] = match words[k + 1].parse() {
                    Ok(x) => x,
                    Err(_) => bail!("line {}: could not parse coordinate {:?}", n, words[k + 1]),
                };
            }
            symbols.push(words[0].to_string());
            carts.push(V3(coord));
        }
        Ok(Xyz { title, symbols, carts })
    }

    /// Writes the frame.  Frames can be concatenated into an animation.
    pub fn to_writer(&self, mut w: impl Write) -> FailResult<()> {
        ensure!(!self.title.contains('\n') && !self.title.contains('\r'), "xyz title must be one line");
        ensure!(self.symbols.len() == self.carts.len(), "xyz has {} symbols but {} positions", self.symbols.len(), self.carts.len());

        writeln!(w, "{}", self.carts.len())?;
        writeln!(w, "{}", self.title)?;
        for (sym, V3([x, y, z])) in self.symbols.iter().zip(&self.carts) {
            writeln!(w, " {:>2} {} {} {}", sym, x, y, z)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let xyz = Xyz::parse("3\n  a small cluster \nCu 0 0 0\nAu 1.5 0.0 0.0 extra\n  Cu 0 1.5e0 -2\n").unwrap();
        assert_eq!(xyz.title, "a small cluster");
        assert_eq!(xyz.symbols, vec!["Cu", "Au", "Cu"]);
        assert_eq!(xyz.carts[1], V3([1.5, 0.0, 0.0]));
        assert_eq!(xyz.carts[2], V3([0.0, 1.5, -2.0]));
    }

    #[test]
    fn errors() {
        let message = |text: &str| Xyz::parse(text).unwrap_err().to_string();
        assert!(message("").contains("empty"));
        assert!(message("two\n").contains("line 1"));
        assert!(message("2\ntitle\nCu 0 0 0\n").contains("expected 2 atoms, found 1"));
        assert!(message("1\ntitle\nCu 0 0\n").contains("line 3"));
        assert!(message("1\ntitle\nCu 0 x 0\n").contains("\"x\""));
    }

    #[test]
    fn write_then_read() {
        let xyz = Xyz {
            title: "dimer".into(),
            symbols: vec!["Cu".into(), "Au".into()],
            carts: vec![V3([0.0, 0.0, 0.0]), V3([0.25, 1.0, -2.5])],
        };
        let mut buf = vec![];
        xyz.to_writer(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("2\ndimer\n Cu 0 0 0\n"));
        assert_eq!(Xyz::parse(&text).unwrap(), xyz);
    }
}
