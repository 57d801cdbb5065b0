//! `tabulate`: writes a connection set's post-order stream as tab-separated
//! columns, one record per line — matching `elementary.py::tabulate`.

use std::io::{self, Write};

use crate::connection_set::ConnectionSet;

pub fn tabulate<W: Write>(cset: &ConnectionSet, mut out: W) -> io::Result<()> {
    let rows = cset
        .iter()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    for (i, j, values) in rows {
        write!(out, "{i}\t{j}")?;
        for v in values {
            write!(out, "\t{v}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::Mask;
    use crate::value::ValueSet;

    #[test]
    fn tabulate_writes_tab_separated_rows() {
        let cset = ConnectionSet::new(
            Mask::explicit(vec![(0, 0), (1, 0)]),
            vec![ValueSet::constant(1.5)],
        );
        let mut buf = Vec::new();
        tabulate(&cset, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "0\t0\t1.5\n1\t0\t1.5\n");
    }
}
