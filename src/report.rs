//! Text table view of the store.
//!
//! ```text
//! Isle of Anglesey / Ynys Môn (W06000001)
//! Population (pop)
//!           1991          1992       Average         Diff.         %Diff
//!   69123.000000  69012.000000  69067.500000   -111.000000     -0.160583
//! ```

use crate::area::Area;
use crate::areas::Areas;
use crate::measure::Measure;
use std::fmt;
use std::io::{self, Write};

/// Width of every table cell.
pub const CELL_WIDTH: usize = 14;
/// Decimal places for every numeric cell.
pub const PRECISION: usize = 6;

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.label(), self.codename())?;
        if self.is_empty() {
            return writeln!(f, "<no values>");
        }

        let w = CELL_WIDTH;
        let p = PRECISION;
        for year in self.series().keys() {
            write!(f, "{year:>w$}")?;
        }
        writeln!(f, "{:>w$}{:>w$}{:>w$}", "Average", "Diff.", "%Diff")?;

        for value in self.series().values() {
            write!(f, "{value:>w$.p$}")?;
        }
        writeln!(
            f,
            "{:>w$.p$}{:>w$.p$}{:>w$.p$}",
            self.average(),
            self.difference(),
            self.difference_as_percentage()
        )
    }
}

/// `"<eng> / <cym> (<code>)"`, falling back to whichever name exists.
fn heading(area: &Area) -> String {
    let eng = area.name("eng").ok();
    let cym = area.name("cym").ok();
    match (eng, cym) {
        (Some(eng), Some(cym)) => format!("{eng} / {cym} ({})", area.code()),
        (Some(name), None) | (None, Some(name)) => format!("{name} ({})", area.code()),
        (None, None) => format!("Unnamed ({})", area.code()),
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", heading(self))?;
        if self.is_empty() {
            return writeln!(f, "<no measures>");
        }
        for measure in self.measures() {
            write!(f, "{measure}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Areas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No areas to print");
        }
        for (_, area) in self.iter() {
            writeln!(f, "{area}")?;
        }
        Ok(())
    }
}

/// Write the table view of `areas` to `out`.
pub fn render_table<W: Write>(areas: &Areas, mut out: W) -> io::Result<()> {
    write!(out, "{areas}")?;
    out.flush()
}
