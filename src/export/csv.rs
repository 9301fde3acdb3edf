//! Minimal CSV encoding.
//!
//! Output targets spreadsheet imports: RFC 4180 quoting, and every file
//! starts with a UTF-8 BOM so Excel detects the encoding.

use std::io::{self, Write};

/// Byte-order mark written at the top of every CSV file.
pub const BOM: &str = "\u{feff}";

/// True when the cell must be wrapped in quotes.
fn needs_quotes(cell: &str) -> bool {
    cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

/// Write one row, quoting cells as needed and doubling embedded quotes.
pub fn write_row<W, I, S>(out: &mut W, cells: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut first = true;
    for cell in cells {
        if !first {
            out.write_all(b",")?;
        }
        first = false;

        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(out, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            out.write_all(cell.as_bytes())?;
        }
    }
    out.write_all(b"\n")?;
    Ok(())
}
