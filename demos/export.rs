// shared two-column export used by the demo programs

use std::io;

/// Format `v` the way numpy's `%.18e` does, e.g. `1.500000000000000000e+00`.
pub fn sci(v: f64) -> String {
    let s = format!("{:.18e}", v);
    match s.split_once('e') {
        Some((mant, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mant, sign, exp.abs())
        },
        None => s,
    }
}

/// Write `(x, y)` rows as headerless two-column CSV.
pub fn write_columns<W, I>(dest: W, rows: I) -> anyhow::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut writer
        = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(dest);
    for (x, y) in rows {
        writer.write_record([sci(x), sci(y)])?;
    }
    writer.flush()?;
    Ok(())
}
