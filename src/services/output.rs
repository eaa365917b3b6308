use crate::domain::models::Document;
use std::io::Write;

pub fn write_document(out: &mut dyn Write, doc: &Document) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(doc)?)?;
    Ok(())
}

pub fn write_status(out: &mut dyn Write, line: std::fmt::Arguments<'_>) -> anyhow::Result<()> {
    out.write_fmt(line)?;
    writeln!(out)?;
    Ok(())
}

/// Full document in detail mode, otherwise the short status line.
pub fn write_result(
    out: &mut dyn Write,
    details: bool,
    doc: &Document,
    line: std::fmt::Arguments<'_>,
) -> anyhow::Result<()> {
    if details {
        write_document(out, doc)
    } else {
        write_status(out, line)
    }
}
