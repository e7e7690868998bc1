use std::io::Write;
use std::path::Path;

use survey_grid_common::Result;

use crate::column::FilterColumn;
use crate::row::{FieldAccessor, Row};

// --- headless listing ---

pub fn write_table<W: Write>(out: &mut W, rows: &[&Row], fields: &FieldAccessor) -> Result<()> {
    let mut widths = [9usize, 12, 12]; // header widths
    let mut cells = Vec::with_capacity(rows.len());
    for row in rows {
        let line = [
            fields.value(row, FilterColumn::Names)?,
            fields.value(row, FilterColumn::Projects)?,
            fields.value(row, FilterColumn::Companies)?,
        ];
        for (w, v) in widths.iter_mut().zip(line) {
            *w = (*w).max(v.chars().count());
        }
        cells.push(line);
    }
    let [wn, wp, _] = widths;
    writeln!(out, "{:<wn$}  {:<wp$}  {}", "Full Name", "Project Name", "Company Name")?;
    for [name, project, company] in cells {
        writeln!(out, "{name:<wn$}  {project:<wp$}  {company}")?;
    }
    Ok(())
}

pub fn print_rows(rows: &[&Row], fields: &FieldAccessor) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_table(&mut lock, rows, fields)?;
    writeln!(lock, "{} row(s)", rows.len())?;
    Ok(())
}

// --- JSON export ---

/// Writes rows in the same shape they are loaded from.
pub fn export_json(output_path: &Path, rows: &[&Row]) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, rows)?;
    Ok(())
}

// --- CSV export ---

pub fn export_csv(output_path: &Path, rows: &[&Row], fields: &FieldAccessor) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    writeln!(file, "id,full_name,project,company")?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{}",
            csv_escape(&row.id),
            csv_escape(fields.value(row, FilterColumn::Names)?),
            csv_escape(fields.value(row, FilterColumn::Projects)?),
            csv_escape(fields.value(row, FilterColumn::Companies)?),
        )?;
    }
    Ok(())
}

// wrap in quotes if contains comma, quote, or newline
fn csv_escape(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
