//! Writing results to files.

use crate::errors::Result;
use crate::output::{CategoryCount, ConcordanceLine, Frequency, Label, Value};
use crate::query::{OutputMode, Query, Response};
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Plain text rendering, one record per line, fields separated by tabs.
pub fn render_text(query: &Query, response: &Response) -> String {
    match response {
        Response::Concordance(lines) => {
            let mut s = String::new();
            for line in lines {
                s.push_str(&line.to_string());
                s.push('\n');
            }
            s
        }
        Response::TotalFrequency(f) => format!("{f}\n"),
        Response::ByCategory(counts) => {
            let mut s = match query.output {
                OutputMode::ByCategory {
                    category,
                    frequency,
                } => format!("{category}\t{frequency}\n"),
                _ => String::new(),
            };
            for c in counts {
                s.push_str(&format!("{}\t{}\n", c.label, c.value));
            }
            s
        }
    }
}

/// Write `response` to `path`; the format is chosen by the file extension
/// (`json`, `xlsx`, anything else is plain text).
pub fn write(path: &str, query: &Query, response: &Response) -> Result<()> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("json") => {
            let file = fs::File::create(path)?;
            let writer = io::BufWriter::new(file);
            serde_json::to_writer_pretty(writer, response)?;
        }
        Some("xlsx") => write_xlsx(path, query, response)?,
        _ => {
            let file = fs::File::create(path)?;
            let mut writer = io::BufWriter::new(file);
            writer.write_all(render_text(query, response).as_bytes())?;
            writer.flush()?;
        }
    }
    info!("wrote: {path}");
    Ok(())
}

fn write_header(sheet: &mut Worksheet, header: &[&str]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col, h) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *h, &bold)?;
    }
    Ok(())
}

fn concordance_sheet(sheet: &mut Worksheet, lines: &[ConcordanceLine]) -> Result<()> {
    write_header(sheet, &["writer", "addressee", "year", "pre", "hit", "post"])?;
    for (i, line) in lines.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &line.writer)?;
        sheet.write_string(row, 1, &line.addressee)?;
        sheet.write_number(row, 2, line.year)?;
        sheet.write_string(row, 3, &line.pre)?;
        sheet.write_string(row, 4, &line.hit)?;
        sheet.write_string(row, 5, &line.post)?;
    }
    Ok(())
}

fn frequency_sheet(sheet: &mut Worksheet, f: &Frequency) -> Result<()> {
    write_header(sheet, &["raw", "normalized per 1000 words"])?;
    sheet.write_number(1, 0, f.raw as f64)?;
    sheet.write_number(1, 1, f.normalized)?;
    Ok(())
}

fn category_sheet(sheet: &mut Worksheet, query: &Query, counts: &[CategoryCount]) -> Result<()> {
    let header = match query.output {
        OutputMode::ByCategory {
            category,
            frequency,
        } => [category.to_string(), frequency.to_string()],
        _ => ["label".to_owned(), "value".to_owned()],
    };
    write_header(sheet, &[header[0].as_str(), header[1].as_str()])?;
    for (i, c) in counts.iter().enumerate() {
        let row = i as u32 + 1;
        match &c.label {
            Label::Name(name) => sheet.write_string(row, 0, name)?,
            Label::Year(year) => sheet.write_number(row, 0, *year)?,
        };
        match c.value {
            Value::Raw(x) => sheet.write_number(row, 1, x as f64)?,
            Value::Normalized(x) => sheet.write_number(row, 1, x)?,
        };
    }
    Ok(())
}

fn write_xlsx(path: &str, query: &Query, response: &Response) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    match response {
        Response::Concordance(lines) => concordance_sheet(sheet, lines)?,
        Response::TotalFrequency(f) => frequency_sheet(sheet, f)?,
        Response::ByCategory(counts) => category_sheet(sheet, query, counts)?,
    }
    workbook.save(path)?;
    Ok(())
}
