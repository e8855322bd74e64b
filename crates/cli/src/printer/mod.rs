use std::{
    borrow::Cow,
    io::{self, Write},
};

use dirlist_fs::{Match, Totals};
use serde::Serialize;

const DIRECTORY_TAG: &str = "<Directory>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-width columns.
    #[default]
    Human,
    /// Comma separated, one row per entry.
    Csv,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Configuration for printing a listing.
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    /// Print the path alone on each row.
    pub quiet: bool,
    /// Print per-entry rows at all.
    pub show_rows: bool,
    /// Print totals once the scan is done.
    pub show_totals: bool,
    /// Rows carry a line-count column.
    pub show_lines: bool,
}

/// Trait for printing listing rows and the closing totals.
pub trait ReportPrinter {
    fn print_row(&mut self, m: &Match<'_>) -> io::Result<()>;

    /// Called once after every root has been scanned.
    fn finish(&mut self, totals: &Totals) -> io::Result<()>;

    /// The stream rows go to. Prompts must use it too, so they interleave
    /// with rows and count towards the page.
    fn out(&mut self) -> &mut dyn Write;
}

pub fn make_printer<W: Write + 'static>(out: W, cfg: PrinterConfig) -> Box<dyn ReportPrinter> {
    match cfg.format {
        OutputFormat::Human => Box::new(HumanPrinter::new(out, cfg)),
        OutputFormat::Csv => Box::new(CsvPrinter::new(out, cfg)),
        OutputFormat::Json => Box::new(JsonPrinter::new(out, cfg)),
    }
}

/// `1234567` as `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Quote a CSV field when it holds a comma or a double quote, doubling any
/// quotes inside.
pub fn csv_field(s: &str) -> Cow<'_, str> {
    if !s.contains([',', '"']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
}

pub struct HumanPrinter<W: Write> {
    out: W,
    cfg: PrinterConfig,
}

impl<W: Write> HumanPrinter<W> {
    pub fn new(out: W, cfg: PrinterConfig) -> Self {
        Self { out, cfg }
    }
}

impl<W: Write> ReportPrinter for HumanPrinter<W> {
    fn print_row(&mut self, m: &Match<'_>) -> io::Result<()> {
        if !self.cfg.show_rows {
            return Ok(());
        }

        let path = m.path.display();
        if self.cfg.quiet {
            return writeln!(self.out, "{path}");
        }

        let e = m.entry;
        let date = e.modified.date_column();
        let time = e.modified.time_column();

        if e.is_dir {
            return writeln!(self.out, "{date:>10} {time:>8} {DIRECTORY_TAG:>13}  {path}");
        }

        let lines = if self.cfg.show_lines {
            format!("{:>13}", group_thousands(m.lines.unwrap_or(0)))
        } else {
            String::new()
        };
        let size = group_thousands(e.size);
        writeln!(self.out, "{date:>10} {time:>8} {size:>13} {lines}  {path}")
    }

    fn finish(&mut self, t: &Totals) -> io::Result<()> {
        if !self.cfg.show_totals {
            return Ok(());
        }

        let files = group_thousands(t.files);
        let bytes = group_thousands(t.bytes);
        let alloc = group_thousands(t.allocated);

        if self.cfg.show_lines {
            let lines = group_thousands(t.lines);
            writeln!(
                self.out,
                "\n{files:>13} Files {bytes:>13},{lines:>13}  ({alloc} bytes allocated)"
            )
        } else {
            writeln!(self.out, "\n{files:>13} Files {bytes:>13}  ({alloc} bytes allocated)")
        }
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}

pub struct CsvPrinter<W: Write> {
    out: W,
    cfg: PrinterConfig,
}

impl<W: Write> CsvPrinter<W> {
    pub fn new(out: W, cfg: PrinterConfig) -> Self {
        Self { out, cfg }
    }
}

impl<W: Write> ReportPrinter for CsvPrinter<W> {
    fn print_row(&mut self, m: &Match<'_>) -> io::Result<()> {
        if !self.cfg.show_rows {
            return Ok(());
        }

        let path = m.path.to_string_lossy();
        let path = csv_field(&path);
        if self.cfg.quiet {
            return writeln!(self.out, "{path}");
        }

        let e = m.entry;
        let date = e.modified.date_column();
        let time = e.modified.time_column();

        if e.is_dir {
            return writeln!(self.out, "{date},{time},\"{DIRECTORY_TAG}\",{path}");
        }

        let size = group_thousands(e.size);
        if self.cfg.show_lines {
            let lines = m.lines.unwrap_or(0);
            writeln!(self.out, "{date},{time},\"{size}\",{lines},{path}")
        } else {
            writeln!(self.out, "{date},{time},\"{size}\",{path}")
        }
    }

    fn finish(&mut self, t: &Totals) -> io::Result<()> {
        if !self.cfg.show_totals {
            return Ok(());
        }

        let files = group_thousands(t.files);
        let bytes = group_thousands(t.bytes);
        let alloc = group_thousands(t.allocated);

        if self.cfg.show_lines {
            let lines = group_thousands(t.lines);
            writeln!(self.out, "Totals,\"{files}\",\"{bytes}\",\"{lines}\",\"{alloc}\"")
        } else {
            writeln!(self.out, "Totals,\"{files}\",\"{bytes}\",\"{alloc}\"")
        }
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    #[serde(rename = "type")]
    ty: &'static str,
    kind: &'static str,
    path: Cow<'a, str>,
    size: u64,
    allocated: u64,
    modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<u64>,
}

#[derive(Debug, Serialize)]
struct JsonSummary {
    #[serde(rename = "type")]
    ty: &'static str,
    files: u64,
    bytes: u64,
    allocated: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<u64>,
}

/// One JSON object per row, then a summary object when totals are asked for.
pub struct JsonPrinter<W: Write> {
    out: W,
    cfg: PrinterConfig,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W, cfg: PrinterConfig) -> Self {
        Self { out, cfg }
    }
}

impl<W: Write> ReportPrinter for JsonPrinter<W> {
    fn print_row(&mut self, m: &Match<'_>) -> io::Result<()> {
        if !self.cfg.show_rows {
            return Ok(());
        }

        let e = m.entry;
        let row = JsonRow {
            ty: "entry",
            kind: if e.is_dir { "dir" } else { "file" },
            path: m.path.to_string_lossy(),
            size: e.size,
            allocated: e.allocated,
            modified: e.modified.to_string(),
            lines: m.lines,
        };
        serde_json::to_writer(&mut self.out, &row)?;
        writeln!(self.out)
    }

    fn finish(&mut self, t: &Totals) -> io::Result<()> {
        if !self.cfg.show_totals {
            return Ok(());
        }

        let summary = JsonSummary {
            ty: "summary",
            files: t.files,
            bytes: t.bytes,
            allocated: t.allocated,
            lines: self.cfg.show_lines.then_some(t.lines),
        };
        serde_json::to_writer(&mut self.out, &summary)?;
        writeln!(self.out)
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
