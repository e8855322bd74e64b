use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Args;
use dirlist_engine::{CriteriaError, FilterCriteria, PatternSet, parse_date_time};
use dirlist_fs::{DeletionWorkflow, Match, MatchSink, OsDirSource, ScanError, Walker};
use dirlist_runtime::{default_scan_root, fixed_drive_roots, page_rows, resolve_root, search_path_roots};
use log::debug;

use crate::{
    commands::{exit_code_for, is_user_quit},
    console::ConsoleInput,
    exec,
    pager::Pager,
    printer::{OutputFormat, PrinterConfig, ReportPrinter, make_printer},
};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Add a line-count column
    #[arg(long, short = 'n')]
    pub lines: bool,

    /// Print totals after the listing
    #[arg(long, short = 't')]
    pub total: bool,

    /// Print totals only, no per-entry rows
    #[arg(long, short = 'T')]
    pub total_only: bool,

    /// Print paths only
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Comma-separated rows and totals
    #[arg(long, short = 'c', conflicts_with = "json")]
    pub csv: bool,

    /// Output rows as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// Stop at every full screen with --More--
    #[arg(long, short = 'p')]
    pub pause: bool,
}

impl OutputOptions {
    pub fn printer_config(&self) -> PrinterConfig {
        let format = if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Human
        };

        PrinterConfig {
            format,
            quiet: self.quiet,
            show_rows: !self.total_only,
            show_totals: self.total || self.total_only,
            show_lines: self.lines,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directories to list; the current directory when none are given
    #[arg(value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(long, short = 'r')]
    pub recurse: bool,

    /// Include hidden and system entries
    #[arg(long, short = 'H')]
    pub hidden: bool,

    /// List directories as entries too
    #[arg(long, short = 'd')]
    pub dirs: bool,

    /// List directories only
    #[arg(long, short = 'o')]
    pub only_dirs: bool,

    /// Do not descend into TMP, TEMP or TEMPORARY
    #[arg(long, short = 'x')]
    pub exclude_temp: bool,

    /// Scan every fixed drive instead of ROOT
    #[arg(long, short = 'e')]
    pub every_drive: bool,

    /// Scan each directory on PATH, without recursion
    #[arg(long, short = 'z')]
    pub path_search: bool,

    /// Semicolon-separated wildcards, e.g. "*.c;*.h"
    #[arg(long, short = 'w', value_name = "LIST")]
    pub wildcards: Option<String>,

    /// Smallest size listed, in bytes
    #[arg(long, short = 'l', value_name = "BYTES")]
    pub min_size: Option<u64>,

    /// Largest size listed, in bytes
    #[arg(long, short = 's', value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Modified at or after DATE (mm-dd[-yyyy][:hh[:mm[:ss]]], TODAY, YESTERDAY)
    #[arg(long, short = 'a', value_name = "DATE")]
    pub after: Option<String>,

    /// Modified at or before DATE
    #[arg(long, short = 'b', value_name = "DATE")]
    pub before: Option<String>,

    /// Offer to delete every listed entry
    #[arg(long, short = 'k')]
    pub kill: bool,

    /// Run CMD with each listed file's path appended
    #[arg(long, short = 'm', value_name = "CMD")]
    pub exec: Option<String>,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl ListArgs {
    pub fn criteria(&self) -> Result<FilterCriteria, CriteriaError> {
        let mut b = FilterCriteria::builder()
            .recurse(self.recurse)
            .include_hidden(self.hidden)
            .include_dirs(self.dirs)
            .dirs_only(self.only_dirs)
            .exclude_temp(self.exclude_temp)
            .every_drive(self.every_drive)
            .search_path(self.path_search);

        if let Some(s) = &self.after {
            b = b.modified_after(parse_date_time(s)?);
        }
        if let Some(s) = &self.before {
            b = b.modified_before(parse_date_time(s)?);
        }
        if let Some(n) = self.min_size {
            b = b.min_size(n);
        }
        if let Some(n) = self.max_size {
            b = b.max_size(n);
        }
        if let Some(list) = &self.wildcards {
            b = b.patterns(PatternSet::parse(list)?);
        }

        Ok(b.build())
    }

    /// Where the scan starts: every drive, each PATH entry, the given
    /// roots, or the current directory.
    pub fn scan_roots(&self, criteria: &FilterCriteria) -> Vec<PathBuf> {
        if criteria.every_drive() {
            fixed_drive_roots()
        } else if criteria.search_path() {
            search_path_roots()
        } else if self.roots.is_empty() {
            vec![default_scan_root()]
        } else {
            self.roots.iter().map(|r| resolve_root(r)).collect()
        }
    }
}

pub fn run(args: ListArgs) -> ExitCode {
    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !is_user_quit(&e) {
                eprintln!("[error] {e:#}");
            }
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn execute(args: &ListArgs) -> anyhow::Result<()> {
    let criteria = args.criteria()?;
    let roots = args.scan_roots(&criteria);
    debug!("[list] {} root(s), criteria {:?}", roots.len(), criteria);

    let page = args.output.pause.then(page_rows);
    let out = Pager::new(io::stdout(), ConsoleInput::new(), page);
    let mut printer = make_printer(out, args.output.printer_config());

    let mut walker = Walker::new(OsDirSource)?.count_lines(args.output.lines);

    {
        let mut session = Session {
            printer: printer.as_mut(),
            exec: args.exec.as_deref(),
            deleter: args
                .kill
                .then(|| DeletionWorkflow::new(ConsoleInput::new()).quiet(args.output.quiet)),
        };
        for root in &roots {
            walker.scan(root, &criteria, &mut session)?;
        }
    }

    printer.finish(&walker.totals())?;
    printer.out().flush()?;
    Ok(())
}

/// Everything done with one match: print it, run the hook, offer deletion.
struct Session<'a, R> {
    printer: &'a mut dyn ReportPrinter,
    exec: Option<&'a str>,
    deleter: Option<DeletionWorkflow<R>>,
}

impl<R: BufRead> MatchSink for Session<'_, R> {
    fn on_match(&mut self, m: &Match<'_>) -> Result<(), ScanError> {
        self.printer.print_row(m)?;

        if let Some(cmd) = self.exec
            && !m.entry.is_dir
        {
            self.printer.out().flush()?;
            exec::run_hook(cmd, &m.path);
        }

        if let Some(deleter) = self.deleter.as_mut() {
            deleter.maybe_delete(m, self.printer.out())?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
