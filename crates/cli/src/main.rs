use std::process::ExitCode;

use clap::{ArgAction, Parser};

mod commands;
mod console;
mod exec;
mod pager;
mod printer;

use commands::{EXIT_USAGE, ListArgs};
use dirlist_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "dirlist",
    version,
    about = "List files by date, size and wildcard, with totals and optional deletion"
)]
pub struct Cli {
    #[command(flatten)]
    pub list: ListArgs,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version land here too, on stdout and with success.
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            e.print().ok();
            return ExitCode::from(code);
        }
    };

    logging::init(cli.verbose).ok();
    commands::list::run(cli.list)
}
