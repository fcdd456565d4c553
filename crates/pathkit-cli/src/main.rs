//! pathkit CLI entry point.
//!
//! Parses arguments, initializes logging and dispatches to a command.

use clap::Parser;
use miette::Result;
use pathkit_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Convert(convert_args) => commands::convert_execute(convert_args, args.verbose).await,
        cli::Command::Scan(scan_args) => commands::scan_execute(scan_args).await,
        cli::Command::Path(path_args) => commands::path_execute(path_args),
    };

    result.map_err(error::cli_error_to_miette)
}
