use anyhow::Result;
use clap::Parser;
use locviz::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    locviz::logging::init(cli.common.verbose, cli.common.quiet);
    cli.execute()
}
