use std::process::ExitCode;

use clap::Parser;
use folio::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    folio::logging::init_tracing();
    cli::run(Cli::parse()).await
}
