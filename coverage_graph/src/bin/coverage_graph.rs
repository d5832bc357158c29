use anyhow::Result;
use clap::Parser;
use coverage_graph::app::{self, AppConfig, Args};

fn main() -> Result<()> {
    let args = Args::parse_from(app::expand_short_aliases(std::env::args_os()));
    app::init_tracing(args.verbose);
    let config = AppConfig::from(args);
    app::run(&config)
}
