use anyhow::Context;
use clap::Parser;
use comtrade_cfg::CfgParser;
use comtrade_cfg::cli::{Args, report, setup_logging};
use std::process;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(run(&args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let parser = CfgParser::new(args.to_parser_config());
    let outcome = parser
        .parse_file(&args.cfg_path)
        .await
        .with_context(|| format!("Failed to parse {}", args.cfg_path.display()))?;

    if args.json {
        report::print_json(&outcome)?;
    } else {
        report::print_summary(&outcome);
    }

    Ok(())
}
