// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use sift_http::{collector, config, reader, report};

#[derive(Parser, Debug)]
#[command(name = "sift-http")]
struct Args {
    /// Substring the flow host must contain (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Optional config TOML path
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a recorded flow log and write the analysis JSON next to it
    Analyze {
        /// Path to the flow log (JSONL)
        capture: PathBuf,
    },
    /// Collect flows from a live event stream on stdin, export on shutdown
    Live {
        /// Output path for the export document (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    // Load config: optional CLI path; defaults if not provided
    let cfg = if let Some(ref p) = args.config {
        config::Config::load_from_path(p).await.unwrap_or_else(|e| {
            warn!(%p, %e, "failed to load config, using defaults");
            config::Config::default()
        })
    } else {
        config::Config::default()
    };

    let filter = cfg.resolve_host(args.host)?;

    match args.command {
        Command::Analyze { capture } => {
            let flows = reader::read_matching_flows(&capture, &filter).await?;
            if flows.is_empty() {
                anyhow::bail!("no flows found");
            }

            let out = reader::analysis_output_path(&capture);
            let json = serde_json::to_string_pretty(&flows)?;
            tokio::fs::write(&out, json).await?;

            println!("{}", report::summarize(&flows, 0));
            println!("\nResults written to: {}", out.display());
        }
        Command::Live { output } => {
            let live = collector::LiveCollector::new(filter);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let export = collector::run_live(stdin, live).await;

            let out = output.unwrap_or_else(|| PathBuf::from(&cfg.output.live_export));
            let json = serde_json::to_string_pretty(&export)?;
            tokio::fs::write(&out, json).await?;

            eprintln!(
                "{}",
                report::summarize(&export.http_flows, export.websocket_messages.len())
            );
            eprintln!("\nResults written to: {}", out.display());
        }
    }

    Ok(())
}
