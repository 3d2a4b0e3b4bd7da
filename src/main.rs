#![deny(clippy::all)]
use anyhow::Result;
use chan_downloader::cli::Cli;
use chan_downloader::progress_bars::IndicatifProgressHandler;
use chan_downloader::{HttpFetcher, Queue, QueueOpts, ServerConfig, Summary};
use clap::Parser;
use colored::Colorize;
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::builder()
        .format_timestamp(None)
        .filter_level(level)
        .parse_default_env()
        .init();

    let server = ServerConfig::default();
    debug!("Downloading /{}/ from {}", args.board, server.pretty_name);
    let fetcher = HttpFetcher::new(&server)?;

    let options = QueueOpts {
        verbose: args.debug,
        output: PathBuf::from("."),
    };

    let progress_handler = Arc::new(IndicatifProgressHandler::new());

    let qw = Queue::new(server, fetcher, options, Some(progress_handler));

    let summary = qw.download(&args.board, args.thread).await;

    print_results(&summary);

    Ok(())
}

fn print_results(summary: &Summary) {
    println!(
        "{} {} {} {} {}",
        summary.downloaded.to_string().bold().blue(),
        "of".bold(),
        summary.total_files().to_string().bold().blue(),
        "files".bold().blue(),
        "downloaded".bold()
    );

    if summary.failed_files > 0 {
        println!(
            "{} {}",
            summary.failed_files.to_string().bold().red(),
            "files failed to download."
                .bold()
                .red()
        );
    }
}
