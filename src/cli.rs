use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "Chan Downloader", author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the board to download everything within, unless a thread number is provided
    #[clap(short, long, value_name = "BOARD")]
    pub board: String,

    /// Thread number. If present, only this thread will be downloaded
    #[clap(short, long, value_name = "THREAD")]
    pub thread: Option<u64>,

    /// Show extra print outs (existing files, thread lists, debug logs)
    #[clap(short, long, action)]
    pub debug: bool,
}
