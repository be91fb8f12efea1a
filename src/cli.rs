use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pdf-unlock",
    about = "Remove password protection from PDF files, one file or a whole folder at a time",
    version
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Don't mirror log lines into the log file
    #[arg(long, global = true)]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the desktop window (default)
    Gui,

    /// Unlock without a window and print progress to the terminal
    Run {
        /// PDF file, or folder with --dir
        path: PathBuf,

        /// Password applied to every file. Defaults to the configured default-password.
        #[arg(long, short)]
        password: Option<String>,

        /// Treat PATH as a folder and process every PDF directly inside it
        #[arg(long)]
        dir: bool,
    },
}
