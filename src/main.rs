mod app;
mod cli;
mod config;
mod console;
mod coordinator;
mod decrypt;
mod discovery;
mod engine;
mod error;
mod event;
mod logfile;
mod progress;
#[cfg(test)]
mod testing;
mod utils;

use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::coordinator::RunRequest;
use crate::discovery::SelectionMode;
use crate::engine::LopdfEngine;
use crate::logfile::LogFile;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pdf_unlock=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let log_file = if cli.no_log_file {
        LogFile::disabled()
    } else {
        LogFile::open(config.log_file_path().as_deref())
    };

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => {
            if let Err(e) = app::launch(config, log_file) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        Command::Run {
            path,
            password,
            dir,
        } => {
            let mut log_file = log_file;
            let request = RunRequest {
                path,
                mode: if dir {
                    SelectionMode::Directory
                } else {
                    SelectionMode::SingleFile
                },
                password: password.unwrap_or_else(|| config.default_password.clone()),
            };

            console::print_banner();
            match console::run(LopdfEngine, request, config.poll_interval(), &mut log_file) {
                Ok(summary) => console::print_summary(&summary),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
    }
}
