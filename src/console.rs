use std::thread;
use std::time::Duration;

use colored::Colorize;

use crate::coordinator::{Coordinator, RunRequest, RunSummary};
use crate::decrypt::{Outcome, PdfEngine};
use crate::error::StartError;
use crate::event::{LogEvent, LogLevel};
use crate::logfile::LogFile;
use crate::progress::RunProgress;
use crate::utils;

pub fn print_banner() {
    println!(
        "{}",
        format!("pdf-unlock v{}", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    println!();
}

pub fn print_event(event: &LogEvent) {
    let line = event.to_string();
    let line = match event.level {
        LogLevel::Debug => line.dimmed(),
        LogLevel::Info => line.normal(),
        LogLevel::Warning => line.yellow(),
        LogLevel::Error => line.red(),
    };
    println!("{line}");
}

pub fn print_progress(progress: &RunProgress) {
    println!(
        "  {} {}/{}",
        utils::format_percent(progress.percent()).green(),
        progress.completed(),
        progress.total()
    );
}

pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "=== Summary ===".bold().white());
    let rows = [
        (
            "Password removed",
            summary.count(|o| *o == Outcome::PasswordRemoved),
        ),
        (
            "Not encrypted",
            summary.count(|o| *o == Outcome::AlreadyUnencrypted),
        ),
        (
            "Incorrect password",
            summary.count(|o| *o == Outcome::WrongPassword),
        ),
        (
            "Failed",
            summary.count(|o| matches!(o, Outcome::Failed(_))),
        ),
    ];
    for (label, count) in rows {
        println!("  {label:<22} {}", count.to_string().green());
    }
    println!("  {}", "─".repeat(30).dimmed());
    println!("  {:<22} {}/{}", "Processed".bold(), summary.completed, summary.total);
}

/// Run one batch and follow it from the calling thread, like a window would:
/// wake up every poll interval, drain the feed, print, stop once ready again.
pub fn run<E: PdfEngine>(
    engine: E,
    request: RunRequest,
    poll_interval: Duration,
    log_file: &mut LogFile,
) -> Result<RunSummary, StartError> {
    let (coordinator, feed) = Coordinator::new(engine, poll_interval);
    let progress = coordinator.progress();

    let started = coordinator.start(request);
    let handle = match started {
        Ok(handle) => handle,
        Err(e) => {
            for event in feed.drain() {
                log_file.append(&event);
                print_event(&event);
            }
            return Err(e);
        }
    };

    let mut shown = 0;
    loop {
        let ready = coordinator.is_ready();
        for event in feed.drain() {
            log_file.append(&event);
            print_event(&event);
        }
        if progress.completed() != shown {
            shown = progress.completed();
            print_progress(&progress);
        }
        if ready {
            break;
        }
        thread::sleep(feed.poll_interval());
    }

    match handle.join() {
        Ok(summary) => Ok(summary),
        Err(payload) => {
            tracing::error!("worker thread died: {}", utils::panic_message(payload.as_ref()));
            Ok(RunSummary::default())
        }
    }
}
