use std::path::PathBuf;
use std::thread::JoinHandle;

use eframe::egui;

use crate::config::Config;
use crate::coordinator::{Coordinator, RunRequest, RunSummary};
use crate::discovery::SelectionMode;
use crate::engine::LopdfEngine;
use crate::event::{EventFeed, LogEvent, LogLevel};
use crate::logfile::LogFile;
use crate::progress::RunProgress;
use crate::utils;

/// Lines kept in the log view; older ones scroll off.
const MAX_LOG_LINES: usize = 5_000;

pub struct UnlockApp {
    coordinator: Coordinator<LopdfEngine>,
    feed: EventFeed,
    progress: RunProgress,
    worker: Option<JoinHandle<RunSummary>>,
    password: String,
    mode: SelectionMode,
    path: String,
    log_lines: Vec<LogEvent>,
    log_file: LogFile,
}

impl UnlockApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &Config, log_file: LogFile) -> Self {
        let (coordinator, feed) = Coordinator::new(LopdfEngine, config.poll_interval());
        let progress = coordinator.progress();
        Self {
            coordinator,
            feed,
            progress,
            worker: None,
            password: config.default_password.clone(),
            mode: SelectionMode::SingleFile,
            path: String::new(),
            log_lines: vec![],
            log_file,
        }
    }

    fn start_run(&mut self) {
        let request = RunRequest {
            path: PathBuf::from(self.path.trim()),
            mode: self.mode,
            password: self.password.clone(),
        };
        match self.coordinator.start(request) {
            Ok(handle) => self.worker = Some(handle),
            // Rejections are already in the feed.
            Err(e) => tracing::debug!("run not started: {e}"),
        }
    }

    fn drain_messages(&mut self) {
        for event in self.feed.drain() {
            self.log_file.append(&event);
            self.log_lines.push(event);
        }
        if self.log_lines.len() > MAX_LOG_LINES {
            let excess = self.log_lines.len() - MAX_LOG_LINES;
            self.log_lines.drain(..excess);
        }

        if self.worker.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = self.worker.take() {
                match handle.join() {
                    Ok(summary) => tracing::info!(
                        completed = summary.completed,
                        total = summary.total,
                        "run finished"
                    ),
                    Err(payload) => tracing::error!(
                        "worker thread died: {}",
                        utils::panic_message(payload.as_ref())
                    ),
                }
            }
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.heading(
                egui::RichText::new("PDF Password Remover")
                    .size(24.0)
                    .strong()
                    .color(egui::Color32::from_rgb(80, 180, 220)),
            );
        });
        ui.add_space(8.0);
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let ready = self.coordinator.is_ready();

        egui::Grid::new("run_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("PDF password:");
                ui.add_enabled(
                    ready,
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();

                ui.label("Select:");
                ui.horizontal(|ui| {
                    let before = self.mode;
                    ui.radio_value(&mut self.mode, SelectionMode::SingleFile, "File");
                    ui.radio_value(&mut self.mode, SelectionMode::Directory, "Folder");
                    // Switching mode invalidates whatever path was typed.
                    if self.mode != before {
                        self.path.clear();
                    }
                });
                ui.end_row();

                let hint = match self.mode {
                    SelectionMode::SingleFile => "/path/to/file.pdf",
                    SelectionMode::Directory => "/path/to/folder",
                };
                ui.label("Path:");
                ui.add_enabled(
                    ready,
                    egui::TextEdit::singleline(&mut self.path)
                        .hint_text(hint)
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();
            });
    }

    fn render_action_bar(&mut self, ui: &mut egui::Ui) {
        let ready = self.coordinator.is_ready();

        ui.add_space(6.0);
        ui.add(
            egui::ProgressBar::new((self.progress.percent() / 100.0) as f32)
                .show_percentage()
                .desired_width(ui.available_width()),
        );
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(ready, egui::Button::new("Start"))
                .clicked()
            {
                self.start_run();
            }
            if !ready {
                ui.add_space(8.0);
                ui.spinner();
                ui.label(format!(
                    "{}/{}",
                    self.progress.completed(),
                    self.progress.total()
                ));
            } else if self.progress.is_finished() {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!("Done: {} file(s)", self.progress.total()))
                        .color(egui::Color32::from_rgb(80, 200, 80)),
                );
            }
        });
        ui.add_space(4.0);
    }

    fn render_log(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for event in self.log_lines.iter().filter(|e| e.shown_on_screen()) {
                    let color = match event.level {
                        LogLevel::Debug | LogLevel::Info => egui::Color32::from_rgb(200, 200, 205),
                        LogLevel::Warning => egui::Color32::from_rgb(220, 180, 50),
                        LogLevel::Error => egui::Color32::from_rgb(220, 90, 80),
                    };
                    ui.label(
                        egui::RichText::new(event.to_string())
                            .monospace()
                            .color(color),
                    );
                }
            });
    }

    fn render_footer(ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("Version: {}", env!("CARGO_PKG_VERSION")))
                    .small()
                    .color(egui::Color32::GRAY),
            );
        });
    }
}

impl eframe::App for UnlockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        // Come back for the feed even when no input arrives.
        ctx.request_repaint_after(self.feed.poll_interval());

        egui::TopBottomPanel::bottom("footer").show(ctx, Self::render_footer);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui);
            self.render_form(ui);
            self.render_action_bar(ui);
            ui.separator();
            self.render_log(ui);
        });
    }
}

/// Open the desktop window and block until it is closed.
pub fn launch(config: Config, log_file: LogFile) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PDF Password Remover")
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([500.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "pdf-unlock",
        options,
        Box::new(move |cc| Ok(Box::new(UnlockApp::new(cc, &config, log_file)))),
    )
}
