//! Projector Planner
//!
//! Entry point for the projector-planner application.
//!
//! Usage:
//!   projector-planner [SESSION]          open the panel (default session in the config dir)
//!   projector-planner --report SESSION [OUT]
//!                                        text report of a saved session, to OUT or stdout
//!   projector-planner --catalog          list the built-in projector catalog

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use projector_planner::app::PlannerApp;
use projector_planner::catalog::Catalog;
use projector_planner::export::{default_session_path, load_session, SessionExporter};
use projector_planner::panel::ProjectorPanel;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--catalog") => {
            print!("{}", Catalog::builtin().listing());
            ExitCode::SUCCESS
        }
        Some("--report") => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: {} --report <session.json|session.xml> [report.txt]", args[0]);
                return ExitCode::FAILURE;
            };
            let settings = match load_session(&PathBuf::from(path)) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("Failed to load session {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            };
            let report = ProjectorPanel::from_settings(Catalog::builtin(), settings).report();
            match args.get(3) {
                Some(out) => match SessionExporter::export_report(&report, &PathBuf::from(out)) {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        log::error!("Failed to write report {}: {}", out, e);
                        ExitCode::FAILURE
                    }
                },
                None => {
                    print!("{}", report);
                    ExitCode::SUCCESS
                }
            }
        }
        other => {
            let session_path = match other {
                Some(path) => Some(PathBuf::from(path)),
                None => default_session_path()
                    .map_err(|e| log::warn!("Sessions cannot be saved: {}", e))
                    .ok(),
            };
            run_window(session_path)
        }
    }
}

fn run_window(session_path: Option<PathBuf>) -> ExitCode {
    log::info!("Projector Planner v{} starting...", env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([440.0, 900.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("Projector Planner"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Projector Planner",
        native_options,
        Box::new(|_cc| Ok(Box::new(PlannerApp::new(session_path)))),
    );

    match result {
        Ok(()) => {
            log::info!("Projector Planner exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Event loop error: {}", e);
            ExitCode::FAILURE
        }
    }
}
