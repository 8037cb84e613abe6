// Interview application form wizard
// Main library entry point

pub mod config;
pub mod models;
pub mod smoke;
pub mod tui;
pub mod utils;
pub mod wizard;

use log::{error, info};
use std::path::PathBuf;

use crate::config::AppConfig;

/// Initialize logging system with dual format (JSON + human-readable)
fn init_logging(cfg: &AppConfig, with_stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = utils::path_resolver::resolve_log_folder(cfg.logging.dir.as_deref())?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");

    // JSON log file for structured parsing
    let json_log_file = log_dir.join(format!("applyform-{}.log", timestamp));

    // Human-readable log file (.txt)
    let txt_log_file = log_dir.join(format!("applyform-{}.txt", timestamp));

    // Configure dual-format logging:
    // - JSON format to .log file
    // - Human-readable format to .txt file
    // - Optional: human-readable to stdout (disabled for the TUI to avoid corrupting the terminal)
    let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", txt_line));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let json_line = utils::logging::format_json_log(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", json_line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", txt_line));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    log::info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(())
}

fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Ignoring invalid configuration: {}", e);
            AppConfig::default()
        }
    }
}

fn deployment_folder() -> PathBuf {
    utils::path_resolver::resolve_deployment_folder().unwrap_or_else(|_| PathBuf::from("."))
}

/// Interactive terminal wizard.
pub fn run_tui() {
    let cfg = load_config();

    // Initialize logging (no stdout to avoid corrupting the TUI)
    if let Err(e) = init_logging(&cfg, false) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] Application form wizard starting at {}",
        chrono::Utc::now()
    );
    info!(
        "[PHASE: initialization] [STEP: deployment_folder] Deployment folder: {:?}",
        deployment_folder()
    );

    if let Err(e) = tui::run(cfg.ui.tick_ms) {
        error!("[PHASE: tui] [STEP: fatal] TUI exited with error: {:?}", e);
        eprintln!("Application form error: {}", e);
    }
}

/// Non-interactive TUI smoke mode (for automated checks).
/// Renders a single frame on an in-memory backend and exits.
pub fn run_tui_smoke(target: Option<String>) {
    let cfg = load_config();

    if let Err(e) = init_logging(&cfg, false) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] TUI smoke starting at {}",
        chrono::Utc::now()
    );

    let target = target.as_deref().unwrap_or("personal");
    if let Err(e) = tui::smoke(target) {
        error!(
            "[PHASE: tui] [STEP: smoke] TUI smoke exited with error: {:?}",
            e
        );
        eprintln!("Application form error: {}", e);
        std::process::exit(1);
    }
}

/// Non-interactive wizard contract proof mode (for automated verification /
/// log capture). Writes `form_contract_smoke_transcript.log` under the log
/// folder and exits 0/1.
pub fn run_contract_smoke() {
    let cfg = load_config();

    if let Err(e) = init_logging(&cfg, false) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] Form contract smoke starting at {}",
        chrono::Utc::now()
    );

    let log_dir = match utils::path_resolver::resolve_log_folder(cfg.logging.dir.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to resolve log folder: {}", e);
            deployment_folder().join("applyform_logs")
        }
    };

    if let Err(e) = smoke::run_form_contract(&log_dir) {
        error!(
            "[PHASE: contract] [STEP: fatal] Contract smoke exited with error: {:?}",
            e
        );
        eprintln!("Application form error: {}", e);
        std::process::exit(1);
    }
}
