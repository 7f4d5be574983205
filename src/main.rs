// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Settings --> Logging --> Session --> Command Dispatch
//!   (none) | Preview | Apply | Export | Elevate | Status | Version
//! ```

use std::io::BufRead;
use std::process::ExitCode;

use envman::cli::{self, Cli, Command};
use envman::cmd::apply::run_apply_command;
use envman::cmd::elevate::run_elevate_command;
use envman::cmd::export::run_export_command;
use envman::cmd::preview::{run_default_command, run_preview_command};
use envman::cmd::status::run_status_command;
use envman::cmd::{Completion, Session};
use envman::config::Settings;
use envman::core::privilege::{HostPrivilege, PrivilegeGate};
use envman::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let loader = cli
        .global
        .apply_overrides(Settings::standard_loader(&cli.global.config));
    let settings_files = loader.format_loaded_files();
    let settings = match loader.build() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e:#}");
            return finish(&cli, ExitCode::FAILURE);
        }
    };

    let _log_guard = match init_logging(&build_log_config(&settings)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return finish(&cli, ExitCode::FAILURE);
        }
    };

    let gate = HostPrivilege;
    let privilege = gate.is_elevated();
    tracing::info!(%privilege, "Starting envman");

    let mut session = Session::new(privilege, settings)
        .with_settings_files(settings_files)
        .with_config_files(cli.global.config.clone())
        .with_dry(cli.global.dry);

    if let Some(path) = &cli.file
        && let Err(e) = session.select(path)
    {
        eprintln!("Error: {e}");
        return finish(&cli, ExitCode::FAILURE);
    }

    let code = dispatch_command(&cli, &mut session, &gate).await;
    finish(&cli, code)
}

fn build_log_config(settings: &Settings) -> LogConfig {
    LogConfig::builder()
        .with_console_level(settings.global.output_log_level)
        .with_file_level(settings.global.file_log_level)
        .maybe_with_log_file(settings.log_file().map(std::path::Path::to_path_buf))
        .build()
}

async fn dispatch_command(cli: &Cli, session: &mut Session, gate: &dyn PrivilegeGate) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(Completion::Success)
        }
        Some(Command::Status) => Ok(run_status_command(session)),
        Some(Command::Preview(args)) => run_preview_command(args, session).await,
        Some(Command::Apply(args)) => run_apply_command(args, session).await,
        Some(Command::Export(args)) => run_export_command(args, session).await,
        Some(Command::Elevate(args)) => run_elevate_command(args, session, gate),
        None => run_default_command(session).await,
    };

    match result {
        Ok(completion) => ExitCode::from(completion.exit_code()),
        Err(e) => {
            tracing::debug!(status = session.status(), "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

/// Waits for Enter when `--pause` was given.
fn finish(cli: &Cli, code: ExitCode) -> ExitCode {
    if cli.global.pause {
        eprintln!("Press Enter to exit...");
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);
    }
    code
}
