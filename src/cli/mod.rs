// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line interface.
//!
//! # Command Structure
//!
//! ```text
//! envman [global options] [FILE] [command]
//! (none)                       show FILE and preview it, or print privilege
//! preview [FILE]
//! apply   [FILE] [--json]
//! export  [OUTPUT] [--user-only]
//! elevate [ARGS...]
//! status
//! version
//! ```
//!
//! `FILE` is the pre-selected declarative file. Commands taking their own
//! `FILE` fall back to it.

pub mod global;


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli::global::GlobalOptions;

/// Environment Variable Manager
///
/// Applies user and system environment variables declared in a YAML file.
#[derive(Debug, Parser)]
#[command(
    name = "envman",
    author,
    version,
    about = "Environment Variable Manager",
    long_about = "envman Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Applies user and system environment variables declared in a\n\
                  YAML file to the persistent environment store.\n\n\
                  Run `envman preview vars.yaml` to see what would change and\n\
                  `envman apply vars.yaml` to apply it. System variables need an\n\
                  elevated console; `envman elevate` relaunches as administrator.",
    after_help = "FILE FORMAT:\n\n\
                  user_variables:\n  \
                    - name: JAVA_HOME\n    \
                      value: C:\\Java\\jdk-21\n    \
                      operation: set\n\
                  system_variables:\n  \
                    - name: OLD_TOOL\n    \
                      operation: delete\n\n\
                  SETTINGS:\n\n\
                  envman.toml is read next to the executable and in the current\n\
                  directory; files given with --config are loaded after those,\n\
                  then ENVMAN_<SECTION>__<KEY> environment variables.",
    subcommand_precedence_over_arg = true
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Declarative file to pre-select (.yaml or .yml)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows what applying a file would change, without touching the store.
    Preview(FileArgs),

    /// Applies a file to the environment store.
    Apply(ApplyArgs),

    /// Writes the current store contents as a declarative file.
    Export(ExportArgs),

    /// Relaunches envman as administrator.
    Elevate(ElevateArgs),

    /// Shows the privilege level, store locations and settings.
    Status,

    /// Shows the version.
    Version,
}

/// File selection shared by file-reading commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FileArgs {
    /// Declarative file; defaults to the pre-selected FILE
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Prints the apply report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ExportArgs {
    /// Output file; `.yaml` is appended when the extension is missing.
    /// Writes to stdout when omitted.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Exports the user scope only
    #[arg(long)]
    pub user_only: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ElevateArgs {
    /// Arguments for the elevated instance (default: apply FILE)
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
