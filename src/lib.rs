// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)     cmd (handlers + Session)
//!                |      preview / apply / export / elevate
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '---------------------------'
//!                           |
//!           +---------------+---------------+
//!           v               v               v
//!       manifest          apply           model
//!    YAML + guard    plan / applier    Variable, Scope
//!                     / report
//!
//!   +------------------------------------------------+
//!   |  core   store (registry), notify, privilege    |
//!   +------------------------------------------------+
//!   |  foundation   error, logging                   |
//!   +------------------------------------------------+
//! ```

pub mod apply;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod model;
