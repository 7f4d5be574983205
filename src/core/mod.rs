// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host integration: everything that touches platform APIs.
//!
//! ```text
//!               core
//!                |
//!     +----------+----------+
//!     |          |          |
//!     v          v          v
//!   store     privilege   notify
//!     |          |          |
//!  Registry   Token       WM_SETTINGCHANGE
//!  Memory     runas       SendMessageTimeoutW
//!  DryRun     relaunch    (Windows only)
//! ```
//!
//! Each concern is a trait; Windows implementations live in `windows.rs`
//! submodules so the rest of the crate stays platform-neutral.

pub mod notify;
pub mod privilege;
pub mod store;
