// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{FixedPrivilege, HostPrivilege, PrivilegeGate, forwarded_args, join_command_line, quote_arg};
use crate::error::ElevationError;
use crate::model::PrivilegeState;

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

#[test]
fn test_forwarded_args_appends_selection_once() {
    let selected = Path::new("cfg.yaml");

    assert_eq!(
        forwarded_args(&strings(&["apply"]), Some(selected)),
        strings(&["apply", "cfg.yaml"])
    );
    assert_eq!(
        forwarded_args(&strings(&["apply", "cfg.yaml"]), Some(selected)),
        strings(&["apply", "cfg.yaml"])
    );
    assert_eq!(forwarded_args(&strings(&["status"]), None), strings(&["status"]));
}

#[test]
fn test_quote_arg() {
    insta::assert_debug_snapshot!(
        [
            quote_arg("plain"),
            quote_arg(""),
            quote_arg(r"C:\My Configs\env.yaml"),
            quote_arg(r#"say "hi""#),
            quote_arg(r"C:\dir with space\"),
        ],
        @r#"
    [
        "plain",
        "\"\"",
        "\"C:\\My Configs\\env.yaml\"",
        "\"say \\\"hi\\\"\"",
        "\"C:\\dir with space\\\\\"",
    ]
    "#
    );
}

#[test]
fn test_join_command_line() {
    let line = join_command_line(&strings(&["--pause", "apply", r"C:\My Configs\env.yaml"]));
    assert_eq!(line, r#"--pause apply "C:\My Configs\env.yaml""#);
}

#[test]
fn test_fixed_privilege() {
    let gate = FixedPrivilege(PrivilegeState::Elevated);
    assert!(gate.is_elevated().is_elevated());
    assert!(matches!(
        gate.request_elevation(&[]),
        Err(ElevationError::Unsupported)
    ));
}

#[test]
fn test_host_privilege_is_stable() {
    let gate = HostPrivilege;
    assert_eq!(gate.is_elevated(), gate.is_elevated());
}

#[cfg(not(windows))]
#[test]
fn test_host_privilege_off_windows() {
    assert_eq!(HostPrivilege.is_elevated(), PrivilegeState::Standard);
    assert!(matches!(
        HostPrivilege.request_elevation(&strings(&["apply"])),
        Err(ElevationError::Unsupported)
    ));
}
