// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Configuration, Operation, PrivilegeState, Scope, Variable};

#[test]
fn test_operation_from_str() {
    assert_eq!(Operation::from("set"), Operation::Set);
    assert_eq!(Operation::from("delete"), Operation::Delete);
    assert!(
        matches!(Operation::from("SET"), Operation::Other(op) if op.as_str() == "SET"),
        "operations are matched exactly"
    );
    assert_eq!(Operation::default().as_str(), "");
}

#[test]
fn test_operation_string_form_round_trips() {
    for text in ["set", "delete", "Set", "DELETE", "", " set", "frobnicate"] {
        let op = Operation::from(text);
        assert_eq!(op.as_str(), text);
        assert_eq!(Operation::from(op.as_str()), op, "{text:?}");

        let yaml = serde_yaml::to_string(&op).unwrap();
        assert_eq!(serde_yaml::from_str::<Operation>(&yaml).unwrap(), op, "{text:?}");
    }
}

#[test]
fn test_unknown_operation_is_preserved() {
    let var = Variable::with_operation("FOO", "1", "frobnicate");
    assert!(!var.operation.is_recognized());
    assert_eq!(var.operation.to_string(), "frobnicate");
}

#[test]
fn test_configuration_by_scope() {
    let mut config = Configuration::default();
    assert!(config.is_empty());

    config.variables_mut(Scope::User).push(Variable::set("A", "1"));
    config.variables_mut(Scope::System).push(Variable::delete("B"));
    config.variables_mut(Scope::System).push(Variable::delete("C"));

    assert_eq!(config.variables(Scope::User).len(), 1);
    assert_eq!(config.variables(Scope::System).len(), 2);
    assert_eq!(config.len(), 3);
    assert!(!config.is_empty());
}

#[test]
fn test_privilege_permits() {
    insta::assert_debug_snapshot!(
        [
            PrivilegeState::Standard.permits(Scope::User),
            PrivilegeState::Standard.permits(Scope::System),
            PrivilegeState::Elevated.permits(Scope::System),
        ],
        @r"
    [
        true,
        false,
        true,
    ]
    "
    );
}

#[test]
fn test_display() {
    assert_eq!(PrivilegeState::Elevated.to_string(), "Administrator");
    assert_eq!(PrivilegeState::from(false).to_string(), "Standard User");
    assert_eq!(Scope::System.to_string(), "system");
    assert_eq!(Scope::User.heading(), "USER");
}
