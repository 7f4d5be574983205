// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory model of a declared variable list.
//!
//! ```text
//! Configuration
//!   user_variables:   [Variable]  --> Scope::User   (always accessible)
//!   system_variables: [Variable]  --> Scope::System (needs elevation)
//!
//! Variable { name, value, operation }
//! Operation: Set | Delete | Other(UnknownOperation("frobnicate"))
//! ```
//!
//! Order is preserved; duplicates are allowed and applied in order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What to do with a declared variable.
///
/// Unrecognized strings are kept verbatim so they can be reported and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create or overwrite the variable.
    Set,
    /// Remove the variable.
    Delete,
    /// Anything else; applied as a no-op.
    Other(UnknownOperation),
}

/// An operation string that is neither `set` nor `delete`.
///
/// Only [`Operation::from`] builds one, so it never holds a recognized
/// operation and renders back to the same [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UnknownOperation(String);

impl UnknownOperation {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for Operation {
    fn default() -> Self {
        Self::Other(UnknownOperation::default())
    }
}

impl Operation {
    /// Returns the string form used in declarative files.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Set => "set",
            Self::Delete => "delete",
            Self::Other(op) => op.as_str(),
        }
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Operation {
    fn from(value: &str) -> Self {
        match value {
            "set" => Self::Set,
            "delete" => Self::Delete,
            other => Self::Other(UnknownOperation(other.to_string())),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operation {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self::from(value.as_str()))
    }
}

/// One declared entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Variable value (only meaningful for [`Operation::Set`]).
    #[serde(default, deserialize_with = "scalar_value")]
    pub value: String,
    /// Requested operation.
    #[serde(default)]
    pub operation: Operation,
}

impl Variable {
    /// A `set` entry.
    pub fn set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            operation: Operation::Set,
        }
    }

    /// A `delete` entry.
    pub fn delete(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            operation: Operation::Delete,
        }
    }

    /// An entry with an arbitrary operation string.
    pub fn with_operation(
        name: impl Into<String>,
        value: impl Into<String>,
        operation: &str,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            operation: Operation::from(operation),
        }
    }
}

/// Accepts any scalar (`value: 1`, `value: true`, `value:`) as a string.
fn scalar_value<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarString(String);

    impl<'de> Deserialize<'de> for ScalarString {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(ScalarVisitor).map(Self)
        }
    }

    struct ScalarVisitor;

    impl serde::de::Visitor<'_> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<String, E> {
            Ok(String::new())
        }
    }

    Option::<ScalarString>::deserialize(deserializer).map(|v| v.map(|s| s.0).unwrap_or_default())
}

/// Declared variable state, partitioned by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Variables for the current user.
    #[serde(deserialize_with = "nullable_list")]
    pub user_variables: Vec<Variable>,
    /// Machine-wide variables (requires elevation).
    #[serde(deserialize_with = "nullable_list")]
    pub system_variables: Vec<Variable>,
}

/// `user_variables:` with no entries parses as YAML null.
fn nullable_list<'de, D>(deserializer: D) -> std::result::Result<Vec<Variable>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Variable>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Configuration {
    /// Variables declared for `scope`.
    #[must_use]
    pub fn variables(&self, scope: Scope) -> &[Variable] {
        match scope {
            Scope::User => &self.user_variables,
            Scope::System => &self.system_variables,
        }
    }

    /// Mutable access to the variables declared for `scope`.
    pub const fn variables_mut(&mut self, scope: Scope) -> &mut Vec<Variable> {
        match scope {
            Scope::User => &mut self.user_variables,
            Scope::System => &mut self.system_variables,
        }
    }

    /// True when neither scope declares anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_variables.is_empty() && self.system_variables.is_empty()
    }

    /// Total number of declared entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.user_variables.len() + self.system_variables.len()
    }
}

/// Partition of the persistent store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Current user's variables.
    User,
    /// Machine-wide variables.
    System,
}

impl Scope {
    /// Both scopes in processing order.
    pub const ALL: [Self; 2] = [Self::User, Self::System];

    /// Heading used in previews and summaries.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::System => "SYSTEM",
        }
    }

    #[must_use]
    pub const fn requires_elevation(self) -> bool {
        matches!(self, Self::System)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::User => "user",
            Self::System => "system",
        })
    }
}

/// Privilege level of the running process.
///
/// Queried once at startup; a relaunch produces a new process rather than
/// changing this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeState {
    #[default]
    Standard,
    Elevated,
}

impl PrivilegeState {
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Elevated)
    }

    /// Whether `scope` may be read or written at this privilege level.
    #[must_use]
    pub const fn permits(self, scope: Scope) -> bool {
        self.is_elevated() || !scope.requires_elevation()
    }
}

impl From<bool> for PrivilegeState {
    fn from(elevated: bool) -> Self {
        if elevated {
            Self::Elevated
        } else {
            Self::Standard
        }
    }
}

impl std::fmt::Display for PrivilegeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "Standard User"),
            Self::Elevated => write!(f, "Administrator"),
        }
    }
}

#[cfg(test)]
mod tests;
