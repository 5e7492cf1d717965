#![forbid(unsafe_code)]

//! Structural integrity findings.
//!
//! Defects in a family tree (dangling references, cycles, orphans) are never
//! panics. The code that finds one records an [`IntegrityIssue`], logs it,
//! and carries on best-effort.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::PersonId;

/// Severity for one integrity finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegritySeverity {
    Error,
    Warning,
}

/// Stable code for integrity findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityCode {
    MissingRoot,
    RootHasParent,
    MissingParent,
    MissingChild,
    DuplicateChild,
    MultipleParents,
    ParentMismatch,
    CycleDetected,
    UnreachableNode,
    IndexMismatch,
}

impl IntegrityCode {
    /// Stable snake-case name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRoot => "missing_root",
            Self::RootHasParent => "root_has_parent",
            Self::MissingParent => "missing_parent",
            Self::MissingChild => "missing_child",
            Self::DuplicateChild => "duplicate_child",
            Self::MultipleParents => "multiple_parents",
            Self::ParentMismatch => "parent_mismatch",
            Self::CycleDetected => "cycle_detected",
            Self::UnreachableNode => "unreachable_node",
            Self::IndexMismatch => "index_mismatch",
        }
    }

    /// Default severity: only a stale `index_as_child` is a warning.
    #[must_use]
    pub const fn severity(self) -> IntegritySeverity {
        match self {
            Self::IndexMismatch => IntegritySeverity::Warning,
            _ => IntegritySeverity::Error,
        }
    }
}

impl fmt::Display for IntegrityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One actionable integrity finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub code: IntegrityCode,
    pub severity: IntegritySeverity,
    pub person: Option<PersonId>,
    pub related: Option<PersonId>,
    pub message: String,
}

impl IntegrityIssue {
    /// Build an issue with the code's default severity.
    pub fn new(
        code: IntegrityCode,
        person: Option<PersonId>,
        related: Option<PersonId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity: code.severity(),
            person,
            related,
            message: message.into(),
        }
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Structured integrity report over a whole family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    /// Return true if any error-level finding exists.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == IntegritySeverity::Error)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether any finding carries `code`.
    #[must_use]
    pub fn contains(&self, code: IntegrityCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }

    /// Distinct codes in report order.
    #[must_use]
    pub fn codes(&self) -> Vec<IntegrityCode> {
        let mut codes: Vec<IntegrityCode> = self.issues.iter().map(|issue| issue.code).collect();
        codes.dedup();
        codes
    }
}
