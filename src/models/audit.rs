//! Audit trace models.
//!
//! Every rule the engine applies records an [`AuditStep`] so a statement can
//! be explained line by line.

use serde::{Deserialize, Serialize};

/// One rule application: what went in, what came out and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// 1-based position in the trace.
    pub step_number: u32,
    /// Stable rule identifier, e.g. `withholding`.
    pub rule_id: String,
    /// Display name of the rule.
    pub rule_name: String,
    /// Reference to the statute or policy behind this rule.
    pub legal_ref: String,
    /// Values the rule read.
    pub input: serde_json::Value,
    /// Values the rule produced.
    pub output: serde_json::Value,
    /// The arithmetic, spelled out.
    pub reasoning: String,
}

/// How serious an [`AuditWarning`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; the result is as expected.
    Low,
    /// The result relies on an approximation or an unusual input.
    Medium,
}

/// A condition worth flagging on a statement that did not block it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// Machine-readable code, e.g. `CALLER_PROVIDED_ALLOWANCE`.
    pub code: String,
    /// Explanation for the reader.
    pub message: String,
    /// How serious it is.
    pub severity: WarningSeverity,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(code: &str, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
        }
    }
}

/// Steps and warnings for one `/calculate` request.
///
/// # Example
///
/// ```
/// use wage_statement::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Rule applications in order.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
    /// Wall time of the engine call, in microseconds.
    pub duration_us: u64,
}
