//! Eventos de diagnóstico de la normalización.
//!
//! El núcleo no escribe logs: devuelve una lista de `Diagnostic` junto al
//! resultado y quien lo llama decide cómo mostrarlos (`Diagnostic::log` los
//! emite como eventos de `tracing`).

use serde::Serialize;
use std::fmt;

use crate::models::MalformedReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warn,
}

/// Por qué un grupo terminó en `manual_review`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualReviewCause {
    /// Al menos un token no se pudo tipar
    MalformedToken,
    /// Tokens de distinto tipo o con valores distintos dentro del grupo
    MixedRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Diagnostic {
    #[serde(rename_all = "camelCase")]
    MalformedToken { token: String, reason: MalformedReason },
    #[serde(rename_all = "camelCase")]
    IntervalLowerBoundUsed { token: String, required_credits: i64 },
    #[serde(rename_all = "camelCase")]
    SkippedIncompleteRow { source: String, major: String, group_id: String, course: String },
    #[serde(rename_all = "camelCase")]
    DuplicateCoursesRemoved { major: String, group_id: String, duplicates: usize },
    #[serde(rename_all = "camelCase")]
    ManualReviewRule { major: String, group_id: String, cause: ManualReviewCause, raw_tokens: Vec<String> },
    #[serde(rename_all = "camelCase")]
    DuplicateGroupRemoved { major: String, group_id: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::IntervalLowerBoundUsed { .. }
            | Diagnostic::DuplicateCoursesRemoved { .. }
            | Diagnostic::DuplicateGroupRemoved { .. } => Severity::Info,
            Diagnostic::MalformedToken { .. }
            | Diagnostic::SkippedIncompleteRow { .. }
            | Diagnostic::ManualReviewRule { .. } => Severity::Warn,
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            Diagnostic::MalformedToken { .. } => "malformed_token",
            Diagnostic::IntervalLowerBoundUsed { .. } => "interval_lower_bound_used",
            Diagnostic::SkippedIncompleteRow { .. } => "skipped_incomplete_row",
            Diagnostic::DuplicateCoursesRemoved { .. } => "duplicate_courses_removed",
            Diagnostic::ManualReviewRule { .. } => "manual_review_rule",
            Diagnostic::DuplicateGroupRemoved { .. } => "duplicate_group_removed",
        }
    }

    /// Emite el diagnóstico como evento estructurado de `tracing`.
    pub fn log(&self) {
        match self.severity() {
            Severity::Info => tracing::info!(event = self.event_name(), "{}", self),
            Severity::Warn => tracing::warn!(event = self.event_name(), "{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedToken { token, reason } => {
                write!(f, "malformed_token reason={:?} token={}", reason, token)
            }
            Diagnostic::IntervalLowerBoundUsed { token, required_credits } => {
                write!(f, "interval_token_lower_bound_used token={} requiredCredits={}", token, required_credits)
            }
            Diagnostic::SkippedIncompleteRow { source, major, group_id, course } => write!(
                f,
                "skipping_incomplete_row file={} major={} groupId={} course={}",
                source, major, group_id, course
            ),
            Diagnostic::DuplicateCoursesRemoved { major, group_id, duplicates } => write!(
                f,
                "duplicate_courses_removed major={} groupId={} duplicates={}",
                major, group_id, duplicates
            ),
            Diagnostic::ManualReviewRule { major, group_id, cause, raw_tokens } => write!(
                f,
                "manual_review_rule cause={:?} major={} groupId={} rawTokens={:?}",
                cause, major, group_id, raw_tokens
            ),
            Diagnostic::DuplicateGroupRemoved { major, group_id } => {
                write!(f, "duplicate_group_removed major={} groupId={}", major, group_id)
            }
        }
    }
}

/// Emite una lista completa de diagnósticos.
pub fn log_all(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        d.log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializa_con_tag_event() {
        let d = Diagnostic::IntervalLowerBoundUsed { token: "3-6".to_string(), required_credits: 3 };
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["event"], "interval_lower_bound_used");
        assert_eq!(v["requiredCredits"], 3);
        assert_eq!(d.severity(), Severity::Info);
    }

    #[test]
    fn malformed_es_warn() {
        let d = Diagnostic::MalformedToken { token: "x".to_string(), reason: MalformedReason::Unrecognized };
        assert_eq!(d.severity(), Severity::Warn);
        assert!(d.to_string().contains("token=x"));
    }
}
