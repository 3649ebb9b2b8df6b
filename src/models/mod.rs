// Estructuras de datos principales: catálogo normalizado, cursos del
// estudiante y resultados de la evaluación.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Motivo por el que un token de "Credits Required" no se pudo tipar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    /// Numeral con decimales (ej: "4.5")
    NonIntegerCredit,
    /// Intervalo con alguna cota decimal (ej: "2.5-4")
    NonIntegerInterval,
    /// Cualquier otra cosa
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Choose { required_count: i64 },
    /// `interval` indica que el valor es la cota inferior de un rango "a-b".
    Credits { required_credits: i64, interval: bool },
    Malformed(MalformedReason),
}

/// Token de requisito ya clasificado. Se deriva únicamente de `raw_text`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementToken {
    pub raw_text: String,
    pub kind: TokenKind,
}

impl RequirementToken {
    pub fn new(raw_text: impl Into<String>, kind: TokenKind) -> Self {
        RequirementToken { raw_text: raw_text.into(), kind }
    }

    /// Nombre corto del tipo: "choose", "credits" o "malformed"
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TokenKind::Choose { .. } => "choose",
            TokenKind::Credits { .. } => "credits",
            TokenKind::Malformed(_) => "malformed",
        }
    }

    pub fn required_count(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Choose { required_count } => Some(required_count),
            _ => None,
        }
    }

    pub fn required_credits(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Credits { required_credits, .. } => Some(required_credits),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, TokenKind::Malformed(_))
    }
}

/// Tipo de regla tal como se expone en JSON (`ruleType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    ChooseNCourses,
    MinCredits,
    ManualReview,
}

/// Regla de un grupo. Suma cerrada: la evaluación despacha por variante.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    ChooseNCourses { required_count: i64 },
    MinCredits { required_credits: i64 },
    /// Tokens originales ordenados y sin duplicados, para revisión humana
    ManualReview { raw_tokens: Vec<String> },
}

impl Rule {
    pub fn rule_type(&self) -> RuleType {
        match self {
            Rule::ChooseNCourses { .. } => RuleType::ChooseNCourses,
            Rule::MinCredits { .. } => RuleType::MinCredits,
            Rule::ManualReview { .. } => RuleType::ManualReview,
        }
    }
}

/// Grupo de requisitos de un major.
///
/// En JSON se guarda con los campos planos del catálogo:
/// ```json
/// {
///   "groupId": "3",
///   "ruleType": "choose_n_courses",
///   "requiredCount": 2,
///   "requiredCredits": null,
///   "courses": ["MATH 221", "MATH 222 & MATH 234"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GroupRecord", from = "GroupRecord")]
pub struct RequirementGroup {
    pub group_id: String,
    pub rule: Rule,
    /// Ids canónicos sin duplicados, en orden de primera aparición.
    /// Una entrada puede ser una opción AND ("A & B").
    pub courses: Vec<String>,
}

impl RequirementGroup {
    pub fn rule_type(&self) -> RuleType {
        self.rule.rule_type()
    }

    pub fn required_count(&self) -> Option<i64> {
        match self.rule {
            Rule::ChooseNCourses { required_count } => Some(required_count),
            _ => None,
        }
    }

    pub fn required_credits(&self) -> Option<i64> {
        match self.rule {
            Rule::MinCredits { required_credits } => Some(required_credits),
            _ => None,
        }
    }

    pub fn raw_requirement_tokens(&self) -> Option<&[String]> {
        match &self.rule {
            Rule::ManualReview { raw_tokens } => Some(raw_tokens),
            _ => None,
        }
    }
}

/// Forma plana en disco de un `RequirementGroup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupRecord {
    group_id: String,
    rule_type: String,
    required_count: Option<i64>,
    required_credits: Option<i64>,
    #[serde(default)]
    courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    raw_requirement_tokens: Option<Vec<String>>,
}

impl From<RequirementGroup> for GroupRecord {
    fn from(group: RequirementGroup) -> Self {
        let (rule_type, required_count, required_credits, raw_requirement_tokens) = match group.rule {
            Rule::ChooseNCourses { required_count } => ("choose_n_courses", Some(required_count), None, None),
            Rule::MinCredits { required_credits } => ("min_credits", None, Some(required_credits), None),
            Rule::ManualReview { raw_tokens } => ("manual_review", None, None, Some(raw_tokens)),
        };
        GroupRecord {
            group_id: group.group_id,
            rule_type: rule_type.to_string(),
            required_count,
            required_credits,
            courses: group.courses,
            raw_requirement_tokens,
        }
    }
}

impl From<GroupRecord> for RequirementGroup {
    // Lectura tolerante: un ruleType desconocido se trata como revisión manual y
    // un tamaño ausente queda en 0 (la evaluación lo marca como inválido).
    fn from(record: GroupRecord) -> Self {
        let rule = match record.rule_type.trim() {
            "choose_n_courses" => Rule::ChooseNCourses { required_count: record.required_count.unwrap_or(0) },
            "min_credits" => Rule::MinCredits { required_credits: record.required_credits.unwrap_or(0) },
            _ => Rule::ManualReview { raw_tokens: record.raw_requirement_tokens.unwrap_or_default() },
        };
        RequirementGroup { group_id: record.group_id, rule, courses: record.courses }
    }
}

/// Un major del catálogo con sus grupos ya deduplicados y ordenados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Major {
    pub major: String,
    #[serde(default)]
    pub requirement_groups: Vec<RequirementGroup>,
}

/// Fila cruda del expediente (DARS) tal como llega en JSON.
///
/// Los campos se aceptan como string o número: `"number": 221` y
/// `"number": "221"` son equivalentes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<Value>,
}

/// Curso del estudiante ya canonicalizado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourse {
    pub course_id: String,
    pub credits: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailReason {
    InvalidRequiredCount,
    InvalidRequiredCredits,
    ManualReview,
}

/// Diagnóstico libre que acompaña a cada resultado de grupo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupDetail {
    Choose {
        #[serde(rename = "pickedOptions")]
        picked_options: Vec<String>,
        #[serde(rename = "rawScore")]
        raw_score: f64,
        required: i64,
    },
    Credits {
        #[serde(rename = "earnedCredits")]
        earned_credits: f64,
        #[serde(rename = "requiredCredits")]
        required_credits: i64,
    },
    Flagged { reason: DetailReason },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResult {
    pub group_id: String,
    pub rule_type: RuleType,
    /// 0.0 - 1.0, redondeado a 4 decimales
    pub completion_ratio: f64,
    pub used_courses: BTreeSet<String>,
    pub detail: GroupDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorProgressResult {
    pub major: String,
    pub degree_type: String,
    /// 0.0 - 100.0, redondeado a 2 decimales
    pub major_completion_percent: f64,
    pub evaluated_groups: usize,
    pub group_results: Vec<GroupResult>,
}

/// Entrada del ranking de majors para un mismo expediente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorRanking {
    pub major: String,
    pub degree_type: String,
    pub percent: f64,
    pub satisfied_groups: usize,
    pub total_groups: usize,
}
