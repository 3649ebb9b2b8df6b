//! Evaluadores de grupos de requisitos.
//!
//! Cada evaluador recibe el pool de cursos aún disponibles y devuelve
//! (ratio, cursos usados, detalle). El pool no se modifica aquí: quien
//! orquesta la evaluación descuenta los usados antes del siguiente grupo.

use std::collections::BTreeSet;

use crate::algorithm::pool::AvailablePool;
use crate::catalog::canon;
use crate::models::{DetailReason, GroupDetail, RequirementGroup, Rule};

#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutcome {
    /// Siempre en [0, 1]
    pub ratio: f64,
    pub used: BTreeSet<String>,
    pub detail: GroupDetail,
}

impl GroupOutcome {
    fn flagged(reason: DetailReason) -> Self {
        GroupOutcome { ratio: 0.0, used: BTreeSet::new(), detail: GroupDetail::Flagged { reason } }
    }
}

/// Puntaje de una opción de un grupo choose_n_courses
#[derive(Debug, Clone, PartialEq)]
pub struct OptionScore {
    /// Posición de la opción en el catálogo (desempate explícito)
    pub index: usize,
    pub option: String,
    pub score: f64,
    pub full_match: bool,
    pub matched: BTreeSet<String>,
}

/// Partes de una opción AND ("MATH 221 & MATH 222"), ya canonicalizadas.
pub fn option_parts(option: &str) -> Vec<String> {
    option.split('&').map(canon).filter(|p| !p.is_empty()).collect()
}

/// Fracción de partes de la opción presentes en el pool.
pub fn score_option(index: usize, option: &str, pool: &AvailablePool) -> OptionScore {
    let parts = option_parts(option);
    let matched: BTreeSet<String> = parts.iter().filter(|p| pool.contains(p)).cloned().collect();
    let (score, full_match) = if parts.is_empty() {
        (0.0, false)
    } else {
        (matched.len() as f64 / parts.len() as f64, matched.len() == parts.len())
    };
    OptionScore { index, option: option.to_string(), score, full_match, matched }
}

/// Ordena opciones por (completa desc, puntaje desc, posición en catálogo asc).
pub fn rank_options(mut options: Vec<OptionScore>) -> Vec<OptionScore> {
    options.sort_by(|a, b| {
        b.full_match
            .cmp(&a.full_match)
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| a.index.cmp(&b.index))
    });
    options
}

/// choose_n_courses: toma las `required_count` mejores opciones. Una opción
/// parcial también consume los cursos que sí coincidieron.
pub fn evaluate_choose(courses: &[String], required_count: i64, pool: &AvailablePool) -> GroupOutcome {
    if required_count <= 0 {
        return GroupOutcome::flagged(DetailReason::InvalidRequiredCount);
    }

    let scored: Vec<OptionScore> = courses.iter().enumerate().map(|(i, opt)| score_option(i, opt, pool)).collect();
    let mut ranked = rank_options(scored);
    let take = usize::try_from(required_count).unwrap_or(usize::MAX).min(ranked.len());
    ranked.truncate(take);

    let raw_score: f64 = ranked.iter().map(|o| o.score).sum();
    let ratio = (raw_score / required_count as f64).clamp(0.0, 1.0);
    let used: BTreeSet<String> = ranked.iter().flat_map(|o| o.matched.iter().cloned()).collect();

    GroupOutcome {
        ratio,
        used,
        detail: GroupDetail::Choose {
            picked_options: ranked.into_iter().map(|o| o.option).collect(),
            raw_score,
            required: required_count,
        },
    }
}

/// min_credits: suma créditos de los cursos del grupo presentes en el pool,
/// de mayor a menor, hasta alcanzar el mínimo. El curso que cruza el umbral
/// cuenta completo.
pub fn evaluate_min_credits(courses: &[String], required_credits: i64, pool: &AvailablePool) -> GroupOutcome {
    if required_credits <= 0 {
        return GroupOutcome::flagged(DetailReason::InvalidRequiredCredits);
    }

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut candidates: Vec<(usize, String, f64)> = Vec::new();
    for (index, course) in courses.iter().enumerate() {
        let cid = canon(course);
        if pool.contains(&cid) && seen.insert(cid.clone()) {
            let credits = pool.credits_of(&cid);
            candidates.push((index, cid, credits));
        }
    }
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(&b.0)));

    let required = required_credits as f64;
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut total = 0.0f64;
    for (_, cid, credits) in candidates {
        used.insert(cid);
        total += credits;
        if total >= required {
            break;
        }
    }

    GroupOutcome {
        ratio: (total / required).clamp(0.0, 1.0),
        used,
        detail: GroupDetail::Credits { earned_credits: total, required_credits },
    }
}

/// manual_review: siempre 0 y nunca consume cursos.
pub fn evaluate_manual_review() -> GroupOutcome {
    GroupOutcome::flagged(DetailReason::ManualReview)
}

/// Despacha al evaluador correspondiente a la regla del grupo.
pub fn evaluate_group(group: &RequirementGroup, pool: &AvailablePool) -> GroupOutcome {
    match &group.rule {
        Rule::ChooseNCourses { required_count } => evaluate_choose(&group.courses, *required_count, pool),
        Rule::MinCredits { required_credits } => evaluate_min_credits(&group.courses, *required_credits, pool),
        Rule::ManualReview { .. } => evaluate_manual_review(),
    }
}
