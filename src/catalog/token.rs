//! Clasificador de tokens de la columna "Credits Required".
//!
//! - `C<n>` (sin distinguir mayúsculas) => elegir n cursos
//! - numeral entero => mínimo de créditos; con decimales => malformado
//! - intervalo `a-b` de enteros => mínimo de créditos = `a` (cota inferior);
//!   si alguna cota tiene decimales => malformado
//! - cualquier otra cosa => malformado

use regex::Regex;
use std::sync::OnceLock;

use crate::diagnostics::Diagnostic;
use crate::models::{MalformedReason, RequirementToken, TokenKind};

fn choose_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^C([0-9]+)$").expect("choose regex"))
}

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("numeric regex"))
}

fn interval_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)-([0-9]+(?:\.[0-9]+)?)$").expect("interval regex"))
}

// Devuelve el valor si el numeral es entero ("3", "3.0"); None si tiene parte decimal
fn whole_number(numeral: &str) -> Option<i64> {
    let value = numeral.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Clasifica un token (se recorta antes de comparar).
pub fn classify_token(raw: &str) -> RequirementToken {
    let normalized = raw.trim();

    if let Some(caps) = choose_re().captures(normalized) {
        let kind = match caps[1].parse::<i64>() {
            Ok(required_count) => TokenKind::Choose { required_count },
            Err(_) => TokenKind::Malformed(MalformedReason::Unrecognized),
        };
        return RequirementToken::new(normalized, kind);
    }

    if numeric_re().is_match(normalized) {
        let kind = match whole_number(normalized) {
            Some(required_credits) => TokenKind::Credits { required_credits, interval: false },
            None => TokenKind::Malformed(MalformedReason::NonIntegerCredit),
        };
        return RequirementToken::new(normalized, kind);
    }

    if let Some(caps) = interval_re().captures(normalized) {
        let kind = match (whole_number(&caps[1]), whole_number(&caps[2])) {
            (Some(lower), Some(_)) => TokenKind::Credits { required_credits: lower, interval: true },
            _ => TokenKind::Malformed(MalformedReason::NonIntegerInterval),
        };
        return RequirementToken::new(normalized, kind);
    }

    RequirementToken::new(normalized, TokenKind::Malformed(MalformedReason::Unrecognized))
}

/// Evento de auditoría asociado a un token, si corresponde. Nunca altera la clasificación.
pub fn token_diagnostic(token: &RequirementToken) -> Option<Diagnostic> {
    match token.kind {
        TokenKind::Malformed(reason) => Some(Diagnostic::MalformedToken { token: token.raw_text.clone(), reason }),
        TokenKind::Credits { required_credits, interval: true } => Some(Diagnostic::IntervalLowerBoundUsed {
            token: token.raw_text.clone(),
            required_credits,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_token() {
        let t = classify_token("C2");
        assert_eq!(t.kind_name(), "choose");
        assert_eq!(t.required_count(), Some(2));
        assert_eq!(t.required_credits(), None);

        let t = classify_token(" c10 ");
        assert_eq!(t.raw_text, "c10");
        assert_eq!(t.required_count(), Some(10));
    }

    #[test]
    fn credits_token() {
        let t = classify_token("12");
        assert_eq!(t.kind, TokenKind::Credits { required_credits: 12, interval: false });
        assert!(token_diagnostic(&t).is_none());

        // "3.0" es entero aunque esté escrito con decimales
        assert_eq!(classify_token("3.0").required_credits(), Some(3));
    }

    #[test]
    fn interval_usa_cota_inferior() {
        let t = classify_token("3-6");
        assert_eq!(t.kind_name(), "credits");
        assert_eq!(t.required_credits(), Some(3));
        assert_eq!(
            token_diagnostic(&t),
            Some(Diagnostic::IntervalLowerBoundUsed { token: "3-6".to_string(), required_credits: 3 })
        );
    }

    #[test]
    fn decimales_son_malformados() {
        assert_eq!(classify_token("4.5").kind, TokenKind::Malformed(MalformedReason::NonIntegerCredit));
        assert_eq!(classify_token("2.5-4").kind, TokenKind::Malformed(MalformedReason::NonIntegerInterval));
        assert_eq!(classify_token("2-4.5").kind, TokenKind::Malformed(MalformedReason::NonIntegerInterval));
    }

    #[test]
    fn basura_es_malformada() {
        for raw in ["x", "", "3 - 6", "C", "C2.5", "-3", "3-", "2 courses"] {
            let t = classify_token(raw);
            assert!(t.is_malformed(), "{:?} debería ser malformado", raw);
            assert!(matches!(token_diagnostic(&t), Some(Diagnostic::MalformedToken { .. })));
        }
    }

    #[test]
    fn choose_desbordado_es_malformado() {
        let t = classify_token("C99999999999999999999999");
        assert!(t.is_malformed());
    }
}
