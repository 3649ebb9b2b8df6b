use regex::Regex;
use std::sync::OnceLock;

// Abreviaturas de grado reconocidas al final del nombre ("Economics, BA")
fn degree_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(BA|BS|BFA|BM|BLS|BSW|JBA|BLA)\b").expect("degree suffix regex"))
}

/// Forma canónica de un id de curso o nombre de major: espacios colapsados,
/// recortado y en mayúsculas. Dos ids son el mismo sii sus formas canónicas coinciden.
pub fn canon(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}

/// Quita el sufijo de grado reconocido del nombre del major, de modo que
/// "Economics, BA" y "Economics, BS" colapsen en "Economics".
///
/// Si el último segmento separado por comas no es un sufijo reconocido, o no
/// queda prefijo, se devuelve el original recortado.
pub fn strip_degree_suffix(major: &str) -> String {
    let parts: Vec<&str> = major.split(',').map(str::trim).collect();
    if let Some((last, prefix)) = parts.split_last() {
        if !prefix.is_empty() && degree_suffix_re().is_match(last) {
            let cleaned = prefix.join(", ");
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                return cleaned.to_string();
            }
        }
    }
    major.trim().to_string()
}
