//! Identity keys for comparing free-text values.
//!
//! Two spellings of the same value ("Motor Avariado", "MOTOR AVARIADO ",
//! "motor-avariado") share one key. The key is only ever compared, never
//! shown to users or written to output.

use unicode_normalization::UnicodeNormalization;

/// Uppercase, strip accents, and keep only `[A-Z0-9]`.
pub fn identity_key(value: &str) -> String {
    value
        .to_uppercase()
        .nfd()
        // Decomposed accents (U+0300..U+036F) fall outside the kept range.
        .filter(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_spacing_collapse() {
        assert_eq!(identity_key("Motor Avariado"), "MOTORAVARIADO");
        assert_eq!(identity_key("MOTOR AVARIADO "), "MOTORAVARIADO");
        assert_eq!(identity_key("motor-avariado."), "MOTORAVARIADO");
    }

    #[test]
    fn test_accents_are_stripped() {
        assert_eq!(identity_key("Reparação"), "REPARACAO");
        assert_eq!(identity_key("REPARACAO"), "REPARACAO");
        assert_eq!(identity_key("Électrex Nº 2"), "ELECTREXN2");
    }

    #[test]
    fn test_non_latin_text_has_empty_key() {
        assert_eq!(identity_key("—"), "");
        assert_eq!(identity_key("   "), "");
    }
}
