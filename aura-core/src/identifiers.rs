//! Airport identifier parsing
//!
//! Two entry points: splitting the comma-separated `codes` query value, and
//! pulling the reporting location out of a PIREP's `/OV` group.

use crate::models::airport::AirportIdentifier;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `/OV` followed by whitespace and a four-letter location
    static ref OV_LOCATION: Regex = Regex::new(r"/OV\s+([A-Z]{4})").expect("valid /OV pattern");
}

/// Split a comma-separated identifier list.
///
/// Tokens are trimmed and uppercased, empty tokens are dropped and the order
/// of appearance is kept. Duplicates are not removed.
pub fn normalize_identifiers(raw: &str) -> Vec<AirportIdentifier> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(AirportIdentifier::new)
        .collect()
}

/// Extract the four-letter location from a PIREP's `/OV` group.
///
/// `UA /OV KSFO 090010/TM 1815/FL060` yields `KSFO`. Returns `None` when the
/// marker is missing or not followed by four uppercase letters.
pub fn extract_icao(pirep: &str) -> Option<AirportIdentifier> {
    OV_LOCATION
        .captures(pirep)
        .and_then(|caps| caps.get(1))
        .map(|m| AirportIdentifier::new(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codes(ids: &[AirportIdentifier]) -> Vec<&str> {
        ids.iter().map(AirportIdentifier::as_str).collect()
    }

    #[test]
    fn test_normalize_mixed_input() {
        let ids = normalize_identifiers(" ksfo, KOAK ,,kSjc , ");
        assert_eq!(codes(&ids), vec!["KSFO", "KOAK", "KSJC"]);
    }

    #[test]
    fn test_normalize_keeps_duplicates_in_order() {
        let ids = normalize_identifiers("KSFO,KOAK,ksfo");
        assert_eq!(codes(&ids), vec!["KSFO", "KOAK", "KSFO"]);
    }

    #[test]
    fn test_normalize_empty_inputs() {
        assert!(normalize_identifiers("").is_empty());
        assert!(normalize_identifiers(" , ,, ").is_empty());
    }

    #[test]
    fn test_extract_icao_from_ov_group() {
        let id = extract_icao("UA /OV KSFO 080015/TM 1815/FL060/TP B737/TB MOD");
        assert_eq!(id.as_ref().map(AirportIdentifier::as_str), Some("KSFO"));

        let id = extract_icao("UUA /OV   KDEN/TM 2005/FL350/TP A320/TB SEV");
        assert_eq!(id.as_ref().map(AirportIdentifier::as_str), Some("KDEN"));
    }

    #[test]
    fn test_extract_icao_without_marker() {
        assert_eq!(extract_icao("UA /TM 1815/FL060/TP C172"), None);
        assert_eq!(extract_icao(""), None);
    }

    #[test]
    fn test_extract_icao_requires_uppercase_letters() {
        assert_eq!(extract_icao("UA /OV ksfo 080015"), None);
        assert_eq!(extract_icao("UA /OV SFO 080015"), None);
        assert_eq!(extract_icao("UA /OVKSFO"), None);
    }

    proptest! {
        #[test]
        fn prop_normalize_tokens_are_trimmed_uppercase(raw in "[a-zA-Z ,]{0,40}") {
            let ids = normalize_identifiers(&raw);
            let expected: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_uppercase)
                .collect();
            prop_assert_eq!(
                ids.iter().map(|id| id.as_str().to_string()).collect::<Vec<_>>(),
                expected
            );
            for id in &ids {
                prop_assert!(!id.is_empty());
                prop_assert_eq!(id.as_str(), id.as_str().trim());
            }
        }

        #[test]
        fn prop_extract_never_panics(text in any::<String>()) {
            let _ = extract_icao(&text);
        }

        #[test]
        fn prop_extract_finds_embedded_location(
            prefix in "[A-Z ]{0,10}",
            icao in "[A-Z]{4}",
            suffix in "[ 0-9/A-Z]{0,20}",
        ) {
            let text = format!("{prefix}/OV {icao} 080{suffix}");
            prop_assert_eq!(
                extract_icao(&text).map(|id| id.as_str().to_string()),
                Some(icao)
            );
        }
    }
}
