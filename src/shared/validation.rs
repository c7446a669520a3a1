use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Thai phone number: leading zero followed by 8-9 digits
    /// - Valid: "0812345678", "021234567"
    /// - Invalid: "812345678", "+66812345678", "08-1234-5678"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^0[0-9]{8,9}$").unwrap();

    /// Canonical tracking ID: "ST-" + year + "-" + 4-digit random component
    /// - Valid: "ST-2026-4817"
    /// - Invalid: "st-2026-4817", "ST-26-4817", "SP-2026-4817"
    pub static ref TRACKING_ID_REGEX: Regex = Regex::new(r"^ST-[0-9]{4}-[0-9]{4}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("0812345678"));
        assert!(PHONE_REGEX.is_match("0899999999"));
        assert!(PHONE_REGEX.is_match("021234567")); // Bangkok landline
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("812345678")); // no leading zero
        assert!(!PHONE_REGEX.is_match("+66812345678")); // country code
        assert!(!PHONE_REGEX.is_match("08-1234-5678")); // separators
        assert!(!PHONE_REGEX.is_match("08123456789999")); // too long
        assert!(!PHONE_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_tracking_id_regex_valid() {
        assert!(TRACKING_ID_REGEX.is_match("ST-2026-4817"));
        assert!(TRACKING_ID_REGEX.is_match("ST-2025-1000"));
    }

    #[test]
    fn test_tracking_id_regex_invalid() {
        assert!(!TRACKING_ID_REGEX.is_match("st-2026-4817")); // lowercase
        assert!(!TRACKING_ID_REGEX.is_match("ST-26-4817")); // short year
        assert!(!TRACKING_ID_REGEX.is_match("SP-2026-4817")); // wrong prefix
        assert!(!TRACKING_ID_REGEX.is_match("ST-2026-481")); // short random
        assert!(!TRACKING_ID_REGEX.is_match("ST-2026-4817 ")); // trailing space
    }
}
