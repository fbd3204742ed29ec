/// Currencies offered by the budget step.
pub const CURRENCIES: [&str; 8] = ["USD", "EUR", "GBP", "JPY", "AUD", "CAD", "INR", "CNY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCode {
    pub code: &'static str,
    pub country: &'static str,
}

const fn entry(code: &'static str, country: &'static str) -> CountryCode {
    CountryCode { code, country }
}

pub const COUNTRY_CODES: [CountryCode; 30] = [
    entry("+1", "United States"),
    entry("+1", "Canada"),
    entry("+44", "United Kingdom"),
    entry("+91", "India"),
    entry("+86", "China"),
    entry("+81", "Japan"),
    entry("+49", "Germany"),
    entry("+33", "France"),
    entry("+39", "Italy"),
    entry("+34", "Spain"),
    entry("+61", "Australia"),
    entry("+7", "Russia"),
    entry("+82", "South Korea"),
    entry("+55", "Brazil"),
    entry("+52", "Mexico"),
    entry("+31", "Netherlands"),
    entry("+46", "Sweden"),
    entry("+47", "Norway"),
    entry("+41", "Switzerland"),
    entry("+48", "Poland"),
    entry("+27", "South Africa"),
    entry("+971", "UAE"),
    entry("+65", "Singapore"),
    entry("+60", "Malaysia"),
    entry("+66", "Thailand"),
    entry("+62", "Indonesia"),
    entry("+63", "Philippines"),
    entry("+84", "Vietnam"),
    entry("+64", "New Zealand"),
    entry("+20", "Egypt"),
];

pub fn is_known_currency(currency: &str) -> bool {
    CURRENCIES.contains(&currency)
}

/// Matches on country name (case-insensitive) or dialing code.
pub fn search(query: &str) -> Vec<CountryCode> {
    let query = query.trim();
    if query.is_empty() {
        return COUNTRY_CODES.to_vec();
    }
    let lowered = query.to_lowercase();
    COUNTRY_CODES
        .iter()
        .filter(|c| c.country.to_lowercase().contains(&lowered) || c.code.contains(query))
        .copied()
        .collect()
}

/// Normalizes a user-entered dialing code, e.g. `44` -> `+44`.
pub fn normalize_custom_code(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('+') {
        Some(trimmed.to_string())
    } else {
        Some(format!("+{}", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_by_country_and_code() {
        let uk = search("kingdom");
        assert_eq!(uk.len(), 1);
        assert_eq!(uk[0].code, "+44");

        let plus_one = search("+1");
        assert!(plus_one.iter().any(|c| c.country == "Canada"));
        assert!(plus_one.iter().any(|c| c.country == "United States"));

        assert_eq!(search("  ").len(), COUNTRY_CODES.len());
        assert!(search("atlantis").is_empty());
    }

    #[test]
    fn test_normalize_custom_code() {
        assert_eq!(normalize_custom_code("44"), Some("+44".to_string()));
        assert_eq!(normalize_custom_code(" +352 "), Some("+352".to_string()));
        assert_eq!(normalize_custom_code("   "), None);
    }

    #[test]
    fn test_known_currency() {
        assert!(is_known_currency("USD"));
        assert!(is_known_currency("CNY"));
        assert!(!is_known_currency("BTC"));
    }
}
