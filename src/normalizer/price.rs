/// Glyphs stripped from raw price text before parsing.
const GLYPHS: [char; 6] = ['£', '$', '€', '¥', '₹', '₩'];

/// ISO-4217 code to display glyph.
const CURRENCY_GLYPHS: [(&str, char); 6] = [
    ("GBP", '£'),
    ("USD", '$'),
    ("EUR", '€'),
    ("JPY", '¥'),
    ("INR", '₹'),
    ("KRW", '₩'),
];

/// Look up the glyph for an ISO-4217 code, ignoring case and whitespace.
pub fn glyph_for(code: &str) -> Option<char> {
    let code = code.trim();
    CURRENCY_GLYPHS
        .iter()
        .find(|(iso, _)| iso.eq_ignore_ascii_case(code))
        .map(|(_, glyph)| *glyph)
}

/// Normalize raw price text into `<glyph?><number>`.
///
/// The number has two decimals, or none when they would be `.00`, and no
/// grouping separators. The glyph comes from `currency` when it maps,
/// otherwise from the first glyph in the raw text. Text that does not parse
/// as a number is returned trimmed, unchanged. Empty input yields `None`.
pub fn normalize_price(raw: &str, currency: Option<&str>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let embedded = trimmed.chars().find(|c| GLYPHS.contains(c));
    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && !GLYPHS.contains(c))
        .collect();

    let value = match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Some(trimmed.to_string()),
    };

    let mut number = format!("{value:.2}");
    if number.ends_with(".00") {
        number.truncate(number.len() - 3);
    }

    let glyph = currency.and_then(glyph_for).or(embedded);
    Some(match glyph {
        Some(glyph) => format!("{glyph}{number}"),
        None => number,
    })
}
