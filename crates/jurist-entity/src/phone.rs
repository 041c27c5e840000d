//! Kazakhstan mobile number normalization.

/// Normalize a phone number to the canonical `+7XXXXXXXXXX` form.
///
/// Spaces, dashes, dots and parentheses are ignored. A national `8` trunk
/// prefix or a bare `7` country code is accepted. Returns `None` when the
/// remaining digits do not form a `+7` number with exactly ten subscriber
/// digits.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let has_plus = trimmed.starts_with('+');
    let mut digits = String::with_capacity(12);
    for (i, c) in trimmed.chars().enumerate() {
        match c {
            '0'..='9' => digits.push(c),
            '+' if i == 0 => {}
            ' ' | '-' | '(' | ')' | '.' => {}
            _ => return None,
        }
    }

    let subscriber = match (has_plus, digits.len()) {
        (true, 11) if digits.starts_with('7') => &digits[1..],
        (false, 11) if digits.starts_with('7') || digits.starts_with('8') => &digits[1..],
        (false, 10) => digits.as_str(),
        _ => return None,
    };

    Some(format!("+7{subscriber}"))
}
