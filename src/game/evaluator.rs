//! Stateless correctness checks, one per puzzle kind. Malformed or empty
//! input is simply wrong, never an error; the UI always offers retry.

/// A day/month answer like `14/9`. Whitespace is trimmed and `/`, `-` and
/// `.` are interchangeable separators; leading zeros are fine. The order is
/// strict: day first, so a transposed `9/14` does not count.
pub fn date_recall(input: &str, day: u32, month: u32) -> bool {
    let input = input.trim();
    let Some(sep) = input.chars().find(|c| matches!(c, '/' | '-' | '.')) else {
        return false;
    };
    let mut parts = input.splitn(2, sep);
    let (Some(d), Some(m)) = (parts.next(), parts.next()) else {
        return false;
    };
    match (parse_number(d), parse_number(m)) {
        (Some(d), Some(m)) => d == day && m == month,
        _ => false,
    }
}

fn parse_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Three assembled words against three targets, exact and in fixed order.
/// Case- and diacritic-sensitive: `YÊU` is not `YEU`.
pub fn word_assembly(words: [&str; 3], targets: [&str; 3]) -> bool {
    words == targets
}

/// One choice id against the single correct one.
pub fn choice_equation(choice_id: &str, correct_id: &str) -> bool {
    choice_id == correct_id
}
