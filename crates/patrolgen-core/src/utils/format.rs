use std::cmp::Ordering;

/// Title-case a name part: the first letter of every alphabetic run is
/// upper-cased and the rest lower-cased ("mcDONALD" -> "Mcdonald",
/// "o'brien" -> "O'Brien").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Format an optional average rank for display, "-" when undefined
pub fn format_average(avg: Option<f64>) -> String {
    match avg {
        Some(value) => format!("{:.2}", value),
        None => "-".to_string(),
    }
}

/// Compare two strings case-insensitively, falling back to a case-sensitive
/// comparison so the ordering is total
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
