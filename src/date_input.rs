use chrono::{Duration, NaiveDate};

/// Parses what the user typed into the date-filter prompt. Accepts an
/// explicit `YYYY-MM-DD`, the keywords today/tomorrow/yesterday, and
/// day/week offsets like `+3d` or `-1w`. Returns `None` for anything
/// else; the caller decides whether that means "keep asking" or "clear".
pub(crate) fn parse_date_filter_input(input: &str, base: NaiveDate) -> Option<NaiveDate> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(&trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    match trimmed.as_str() {
        "today" => return Some(base),
        "tomorrow" => return Some(base + Duration::days(1)),
        "yesterday" => return Some(base - Duration::days(1)),
        _ => {}
    }

    parse_relative_offset(&trimmed, base)
}

fn parse_relative_offset(input: &str, base: NaiveDate) -> Option<NaiveDate> {
    let mut chars = input.chars().peekable();
    let mut sign: i64 = 1;
    if let Some(&c) = chars.peek() {
        if c == '+' || c == '-' {
            if c == '-' {
                sign = -1;
            }
            chars.next();
        }
    }

    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(c);
            chars.next();
        } else {
            break;
        }
    }

    if digits.is_empty() {
        return None;
    }

    let qty: i64 = digits.parse().ok()?;
    let unit = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    match unit {
        'd' => Some(base + Duration::days(sign * qty)),
        'w' => Some(base + Duration::weeks(sign * qty)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()
    }

    #[test]
    fn parses_explicit_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        assert_eq!(parse_date_filter_input("2026-01-20", base()), Some(date));
        assert_eq!(parse_date_filter_input("  2026-01-20  ", base()), Some(date));
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(parse_date_filter_input("today", base()), Some(base()));
        assert_eq!(
            parse_date_filter_input("yesterday", base()),
            Some(base() - Duration::days(1))
        );
        assert_eq!(
            parse_date_filter_input("Tomorrow", base()),
            Some(base() + Duration::days(1))
        );
    }

    #[test]
    fn parses_offsets() {
        assert_eq!(
            parse_date_filter_input("+3d", base()),
            Some(base() + Duration::days(3))
        );
        assert_eq!(
            parse_date_filter_input("-1w", base()),
            Some(base() - Duration::weeks(1))
        );
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(parse_date_filter_input("", base()), None);
        assert_eq!(parse_date_filter_input("01/20/2026", base()), None);
        assert_eq!(parse_date_filter_input("2026-13-40", base()), None);
        assert_eq!(parse_date_filter_input("+3x", base()), None);
        assert_eq!(parse_date_filter_input("soonish", base()), None);
    }
}
