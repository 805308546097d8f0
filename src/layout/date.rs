//! Year extraction from published-date strings

/// Picks the year out of a numeric date by taking its longest token
///
/// The date is split on `-` and `/`; a four-digit year is assumed to be the
/// longest piece, so `"2023-05-01"` and `"05/01/2023"` both give `"2023"`. On
/// ties the first token wins.
pub fn year_from_longest_token(date: &str) -> Option<String> {
    let mut best: Option<&str> = None;
    for token in date.split(|c: char| c == '-' || c == '/') {
        let longer = match best {
            Some(current) => token.chars().count() > current.chars().count(),
            None => true,
        };
        if longer {
            best = Some(token);
        }
    }

    best.map(str::trim)
        .filter(|year| !year.is_empty())
        .map(str::to_string)
}

/// Picks the year out of a `"Month Day, Year"` date
///
/// Returns the token after the first `", "` separator (up to the next one),
/// trimmed. Dates without that separator yield `None`.
pub fn year_after_comma(date: &str) -> Option<String> {
    date.split(", ")
        .nth(1)
        .map(str::trim)
        .filter(|year| !year.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_token_iso_date() {
        assert_eq!(year_from_longest_token("2023-05-01").as_deref(), Some("2023"));
    }

    #[test]
    fn test_longest_token_slash_date() {
        assert_eq!(year_from_longest_token("01/05/2023").as_deref(), Some("2023"));
        assert_eq!(year_from_longest_token("2021/12/31").as_deref(), Some("2021"));
    }

    #[test]
    fn test_longest_token_first_on_ties() {
        assert_eq!(year_from_longest_token("ab-cd").as_deref(), Some("ab"));
    }

    #[test]
    fn test_longest_token_without_separator() {
        assert_eq!(year_from_longest_token("2019").as_deref(), Some("2019"));
    }

    #[test]
    fn test_longest_token_empty() {
        assert_eq!(year_from_longest_token(""), None);
        assert_eq!(year_from_longest_token("-/-"), None);
    }

    #[test]
    fn test_after_comma() {
        assert_eq!(year_after_comma("May 1, 2023").as_deref(), Some("2023"));
        assert_eq!(year_after_comma("March 3, 2022 ").as_deref(), Some("2022"));
    }

    #[test]
    fn test_after_comma_takes_second_token_only() {
        assert_eq!(
            year_after_comma("Monday, May 1, 2023").as_deref(),
            Some("May 1")
        );
    }

    #[test]
    fn test_after_comma_missing() {
        assert_eq!(year_after_comma("2023-05-01"), None);
        assert_eq!(year_after_comma("May 1,2023"), None);
        assert_eq!(year_after_comma("May 1, "), None);
    }
}
