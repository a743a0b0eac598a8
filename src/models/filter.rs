use chrono::{DateTime, NaiveDate, Utc};

/// Minimum search term length before a search is executed. Shorter terms
/// leave the current listing untouched.
pub const MIN_SEARCH_TERM_LEN: usize = 3;

/// Current filter state: search term plus optional date bounds. All fields
/// optional; absence means unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseFilter {
    pub term: Option<String>,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
}

impl BrowseFilter {
    /// True when no term and no date bound is set.
    pub fn is_unconstrained(&self) -> bool {
        self.term.is_none() && self.after.is_none() && self.before.is_none()
    }

    /// True when the term is long enough to trigger a search.
    pub fn has_search_term(&self) -> bool {
        self.term.as_ref().is_some_and(|t| t.chars().count() >= MIN_SEARCH_TERM_LEN)
    }
}

/// Parse an input-box query into a filter.
///
/// Tokens `after:YYYY-MM-DD` and `before:YYYY-MM-DD` become date bounds
/// (after = start of that day, before = end of that day, both inclusive);
/// everything else joins back into the search term. Tokens with an
/// unparseable date are dropped with a warning rather than polluting the
/// term.
pub fn parse_query(input: &str) -> BrowseFilter {
    let mut filter = BrowseFilter::default();
    let mut term_parts: Vec<&str> = Vec::new();

    for token in input.split_whitespace() {
        if let Some(value) = token.strip_prefix("after:") {
            match parse_day(value) {
                Some(day) => filter.after = Some(day.0),
                None => log::warn!("ignoring unparseable date in '{}'", token),
            }
        } else if let Some(value) = token.strip_prefix("before:") {
            match parse_day(value) {
                Some(day) => filter.before = Some(day.1),
                None => log::warn!("ignoring unparseable date in '{}'", token),
            }
        } else {
            term_parts.push(token);
        }
    }

    if !term_parts.is_empty() {
        filter.term = Some(term_parts.join(" "));
    }

    filter
}

/// Start and end instants of a YYYY-MM-DD day, both in UTC.
fn parse_day(value: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let start = date.and_hms_opt(0, 0, 0)?.and_utc();
    let end = date.and_hms_opt(23, 59, 59)?.and_utc();
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn test_default_is_unconstrained() {
        assert!(BrowseFilter::default().is_unconstrained());
    }

    #[test]
    fn test_has_search_term_length_threshold() {
        let mut filter = BrowseFilter::default();
        assert!(!filter.has_search_term());

        filter.term = Some("hi".to_string());
        assert!(!filter.has_search_term());

        filter.term = Some("hey".to_string());
        assert!(filter.has_search_term());
    }

    #[test]
    fn test_parse_query_plain_term() {
        let filter = parse_query("hello world");
        assert_eq!(filter.term.as_deref(), Some("hello world"));
        assert!(filter.after.is_none());
        assert!(filter.before.is_none());
    }

    #[test]
    fn test_parse_query_after_token() {
        let filter = parse_query("after:2024-06-15 hello");
        assert_eq!(filter.term.as_deref(), Some("hello"));
        assert_eq!(filter.after, Some(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_query_before_token_is_end_of_day() {
        let filter = parse_query("before:2024-06-15 hello");
        let before = filter.before.unwrap();
        assert_eq!(before.hour(), 23);
        assert_eq!(before.minute(), 59);
        assert_eq!(before.second(), 59);
    }

    #[test]
    fn test_parse_query_both_bounds_no_term() {
        let filter = parse_query("after:2024-01-01 before:2024-12-31");
        assert!(filter.term.is_none());
        assert!(filter.after.is_some());
        assert!(filter.before.is_some());
    }

    #[test]
    fn test_parse_query_invalid_date_dropped() {
        let filter = parse_query("after:not-a-date hello");
        assert!(filter.after.is_none());
        assert_eq!(filter.term.as_deref(), Some("hello"));
    }

    #[test]
    fn test_parse_query_empty_input() {
        let filter = parse_query("");
        assert!(filter.is_unconstrained());
    }
}
