use crate::model::ScrapeTarget;
use crate::{InputError, InputResult};

/// Parses one `url,selector` or `url selector` input line
///
/// The URL ends at the first comma or whitespace; everything after that
/// separator is the selector, so selectors may contain spaces and commas.
///
/// # Examples
///
/// ```
/// use sumi_sieve::input::parse_target_line;
///
/// let target = parse_target_line("https://www.example.com,div.product-image img").unwrap();
/// assert_eq!(target.selector(), "div.product-image img");
///
/// let target = parse_target_line("https://www.example.com img.hero").unwrap();
/// assert_eq!(target.selector(), "img.hero");
/// ```
pub fn parse_target_line(line: &str) -> InputResult<ScrapeTarget> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }

    let Some(split) = line.find(|c: char| c == ',' || c.is_whitespace()) else {
        return Err(InputError::MissingSelector(line.to_string()));
    };

    let (url, rest) = line.split_at(split);
    let rest = rest.trim_start();
    let selector = rest.strip_prefix(',').unwrap_or(rest).trim();

    if selector.is_empty() {
        return Err(InputError::MissingSelector(url.to_string()));
    }

    ScrapeTarget::new(url, selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated() {
        let target = parse_target_line("https://example.com,img.hero").unwrap();
        assert_eq!(target.raw_url(), "https://example.com");
        assert_eq!(target.selector(), "img.hero");
    }

    #[test]
    fn test_space_separated() {
        let target = parse_target_line("https://example.com   img.hero").unwrap();
        assert_eq!(target.raw_url(), "https://example.com");
        assert_eq!(target.selector(), "img.hero");
    }

    #[test]
    fn test_comma_with_surrounding_spaces() {
        let target = parse_target_line("  https://example.com , div img  ").unwrap();
        assert_eq!(target.selector(), "div img");
    }

    #[test]
    fn test_selector_keeps_inner_commas() {
        let target = parse_target_line("https://example.com,img.a, img.b").unwrap();
        assert_eq!(target.selector(), "img.a, img.b");
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse_target_line("   ").unwrap_err(), InputError::Empty);
    }

    #[test]
    fn test_missing_selector() {
        assert_eq!(
            parse_target_line("https://example.com").unwrap_err(),
            InputError::MissingSelector("https://example.com".to_string())
        );
        assert_eq!(
            parse_target_line("https://example.com, ").unwrap_err(),
            InputError::MissingSelector("https://example.com".to_string())
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            parse_target_line("www.example.com,img").unwrap_err(),
            InputError::InvalidUrl { .. }
        ));
    }
}
