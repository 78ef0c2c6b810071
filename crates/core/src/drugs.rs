//! Drug search rules shared by the API and repository layers.

/// Shortest keyword (in characters) accepted by the name search.
pub const MIN_KEYWORD_CHARS: u64 = 2;

/// Hard cap on rows returned by a single name search. There is no paging
/// beyond this.
pub const SEARCH_RESULT_LIMIT: i64 = 100;

/// Escape `LIKE` metacharacters so the keyword matches literally.
///
/// The escape character is `\`, which must also be passed as the `ESCAPE`
/// clause of the query.
pub fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `LIKE` pattern matching any name that contains `keyword`.
///
/// # Examples
///
/// ```
/// use yakbot_core::drugs::substring_pattern;
/// assert_eq!(substring_pattern("아세트"), "%아세트%");
/// assert_eq!(substring_pattern("10%"), "%10\\%%");
/// ```
pub fn substring_pattern(keyword: &str) -> String {
    format!("%{}%", escape_like(keyword))
}
