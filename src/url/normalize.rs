/// Canonicalizes a raw href into a deduplication key, or rejects it
///
/// # Rules
///
/// 1. Trim surrounding whitespace; reject blank hrefs
/// 2. Reject hrefs that do not start with `base_url` as a literal string
///    prefix (only absolute same-site links are followed; relative hrefs are
///    not resolved and fall out of scope here)
/// 3. Truncate at the first `?` or `#`, whichever comes first
///
/// The function is pure: the same `(href, base_url)` pair always yields the
/// same result. The scope check is intentionally a plain prefix comparison,
/// not a host comparison — a base URL with a trailing slash rejects the bare
/// root URL, and host casing differences are rejected too. That asymmetry is
/// a known limitation of the matching rule, kept as-is.
///
/// # Arguments
///
/// * `href` - The raw href attribute value as it appeared in the page
/// * `base_url` - The scope prefix links must start with
///
/// # Returns
///
/// * `Some(String)` - The canonical in-scope URL
/// * `None` - The href is blank or out of scope
///
/// # Examples
///
/// ```
/// use sitewalk::url::canonicalize;
///
/// let url = canonicalize("https://example.com/a?x=1", "https://example.com");
/// assert_eq!(url.as_deref(), Some("https://example.com/a"));
///
/// assert_eq!(canonicalize("https://other.com/c", "https://example.com"), None);
/// ```
pub fn canonicalize(href: &str, base_url: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if !href.starts_with(base_url) {
        return None;
    }

    // Everything from the first query string or fragment marker onward is not
    // part of the deduplication key.
    let cut = href
        .find(|c| c == '?' || c == '#')
        .unwrap_or(href.len());

    Some(href[..cut].to_string())
}
