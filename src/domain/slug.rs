/// Derives a URL slug from an organization name.
///
/// Lowercases ASCII letters, collapses every run of other characters
/// into a single hyphen, and drops hyphens at either edge. The output
/// is a fixed point: feeding a suggestion back in returns it unchanged.
///
/// ```
/// use gatherly::domain::suggest_slug;
///
/// assert_eq!(suggest_slug("Open Collective Inc."), "open-collective-inc");
/// assert_eq!(suggest_slug("open-collective-inc"), "open-collective-inc");
/// ```
pub fn suggest_slug(name: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
