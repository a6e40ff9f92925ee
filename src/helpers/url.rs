//! URL helper functions

/// Generate a site-rooted URL
///
/// # Examples
/// ```ignore
/// url_for("/", "blog/hello/") // -> "/blog/hello/"
/// url_for("/mysite/", "blog/hello/") // -> "/mysite/blog/hello/"
/// ```
pub fn url_for(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Join the site base URL with an already-rooted path
///
/// # Examples
/// ```ignore
/// absolute_url("https://example.com", "/blog/hello/")
/// // -> "https://example.com/blog/hello/"
/// ```
pub fn absolute_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        assert_eq!(url_for("/", "blog/hello/"), "/blog/hello/");
        assert_eq!(url_for("/mysite/", "/blog/hello/"), "/mysite/blog/hello/");
        assert_eq!(url_for("/", ""), "/");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://example.com/", "/blog/hello/"),
            "https://example.com/blog/hello/"
        );
    }
}
