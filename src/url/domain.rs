use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sieve::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Derives the per-site results folder name from a URL
///
/// Dots in the host become hyphens. A non-default port is appended as
/// `-<port>` so two local servers never share a folder.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sieve::url::site_folder_name;
///
/// let url = Url::parse("https://www.example.com/a/b/").unwrap();
/// assert_eq!(site_folder_name(&url), Some("www-example-com".to_string()));
/// ```
pub fn site_folder_name(url: &Url) -> Option<String> {
    let domain = extract_domain(url)?;

    let mut folder: String = domain
        .chars()
        .filter(|c| *c != '[' && *c != ']')
        .map(|c| if c == '.' || c == ':' { '-' } else { c })
        .collect();

    if let Some(port) = url.port() {
        folder.push_str(&format!("-{}", port));
    }

    Some(folder)
}
