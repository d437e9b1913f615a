use regex::Regex;

/// Pulls every `<loc>` URL out of a sitemap document. Deliberately
/// tag-soup-tolerant: real-world sitemaps are not always valid XML.
pub fn extract_loc_urls(xml: &str) -> Vec<String> {
    let loc = Regex::new(r"(?s)<loc>(.*?)</loc>").expect("valid regex");
    loc.captures_iter(xml)
        .map(|captures| captures[1].trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

/// Substring path filters, matching the crawler's include/exclude semantics:
/// include wins first, then exclude prunes.
pub fn apply_path_filters(
    urls: Vec<String>,
    include_paths: &[String],
    exclude_paths: &[String],
) -> Vec<String> {
    urls.into_iter()
        .filter(|url| {
            include_paths.is_empty() || include_paths.iter().any(|path| url.contains(path))
        })
        .filter(|url| !exclude_paths.iter().any(|path| url.contains(path)))
        .collect()
}
