use regex::Regex;
use std::sync::OnceLock;

const EXPORT_FORMAT: &str = "format=csv";

/// Turns a shared spreadsheet link into the link of its CSV export.
///
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=42` becomes
/// `https://docs.google.com/spreadsheets/d/<id>/export?format=csv&gid=42`.
/// A link without a `gid` selector exports the first sheet.
pub fn export_url(reference: &str) -> String {
    static GID_RE: OnceLock<Regex> = OnceLock::new();
    let gid_re = GID_RE.get_or_init(|| Regex::new(r"(?:^|[&?])gid=(\d+)").expect("valid regex"));

    let reference = reference.trim();
    let (base, fragment) = match reference.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (reference, None),
    };
    let (path, query) = match base.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (base, None),
    };
    let path = path.trim_end_matches('/');
    let path = match path.strip_suffix("/edit") {
        Some(document) => format!("{document}/export"),
        None => path.to_string(),
    };

    let mut url = path;
    url.push('?');
    if let Some(query) = query.filter(|query| !query.is_empty()) {
        url.push_str(query);
        url.push('&');
    }
    url.push_str(EXPORT_FORMAT);
    if let Some(caps) = fragment.and_then(|fragment| gid_re.captures(fragment)) {
        url.push_str("&gid=");
        url.push_str(&caps[1]);
    }
    url
}
