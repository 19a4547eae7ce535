//! Canonical request building for AWS Signature V4.
//!
//! Helpers for producing the canonical representation of an HTTP request
//! used as signing input: AWS-rule percent-encoding, URI path
//! normalization, canonical query strings, and canonical/signed header
//! lists. Canonicalization is insensitive to incidental formatting (header
//! case, whitespace, input order) and deterministic in output order.

use http::HeaderMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Characters that are NOT percent-encoded in URI paths.
///
/// RFC 3986 unreserved characters (alphanumeric plus `-`, `_`, `.`, `~`)
/// and the path separator `/`.
const URI_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Characters that are NOT percent-encoded in query strings.
///
/// Same as the path set, except `/` is encoded in query strings.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// URI-encode a string according to AWS signature requirements.
///
/// All characters except `A-Z a-z 0-9 - _ . ~` are percent-encoded, with
/// spaces as `%20` (never `+`). The forward slash is encoded only when
/// `encode_slash` is true (query values), not in paths.
///
/// # Examples
///
/// ```
/// use aws_ses_backend::signing::uri_encode;
///
/// assert_eq!(uri_encode("/my-path/file.txt", false), "/my-path/file.txt");
/// assert_eq!(uri_encode("hello world", false), "hello%20world");
/// assert_eq!(uri_encode("value/with/slash", true), "value%2Fwith%2Fslash");
/// ```
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    if encode_slash {
        utf8_percent_encode(input, QUERY_SET).to_string()
    } else {
        utf8_percent_encode(input, URI_PATH_SET).to_string()
    }
}

/// Normalize a URI path.
///
/// Removes duplicate slashes, resolves `.` and `..` segments, forces a
/// leading `/`, and preserves a trailing slash.
///
/// # Examples
///
/// ```
/// use aws_ses_backend::signing::normalize_uri_path;
///
/// assert_eq!(normalize_uri_path("/foo//bar"), "/foo/bar");
/// assert_eq!(normalize_uri_path("/foo/../bar"), "/bar");
/// assert_eq!(normalize_uri_path("foo/bar"), "/foo/bar");
/// ```
pub fn normalize_uri_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let has_trailing_slash = path.ends_with('/');

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut result = String::from("/");
    result.push_str(&segments.join("/"));

    if has_trailing_slash && !result.ends_with('/') && result.len() > 1 {
        result.push('/');
    }

    result
}

/// Build a canonical query string from query parameters.
///
/// Each name and value is URI-encoded, pairs are sorted by name then value,
/// and joined with `&`. Empty input produces an empty string.
///
/// # Examples
///
/// ```
/// use aws_ses_backend::signing::canonical_query_string;
///
/// let params = vec![
///     ("z".to_string(), "last".to_string()),
///     ("a".to_string(), "first".to_string()),
/// ];
/// assert_eq!(canonical_query_string(&params), "a=first&z=last");
/// ```
pub fn canonical_query_string(query_params: &[(String, String)]) -> String {
    if query_params.is_empty() {
        return String::new();
    }

    let mut encoded_params: Vec<(String, String)> = query_params
        .iter()
        .map(|(key, value)| (uri_encode(key, true), uri_encode(value, true)))
        .collect();

    encoded_params.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    encoded_params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical headers block and the signed headers list.
///
/// Every header in the map participates in the signature: names are
/// lower-cased, values are trimmed with internal whitespace runs collapsed
/// to a single space, repeated names join their values with `,`, and the
/// result is sorted by name. Each header renders as `name:value\n`. The
/// signed headers list is the same sorted names joined by `;`.
///
/// # Examples
///
/// ```
/// use http::HeaderMap;
/// use aws_ses_backend::signing::canonical_headers;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("Host", "email.us-east-1.amazonaws.com".parse().unwrap());
/// headers.insert("X-Amz-Date", "20240101T000000Z".parse().unwrap());
///
/// let (canonical, signed) = canonical_headers(&headers);
/// assert_eq!(
///     canonical,
///     "host:email.us-east-1.amazonaws.com\nx-amz-date:20240101T000000Z\n"
/// );
/// assert_eq!(signed, "host;x-amz-date");
/// ```
pub fn canonical_headers(headers: &HeaderMap) -> (String, String) {
    let mut header_map: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (name, value) in headers {
        let name_lower = name.as_str().to_lowercase();

        let value_str = value.to_str().unwrap_or("");
        let trimmed = value_str.split_whitespace().collect::<Vec<_>>().join(" ");

        header_map.entry(name_lower).or_default().push(trimmed);
    }

    let canonical_headers_str = header_map
        .iter()
        .map(|(name, values)| format!("{}:{}\n", name, values.join(",")))
        .collect::<String>();

    let signed_headers_str = header_map
        .keys()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(";");

    (canonical_headers_str, signed_headers_str)
}
