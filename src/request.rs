//! Collector URL and query string encoding

use std::string::FromUtf8Error;

use crate::models::{TrackerOptions, TrackingParameters};

/// Path of the tracking endpoint on the collector
pub const TRACK_PATH: &str = "/track";

/// Base URL of the collector's tracking endpoint
///
/// The host is not validated; a malformed host yields a malformed URL.
pub fn build_url(host: &str, options: &TrackerOptions) -> String {
    let scheme = if options.use_https { "https" } else { "http" };
    format!("{scheme}://{host}{TRACK_PATH}")
}

/// Characters browsers leave unescaped in URL components on top of the
/// RFC 3986 unreserved set
const COMPONENT_EXTRAS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a URL component
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as is.
pub fn encode_component(value: &str) -> String {
    // A literal "%21" in the input is encoded as "%2521", so only
    // escapes produced for the extra characters match here
    COMPONENT_EXTRAS
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |encoded, &(escape, raw)| {
            encoded.replace(escape, raw)
        })
}

/// Serialize parameters as `?key=value&...` in insertion order
///
/// Values are percent-encoded as URL components. Keys are sent as is.
pub fn build_query_string(params: &TrackingParameters) -> String {
    let pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode_component(&value.to_string())))
        .collect();

    format!("?{}", pairs.join("&"))
}

/// Full URL a page view is sent to
pub fn collector_url(host: &str, options: &TrackerOptions, params: &TrackingParameters) -> String {
    build_url(host, options) + &build_query_string(params)
}

/// Decode the query of a collector URL back into ordered pairs
///
/// Accepts a full URL, a `?`-prefixed query, or a bare query.
pub fn decode_query_string(input: &str) -> Result<Vec<(String, String)>, FromUtf8Error> {
    let query = input.split_once('?').map_or(input, |(_, query)| query);

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> Result<(String, String), FromUtf8Error> {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((
                urlencoding::decode(key)?.into_owned(),
                urlencoding::decode(value)?.into_owned(),
            ))
        })
        .collect()
}
