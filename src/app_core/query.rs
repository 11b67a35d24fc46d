//! Reading the index filter prefill from the page URL.

use percent_encoding::percent_decode_str;

/// Parameter checked first for the prefill query.
pub const LOOKUP_PARAM: &str = "lookup";
/// Parameter checked when `lookup` is absent or empty.
pub const SEARCH_PARAM: &str = "search";

/// Returns the decoded value of the first `name=` pair in `search`
/// (a `location.search` string, with or without the leading `?`).
///
/// `+` decodes to a space and `%XX` escapes are decoded; invalid UTF-8 is
/// replaced rather than rejected.
pub fn url_parameter(search: &str, name: &str) -> Option<String> {
    let query = search.split('#').next().unwrap_or_default();
    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            let value = value.replace('+', " ");
            percent_decode_str(&value).decode_utf8_lossy().into_owned()
        })
}

/// The filter prefill: `lookup`, else `search`, else empty.
pub fn initial_query(search: &str) -> String {
    [LOOKUP_PARAM, SEARCH_PARAM]
        .iter()
        .filter_map(|name| url_parameter(search, name))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}
