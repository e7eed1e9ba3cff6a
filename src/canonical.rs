//! Path canonicalization.
//!
//! Requests that differ only in query-parameter order must resolve to the same
//! fixture, so both registration and lookup go through [`canonicalize`].

/// Canonicalize a raw request path (`pathname` plus optional `?query`).
///
/// Paths without a query string (including a bare trailing `?`) are returned
/// unchanged. Otherwise the query fragments are stable-sorted lexicographically
/// by key and rejoined, leaving each `key=value` fragment byte-for-byte intact.
pub fn canonicalize(raw: &str) -> String {
    let Some((pathname, query)) = raw.split_once('?') else {
        return raw.to_string();
    };

    if query.is_empty() {
        return raw.to_string();
    }

    let mut fragments: Vec<&str> = query.split('&').collect();
    // Stable sort: repeated keys keep their relative order.
    fragments.sort_by(|a, b| fragment_key(a).cmp(fragment_key(b)));

    format!("{}?{}", pathname, fragments.join("&"))
}

/// The key portion of a `key=value` fragment (the whole fragment if it has no `=`).
fn fragment_key(fragment: &str) -> &str {
    match fragment.split_once('=') {
        Some((key, _)) => key,
        None => fragment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_query_is_identity() {
        assert_eq!(canonicalize("/foo"), "/foo");
        assert_eq!(canonicalize("/foo/bar/baz"), "/foo/bar/baz");
    }

    #[test]
    fn test_empty_query_is_identity() {
        assert_eq!(canonicalize("/foo?"), "/foo?");
    }

    #[test]
    fn test_sorted_query_unchanged() {
        assert_eq!(canonicalize("/foo?a=1&b=2"), "/foo?a=1&b=2");
    }

    #[test]
    fn test_query_order_is_irrelevant() {
        assert_eq!(canonicalize("/foo?b=2&a=1"), canonicalize("/foo?a=1&b=2"));
        assert_eq!(canonicalize("/foo?b=2&a=1"), "/foo?a=1&b=2");
    }

    #[test]
    fn test_three_params_all_orders() {
        let expected = canonicalize("/p?a=1&b=2&c=3");
        for raw in [
            "/p?a=1&c=3&b=2",
            "/p?b=2&a=1&c=3",
            "/p?b=2&c=3&a=1",
            "/p?c=3&a=1&b=2",
            "/p?c=3&b=2&a=1",
        ] {
            assert_eq!(canonicalize(raw), expected);
        }
    }

    #[test]
    fn test_values_pass_through_untouched() {
        assert_eq!(
            canonicalize("/foo?z=hello%20world&a=x%3Dy"),
            "/foo?a=x%3Dy&z=hello%20world"
        );
    }

    #[test]
    fn test_valueless_key_sorts_by_fragment() {
        assert_eq!(canonicalize("/foo?flag&a=1"), "/foo?a=1&flag");
    }

    #[test]
    fn test_repeated_keys_keep_relative_order() {
        assert_eq!(canonicalize("/foo?b=1&a=2&a=1"), "/foo?a=2&a=1&b=1");
    }
}
