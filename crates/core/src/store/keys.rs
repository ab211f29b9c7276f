//! Store key-naming convention.
//!
//! Cache entries live under the raw URL, byte-exact. Access counters live
//! under `count:<url>`. Both are preserved exactly as documented so that
//! existing store contents written by other tooling stay readable.

/// Counter key prefix, concatenated with the raw cache key.
pub const COUNT_PREFIX: &str = "count:";

/// Access-counter key for a cache key.
pub fn count_key(key: &str) -> String {
    format!("{COUNT_PREFIX}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_key_format() {
        assert_eq!(count_key("http://example.com"), "count:http://example.com");
    }

    #[test]
    fn test_count_key_preserves_raw_url() {
        // No canonicalization: query strings, fragments, and case survive.
        let url = "HTTP://Example.com/a?b=1#frag";
        assert_eq!(count_key(url), format!("count:{url}"));
    }

    #[test]
    fn test_count_key_empty() {
        assert_eq!(count_key(""), "count:");
    }
}
