//! Protocol-relative URL normalization.

/// Scheme given to protocol-relative (`//host/...`) URLs.
const DEFAULT_SCHEME: &str = "http:";

/// Makes a discovered URL absolute: `//host/path` becomes `http://host/path`,
/// anything else is returned unchanged. Idempotent.
pub fn normalize_url(raw: &str) -> String {
    if raw.starts_with("//") {
        format!("{}{}", DEFAULT_SCHEME, raw)
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_gets_http() {
        assert_eq!(
            normalize_url("//cdn.example.com/a/b.png"),
            "http://cdn.example.com/a/b.png"
        );
    }

    #[test]
    fn absolute_unchanged() {
        assert_eq!(
            normalize_url("https://cdn.example.com/a/b.png"),
            "https://cdn.example.com/a/b.png"
        );
        assert_eq!(normalize_url("http://x.org/y.jpg"), "http://x.org/y.jpg");
    }

    #[test]
    fn idempotent() {
        let once = normalize_url("//cdn.example.com/v.webm");
        assert_eq!(normalize_url(&once), once);
    }
}
