//! Bearer credential resolution shared by every operation.

/// Picks the per-call override when it is non-empty, else the configured
/// default, else an empty token.
pub fn resolve_credential<'a>(override_key: Option<&'a str>, default_key: Option<&'a str>) -> &'a str {
    override_key
        .filter(|key| !key.is_empty())
        .or(default_key)
        .unwrap_or_default()
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_falls_back_to_default() {
        assert_eq!(resolve_credential(Some(""), Some("k-default")), "k-default");
        assert_eq!(resolve_credential(None, Some("k-default")), "k-default");
    }

    #[test]
    fn non_empty_override_wins() {
        assert_eq!(resolve_credential(Some("k1"), Some("k-default")), "k1");
        assert_eq!(resolve_credential(Some("k1"), None), "k1");
    }

    #[test]
    fn nothing_configured_yields_empty_token() {
        assert_eq!(resolve_credential(None, None), "");
        assert_eq!(bearer(""), "Bearer ");
    }
}
