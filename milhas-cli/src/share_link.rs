//! Share links: the application URL with the token in its `workspace` query parameter.

use url::Url;

pub const SHARE_PARAM: &str = "workspace";

/// Builds `<base>?workspace=<token>`, keeping any other query parameters of `base`.
pub fn share_url(base: &Url, token: &str) -> Url {
    let (_, mut url) = take_share_token(base);
    url.query_pairs_mut().append_pair(SHARE_PARAM, token);
    url
}

/// Splits a link into its share token (if any) and the same link without it.
///
/// Other query parameters survive; an emptied query is removed entirely.
pub fn take_share_token(url: &Url) -> (Option<String>, Url) {
    let token = url
        .query_pairs()
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value.into_owned());

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    if kept.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.query_pairs_mut().clear().extend_pairs(kept);
    }

    (token, cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url() {
        let base = Url::parse("https://milhas.app/").unwrap();
        let url = share_url(&base, "eyJuYW1lIjoi-_");
        assert_eq!(url.as_str(), "https://milhas.app/?workspace=eyJuYW1lIjoi-_");
    }

    #[test]
    fn test_share_url_replaces_existing_token() {
        let base = Url::parse("https://milhas.app/?lang=pt&workspace=old").unwrap();
        let url = share_url(&base, "new");
        assert_eq!(url.as_str(), "https://milhas.app/?lang=pt&workspace=new");
    }

    #[test]
    fn test_take_share_token_strips_only_the_token() {
        let url = Url::parse("https://milhas.app/plan?lang=pt&workspace=abc&tab=2").unwrap();
        let (token, cleaned) = take_share_token(&url);

        assert_eq!(token.as_deref(), Some("abc"));
        assert_eq!(cleaned.as_str(), "https://milhas.app/plan?lang=pt&tab=2");
    }

    #[test]
    fn test_take_share_token_drops_empty_query() {
        let url = Url::parse("https://milhas.app/?workspace=abc").unwrap();
        let (token, cleaned) = take_share_token(&url);

        assert_eq!(token.as_deref(), Some("abc"));
        assert_eq!(cleaned.as_str(), "https://milhas.app/");
    }

    #[test]
    fn test_link_without_token() {
        let url = Url::parse("https://milhas.app/?lang=pt").unwrap();
        let (token, cleaned) = take_share_token(&url);

        assert!(token.is_none());
        assert_eq!(cleaned, url);
    }
}
