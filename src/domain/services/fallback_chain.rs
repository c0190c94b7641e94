//! Fallback chain construction for image loading.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Width requested from the transform services.
pub const TRANSFORM_WIDTH: u32 = 400;

/// Height requested from the transform services.
pub const TRANSFORM_HEIGHT: u32 = 300;

/// One candidate in a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A URL to probe over the network.
    Remote(String),
    /// The generated placeholder; terminates every chain and cannot fail.
    Placeholder,
}

/// Chain construction settings.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Host whose images are known to need proxying or transformation.
    pub asset_domain: String,
    /// Optional proxy base substituted for the asset-domain origin.
    pub proxy_base: Option<String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            asset_domain: "assets.suitdev.com".to_string(),
            proxy_base: None,
        }
    }
}

/// Ordered candidate URLs derived from one source URL.
///
/// Asset-domain sources get the full treatment: proxy rewrite (when a proxy
/// base is configured), both public transform services, then the original
/// URL. Any other source is tried directly. Every chain ends with the
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    candidates: Vec<Candidate>,
}

impl FallbackChain {
    /// Builds the chain for a resolved source URL (or none).
    #[must_use]
    pub fn build(config: &ChainConfig, source: Option<&str>) -> Self {
        let mut candidates = Vec::new();

        if let Some(url) = source {
            if url.contains(&config.asset_domain) {
                if let Some(proxy) = &config.proxy_base {
                    candidates.push(Candidate::Remote(rewrite_to_proxy(
                        url,
                        &config.asset_domain,
                        proxy,
                    )));
                }
                candidates.push(Candidate::Remote(weserv_url(url)));
                candidates.push(Candidate::Remote(wsrv_url(url)));
            }
            candidates.push(Candidate::Remote(url.to_string()));
        }

        candidates.push(Candidate::Placeholder);
        Self { candidates }
    }

    /// Returns the candidates in probe order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Returns the number of candidates including the placeholder.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Chains are never empty; the placeholder is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl IntoIterator for FallbackChain {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

fn rewrite_to_proxy(url: &str, asset_domain: &str, proxy_base: &str) -> String {
    let proxy_base = proxy_base.trim_end_matches('/');
    url.replacen(&format!("https://{asset_domain}"), proxy_base, 1)
        .replacen(&format!("http://{asset_domain}"), proxy_base, 1)
}

fn weserv_url(url: &str) -> String {
    format!(
        "https://images.weserv.nl/?url={}&w={TRANSFORM_WIDTH}&h={TRANSFORM_HEIGHT}&fit=cover&output=webp",
        utf8_percent_encode(url, NON_ALPHANUMERIC)
    )
}

fn wsrv_url(url: &str) -> String {
    format!(
        "https://wsrv.nl/?url={}&w={TRANSFORM_WIDTH}&h={TRANSFORM_HEIGHT}&fit=cover",
        utf8_percent_encode(url, NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_proxy() -> ChainConfig {
        ChainConfig {
            asset_domain: "assets.suitdev.com".to_string(),
            proxy_base: Some("http://localhost:5173/proxy-image".to_string()),
        }
    }

    #[test]
    fn test_asset_domain_chain_with_proxy() {
        let url = "https://assets.suitdev.com/storage/files/cover.jpg";
        let chain = FallbackChain::build(&config_with_proxy(), Some(url));
        let candidates = chain.candidates();

        assert_eq!(candidates.len(), 5);
        assert_eq!(
            candidates[0],
            Candidate::Remote(
                "http://localhost:5173/proxy-image/storage/files/cover.jpg".to_string()
            )
        );
        let Candidate::Remote(weserv) = &candidates[1] else {
            panic!("expected remote candidate");
        };
        assert!(weserv.starts_with("https://images.weserv.nl/?url="));
        assert!(weserv.contains("w=400"));
        assert!(weserv.contains("output=webp"));
        // Source URL is percent-encoded inside the transform query.
        assert!(weserv.contains("https%3A%2F%2Fassets%2Esuitdev%2Ecom"));

        let Candidate::Remote(wsrv) = &candidates[2] else {
            panic!("expected remote candidate");
        };
        assert!(wsrv.starts_with("https://wsrv.nl/?url="));
        assert!(!wsrv.contains("output=webp"));

        assert_eq!(candidates[3], Candidate::Remote(url.to_string()));
        assert_eq!(candidates[4], Candidate::Placeholder);
    }

    #[test]
    fn test_asset_domain_chain_without_proxy_omits_rewrite() {
        let url = "https://assets.suitdev.com/storage/files/cover.jpg";
        let chain = FallbackChain::build(&ChainConfig::default(), Some(url));
        assert_eq!(chain.len(), 4);
        assert!(matches!(chain.candidates()[0], Candidate::Remote(ref u)
            if u.starts_with("https://images.weserv.nl/")));
    }

    #[test]
    fn test_foreign_source_goes_direct() {
        let chain = FallbackChain::build(
            &ChainConfig::default(),
            Some("https://elsewhere.example.com/pic.png"),
        );
        assert_eq!(
            chain.candidates(),
            &[
                Candidate::Remote("https://elsewhere.example.com/pic.png".to_string()),
                Candidate::Placeholder,
            ]
        );
    }

    #[test]
    fn test_missing_source_is_placeholder_only() {
        let chain = FallbackChain::build(&ChainConfig::default(), None);
        assert_eq!(chain.candidates(), &[Candidate::Placeholder]);
        assert!(!chain.is_empty());
    }
}
