use url::Url;

pub const TRUSTED_DOMAINS: &[&str] = &[".gov", ".edu", ".org", "crisis", "helpline", "nami", "samhsa"];
pub const POSITIVE_KEYWORDS: &[&str] = &["mental health", "support", "help", "counseling", "therapy"];
pub const NEGATIVE_KEYWORDS: &[&str] = &["paid", "advertisement", "sponsor", "buy", "purchase"];
pub const PATH_INDICATORS: &[&str] = &["/resources", "/help", "/support", "mental-health"];

/// A search hit, lower-cased and split just enough to classify it.
#[derive(Debug, Clone)]
pub struct CandidateUrl<'a> {
    pub raw: &'a str,
    pub lower: String,
    pub domain: String,
}

impl<'a> CandidateUrl<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let domain = Url::parse(raw)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .unwrap_or_default();
        CandidateUrl {
            raw,
            lower: raw.to_lowercase(),
            domain,
        }
    }
}

/// Which rule decided a URL's fate. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Negative(&'static str),
    TrustedDomain(&'static str),
    PathIndicator(&'static str),
    NoMatch,
}

impl Verdict {
    pub fn accepted(self) -> bool {
        matches!(self, Verdict::TrustedDomain(_) | Verdict::PathIndicator(_))
    }
}

#[derive(Debug, Clone)]
pub struct TrustPolicy {
    pub trusted_domains: Vec<&'static str>,
    pub positive_keywords: Vec<&'static str>,
    pub negative_keywords: Vec<&'static str>,
    pub path_indicators: Vec<&'static str>,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        TrustPolicy {
            trusted_domains: TRUSTED_DOMAINS.to_vec(),
            positive_keywords: POSITIVE_KEYWORDS.to_vec(),
            negative_keywords: NEGATIVE_KEYWORDS.to_vec(),
            path_indicators: PATH_INDICATORS.to_vec(),
        }
    }
}

impl TrustPolicy {
    /// Negative keywords are checked first and always win.
    pub fn classify(&self, candidate: &CandidateUrl) -> Verdict {
        if let Some(bad) = first_contained(&self.negative_keywords, &candidate.lower) {
            return Verdict::Negative(bad);
        }
        if let Some(td) = first_contained(&self.trusted_domains, &candidate.domain) {
            return Verdict::TrustedDomain(td);
        }
        if let Some(ind) = first_contained(&self.path_indicators, &candidate.lower) {
            return Verdict::PathIndicator(ind);
        }
        Verdict::NoMatch
    }

    pub fn is_good_site(&self, url: &str) -> bool {
        self.classify(&CandidateUrl::parse(url)).accepted()
    }

    /// `free "mental health" OR support OR ... -paid -advertisement ...`
    pub fn search_query(&self) -> String {
        let wanted = self
            .positive_keywords
            .iter()
            .map(|kw| {
                if kw.contains(' ') {
                    format!("\"{}\"", kw)
                } else {
                    kw.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" OR ");
        let excluded = self
            .negative_keywords
            .iter()
            .map(|kw| format!("-{}", kw))
            .collect::<Vec<_>>()
            .join(" ");
        format!("free {} {}", wanted, excluded)
    }
}

/// Classify with the compiled-in policy.
pub fn is_good_site(url: &str) -> bool {
    TrustPolicy::default().is_good_site(url)
}

fn first_contained(needles: &[&'static str], haystack: &str) -> Option<&'static str> {
    needles.iter().copied().find(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_keyword_beats_trusted_domain() {
        assert!(!is_good_site("https://nami.org/paid-support"));
        assert!(!is_good_site("https://www.samhsa.gov/Sponsor"));
        assert!(!is_good_site("https://example.com/mental-health/buy-now"));
    }

    #[test]
    fn trusted_domain() {
        assert!(is_good_site("https://www.samhsa.gov/find-help"));
        assert!(is_good_site("https://988lifeline.org/"));
        assert!(is_good_site("https://CrisisTextLine.com/"));
    }

    #[test]
    fn path_indicator() {
        assert!(is_good_site("https://example.com/mental-health/resources"));
        assert!(is_good_site("https://example.com/help"));
    }

    #[test]
    fn no_match() {
        assert!(!is_good_site("https://example.com/about"));
        assert!(!is_good_site("https://shop.example.com/"));
    }

    #[test]
    fn trust_is_checked_on_the_domain_only() {
        let policy = TrustPolicy::default();
        let c = CandidateUrl::parse("https://example.com/nami");
        assert_eq!(c.domain, "example.com");
        assert_eq!(policy.classify(&c), Verdict::NoMatch);
    }

    #[test]
    fn unparseable_url_can_still_match_path() {
        let c = CandidateUrl::parse("/local/mental-health");
        assert!(c.domain.is_empty());
        assert_eq!(
            TrustPolicy::default().classify(&c),
            Verdict::PathIndicator("mental-health")
        );
    }

    #[test]
    fn verdict_names_the_rule() {
        let policy = TrustPolicy::default();
        assert_eq!(
            policy.classify(&CandidateUrl::parse("https://nami.org/paid-support")),
            Verdict::Negative("paid")
        );
        assert_eq!(
            policy.classify(&CandidateUrl::parse("https://www.samhsa.gov/find-help")),
            Verdict::TrustedDomain(".gov")
        );
    }

    #[test]
    fn query_from_keywords() {
        let q = TrustPolicy::default().search_query();
        assert_eq!(
            q,
            "free \"mental health\" OR support OR help OR counseling OR therapy \
             -paid -advertisement -sponsor -buy -purchase"
        );
    }
}
