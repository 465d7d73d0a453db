use url::Url;

use crate::{Candidate, Result, SelectorError, Target};

impl Candidate {
    /// Build a candidate from a URL string, keeping the URL as its label.
    ///
    /// The target is the URL's host and port, falling back to the scheme's
    /// well-known port and then to `default_port`.
    pub fn from_url(raw: &str, default_port: u16) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| SelectorError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        // host_str keeps the brackets around IPv6 literals, which the resolver rejects
        let host = match url.host() {
            Some(url::Host::Domain(domain)) => domain.to_string(),
            Some(url::Host::Ipv4(addr)) => addr.to_string(),
            Some(url::Host::Ipv6(addr)) => addr.to_string(),
            None => {
                return Err(SelectorError::InvalidUrl {
                    url: raw.to_string(),
                    reason: "missing host".to_string(),
                });
            }
        };

        let port = url.port_or_known_default().unwrap_or(default_port);

        Ok(Candidate::new(raw, Target::new(host, port)))
    }
}

/// Turn a list of URLs into candidates, dropping the ones that do not parse.
///
/// Input order is preserved, which matters because it breaks latency ties.
pub fn from_urls<I, S>(urls: I, default_port: u16) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .filter_map(|raw| match Candidate::from_url(raw.as_ref(), default_port) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::warn!(error = %e, "skipping candidate");
                None
            }
        })
        .collect()
}
