//! Endpoint and Proxy Resolution
//!
//! Both the API endpoint and the HTTP proxy arrive as loosely formatted strings: either a
//! full URL whose scheme is authoritative (`https://api.example.com:443/v3`) or a bare
//! `host[:port]`. The two shapes are told apart by looking for `://` in the raw string,
//! never by a general-purpose URI parser.

use crate::error::ConfigurationError;
use std::fmt;

/// Scheme used to reach the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Canonical port for the scheme.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    fn from_secure(secure: bool) -> Self {
        if secure {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("http") {
            Some(Scheme::Http)
        } else if raw.eq_ignore_ascii_case("https") {
            Some(Scheme::Https)
        } else {
            None
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved API endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
}

impl EndpointSpec {
    /// Scheme with its `://` separator, the form the delegate expects.
    pub fn scheme_prefix(&self) -> String {
        format!("{}://", self.scheme)
    }
}

/// Resolved HTTP proxy. Host and port resolve independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySpec {
    pub host: Option<String>,
    pub port: Option<u16>,
}

const DEFAULT_PROXY_PORT: u16 = 80;

/// Raw input split into its two accepted shapes.
#[derive(Debug, PartialEq, Eq)]
enum RawShape<'a> {
    Schemed { scheme: &'a str, authority: &'a str },
    Bare(&'a str),
}

fn classify(raw: &str) -> RawShape<'_> {
    if let Some((scheme, rest)) = raw.split_once("://") {
        if is_scheme_token(scheme) {
            let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
            return RawShape::Schemed {
                scheme,
                authority: &rest[..end],
            };
        }
    }
    RawShape::Bare(raw)
}

fn is_scheme_token(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Split a URL authority into host and optional port text.
/// User-info is dropped and bracketed IPv6 literals are unwrapped. Returns `None` when
/// anything other than `:port` follows the closing bracket.
fn split_authority(authority: &str) -> Option<(&str, Option<&str>)> {
    let host_port = authority
        .rsplit_once('@')
        .map(|(_, rest)| rest)
        .unwrap_or(authority);

    if let Some(bracketed) = host_port.strip_prefix('[') {
        if let Some((host, rest)) = bracketed.split_once(']') {
            return match rest {
                "" => Some((host, None)),
                _ => rest.strip_prefix(':').map(|port| (host, Some(port))),
            };
        }
    }

    Some(match host_port.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    })
}

/// Parse port text. Empty text counts as "no port".
fn parse_port(input: &str, port: Option<&str>) -> Result<Option<u16>, ConfigurationError> {
    let Some(text) = port.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    match text.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigurationError::InvalidPort {
            input: input.to_string(),
            port: text.to_string(),
        }),
        Ok(value) => Ok(Some(value)),
    }
}

fn is_plain_host(host: &str) -> bool {
    !host.is_empty()
        && !host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
}

/// Resolve the configured API endpoint.
///
/// Returns `Ok(None)` when no endpoint is configured; the delegate then uses its own
/// default. An explicit `http://` or `https://` scheme wins over `secure`. For a bare
/// `host[:port]`, `secure` picks the scheme and the canonical port fills in only when
/// none was given.
pub fn resolve_endpoint(
    raw: Option<&str>,
    secure: bool,
) -> Result<Option<EndpointSpec>, ConfigurationError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    let (scheme, host, port) = match classify(raw) {
        RawShape::Schemed { scheme, authority } => {
            let scheme = Scheme::parse(scheme)
                .ok_or_else(|| ConfigurationError::InvalidEndpoint(raw.to_string()))?;
            let (host, port) = split_authority(authority)
                .ok_or_else(|| ConfigurationError::InvalidEndpoint(raw.to_string()))?;
            (scheme, host, parse_port(raw, port)?)
        }
        RawShape::Bare(_) => {
            let (host, port) = match raw.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (raw, None),
            };
            (Scheme::from_secure(secure), host, parse_port(raw, port)?)
        }
    };

    if !is_plain_host(host) {
        return Err(ConfigurationError::InvalidEndpoint(raw.to_string()));
    }

    Ok(Some(EndpointSpec {
        scheme,
        host: host.to_string(),
        port: port.unwrap_or_else(|| scheme.default_port()),
    }))
}

/// Resolve an `HTTP_PROXY`-style value.
///
/// `http://host[:port]` yields the host and, only if written, the port; a URL without a
/// host yields nothing. `https://` proxies are rejected. A bare `host[:port]` defaults the
/// port to 80.
pub fn resolve_proxy(raw: Option<&str>) -> Result<Option<ProxySpec>, ConfigurationError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    let spec = match classify(raw) {
        RawShape::Schemed { scheme, authority } => match Scheme::parse(scheme) {
            Some(Scheme::Http) => {
                let (host, port) = split_authority(authority)
                    .ok_or_else(|| ConfigurationError::InvalidProxy(raw.to_string()))?;
                if host.is_empty() {
                    return Ok(None);
                }
                if !is_plain_host(host) {
                    return Err(ConfigurationError::InvalidProxy(raw.to_string()));
                }
                ProxySpec {
                    host: Some(host.to_string()),
                    port: parse_port(raw, port)?,
                }
            }
            Some(Scheme::Https) => {
                return Err(ConfigurationError::ProxySchemeNotAllowed(raw.to_string()))
            }
            None => return Err(ConfigurationError::InvalidProxy(raw.to_string())),
        },
        RawShape::Bare(_) => {
            let (host, port) = match raw.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (raw, None),
            };
            if !host.is_empty() && !is_plain_host(host) {
                return Err(ConfigurationError::InvalidProxy(raw.to_string()));
            }
            ProxySpec {
                host: Some(host.to_string()).filter(|h| !h.is_empty()),
                port: Some(parse_port(raw, port)?.unwrap_or(DEFAULT_PROXY_PORT)),
            }
        }
    };

    Ok(Some(spec))
}
