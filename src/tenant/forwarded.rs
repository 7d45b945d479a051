//! Host extraction from `Forwarded` (RFC 7239) and `X-Forwarded-Host`.
//!
//! Both parsers are total: anything they cannot make sense of is treated as
//! "no host", and the resolver falls back to the next source.

use super::headers::INITIATOR_URI_PREFIX;

/// The forwarding header that supplied the initiator host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardedSource {
    Forwarded,
    XForwardedHost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardedHost<'a> {
    pub source: ForwardedSource,
    /// First host found in the header.
    pub host: &'a str,
    /// Whole header value; this is what the gateway signs.
    pub raw: &'a str,
}

impl ForwardedHost<'_> {
    pub fn initiator_uri(&self) -> String {
        format!("{INITIATOR_URI_PREFIX}{}", self.host)
    }
}

/// Pick the initiator host: `Forwarded` first, then `X-Forwarded-Host`.
pub fn resolve<'a>(
    forwarded: Option<&'a str>,
    x_forwarded_host: Option<&'a str>,
) -> Option<ForwardedHost<'a>> {
    if let Some(raw) = forwarded
        && let Some(host) = forwarded_host(raw)
    {
        return Some(ForwardedHost {
            source: ForwardedSource::Forwarded,
            host,
            raw,
        });
    }

    let raw = x_forwarded_host?;
    first_forwarded_host(raw).map(|host| ForwardedHost {
        source: ForwardedSource::XForwardedHost,
        host,
        raw,
    })
}

/// Value of the first `host` directive of a `Forwarded` header.
///
/// Elements are separated by `,` and pairs within an element by `;`, so an
/// unquoted value never extends past the first comma. Separators inside a
/// quoted-string belong to the value.
pub fn forwarded_host(value: &str) -> Option<&str> {
    directives(value)
        .into_iter()
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("host"))
        .map(|(_, host)| unquote(host.trim()))
        .filter(|host| !host.is_empty())
}

/// First entry of a comma-separated `X-Forwarded-Host` list.
pub fn first_forwarded_host(value: &str) -> Option<&str> {
    value
        .split(',')
        .next()
        .map(str::trim)
        .filter(|host| !host.is_empty())
}

/// Split on `,` and `;` outside of quoted-strings.
fn directives(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ',' | ';' if !quoted => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

// A missing closing quote is tolerated.
fn unquote(value: &str) -> &str {
    match value.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').unwrap_or(inner),
        None => value,
    }
}
