//! `Accept` header negotiation.
//!
//! Pure functions only: given the client's preference string and the set
//! of representations the server can produce, pick one or none.

use std::fmt;

/// Representations the rejection endpoint can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Json,
    PlainText,
    Html,
    Xml,
}

impl MediaType {
    /// Every supported type, in server preference order.
    pub const SUPPORTED: [MediaType; 4] = [
        MediaType::Json,
        MediaType::PlainText,
        MediaType::Html,
        MediaType::Xml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::PlainText => "text/plain",
            MediaType::Html => "text/html",
            MediaType::Xml => "application/xml",
        }
    }

    fn parts(&self) -> (&'static str, &'static str) {
        match self {
            MediaType::Json => ("application", "json"),
            MediaType::PlainText => ("text", "plain"),
            MediaType::Html => ("text", "html"),
            MediaType::Xml => ("application", "xml"),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed media range from an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
struct MediaRange {
    kind: String,
    subtype: String,
    quality: f32,
    position: usize,
}

impl MediaRange {
    /// 2 = exact, 1 = `type/*`, 0 = `*/*`, `None` = no match.
    fn specificity_for(&self, media: MediaType) -> Option<u8> {
        let (kind, subtype) = media.parts();
        match (self.kind.as_str(), self.subtype.as_str()) {
            ("*", "*") => Some(0),
            (k, "*") if k == kind => Some(1),
            (k, s) if k == kind && s == subtype => Some(2),
            _ => None,
        }
    }
}

fn parse_quality(value: &str) -> Option<f32> {
    let q: f32 = value.trim().parse().ok()?;
    (0.0..=1.0).contains(&q).then_some(q)
}

fn parse_range(raw: &str, position: usize) -> Option<MediaRange> {
    let mut params = raw.split(';');
    let essence = params.next()?.trim().to_ascii_lowercase();
    if essence.is_empty() {
        return None;
    }

    let (kind, subtype) = if essence == "*" {
        ("*".to_string(), "*".to_string())
    } else {
        let (k, s) = essence.split_once('/')?;
        let (k, s) = (k.trim(), s.trim());
        if k.is_empty() || s.is_empty() || (k == "*" && s != "*") {
            return None;
        }
        (k.to_string(), s.to_string())
    };

    let mut quality = 1.0;
    for param in params {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("q") {
            quality = parse_quality(value)?;
        }
    }

    Some(MediaRange {
        kind,
        subtype,
        quality,
        position,
    })
}

fn parse_accept(header: &str) -> Vec<MediaRange> {
    header
        .split(',')
        .enumerate()
        .filter_map(|(i, raw)| parse_range(raw, i))
        .collect()
}

/// Pick the best representation for `accept` out of `supported`.
///
/// A missing or blank header selects the first supported type. Otherwise
/// each supported type takes the quality of its most specific matching
/// range; the highest non-zero quality wins, ties broken by specificity,
/// then header order, then `supported` order.
pub fn negotiate(accept: Option<&str>, supported: &[MediaType]) -> Option<MediaType> {
    let header = match accept.map(str::trim) {
        None | Some("") => return supported.first().copied(),
        Some(h) => h,
    };

    let ranges = parse_accept(header);

    let mut best: Option<(MediaType, f32, u8, usize)> = None;
    for &media in supported {
        let matched = ranges
            .iter()
            .filter_map(|r| r.specificity_for(media).map(|s| (r, s)))
            .max_by(|(a, sa), (b, sb)| sa.cmp(sb).then(b.position.cmp(&a.position)));

        let Some((range, specificity)) = matched else {
            continue;
        };
        if range.quality <= 0.0 {
            continue;
        }

        let better = match best {
            None => true,
            Some((_, q, s, pos)) => {
                range.quality > q
                    || (range.quality == q && specificity > s)
                    || (range.quality == q && specificity == s && range.position < pos)
            }
        };
        if better {
            best = Some((media, range.quality, specificity, range.position));
        }
    }

    best.map(|(media, ..)| media)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(accept: &str) -> Option<MediaType> {
        negotiate(Some(accept), &MediaType::SUPPORTED)
    }

    #[test]
    fn missing_or_blank_header_defaults_to_json() {
        assert_eq!(negotiate(None, &MediaType::SUPPORTED), Some(MediaType::Json));
        assert_eq!(pick(""), Some(MediaType::Json));
        assert_eq!(pick("   "), Some(MediaType::Json));
    }

    #[test]
    fn exact_types_select_themselves() {
        for media in MediaType::SUPPORTED {
            assert_eq!(pick(media.as_str()), Some(media));
        }
    }

    #[test]
    fn unsupported_type_is_none() {
        assert_eq!(pick("application/pdf"), None);
        assert_eq!(pick("image/*"), None);
        assert_eq!(pick("garbage"), None);
    }

    #[test]
    fn wildcard_prefers_server_order() {
        assert_eq!(pick("*/*"), Some(MediaType::Json));
        assert_eq!(pick("*"), Some(MediaType::Json));
        assert_eq!(pick("text/*"), Some(MediaType::PlainText));
    }

    #[test]
    fn quality_decides() {
        assert_eq!(
            pick("application/json;q=0.5, application/xml;q=0.9"),
            Some(MediaType::Xml)
        );
        assert_eq!(
            pick("text/html;q=0.1, */*;q=0.2"),
            Some(MediaType::Json)
        );
    }

    #[test]
    fn zero_quality_excludes() {
        assert_eq!(pick("text/*, text/plain;q=0"), Some(MediaType::Html));
        assert_eq!(pick("application/json;q=0"), None);
        assert_eq!(pick("*/*;q=0"), None);
    }

    #[test]
    fn specific_range_overrides_wildcard_quality() {
        // json only matches */* at 0.1; xml matches exactly at 0.8.
        assert_eq!(
            pick("*/*;q=0.1, application/xml;q=0.8"),
            Some(MediaType::Xml)
        );
    }

    #[test]
    fn header_order_breaks_ties() {
        assert_eq!(pick("text/html, application/json"), Some(MediaType::Html));
        assert_eq!(pick("application/xml, text/plain"), Some(MediaType::Xml));
    }

    #[test]
    fn browser_style_header() {
        let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
        assert_eq!(pick(accept), Some(MediaType::Html));
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(pick("  Application/XML ; Q=1 "), Some(MediaType::Xml));
        assert_eq!(pick("TEXT/PLAIN"), Some(MediaType::PlainText));
    }

    #[test]
    fn extra_params_are_ignored() {
        assert_eq!(pick("text/html;level=1;q=0.7"), Some(MediaType::Html));
        assert_eq!(pick("text/plain; charset=utf-8"), Some(MediaType::PlainText));
    }

    #[test]
    fn malformed_quality_drops_the_range() {
        assert_eq!(pick("application/json;q=abc, text/plain"), Some(MediaType::PlainText));
        assert_eq!(pick("application/json;q=1.5"), None);
    }

    #[test]
    fn restricted_supported_set() {
        assert_eq!(
            negotiate(Some("*/*"), &[MediaType::Xml, MediaType::Html]),
            Some(MediaType::Xml)
        );
        assert_eq!(negotiate(None, &[]), None);
    }
}
