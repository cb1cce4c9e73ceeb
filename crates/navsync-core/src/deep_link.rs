#![forbid(unsafe_code)]

//! Deep-link fragment decoding.
//!
//! A deep link is a secondary, fragment-encoded pointer to a sub-resource,
//! independent of the canonical path: `#/resource/<id>` appended to
//! `/dashboard`. The id is a positive integer with no leading zeros; any
//! other shape is treated as "no deep link present" and never blocks
//! rendering of the main view.

/// A decoded deep-link route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkRoute {
    /// The decoded resource id.
    pub resource_id: u32,
    /// The fragment exactly as it appeared, including the leading `#`
    /// when one was present.
    pub raw_fragment: String,
}

/// Prefix of the deep-link shape, after the optional `#`.
const DEEP_LINK_PREFIX: &str = "/resource/";

/// Decode a URL fragment against the deep-link shape.
///
/// Accepts the fragment with or without its leading `#` (DOM APIs differ on
/// whether `location.hash` includes it). Returns `None` for anything that is
/// not exactly `#/resource/<positive integer, no leading zeros>` that fits
/// in a `u32`.
///
/// # Examples
///
/// ```
/// use navsync_core::deep_link::parse_fragment;
///
/// assert_eq!(parse_fragment("#/resource/42").unwrap().resource_id, 42);
/// assert_eq!(parse_fragment("/resource/42").unwrap().resource_id, 42);
/// assert!(parse_fragment("#/resource/042").is_none());
/// assert!(parse_fragment("#/resource/0").is_none());
/// assert!(parse_fragment("#/settings").is_none());
/// ```
#[must_use]
pub fn parse_fragment(fragment: &str) -> Option<DeepLinkRoute> {
    let body = fragment.strip_prefix('#').unwrap_or(fragment);
    let digits = body.strip_prefix(DEEP_LINK_PREFIX)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Positive integer, no leading zeros.
    if digits.starts_with('0') {
        return None;
    }
    let resource_id: u32 = digits.parse().ok()?;

    Some(DeepLinkRoute {
        resource_id,
        raw_fragment: fragment.to_string(),
    })
}

/// Render the canonical fragment for a resource id.
///
/// This is the exact form written back into committed URLs.
#[must_use]
pub fn canonical_fragment(resource_id: u32) -> String {
    format!("#{DEEP_LINK_PREFIX}{resource_id}")
}
