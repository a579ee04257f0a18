//! URI validation for remote data locations and terrain scenes.
//!
//! Campaign declarations carry two kinds of URIs: OPeNDAP/THREDDS base
//! locations for platform data, and X3D terrain scene references. Both must
//! be absolute http(s) URLs. Validation happens once, at descriptor
//! construction; no network access is performed.

use regex::Regex;
use std::sync::OnceLock;

/// Absolute http(s) URL with a non-empty host and no whitespace.
fn http_uri_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https?://[A-Za-z0-9][A-Za-z0-9.\-]*(:\d+)?(/\S*)?$")
            .expect("static regex must compile")
    })
}

/// Check that `uri` is an absolute http(s) URL.
///
/// Returns the reason on failure so callers can wrap it in their own
/// error variant.
pub fn validate_http_uri(uri: &str) -> Result<(), String> {
    if uri.is_empty() {
        return Err("URI is empty".to_string());
    }
    if !http_uri_re().is_match(uri) {
        return Err("not an absolute http(s) URL".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_campaign_uris() {
        for uri in [
            "http://dods.mbari.org/opendap/data/ssdsdata/deployments/m1/",
            "http://legacy.cencoos.org/thredds/dodsC/gliders/Line66/",
            "https://stoqs.mbari.org/x3d/Monterey25_10x/Monterey25_10x_scene.x3d",
            "http://odss.mbari.org/thredds/",
        ] {
            assert!(validate_http_uri(uri).is_ok(), "rejected {uri}");
        }
    }

    #[test]
    fn test_rejects_malformed_uris() {
        assert!(validate_http_uri("").is_err());
        assert!(validate_http_uri("ftp://dods.mbari.org/data/").is_err());
        assert!(validate_http_uri("stoqs.mbari.org/x3d/scene.x3d").is_err());
        assert!(validate_http_uri("http://").is_err());
        assert!(validate_http_uri("http://host with spaces/").is_err());
    }
}
