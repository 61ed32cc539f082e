//! Placement descriptor parsing
//!
//! The mediation host hands the adapter an opaque placement id configured in
//! its dashboard. The id must look like:
//!
//! ```text
//! <site id>/<page id>/<format id>[/<targeting string>]
//! ```
//!
//! e.g. `123/456/789/targeting=string` or `123/456/789`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PlacementError, Result};

/// Human readable description of the accepted placement format, used in logs
pub const PLACEMENT_FORMAT_HINT: &str =
    "<site id>/<page id>/<format id>[/<targeting string> (optional)] (ex: 123/456/789/targetingString or 123/456/789)";

/// A validated ad placement
///
/// Immutable once constructed. The only way to obtain one is through
/// [`PlacementDescriptor::parse`] (or `str::parse`), so every descriptor in the
/// system carries three valid integer ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlacementDescriptor {
    site_id: i32,
    page_id: i32,
    format_id: i32,
    targeting: Option<String>,
}

impl PlacementDescriptor {
    /// Parse an optional raw placement string
    ///
    /// Fails when `raw` is `None` or empty, when fewer than three segments are
    /// present, or when one of the first three segments is not an integer
    /// after trimming whitespace. A fourth segment is kept verbatim as the
    /// targeting string; anything after it is ignored.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(PlacementError::Empty),
        };

        let mut segments: Vec<&str> = raw.split('/').collect();
        // Trailing empty segments do not count ("1/2/3/" has no targeting)
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        if segments.len() < 3 {
            return Err(PlacementError::MissingSegments {
                found: segments.len(),
            });
        }

        Ok(Self {
            site_id: parse_id("site id", segments[0])?,
            page_id: parse_id("page id", segments[1])?,
            format_id: parse_id("format id", segments[2])?,
            targeting: segments.get(3).map(|t| (*t).to_string()),
        })
    }

    pub fn site_id(&self) -> i32 {
        self.site_id
    }

    pub fn page_id(&self) -> i32 {
        self.page_id
    }

    pub fn format_id(&self) -> i32 {
        self.format_id
    }

    /// Raw keyword targeting expression, passed through unparsed
    pub fn targeting(&self) -> Option<&str> {
        self.targeting.as_deref()
    }
}

fn parse_id(field: &'static str, segment: &str) -> Result<i32> {
    segment
        .trim()
        .parse::<i32>()
        .map_err(|_| PlacementError::InvalidSegment {
            field,
            value: segment.to_string(),
        })
}

impl FromStr for PlacementDescriptor {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(Some(s))
    }
}

impl fmt::Display for PlacementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.site_id, self.page_id, self.format_id)?;
        if let Some(targeting) = &self.targeting {
            write!(f, "/{}", targeting)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_mandatory_segments() {
        let placement = PlacementDescriptor::parse(Some("123/456/789")).unwrap();
        assert_eq!(placement.site_id(), 123);
        assert_eq!(placement.page_id(), 456);
        assert_eq!(placement.format_id(), 789);
        assert_eq!(placement.targeting(), None);
    }

    #[test]
    fn test_parse_targeting_kept_verbatim() {
        let placement = PlacementDescriptor::parse(Some("1/2/3/ age=30;sport = tennis ")).unwrap();
        assert_eq!(placement.targeting(), Some(" age=30;sport = tennis "));
    }

    #[test]
    fn test_targeting_is_not_rejoined() {
        let placement: PlacementDescriptor = "1/2/3/a=b/c=d".parse().unwrap();
        assert_eq!(placement.targeting(), Some("a=b"));
    }

    #[test]
    fn test_segments_are_trimmed() {
        let placement: PlacementDescriptor = " 1 /\t2/3 ".parse().unwrap();
        assert_eq!(
            (placement.site_id(), placement.page_id(), placement.format_id()),
            (1, 2, 3)
        );
    }

    #[test]
    fn test_signed_ids_are_accepted() {
        let placement: PlacementDescriptor = "-1/+2/3".parse().unwrap();
        assert_eq!(placement.site_id(), -1);
        assert_eq!(placement.page_id(), 2);
    }

    #[test]
    fn test_trailing_separator_has_no_targeting() {
        let placement: PlacementDescriptor = "1/2/3/".parse().unwrap();
        assert_eq!(placement.targeting(), None);
    }

    #[test]
    fn test_empty_inner_targeting_segment() {
        let placement: PlacementDescriptor = "1/2/3//x".parse().unwrap();
        assert_eq!(placement.targeting(), Some(""));
    }

    #[rstest]
    #[case::none(None, PlacementError::Empty)]
    #[case::empty(Some(""), PlacementError::Empty)]
    #[case::two_segments(Some("1/2"), PlacementError::MissingSegments { found: 2 })]
    #[case::trailing_only(Some("1/2//"), PlacementError::MissingSegments { found: 2 })]
    #[case::separators_only(Some("///"), PlacementError::MissingSegments { found: 0 })]
    fn test_parse_rejects_short_input(#[case] raw: Option<&str>, #[case] expected: PlacementError) {
        assert_eq!(PlacementDescriptor::parse(raw), Err(expected));
    }

    #[rstest]
    #[case("x/2/3", "site id")]
    #[case("1/y/3", "page id")]
    #[case("1/2/z", "format id")]
    #[case("1/2/3.5", "format id")]
    #[case("1//3", "page id")]
    #[case("99999999999/2/3", "site id")]
    fn test_parse_rejects_non_integer(#[case] raw: &str, #[case] field: &str) {
        match raw.parse::<PlacementDescriptor>() {
            Err(PlacementError::InvalidSegment { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected invalid segment for {raw}, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let placement: PlacementDescriptor = "1/2/3/k=v".parse().unwrap();
        assert_eq!(placement.to_string(), "1/2/3/k=v");
        let placement: PlacementDescriptor = "1 / 2 / 3".parse().unwrap();
        assert_eq!(placement.to_string(), "1/2/3");
    }
}
