//! Legacy alignment strings → [`TextAlignment`].
//!
//! Persisted strings name the corner of the text that touches the anchor
//! ("topLeft" = the anchor is at the text's top-left). The parsed record
//! says where the box extends instead, so placement sides are inverted:
//! "topLeft" becomes `horizontal: Right, vertical: Bottom`. Justification
//! tokens ("textCenter") are taken as written.

use std::collections::HashMap;

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::{Horizontal, TextAlignment, Vertical};
use crate::log::warn;

#[derive(Parser)]
#[grammar = "label/alignment.pest"]
struct AlignmentParser;

/// Parse a comma-separated legacy alignment string.
///
/// Later tokens override earlier ones. Unrecognized tokens are skipped, so
/// every string yields an alignment.
pub fn parse_alignment(raw: &str) -> TextAlignment {
    let mut alignment = TextAlignment::default();
    let mut pairs = match AlignmentParser::parse(Rule::alignment, raw) {
        Ok(pairs) => pairs,
        Err(e) => {
            warn!(raw, error = %e, "unparseable alignment string, using defaults");
            return alignment;
        }
    };
    let Some(root) = pairs.next() else {
        return alignment;
    };
    for entry in root.into_inner() {
        match entry.as_rule() {
            Rule::token => apply_token(&mut alignment, entry),
            Rule::unknown => {
                warn!(token = entry.as_str(), raw, "ignoring unknown alignment token");
            }
            _ => {}
        }
    }
    alignment
}

fn apply_token(alignment: &mut TextAlignment, token: Pair<'_, Rule>) {
    let mut qualifier = "";
    let mut side = Horizontal::Center;
    for part in token.into_inner() {
        match part.as_rule() {
            Rule::qualifier => qualifier = part.as_str().trim(),
            Rule::side => side = parse_side(part.as_str()),
            _ => {}
        }
    }

    let qualifier = qualifier.to_ascii_lowercase();
    let vertical = match qualifier.as_str() {
        "text" => {
            alignment.justify = side;
            return;
        }
        "" => None,
        "top" => Some(Vertical::Bottom),
        "bottom" => Some(Vertical::Top),
        "middle" | "center" | "centre" => Some(Vertical::Center),
        _ => {
            warn!(
                qualifier = qualifier.as_str(),
                "ignoring alignment token with unknown qualifier"
            );
            return;
        }
    };

    alignment.horizontal = invert(side);
    if let Some(vertical) = vertical {
        alignment.vertical = vertical;
    }
}

fn parse_side(side: &str) -> Horizontal {
    match side.to_ascii_lowercase().as_str() {
        "left" => Horizontal::Left,
        "right" => Horizontal::Right,
        _ => Horizontal::Center,
    }
}

fn invert(side: Horizontal) -> Horizontal {
    match side {
        Horizontal::Left => Horizontal::Right,
        Horizontal::Right => Horizontal::Left,
        Horizontal::Center => Horizontal::Center,
    }
}

/// Memoized [`parse_alignment`], keyed by the raw string.
#[derive(Debug, Default, Clone)]
pub struct AlignmentCache {
    parsed: HashMap<String, TextAlignment>,
}

impl AlignmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&mut self, raw: &str) -> TextAlignment {
        *self.parsed.entry(raw.to_owned()).or_insert_with(|| parse_alignment(raw))
    }

    pub fn len(&self) -> usize {
        self.parsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_text_center_is_inverted() {
        insta::assert_debug_snapshot!(parse_alignment("topLeft,textCenter"), @r"
        TextAlignment {
            horizontal: Right,
            vertical: Bottom,
            justify: Center,
        }
        ");
    }

    #[test]
    fn bottom_center_sits_above() {
        let a = parse_alignment("bottomCenter");
        assert_eq!(a.horizontal, Horizontal::Center);
        assert_eq!(a.vertical, Vertical::Top);
    }

    #[test]
    fn justification_is_not_inverted() {
        let a = parse_alignment("textLeft");
        assert_eq!(a.justify, Horizontal::Left);
        assert_eq!(a.horizontal, Horizontal::Center);
        let a = parse_alignment("textRight");
        assert_eq!(a.justify, Horizontal::Right);
    }

    #[test]
    fn bare_side_only_sets_horizontal() {
        let a = parse_alignment("right");
        assert_eq!(a.horizontal, Horizontal::Left);
        assert_eq!(a.vertical, Vertical::Center);
    }

    #[test]
    fn centred_tokens() {
        let a = parse_alignment("centerCenter");
        assert_eq!(a, TextAlignment::default());
        let a = parse_alignment("middleRight");
        assert_eq!(a.horizontal, Horizontal::Left);
        assert_eq!(a.vertical, Vertical::Center);
    }

    #[test]
    fn whitespace_and_case_are_tolerated() {
        let a = parse_alignment(" TopRight , textleft ");
        assert_eq!(a.horizontal, Horizontal::Left);
        assert_eq!(a.vertical, Vertical::Bottom);
        assert_eq!(a.justify, Horizontal::Left);
    }

    #[test]
    fn unknown_tokens_are_skipped() {
        let a = parse_alignment("sideways,bottomLeft,,weirdRight");
        assert_eq!(a.horizontal, Horizontal::Right);
        assert_eq!(a.vertical, Vertical::Top);
        assert_eq!(parse_alignment(""), TextAlignment::default());
    }

    #[test]
    fn later_tokens_win() {
        let a = parse_alignment("topLeft,bottomRight");
        assert_eq!(a.horizontal, Horizontal::Left);
        assert_eq!(a.vertical, Vertical::Top);
    }

    #[test]
    fn cache_memoizes_by_raw_string() {
        let mut cache = AlignmentCache::new();
        assert!(cache.is_empty());
        let first = cache.parse("topLeft");
        let second = cache.parse("topLeft");
        assert_eq!(first, second);
        cache.parse("bottomRight");
        assert_eq!(cache.len(), 2);
    }
}
