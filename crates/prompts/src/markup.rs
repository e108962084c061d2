//! HTML-to-text reduction for stored overviews.
//!
//! Overviews are saved as rendered HTML. Before they are fed back to the
//! LLM as prior content they are reduced to their text: script and style
//! bodies and comments dropped, tags removed, entities decoded. No newlines
//! are introduced for block elements.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

static HIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<!--.*?-->")
        .expect("static pattern")
});

// A tag must open with a letter so that `a < b` in math survives.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("static pattern"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]{2,8});").expect("static pattern")
});

/// Reduce an HTML fragment to plain text.
pub fn strip_markup(html: &str) -> String {
    let visible = HIDDEN.replace_all(html, "");
    let text = TAG.replace_all(&visible, "");
    ENTITY
        .replace_all(&text, |caps: &Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "times" => '\u{d7}',
        "deg" => '\u{b0}',
        _ => return None,
    };
    Some(ch.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_untouched() {
        assert_eq!(strip_markup("Lines..."), "Lines...");
    }

    #[test]
    fn tags_removed_without_separators() {
        assert_eq!(
            strip_markup("<p>First <strong>bold</strong></p><p>Second</p>"),
            "First boldSecond"
        );
    }

    #[test]
    fn attributes_and_self_closing_tags() {
        assert_eq!(
            strip_markup(r#"<span class="math">x</span><br/>y<img src="a.png" />"#),
            "xy"
        );
    }

    #[test]
    fn scripts_styles_and_comments_dropped() {
        let html = "<style>p{color:red}</style>Keep<script>alert('x')</script><!-- note -->!";
        assert_eq!(strip_markup(html), "Keep!");
    }

    #[test]
    fn entities_decoded() {
        assert_eq!(
            strip_markup("Tom &amp; Jerry &lt;3 &#36;x&#x24; &quot;q&quot;"),
            "Tom & Jerry <3 $x$ \"q\""
        );
    }

    #[test]
    fn unknown_entity_left_alone() {
        assert_eq!(strip_markup("&bogus; &amp;"), "&bogus; &");
    }

    #[test]
    fn comparison_operators_survive() {
        assert_eq!(strip_markup("<p>$a < b$ and $c > d$</p>"), "$a < b$ and $c > d$");
    }
}
