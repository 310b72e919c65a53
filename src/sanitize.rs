//! HTML-safe rendering of transcript lines.

use std::fmt;

const NBSP: &str = "&nbsp;";

/// Visual class of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCategory {
    /// Server-originated or locally generated status text.
    Server,
    /// Text the local user typed.
    User,
}

impl DisplayCategory {
    /// CSS class applied to the line's container.
    pub fn css_class(&self) -> &'static str {
        match self {
            DisplayCategory::Server => "server",
            DisplayCategory::User => "user",
        }
    }
}

/// Escaped markup that is safe to insert as raw HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    pub fn into_string(self) -> String {
        self.0
    }

    /// Wrap the markup in the transcript container element.
    pub fn to_element(&self, category: DisplayCategory) -> String {
        format!(
            "<div class=\"message {}\">{}</div>",
            category.css_class(),
            self.0
        )
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape and format `text` for display.
///
/// HTML metacharacters become entities, a tab becomes four `&nbsp;`, every
/// two-space pair (scanned left to right without overlap) becomes two
/// `&nbsp;`, and a newline becomes `<br>`. An odd space in a run stays a
/// plain space. None of the substitutions emit spaces, so a single scan gives
/// the same result as applying each rule in turn.
///
/// The category only selects the container class; escaping is identical.
pub fn render(text: &str, _category: DisplayCategory) -> SafeMarkup {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '\t' => {
                for _ in 0..4 {
                    out.push_str(NBSP);
                }
            }
            ' ' if chars.peek() == Some(&' ') => {
                chars.next();
                out.push_str(NBSP);
                out.push_str(NBSP);
            }
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }

    SafeMarkup(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(text: &str) -> String {
        render(text, DisplayCategory::Server).into_string()
    }

    #[test]
    fn test_escapes_script_tag() {
        let out = server("<script>");
        assert!(out.contains("&lt;script&gt;"));
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
    }

    #[test]
    fn test_escapes_all_metacharacters() {
        assert_eq!(server(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#039;");
    }

    #[test]
    fn test_ampersand_is_not_double_escaped() {
        assert_eq!(server("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_tab_becomes_four_nbsp() {
        assert_eq!(server("a\tb"), "a&nbsp;&nbsp;&nbsp;&nbsp;b");
    }

    #[test]
    fn test_two_spaces_become_two_nbsp() {
        assert_eq!(server("a  b"), "a&nbsp;&nbsp;b");
    }

    #[test]
    fn test_single_space_is_kept() {
        assert_eq!(server("a b"), "a b");
    }

    #[test]
    fn test_odd_space_run_leaves_trailing_space() {
        assert_eq!(server("a   b"), "a&nbsp;&nbsp; b");
        assert_eq!(server("a    b"), "a&nbsp;&nbsp;&nbsp;&nbsp;b");
    }

    #[test]
    fn test_newline_becomes_break() {
        assert_eq!(server("one\ntwo"), "one<br>two");
    }

    #[test]
    fn test_mixed_whitespace() {
        assert_eq!(
            server("x \t y\n  z"),
            "x &nbsp;&nbsp;&nbsp;&nbsp; y<br>&nbsp;&nbsp;z"
        );
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(server("héllo 世界"), "héllo 世界");
    }

    #[test]
    fn test_category_does_not_change_escaping() {
        assert_eq!(
            render("<a  b>", DisplayCategory::User),
            render("<a  b>", DisplayCategory::Server)
        );
    }

    #[test]
    fn test_to_element_uses_category_class() {
        let markup = render("hi & bye", DisplayCategory::User);
        assert_eq!(
            markup.to_element(DisplayCategory::User),
            "<div class=\"message user\">hi &amp; bye</div>"
        );
        assert_eq!(
            markup.to_element(DisplayCategory::Server),
            "<div class=\"message server\">hi &amp; bye</div>"
        );
    }
}
