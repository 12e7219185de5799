//! Text overlay line breaking and placement.
//!
//! Both renderers run the same routine so explicit breaks and automatic
//! wrapping come out identically in PNG and PDF output. Measuring is left to
//! the caller, which knows the font.

use crate::geometry::Point;

/// Ratio between line pitch and font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.1;

/// Splits `content` into lines no wider than `max_width`.
///
/// Explicit `\n` breaks are hard paragraph boundaries and are never joined.
/// Within a paragraph words are packed greedily; a single word wider than
/// `max_width` keeps a line to itself. Blank paragraphs become empty lines.
///
/// # Examples
///
/// ```
/// # use bauhaus_core::text::wrap_text;
/// let measure = |s: &str| s.chars().count() as f32;
/// assert_eq!(wrap_text("aa bb cc", 5.0, measure), vec!["aa bb", "cc"]);
/// assert_eq!(wrap_text("a\nb", 100.0, measure), vec!["a", "b"]);
/// ```
pub fn wrap_text(content: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        let mut words = paragraph.split_whitespace();
        let Some(first) = words.next() else {
            lines.push(String::new());
            continue;
        };

        let mut line = first.to_string();
        for word in words {
            let candidate = format!("{line} {word}");
            if measure(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        lines.push(line);
    }
    lines
}

/// One positioned line of overlay text, in target pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Horizontal centre and vertical middle of the line box.
    pub center: Point,
}

/// Centres `lines` on `anchor`: each line horizontally, the whole block
/// vertically, one `line_height` apart.
///
/// # Examples
///
/// ```
/// # use bauhaus_core::{geometry::Point, text::layout_lines};
/// let lines = vec!["a".to_string(), "b".to_string()];
/// let placed = layout_lines(lines, Point::new(50.0, 100.0), 20.0);
/// assert_eq!(placed[0].center, Point::new(50.0, 90.0));
/// assert_eq!(placed[1].center, Point::new(50.0, 110.0));
/// ```
pub fn layout_lines(lines: Vec<String>, anchor: Point, line_height: f32) -> Vec<TextLine> {
    let top = anchor.y() - lines.len() as f32 * line_height / 2.0;
    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| TextLine {
            text,
            center: Point::new(anchor.x(), top + (i as f32 + 0.5) * line_height),
        })
        .collect()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn paragraph_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{1,8}", 1..12).prop_map(|words| words.join(" "))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Wrapping only ever adds breaks: every explicit break survives and
    /// rejoining a paragraph's lines gives back its words.
    fn check_wrap_preserves_paragraphs(
        paragraphs: Vec<String>,
        max_width: f32,
    ) -> Result<(), TestCaseError> {
        let content = paragraphs.join("\n");
        let lines = wrap_text(&content, max_width, |s| s.chars().count() as f32);
        prop_assert!(lines.len() >= paragraphs.len());
        prop_assert_eq!(lines.join(" "), paragraphs.join(" "));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn wrap_preserves_paragraphs(
            paragraphs in prop::collection::vec(paragraph_strategy(), 1..5),
            max_width in 0.0f32..60.0,
        ) {
            check_wrap_preserves_paragraphs(paragraphs, max_width)?;
        }
    }
}
