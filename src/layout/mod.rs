//! Greedy, measurement-driven line breaking.
//!
//! [`wrap`] splits text on whitespace and packs words onto lines for as long
//! as the *measured* width of the joined line stays within the target. It
//! never backtracks and never splits a word: a word that is wider than the
//! target on its own gets a line to itself and is allowed to overflow.
//!
//! # Example
//! ```
//! use textbox::layout::wrap;
//! use textbox::types::{Px, Scale};
//!
//! // Every character measures 10px
//! let measure = |line: &str, scale: Scale| Px(line.len() as f64 * 10.0 * scale.0);
//! let result = wrap("Hello brave new world", Px(120.0), measure, Scale::ONE);
//! assert_eq!(result.line_texts(), vec!["Hello brave", "new world"]);
//! ```

pub mod metrics;

pub use metrics::{MonospaceMetrics, ProportionalMetrics, TextMetrics};

use crate::types::{Px, Scale, Zoom};

/// One visual row of words
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    words: Vec<String>,
}

impl Line {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The words joined by single spaces
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Wrapped lines plus the font scale they were measured at
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    lines: Vec<Line>,
    scale: Scale,
}

impl LayoutResult {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// No lines at all (the input was empty)
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every word across all lines, in order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|l| l.words.iter().map(String::as_str))
    }

    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }
}

/// Font multiplier for a view at `zoom`: `2^(zoom - reference)`.
pub fn font_scale(zoom: Zoom, reference: Zoom) -> Scale {
    Scale::from_zoom(zoom, reference)
}

/// Wrap `text` so that every line measures at most `target_width`.
///
/// `measure` returns the rendered width of a candidate line at `scale`.
/// The only line allowed to exceed the target is one holding a single word.
/// A degenerate target (zero, negative, NaN) puts every word on its own line.
pub fn wrap<M>(text: &str, target_width: Px, mut measure: M, scale: Scale) -> LayoutResult
where
    M: FnMut(&str, Scale) -> Px,
{
    if text.is_empty() {
        return LayoutResult {
            lines: Vec::new(),
            scale,
        };
    }

    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let degenerate = target_width.is_degenerate();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push(word.to_string());
            continue;
        }
        if degenerate {
            lines.push(Line::new(std::mem::take(&mut current)));
            current.push(word.to_string());
            continue;
        }

        current.push(word.to_string());
        let candidate = current.join(" ");
        let width = measure(&candidate, scale);
        if width <= target_width {
            continue;
        }

        crate::log::trace!(
            width = width.0,
            target = target_width.0,
            word,
            "line full, breaking"
        );
        current.pop();
        lines.push(Line::new(std::mem::take(&mut current)));
        current.push(word.to_string());
    }

    // Whitespace-only input still produces one (empty) line
    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::new(current));
    }

    LayoutResult { lines, scale }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Each character measures `px` at scale 1
    fn fixed(px: f64) -> impl Fn(&str, Scale) -> Px {
        move |s: &str, scale: Scale| Px(s.chars().count() as f64 * px * scale.0)
    }

    /// "Hello" and "World" each measure 35px
    fn seven_per_char() -> impl Fn(&str, Scale) -> Px {
        fixed(7.0)
    }

    #[test]
    fn wide_target_keeps_one_line() {
        let result = wrap("Hello World", Px(1000.0), seven_per_char(), Scale::ONE);
        assert_eq!(result.lines().len(), 1);
        assert_eq!(result.lines()[0].words(), ["Hello", "World"]);
        assert_eq!(result.scale(), Scale::ONE);
    }

    #[test]
    fn narrow_target_breaks_between_words() {
        let result = wrap("Hello World", Px(40.0), seven_per_char(), Scale::ONE);
        assert_eq!(result.line_texts(), vec!["Hello", "World"]);
    }

    #[test]
    fn long_word_is_never_split() {
        let word = "Supercalifragilisticexpialidocious";
        for target in [1.0, 50.0, 100.0] {
            let result = wrap(word, Px(target), seven_per_char(), Scale::ONE);
            assert_eq!(result.line_texts(), vec![word]);
        }
    }

    #[test]
    fn long_word_in_the_middle_gets_its_own_line() {
        let result = wrap(
            "a Supercalifragilisticexpialidocious b",
            Px(50.0),
            seven_per_char(),
            Scale::ONE,
        );
        assert_eq!(
            result.line_texts(),
            vec!["a", "Supercalifragilisticexpialidocious", "b"]
        );
    }

    #[test]
    fn empty_text_has_no_lines() {
        let result = wrap("", Px(100.0), seven_per_char(), Scale::ONE);
        assert!(result.is_empty());
    }

    #[test]
    fn whitespace_only_text_has_one_empty_line() {
        let result = wrap("  \t\n ", Px(100.0), seven_per_char(), Scale::ONE);
        assert_eq!(result.lines().len(), 1);
        assert!(result.lines()[0].is_empty());
    }

    #[test]
    fn runs_of_whitespace_collapse() {
        let result = wrap("  one \t two\n\nthree  ", Px(1000.0), seven_per_char(), Scale::ONE);
        assert_eq!(result.line_texts(), vec!["one two three"]);
    }

    #[test]
    fn degenerate_width_puts_each_word_alone() {
        for target in [0.0, -20.0, f64::NAN] {
            let result = wrap("a b c", Px(target), seven_per_char(), Scale::ONE);
            assert_eq!(result.line_texts(), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn exact_fit_stays_on_the_line() {
        // "ab cd" is 5 chars = 50px
        let result = wrap("ab cd", Px(50.0), fixed(10.0), Scale::ONE);
        assert_eq!(result.line_texts(), vec!["ab cd"]);
        let result = wrap("ab cd", Px(49.9), fixed(10.0), Scale::ONE);
        assert_eq!(result.line_texts(), vec!["ab", "cd"]);
    }

    #[test]
    fn zooming_in_rewraps() {
        // At zoom 13 (scale 1) everything fits; at zoom 15 (scale 4) text is
        // four times wider and breaks
        let text = "Hello World";
        let at_reference = wrap(
            text,
            Px(100.0),
            seven_per_char(),
            font_scale(Zoom(13.0), Zoom(13.0)),
        );
        assert_eq!(at_reference.lines().len(), 1);

        let scale = font_scale(Zoom(15.0), Zoom(13.0));
        assert_eq!(scale, Scale(4.0));
        let zoomed = wrap(text, Px(100.0), seven_per_char(), scale);
        assert_eq!(zoomed.line_texts(), vec!["Hello", "World"]);
        assert_eq!(zoomed.scale(), Scale(4.0));
    }

    #[test]
    fn measure_sees_candidate_lines() {
        let mut seen = Vec::new();
        let measure = |s: &str, _: Scale| {
            seen.push(s.to_string());
            Px(s.len() as f64)
        };
        wrap("aa bb cc", Px(4.0), measure, Scale::ONE);
        assert_eq!(seen, vec!["aa bb", "bb cc"]);
    }

    proptest! {
        #[test]
        fn lines_fit_unless_single_word(
            s in "[a-zA-Z]{1,12}( [a-zA-Z]{1,12}){0,20}",
            width in 1.0f64..200.0,
            scale in 0.25f64..4.0,
        ) {
            let measure = fixed(6.0);
            let result = wrap(&s, Px(width), &measure, Scale(scale));
            for line in result.lines() {
                if line.len() > 1 {
                    let w = measure(&line.text(), Scale(scale));
                    prop_assert!(
                        w.0 <= width,
                        "line {:?} measures {} > {}",
                        line.text(),
                        w.0,
                        width
                    );
                }
            }
        }

        #[test]
        fn words_are_preserved_in_order(
            s in "[a-z \t\n]{0,80}",
            width in -10.0f64..120.0,
        ) {
            let result = wrap(&s, Px(width), fixed(5.0), Scale::ONE);
            let wrapped: Vec<&str> = result.words().collect();
            let original: Vec<&str> = s.split_whitespace().collect();
            prop_assert_eq!(wrapped, original);
        }
    }
}
