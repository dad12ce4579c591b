use figlayout_scenegraph::decorations::TextAnnotation;
use figlayout_scenegraph::panel::Panel;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Frame drawn around LaTeX rendered text. Colors are `xcolor` names.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    /// Space between frame and text in points
    pub pad: f64,
    /// Fill color, no fill and a plain frame if unset
    pub background: Option<String>,
    /// Frame color, only used together with a background
    pub edge_color: String,
    /// Frame line width in points
    pub edge_width: f64,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            pad: 1.0,
            background: Some("white".to_string()),
            edge_color: "black".to_string(),
            edge_width: 0.5,
        }
    }
}

/// Wrap `text` in `\fcolorbox` (or `\fbox` without background) markup
pub fn text_with_box(text: &str, style: &BoxStyle) -> String {
    let lengths = format!(
        r"\setlength{{\fboxsep}}{{{:.6}pt}}\setlength{{\fboxrule}}{{{:.6}pt}}",
        style.pad, style.edge_width
    );
    match &style.background {
        Some(background) => format!(
            r"{lengths}\fcolorbox{{{}}}{{{}}}{{{}}}",
            style.edge_color, background, text
        ),
        None => format!(r"{lengths}\fbox{{{text}}}"),
    }
}

/// Add boxed text to `panel` at `position` (fractions of the panel box).
/// Returns the index of the annotation in `panel.texts`.
pub fn add_text_with_box(
    panel: &mut Panel,
    position: [f64; 2],
    text: &str,
    style: &BoxStyle,
    font_size: f64,
) -> usize {
    panel.add_text(TextAnnotation::new(
        text_with_box(text, style),
        position,
        font_size,
    ));
    panel.texts.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored_box() {
        let boxed = text_with_box("$x^2$", &BoxStyle::default());
        assert_eq!(
            boxed,
            r"\setlength{\fboxsep}{1.000000pt}\setlength{\fboxrule}{0.500000pt}\fcolorbox{black}{white}{$x^2$}"
        );
    }

    #[test]
    fn test_plain_box() {
        let style = BoxStyle {
            pad: 2.5,
            background: None,
            ..Default::default()
        };
        assert_eq!(
            text_with_box("A", &style),
            r"\setlength{\fboxsep}{2.500000pt}\setlength{\fboxrule}{0.500000pt}\fbox{A}"
        );
    }
}
