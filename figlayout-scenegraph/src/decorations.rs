use figlayout_common::types::{HorizontalAlignment, Margins, Side, VerticalAlignment};
use figlayout_text::types::{FontStyle, FontWeight};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Direction of tick marks relative to the panel edge
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum TickDirection {
    #[default]
    Out,
    In,
    InOut,
}

impl TickDirection {
    /// Fraction of the tick length drawn outside the panel
    pub fn outward_fraction(&self) -> f64 {
        match self {
            TickDirection::Out => 1.0,
            TickDirection::In => 0.0,
            TickDirection::InOut => 0.5,
        }
    }
}

/// Ticks, tick labels and axis label of one axis
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDecoration {
    /// Panel edge the ticks and labels are drawn on
    pub side: Side,
    /// Data limits, may be inverted
    pub limits: [f64; 2],
    pub label: Option<String>,
    pub show_ticks: bool,
    pub show_tick_labels: bool,
    /// Tick length in points
    pub tick_length: f64,
    /// Distance between tick and tick label in points
    pub tick_pad: f64,
    pub tick_direction: TickDirection,
}

impl AxisDecoration {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            limits: [0.0, 1.0],
            label: None,
            show_ticks: true,
            show_tick_labels: true,
            tick_length: 3.5,
            tick_pad: 3.5,
            tick_direction: TickDirection::Out,
        }
    }

    /// Axis without ticks, tick labels or label
    pub fn hidden(side: Side) -> Self {
        Self {
            show_ticks: false,
            show_tick_labels: false,
            ..Self::new(side)
        }
    }

    pub fn with_limits(mut self, limits: [f64; 2]) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Text placed at a position in panel fraction coordinates. Free text is not
/// part of the panel footprint.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub text: String,
    /// Position as fraction of the panel box
    pub position: [f64; 2],
    pub font_size: f64,
    pub font_weight: FontWeight,
    /// Vertical alignment of the text box relative to `position`
    pub valign: VerticalAlignment,
    /// Horizontal alignment of the text box relative to `position`
    pub halign: HorizontalAlignment,
}

impl TextAnnotation {
    /// Left aligned text sitting on `position`
    pub fn new(text: impl Into<String>, position: [f64; 2], font_size: f64) -> Self {
        Self {
            text: text.into(),
            position,
            font_size,
            font_weight: FontWeight::default(),
            valign: VerticalAlignment::Bottom,
            halign: HorizontalAlignment::Left,
        }
    }
}

/// Everything drawn around a panel that takes up space in the figure
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Decorations {
    pub visible: bool,
    pub title: Option<String>,
    pub xaxis: AxisDecoration,
    pub yaxis: AxisDecoration,
    pub font: String,
    pub font_style: FontStyle,
    /// Font size of tick labels in points
    pub font_size: f64,
    /// Font size of axis labels in points
    pub label_font_size: f64,
    /// Font size of the title in points
    pub title_font_size: f64,
    pub title_weight: FontWeight,
    /// Distance between tick labels and axis label in points
    pub label_pad: f64,
    /// Distance between the top decorations and the title in points
    pub title_pad: f64,
    /// Visible frame lines
    pub spines: Margins<bool>,
    /// Line width of frame and ticks in points
    pub line_width: f64,
}

impl Default for Decorations {
    fn default() -> Self {
        Self {
            visible: true,
            title: None,
            xaxis: AxisDecoration::new(Side::Bottom),
            yaxis: AxisDecoration::new(Side::Left),
            font: "sans-serif".to_string(),
            font_style: FontStyle::Normal,
            font_size: 10.0,
            label_font_size: 10.0,
            title_font_size: 12.0,
            title_weight: FontWeight::default(),
            label_pad: 4.0,
            title_pad: 6.0,
            spines: Margins::splat(true),
            line_width: 0.8,
        }
    }
}

impl Decorations {
    /// Decorations of a colorbar drawn on `location` of its parent: ticks and
    /// labels on the outer side, the other axis hidden
    pub fn colorbar(location: Side, limits: [f64; 2]) -> Self {
        let (xaxis, yaxis) = if location.is_horizontal() {
            (
                AxisDecoration::hidden(Side::Bottom),
                AxisDecoration::new(location).with_limits(limits),
            )
        } else {
            (
                AxisDecoration::new(location).with_limits(limits),
                AxisDecoration::hidden(Side::Left),
            )
        };
        Self {
            xaxis,
            yaxis,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_xlabel(mut self, label: impl Into<String>) -> Self {
        self.xaxis.label = Some(label.into());
        self
    }

    pub fn with_ylabel(mut self, label: impl Into<String>) -> Self {
        self.yaxis.label = Some(label.into());
        self
    }

    pub fn with_limits(mut self, xlim: [f64; 2], ylim: [f64; 2]) -> Self {
        self.xaxis.limits = xlim;
        self.yaxis.limits = ylim;
        self
    }

    pub fn set_tick_length(&mut self, length: f64) {
        self.xaxis.tick_length = length;
        self.yaxis.tick_length = length;
    }

    pub fn set_tick_pad(&mut self, pad: f64) {
        self.xaxis.tick_pad = pad;
        self.yaxis.tick_pad = pad;
    }

    pub fn set_tick_direction(&mut self, direction: TickDirection) {
        self.xaxis.tick_direction = direction;
        self.yaxis.tick_direction = direction;
    }

    /// Hide tick labels and axis labels, keeping ticks
    pub fn hide_labels(&mut self) {
        for axis in [&mut self.xaxis, &mut self.yaxis] {
            axis.show_tick_labels = false;
            axis.label = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorbar_decorations() {
        let right = Decorations::colorbar(Side::Right, [0.0, 5.0]);
        assert_eq!(right.yaxis.side, Side::Right);
        assert_eq!(right.yaxis.limits, [0.0, 5.0]);
        assert!(!right.xaxis.show_ticks);

        let top = Decorations::colorbar(Side::Top, [-1.0, 1.0]);
        assert_eq!(top.xaxis.side, Side::Top);
        assert!(!top.yaxis.show_tick_labels);
    }

    #[test]
    fn test_tick_direction() {
        assert_eq!("inout".parse::<TickDirection>().unwrap(), TickDirection::InOut);
        assert_eq!(TickDirection::In.outward_fraction(), 0.0);
    }
}
