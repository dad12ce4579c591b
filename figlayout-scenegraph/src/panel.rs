use crate::decorations::{Decorations, TextAnnotation};
use crate::gridspec::SubplotSpec;
use figlayout_common::types::{Bbox, Extent, Side};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a panel within its figure
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub(crate) usize);

/// A color-mapped artist whose value range a colorbar displays
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Mappable {
    /// Panel the artist is drawn in
    pub source: PanelId,
    pub colormap: String,
    pub vmin: f64,
    pub vmax: f64,
}

impl Mappable {
    pub fn new(source: PanelId, colormap: impl Into<String>, vmin: f64, vmax: f64) -> Self {
        Self {
            source,
            colormap: colormap.into(),
            vmin,
            vmax,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    Data {
        subplot: Option<SubplotSpec>,
    },
    Colorbar {
        parent: PanelId,
        mappable: Mappable,
        /// Side of the parent the colorbar was created on
        location: Side,
    },
}

/// Per-panel style that does not influence the panel footprint
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelStyle {
    /// Colors cycled through by successive artists, as hex strings
    pub color_cycle: Vec<String>,
    pub colormap: Option<String>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: PanelId,
    /// Box as fraction of the figure size
    pub position: Bbox,
    pub kind: PanelKind,
    pub decorations: Decorations,
    pub style: PanelStyle,
    pub texts: Vec<TextAnnotation>,
    pub label: Option<String>,
}

impl Panel {
    pub(crate) fn new(id: PanelId, position: Bbox, kind: PanelKind) -> Self {
        Self {
            id,
            position,
            kind,
            decorations: Decorations::default(),
            style: PanelStyle::default(),
            texts: Vec::new(),
            label: None,
        }
    }

    pub fn is_colorbar(&self) -> bool {
        matches!(self.kind, PanelKind::Colorbar { .. })
    }

    pub fn subplot_spec(&self) -> Option<&SubplotSpec> {
        match &self.kind {
            PanelKind::Data { subplot } => subplot.as_ref(),
            PanelKind::Colorbar { .. } => None,
        }
    }

    pub fn mappable(&self) -> Option<&Mappable> {
        match &self.kind {
            PanelKind::Colorbar { mappable, .. } => Some(mappable),
            PanelKind::Data { .. } => None,
        }
    }

    /// Box in inches for a figure of the given size
    pub fn position_inches(&self, figsize: Extent<f64>) -> Bbox {
        self.position.scaled(figsize.width, figsize.height)
    }

    pub fn add_text(&mut self, text: TextAnnotation) {
        self.texts.push(text);
    }
}
