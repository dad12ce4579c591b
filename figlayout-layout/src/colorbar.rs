use crate::error::FigLayoutError;
use figlayout_common::types::{Bbox, Side};
use figlayout_common::units::pts_to_inches;
use figlayout_scenegraph::decorations::Decorations;
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::panel::{Mappable, PanelId, PanelKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default colorbar thickness as a fraction of the parent width (or height)
pub const DEFAULT_THICKNESS_FRACTION: f64 = 0.05;

/// Default pad as a fraction of the colorbar thickness
pub const DEFAULT_PAD_FRACTION: f64 = 0.6;

/// Geometry of a colorbar relative to the panel it is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorbarRecord {
    pub colorbar: PanelId,
    pub parent: PanelId,
    pub side: Side,
    /// Extent perpendicular to the parent edge
    pub thickness_inches: f64,
    /// Gap between parent edge and colorbar
    pub pad_inches: f64,
}

/// Side of `parent` that `colorbar` sits on, judged from the vector between
/// the box centers. Ties go to top/bottom.
pub fn classify_side(colorbar: &Bbox, parent: &Bbox) -> Side {
    let [cx, cy] = colorbar.center();
    let [px, py] = parent.center();
    let (dx, dy) = (cx - px, cy - py);
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Side::Right
        } else {
            Side::Left
        }
    } else if dy > 0.0 {
        Side::Top
    } else {
        Side::Bottom
    }
}

/// Record the colorbars of `figure` with their current thickness and pad
pub fn collect_colorbars(figure: &Figure) -> Result<Vec<ColorbarRecord>, FigLayoutError> {
    figure
        .panels()
        .filter_map(|panel| panel.mappable().map(|m| (panel.id, m.source)))
        .map(|(colorbar, parent)| {
            let cax = figure.panel_position_inches(colorbar)?;
            let par = figure.panel_position_inches(parent)?;
            let side = classify_side(&cax, &par);
            let (thickness_inches, pad_inches) = match side {
                Side::Right => (cax.width(), cax.x0 - par.x1),
                Side::Left => (cax.width(), par.x0 - cax.x1),
                Side::Top => (cax.height(), cax.y0 - par.y1),
                Side::Bottom => (cax.height(), par.y0 - cax.y1),
            };
            Ok(ColorbarRecord {
                colorbar,
                parent,
                side,
                thickness_inches,
                pad_inches,
            })
        })
        .collect()
}

/// Box of a colorbar next to `parent`, all in the same units
fn colorbar_box(parent: &Bbox, side: Side, thickness: f64, pad: f64) -> Bbox {
    match side {
        Side::Left => {
            let x1 = parent.x0 - pad;
            Bbox::from_extents(x1 - thickness, parent.y0, x1, parent.y1)
        }
        Side::Right => {
            let x0 = parent.x1 + pad;
            Bbox::from_extents(x0, parent.y0, x0 + thickness, parent.y1)
        }
        Side::Top => {
            let y0 = parent.y1 + pad;
            Bbox::from_extents(parent.x0, y0, parent.x1, y0 + thickness)
        }
        Side::Bottom => {
            let y1 = parent.y0 - pad;
            Bbox::from_extents(parent.x0, y1 - thickness, parent.x1, y1)
        }
    }
}

/// Move every recorded colorbar back next to its parent, keeping its
/// thickness and pad in inches.
pub fn update_colorbars(
    figure: &mut Figure,
    colorbars: &[ColorbarRecord],
) -> Result<(), FigLayoutError> {
    for record in colorbars {
        let parent = figure.panel_position_inches(record.parent)?;
        let position = colorbar_box(
            &parent,
            record.side,
            record.thickness_inches,
            record.pad_inches,
        );
        trace!(
            "moving colorbar {:?} to {:?} of {:?}: {:?}",
            record.colorbar,
            record.side,
            record.parent,
            position
        );
        figure.set_panel_position_inches(record.colorbar, position)?;
    }
    Ok(())
}

/// Placement of a new colorbar
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorbarOptions {
    pub location: Side,
    /// Thickness in points, 5% of the parent size if unset
    pub thickness_pts: Option<f64>,
    /// Pad in points, 60% of the thickness if unset
    pub pad_pts: Option<f64>,
}

impl Default for ColorbarOptions {
    fn default() -> Self {
        Self {
            location: Side::Right,
            thickness_pts: None,
            pad_pts: None,
        }
    }
}

impl ColorbarOptions {
    pub fn with_location(mut self, location: Side) -> Self {
        self.location = location;
        self
    }

    pub fn with_thickness_pts(mut self, thickness: f64) -> Self {
        self.thickness_pts = Some(thickness);
        self
    }

    pub fn with_pad_pts(mut self, pad: f64) -> Self {
        self.pad_pts = Some(pad);
        self
    }
}

/// Add a colorbar for `mappable` next to `parent`, which must be the
/// mappable's source panel. The current panel of the figure is unchanged.
pub fn add_colorbar(
    figure: &mut Figure,
    mappable: Mappable,
    parent: PanelId,
    options: ColorbarOptions,
) -> Result<PanelId, FigLayoutError> {
    let parent_panel = figure.panel(parent)?;
    if let PanelKind::Colorbar { .. } = parent_panel.kind {
        return Err(FigLayoutError::InvalidColorbarParent(
            parent,
            "colorbars cannot carry colorbars".to_string(),
        ));
    }
    if mappable.source != parent {
        return Err(FigLayoutError::InvalidColorbarParent(
            parent,
            format!("the mappable is drawn on panel {:?}", mappable.source),
        ));
    }

    let parent_box = parent_panel.position;
    let figsize = figure.size_inches();
    let side = options.location;
    let (parent_size, figure_size) = if side.is_horizontal() {
        (parent_box.width(), figsize.width)
    } else {
        (parent_box.height(), figsize.height)
    };

    let thickness = match options.thickness_pts {
        Some(pts) => pts_to_inches(pts) / figure_size,
        None => DEFAULT_THICKNESS_FRACTION * parent_size,
    };
    let pad = match options.pad_pts {
        Some(pts) => pts_to_inches(pts) / figure_size,
        None => DEFAULT_PAD_FRACTION * thickness,
    };

    let position = colorbar_box(&parent_box, side, thickness, pad);
    let limits = [mappable.vmin, mappable.vmax];
    let id = figure.add_colorbar_panel(position, parent, mappable, side)?;
    figure.panel_mut(id)?.decorations = Decorations::colorbar(side, limits);
    Ok(id)
}
