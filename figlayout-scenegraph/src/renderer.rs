use crate::decorations::{AxisDecoration, Decorations};
use crate::error::FigLayoutSceneGraphError;
use crate::figure::Figure;
use crate::panel::{Panel, PanelId};
use crate::ticks::locate_ticks;
use figlayout_common::types::{Bbox, Margins, Side};
use figlayout_common::units::pts_to_inches;
use figlayout_text::measurement::{TextBounds, TextMeasurementConfig, TextMeasurer};
use figlayout_text::types::FontWeight;
use itertools::Itertools;
use tracing::trace;

/// Backend that draws a figure and reports how much room each panel takes.
pub trait Renderer {
    /// Render a full frame of the figure
    fn draw(&mut self, figure: &Figure) -> Result<(), FigLayoutSceneGraphError>;

    /// Footprint of a panel including ticks, tick labels, axis labels and
    /// title, in display pixels with the origin at the lower left corner
    fn panel_extent(
        &self,
        figure: &Figure,
        panel: PanelId,
    ) -> Result<Bbox, FigLayoutSceneGraphError>;
}

/// Renderer that lays out panel decorations with a [`TextMeasurer`]
/// instead of rasterizing anything.
///
/// Extents are computed from the current figure state, so they follow
/// panel moves without a new frame. `draw` only counts frames.
#[derive(Debug, Clone)]
pub struct DecorationRenderer<M: TextMeasurer> {
    measurer: M,
    draw_count: usize,
}

impl<M: TextMeasurer> DecorationRenderer<M> {
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            draw_count: 0,
        }
    }

    /// Number of frames drawn so far
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    fn measure(
        &self,
        decorations: &Decorations,
        text: &str,
        size: f64,
        weight: &FontWeight,
    ) -> TextBounds {
        self.measurer.measure_text_bounds(&TextMeasurementConfig {
            text,
            font: &decorations.font,
            font_size: size as f32,
            font_weight: weight,
            font_style: &decorations.font_style,
        })
    }

    /// Outward depth (inches) of an axis beyond its panel edge, and the
    /// range (inches) its labels cover along the edge
    fn axis_footprint(
        &self,
        decorations: &Decorations,
        axis: &AxisDecoration,
        along: [f64; 2],
    ) -> (f64, [f64; 2]) {
        let runs_along_x = !axis.side.is_horizontal();
        let mut depth = 0.0;
        let mut covered = along;

        if axis.show_ticks {
            depth += pts_to_inches(axis.tick_length * axis.tick_direction.outward_fraction());
        }

        let length = along[1] - along[0];
        let span = axis.limits[1] - axis.limits[0];
        if axis.show_tick_labels && span != 0.0 && length > 0.0 {
            let weight = FontWeight::default();
            let labels = locate_ticks(axis.limits, length)
                .into_iter()
                .map(|(value, text)| {
                    let at = along[0] + (value - axis.limits[0]) / span * length;
                    let bounds = self.measure(decorations, &text, decorations.font_size, &weight);
                    (at, bounds)
                })
                .filter(|(_, bounds)| !bounds.is_empty())
                .collect_vec();

            if !labels.is_empty() {
                let label_depth = labels
                    .iter()
                    .map(|(_, b)| tick_label_size(b, runs_along_x)[0])
                    .fold(0.0, f64::max);
                depth += pts_to_inches(axis.tick_pad + label_depth);

                for (at, bounds) in &labels {
                    let half = pts_to_inches(tick_label_size(bounds, runs_along_x)[1]) / 2.0;
                    covered[0] = covered[0].min(at - half);
                    covered[1] = covered[1].max(at + half);
                }
            }
        }

        if let Some(label) = &axis.label {
            // y labels are rotated, so the text height always points away from the edge
            let bounds = self.measure(
                decorations,
                label,
                decorations.label_font_size,
                &FontWeight::default(),
            );
            if !bounds.is_empty() {
                depth += pts_to_inches(decorations.label_pad + bounds.height as f64);
                let center = (along[0] + along[1]) / 2.0;
                let half = pts_to_inches(bounds.width as f64) / 2.0;
                covered[0] = covered[0].min(center - half);
                covered[1] = covered[1].max(center + half);
            }
        }

        (depth, covered)
    }

    /// Footprint of a panel in inches
    pub fn panel_footprint_inches(&self, figure: &Figure, panel: &Panel) -> Bbox {
        let tight = panel.position_inches(figure.size_inches());
        let deco = &panel.decorations;
        if !deco.visible {
            return tight;
        }

        let mut outward = Margins::splat(0.0);
        let mut extent = tight;

        let (depth, covered) = self.axis_footprint(deco, &deco.xaxis, [tight.x0, tight.x1]);
        set_side(&mut outward, deco.xaxis.side, depth);
        extent = extent.union(&Bbox::from_extents(covered[0], tight.y0, covered[1], tight.y1));

        let (depth, covered) = self.axis_footprint(deco, &deco.yaxis, [tight.y0, tight.y1]);
        let depth = outward.get(deco.yaxis.side).max(depth);
        set_side(&mut outward, deco.yaxis.side, depth);
        extent = extent.union(&Bbox::from_extents(tight.x0, covered[0], tight.x1, covered[1]));

        if let Some(title) = &deco.title {
            let bounds = self.measure(deco, title, deco.title_font_size, &deco.title_weight);
            if !bounds.is_empty() {
                let bottom = tight.y1 + outward.top + pts_to_inches(deco.title_pad);
                let half = pts_to_inches(bounds.width as f64) / 2.0;
                let center = (tight.x0 + tight.x1) / 2.0;
                extent = extent.union(&Bbox::from_extents(
                    center - half,
                    bottom,
                    center + half,
                    bottom + pts_to_inches(bounds.height as f64),
                ));
            }
        }

        extent.expanded(outward)
    }
}

/// Size of an unrotated tick label as (depth away from the edge, length
/// along the edge)
fn tick_label_size(bounds: &TextBounds, runs_along_x: bool) -> [f64; 2] {
    let (w, h) = (bounds.width as f64, bounds.height as f64);
    if runs_along_x {
        [h, w]
    } else {
        [w, h]
    }
}

fn set_side(margins: &mut Margins<f64>, side: Side, value: f64) {
    match side {
        Side::Top => margins.top = value,
        Side::Right => margins.right = value,
        Side::Bottom => margins.bottom = value,
        Side::Left => margins.left = value,
    }
}

impl<M: TextMeasurer> Renderer for DecorationRenderer<M> {
    fn draw(&mut self, figure: &Figure) -> Result<(), FigLayoutSceneGraphError> {
        self.draw_count += 1;
        trace!(
            "drew frame {} with {} panels",
            self.draw_count,
            figure.panels().count()
        );
        Ok(())
    }

    fn panel_extent(
        &self,
        figure: &Figure,
        panel: PanelId,
    ) -> Result<Bbox, FigLayoutSceneGraphError> {
        let panel = figure.panel(panel)?;
        Ok(self
            .panel_footprint_inches(figure, panel)
            .scaled(figure.dpi(), figure.dpi()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figlayout_common::types::Extent;
    use figlayout_text::measurement::ApproxTextMeasurer;
    use float_cmp::assert_approx_eq;

    fn figure_with_panel() -> (Figure, PanelId) {
        let mut fig = Figure::new(Extent::new(4.0, 4.0)).unwrap().with_dpi(72.0);
        let ax = fig.add_panel(Bbox::from_bounds(0.25, 0.25, 0.5, 0.5));
        (fig, ax)
    }

    #[test]
    fn test_hidden_panel_has_tight_extent() {
        let (mut fig, ax) = figure_with_panel();
        fig.panel_mut(ax).unwrap().decorations.visible = false;
        let renderer = DecorationRenderer::new(ApproxTextMeasurer::new());
        let extent = renderer.panel_extent(&fig, ax).unwrap();
        assert_eq!(extent, Bbox::from_bounds(72.0, 72.0, 144.0, 144.0));
    }

    #[test]
    fn test_default_decorations_extend_left_and_bottom() {
        let (fig, ax) = figure_with_panel();
        let renderer = DecorationRenderer::new(ApproxTextMeasurer::new());
        let extent = renderer.panel_extent(&fig, ax).unwrap();

        // bottom: 3.5pt ticks + 3.5pt pad + 10pt label height
        assert_approx_eq!(f64, extent.y0, 72.0 - 17.0, epsilon = 1e-4);
        // left: ticks + pad + widest label "0.0"/"1.0" (3 glyphs * 6pt)
        assert_approx_eq!(f64, extent.x0, 72.0 - 25.0, epsilon = 1e-4);
        // top: half of the "1.0" label height sticks out
        assert_approx_eq!(f64, extent.y1, 216.0 + 5.0, epsilon = 1e-4);
        // right: half of the "1.0" tick label width
        assert_approx_eq!(f64, extent.x1, 216.0 + 9.0, epsilon = 1e-4);
    }

    #[test]
    fn test_title_and_labels_grow_extent() {
        let (mut fig, ax) = figure_with_panel();
        let renderer = DecorationRenderer::new(ApproxTextMeasurer::new());
        let plain = renderer.panel_extent(&fig, ax).unwrap();

        fig.panel_mut(ax).unwrap().decorations = Decorations::default()
            .with_title("Title")
            .with_xlabel("x")
            .with_ylabel("y");
        let decorated = renderer.panel_extent(&fig, ax).unwrap();

        // title: 6pt pad + 12pt high
        assert_approx_eq!(f64, decorated.y1, 216.0 + 18.0, epsilon = 1e-4);
        // label: 4pt pad + 10pt high
        assert_approx_eq!(f64, decorated.y0, plain.y0 - 14.0, epsilon = 1e-4);
        assert_approx_eq!(f64, decorated.x0, plain.x0 - 14.0, epsilon = 1e-4);
    }

    #[test]
    fn test_extent_follows_panel_without_draw() {
        let (mut fig, ax) = figure_with_panel();
        let mut renderer = DecorationRenderer::new(ApproxTextMeasurer::new());
        renderer.draw(&fig).unwrap();
        let before = renderer.panel_extent(&fig, ax).unwrap();

        fig.panel_mut(ax).unwrap().position = Bbox::from_bounds(0.5, 0.25, 0.5, 0.5);
        let after = renderer.panel_extent(&fig, ax).unwrap();
        assert_eq!(renderer.draw_count(), 1);
        assert_approx_eq!(f64, after.x0 - before.x0, 72.0, epsilon = 1e-9);
        assert_approx_eq!(f64, after.y0, before.y0, epsilon = 1e-9);
    }
}
