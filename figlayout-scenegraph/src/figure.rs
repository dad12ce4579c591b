use crate::engine::LayoutEngine;
use crate::error::FigLayoutSceneGraphError;
use crate::gridspec::{GridSpec, GridSpecId, SubplotParams};
use crate::panel::{Mappable, Panel, PanelId, PanelKind};
use crate::renderer::Renderer;
use figlayout_common::types::{Bbox, Extent, Side};
use indexmap::IndexMap;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

pub const DEFAULT_FIGSIZE: Extent<f64> = Extent {
    width: 6.4,
    height: 4.8,
};
pub const DEFAULT_DPI: f64 = 100.0;

/// A drawing surface of fixed physical size holding panels.
///
/// Panel boxes are stored as fractions of the figure size, so changing the
/// figure size without touching the panels stretches them.
pub struct Figure {
    size_inches: Extent<f64>,
    dpi: f64,
    panels: IndexMap<PanelId, Panel>,
    gridspecs: IndexMap<GridSpecId, GridSpec>,
    current: Option<PanelId>,
    next_panel_id: usize,
    layout_engine: Option<Rc<dyn LayoutEngine>>,
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure")
            .field("size_inches", &self.size_inches)
            .field("dpi", &self.dpi)
            .field("panels", &self.panels)
            .field("gridspecs", &self.gridspecs)
            .field("current", &self.current)
            .field("has_layout_engine", &self.layout_engine.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            size_inches: DEFAULT_FIGSIZE,
            dpi: DEFAULT_DPI,
            panels: IndexMap::new(),
            gridspecs: IndexMap::new(),
            current: None,
            next_panel_id: 0,
            layout_engine: None,
        }
    }
}

fn validate_size(size: Extent<f64>) -> Result<(), FigLayoutSceneGraphError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(())
    } else {
        Err(FigLayoutSceneGraphError::InvalidFigureSize {
            width: size.width,
            height: size.height,
        })
    }
}

impl Figure {
    pub fn new(size_inches: Extent<f64>) -> Result<Self, FigLayoutSceneGraphError> {
        validate_size(size_inches)?;
        Ok(Self {
            size_inches,
            ..Default::default()
        })
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn size_inches(&self) -> Extent<f64> {
        self.size_inches
    }

    pub fn set_size_inches(&mut self, size: Extent<f64>) -> Result<(), FigLayoutSceneGraphError> {
        validate_size(size)?;
        self.size_inches = size;
        Ok(())
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn set_dpi(&mut self, dpi: f64) {
        self.dpi = dpi;
    }

    // Layout engine

    pub fn layout_engine(&self) -> Option<Rc<dyn LayoutEngine>> {
        self.layout_engine.clone()
    }

    pub fn set_layout_engine(&mut self, engine: Option<Rc<dyn LayoutEngine>>) {
        self.layout_engine = engine;
    }

    /// Run the layout engine, if any, then render
    pub fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<(), FigLayoutSceneGraphError> {
        if let Some(engine) = self.layout_engine.clone() {
            engine.execute(self, renderer)?;
        }
        renderer.draw(self)
    }

    // Grids

    pub fn add_gridspec(
        &mut self,
        nrows: usize,
        ncols: usize,
        params: SubplotParams,
    ) -> Result<GridSpecId, FigLayoutSceneGraphError> {
        let id = GridSpecId(self.gridspecs.len());
        self.gridspecs
            .insert(id, GridSpec::try_new(id, nrows, ncols, params)?);
        Ok(id)
    }

    pub fn gridspec(&self, id: GridSpecId) -> Result<&GridSpec, FigLayoutSceneGraphError> {
        self.gridspecs
            .get(&id)
            .ok_or(FigLayoutSceneGraphError::GridSpecNotFound(id))
    }

    pub fn gridspecs(&self) -> impl Iterator<Item = &GridSpec> {
        self.gridspecs.values()
    }

    /// Add a data panel occupying a single grid cell
    pub fn add_subplot(
        &mut self,
        gridspec: GridSpecId,
        row: usize,
        col: usize,
    ) -> Result<PanelId, FigLayoutSceneGraphError> {
        self.add_subplot_span(gridspec, row..row + 1, col..col + 1)
    }

    /// Add a data panel covering a range of grid cells
    pub fn add_subplot_span(
        &mut self,
        gridspec: GridSpecId,
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Result<PanelId, FigLayoutSceneGraphError> {
        let gs = self.gridspec(gridspec)?;
        let spec = gs.span(rows, cols)?;
        let position = gs.position(&spec);
        Ok(self.insert_panel(position, PanelKind::Data { subplot: Some(spec) }))
    }

    /// Create an `nrows` by `ncols` grid of panels with the default subplot
    /// parameters. Panels are returned row by row.
    pub fn subplots(
        &mut self,
        nrows: usize,
        ncols: usize,
    ) -> Result<Vec<Vec<PanelId>>, FigLayoutSceneGraphError> {
        let gs = self.add_gridspec(nrows, ncols, SubplotParams::default())?;
        (0..nrows)
            .map(|row| {
                (0..ncols)
                    .map(|col| self.add_subplot(gs, row, col))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }

    /// Add a free data panel at `position` (figure fractions), outside any grid
    pub fn add_panel(&mut self, position: Bbox) -> PanelId {
        self.insert_panel(position, PanelKind::Data { subplot: None })
    }

    /// Add a colorbar panel at `position` (figure fractions). The current
    /// panel is left unchanged.
    pub fn add_colorbar_panel(
        &mut self,
        position: Bbox,
        parent: PanelId,
        mappable: Mappable,
        location: Side,
    ) -> Result<PanelId, FigLayoutSceneGraphError> {
        self.panel(parent)?;
        self.panel(mappable.source)?;
        let previous = self.current;
        let id = self.insert_panel(
            position,
            PanelKind::Colorbar {
                parent,
                mappable,
                location,
            },
        );
        self.current = previous;
        Ok(id)
    }

    fn insert_panel(&mut self, position: Bbox, kind: PanelKind) -> PanelId {
        let id = PanelId(self.next_panel_id);
        self.next_panel_id += 1;
        self.panels.insert(id, Panel::new(id, position, kind));
        self.current = Some(id);
        id
    }

    pub fn remove_panel(&mut self, id: PanelId) -> Result<Panel, FigLayoutSceneGraphError> {
        let panel = self
            .panels
            .shift_remove(&id)
            .ok_or(FigLayoutSceneGraphError::PanelNotFound(id))?;
        if self.current == Some(id) {
            self.current = self.panels.keys().last().copied();
        }
        Ok(panel)
    }

    // Panels

    pub fn panel(&self, id: PanelId) -> Result<&Panel, FigLayoutSceneGraphError> {
        self.panels
            .get(&id)
            .ok_or(FigLayoutSceneGraphError::PanelNotFound(id))
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Result<&mut Panel, FigLayoutSceneGraphError> {
        self.panels
            .get_mut(&id)
            .ok_or(FigLayoutSceneGraphError::PanelNotFound(id))
    }

    /// Panels in insertion order
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.panels.values_mut()
    }

    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.panels.keys().copied().collect()
    }

    /// Current panel
    pub fn gca(&self) -> Option<PanelId> {
        self.current
    }

    /// Make `id` the current panel
    pub fn sca(&mut self, id: PanelId) -> Result<(), FigLayoutSceneGraphError> {
        self.panel(id)?;
        self.current = Some(id);
        Ok(())
    }

    /// Panel box in inches, origin at the lower left corner of the figure
    pub fn panel_position_inches(&self, id: PanelId) -> Result<Bbox, FigLayoutSceneGraphError> {
        Ok(self.panel(id)?.position_inches(self.size_inches))
    }

    pub fn set_panel_position_inches(
        &mut self,
        id: PanelId,
        position: Bbox,
    ) -> Result<(), FigLayoutSceneGraphError> {
        let size = self.size_inches;
        self.panel_mut(id)?.position = position.scaled(1.0 / size.width, 1.0 / size.height);
        Ok(())
    }

    /// Convert a box in display pixels to inches
    pub fn pixels_to_inches(&self, bbox: Bbox) -> Bbox {
        bbox.scaled(1.0 / self.dpi, 1.0 / self.dpi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_subplots_and_current_panel() {
        let mut fig = Figure::default();
        let grid = fig.subplots(2, 3).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].len(), 3);
        assert_eq!(fig.gca(), Some(grid[1][2]));

        fig.sca(grid[0][0]).unwrap();
        assert_eq!(fig.gca(), Some(grid[0][0]));

        let spec = fig.panel(grid[1][0]).unwrap().subplot_spec().copied().unwrap();
        assert_eq!(spec.rowspan(), 1..2);
        assert_eq!(spec.colspan(), 0..1);
    }

    #[test]
    fn test_colorbar_panel_keeps_current() {
        let mut fig = Figure::default();
        let gs = fig.add_gridspec(1, 1, SubplotParams::default()).unwrap();
        let ax = fig.add_subplot(gs, 0, 0).unwrap();
        let cb = fig
            .add_colorbar_panel(
                Bbox::from_bounds(0.92, 0.11, 0.02, 0.77),
                ax,
                Mappable::new(ax, "atom", 0.0, 1.0),
                Side::Right,
            )
            .unwrap();
        assert_eq!(fig.gca(), Some(ax));
        assert!(fig.panel(cb).unwrap().is_colorbar());
    }

    #[test]
    fn test_position_inches_round_trip() {
        let mut fig = Figure::new(Extent::new(4.0, 2.0)).unwrap();
        let ax = fig.add_panel(Bbox::from_bounds(0.25, 0.5, 0.5, 0.25));
        let pos = fig.panel_position_inches(ax).unwrap();
        assert_approx_eq!(f64, pos.x0, 1.0);
        assert_approx_eq!(f64, pos.y0, 1.0);
        assert_approx_eq!(f64, pos.width(), 2.0);
        assert_approx_eq!(f64, pos.height(), 0.5);

        fig.set_size_inches(Extent::new(8.0, 4.0)).unwrap();
        fig.set_panel_position_inches(ax, pos).unwrap();
        let pos2 = fig.panel_position_inches(ax).unwrap();
        assert_approx_eq!(f64, pos2.width(), 2.0);
        assert_approx_eq!(f64, fig.panel(ax).unwrap().position.width(), 0.25);
    }

    #[test]
    fn test_invalid_figure_size() {
        assert!(Figure::new(Extent::new(0.0, 1.0)).is_err());
        let mut fig = Figure::default();
        assert!(fig.set_size_inches(Extent::new(f64::NAN, 1.0)).is_err());
        assert_eq!(fig.size_inches(), DEFAULT_FIGSIZE);
    }

    #[test]
    fn test_unknown_panel() {
        let mut fig = Figure::default();
        let ax = fig.add_panel(Bbox::from_bounds(0.1, 0.1, 0.8, 0.8));
        fig.remove_panel(ax).unwrap();
        assert!(matches!(
            fig.panel(ax),
            Err(FigLayoutSceneGraphError::PanelNotFound(_))
        ));
        assert_eq!(fig.gca(), None);
    }
}
