use figlayout_common::types::{Bbox, Extent};
use figlayout_scenegraph::engine::LayoutEngine;
use figlayout_scenegraph::error::FigLayoutSceneGraphError;
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::renderer::{DecorationRenderer, Renderer};
use figlayout_text::measurement::ApproxTextMeasurer;
use float_cmp::assert_approx_eq;
use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

/// Engine that doubles the figure width on every run
#[derive(Default)]
struct WideningEngine {
    runs: Cell<usize>,
}

impl LayoutEngine for WideningEngine {
    fn execute(
        &self,
        figure: &mut Figure,
        renderer: &mut dyn Renderer,
    ) -> Result<(), FigLayoutSceneGraphError> {
        self.runs.set(self.runs.get() + 1);
        renderer.draw(figure)?;
        let size = figure.size_inches();
        figure.set_size_inches(Extent::new(size.width * 2.0, size.height))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn draw_runs_engine_before_rendering() {
    let mut fig = Figure::new(Extent::new(2.0, 2.0)).unwrap();
    let ax = fig.add_panel(Bbox::from_bounds(0.1, 0.1, 0.8, 0.8));
    let engine = Rc::new(WideningEngine::default());
    fig.set_layout_engine(Some(engine.clone()));

    let mut renderer = DecorationRenderer::new(ApproxTextMeasurer::new());
    fig.draw(&mut renderer).unwrap();

    assert_eq!(engine.runs.get(), 1);
    assert_eq!(renderer.draw_count(), 2);
    assert_approx_eq!(f64, fig.size_inches().width, 4.0);

    // The panel stretched with the widened figure
    let extent = renderer.panel_extent(&fig, ax).unwrap();
    assert!(extent.x1 > 0.9 * 2.0 * fig.dpi());

    let recovered = fig.layout_engine().unwrap();
    assert!(recovered.as_any().downcast_ref::<WideningEngine>().is_some());
}

#[test]
fn draw_without_engine_renders_once() {
    let mut fig = Figure::default();
    fig.subplots(2, 2).unwrap();
    let mut renderer = DecorationRenderer::new(ApproxTextMeasurer::new());
    fig.draw(&mut renderer).unwrap();
    assert_eq!(renderer.draw_count(), 1);
    assert_eq!(fig.panels().count(), 4);
}
