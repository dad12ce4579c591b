use figlayout_common::error::FigLayoutCommonError;
use figlayout_common::types::{
    Anchor, Bbox, Extent, HorizontalAlignment, HorizontalAnchor, Side, VerticalAlignment,
    VerticalAnchor,
};
use figlayout_layout::api::{
    add_colorbar, add_margins_pts, align_panels_horizontally, align_panels_vertically,
    get_column_pad_pts, get_margins_pts, get_panel_margins_inches, get_panel_position_inches,
    get_panel_size_inches, get_row_pad_pts, make_me_nice, set_panel_position_inches,
    set_panel_size_inches, Aspect,
    ColorbarOptions, PanelSize,
};
use figlayout_layout::engine::{FixedPanelLayoutEngine, LayoutConfig};
use figlayout_layout::error::FigLayoutError;
use figlayout_scenegraph::decorations::Decorations;
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::panel::{Mappable, PanelId};
use figlayout_scenegraph::renderer::DecorationRenderer;
use figlayout_text::measurement::ApproxTextMeasurer;
use float_cmp::assert_approx_eq;
use rstest::rstest;
use std::rc::Rc;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn renderer() -> DecorationRenderer<ApproxTextMeasurer> {
    DecorationRenderer::new(ApproxTextMeasurer::new())
}

/// Figure with an `nrows` x `ncols` grid and a fixed panel layout engine
fn grid_figure(nrows: usize, ncols: usize) -> (Figure, Vec<Vec<PanelId>>) {
    let mut fig = Figure::default();
    let ids = fig.subplots(nrows, ncols).unwrap();
    for (i, panel) in fig.panels_mut().enumerate() {
        panel.decorations = Decorations::default()
            .with_xlabel("time (s)")
            .with_ylabel(format!("signal {i}"))
            .with_limits([0.0, 10.0], [-1.0, 1.0]);
    }
    fig.set_layout_engine(Some(Rc::new(FixedPanelLayoutEngine::default())));
    (fig, ids)
}

#[rstest]
#[case("center")]
#[case("left")]
#[case("right")]
#[case("upper")]
#[case("lower")]
#[case("upper left")]
#[case("upper right")]
#[case("lower left")]
#[case("lower right")]
#[case("center center")]
fn set_then_get_panel_size(#[case] anchor: &str) {
    let (mut fig, ids) = grid_figure(1, 1);
    let ax = ids[0][0];
    let anchor = Anchor::from_str(anchor).unwrap();
    let before = get_panel_position_inches(&fig, ax).unwrap();

    set_panel_size_inches(&mut fig, ax, 2.0, Aspect::Ratio(0.75), anchor).unwrap();
    let size = get_panel_size_inches(&fig, ax).unwrap();
    assert_approx_eq!(f64, size.width, 2.0, epsilon = 1e-12);
    assert_approx_eq!(f64, size.height, 1.5, epsilon = 1e-12);

    let after = get_panel_position_inches(&fig, ax).unwrap();
    match anchor.horizontal {
        HorizontalAnchor::Left => assert_approx_eq!(f64, after.x0, before.x0, epsilon = 1e-12),
        HorizontalAnchor::Right => assert_approx_eq!(f64, after.x1, before.x1, epsilon = 1e-12),
        HorizontalAnchor::Center => assert_approx_eq!(
            f64,
            after.center()[0],
            before.center()[0],
            epsilon = 1e-12
        ),
    }
    match anchor.vertical {
        VerticalAnchor::Lower => assert_approx_eq!(f64, after.y0, before.y0, epsilon = 1e-12),
        VerticalAnchor::Upper => assert_approx_eq!(f64, after.y1, before.y1, epsilon = 1e-12),
        VerticalAnchor::Center => assert_approx_eq!(
            f64,
            after.center()[1],
            before.center()[1],
            epsilon = 1e-12
        ),
    }
}

#[test]
fn explicit_size_must_match_aspect() {
    let (mut fig, ids) = grid_figure(1, 1);
    let result = set_panel_size_inches(
        &mut fig,
        ids[0][0],
        PanelSize::Explicit(Extent::new(2.0, 1.0)),
        Aspect::Ratio(0.75),
        Anchor::default(),
    );
    assert!(matches!(
        result,
        Err(FigLayoutError::SizeAspectMismatch { .. })
    ));

    set_panel_size_inches(
        &mut fig,
        ids[0][0],
        Extent::new(2.0, 1.5),
        Aspect::Ratio(0.75),
        Anchor::default(),
    )
    .unwrap();
}

#[test]
fn operations_require_fixed_panel_engine() {
    let mut fig = Figure::default();
    let ax = fig.subplots(1, 1).unwrap()[0][0];
    assert!(matches!(
        get_panel_size_inches(&fig, ax),
        Err(FigLayoutError::WrongLayoutEngine(_))
    ));
    assert!(matches!(
        add_margins_pts(&mut fig, 3.0),
        Err(FigLayoutError::WrongLayoutEngine(_))
    ));
}

#[test]
fn add_margins_round_trip() {
    let (mut fig, _) = grid_figure(2, 2);
    let renderer = renderer();
    let before = get_margins_pts(&fig, &renderer, false).unwrap();
    let size = fig.size_inches();

    add_margins_pts(&mut fig, [5.0, 3.0, 2.0, 1.0]).unwrap();
    let grown = get_margins_pts(&fig, &renderer, false).unwrap();
    assert_approx_eq!(f64, grown.top, before.top + 5.0, epsilon = 1e-5);
    assert_approx_eq!(f64, grown.right, before.right + 3.0, epsilon = 1e-5);
    assert_approx_eq!(f64, grown.bottom, before.bottom + 2.0, epsilon = 1e-5);
    assert_approx_eq!(f64, grown.left, before.left + 1.0, epsilon = 1e-5);
    assert_approx_eq!(f64, fig.size_inches().width, size.width + 4.0 / 72.0, epsilon = 1e-9);

    add_margins_pts(&mut fig, [-5.0, -3.0, -2.0, -1.0]).unwrap();
    let restored = get_margins_pts(&fig, &renderer, false).unwrap();
    for (a, b) in restored.to_array().into_iter().zip(before.to_array()) {
        assert_approx_eq!(f64, a, b, epsilon = 1e-5);
    }
}

#[test]
fn bad_margins_length_is_rejected() {
    let (mut fig, _) = grid_figure(1, 1);
    assert!(matches!(
        add_margins_pts(&mut fig, vec![1.0; 5]),
        Err(FigLayoutError::InvalidArgument(
            FigLayoutCommonError::InvalidMarginsLength(5)
        ))
    ));
}

#[test]
fn solve_sets_column_pad_and_margins() {
    init_logging();
    let (mut fig, _) = grid_figure(1, 2);
    let mut renderer = renderer();
    make_me_nice(&mut fig, &mut renderer, LayoutConfig::default().with_log(true)).unwrap();

    let pad = get_column_pad_pts(&fig, &renderer, 1, false).unwrap();
    assert_approx_eq!(f64, pad, 10.0, epsilon = 0.1);

    let margins = get_margins_pts(&fig, &renderer, false).unwrap();
    for margin in margins.to_array() {
        assert_approx_eq!(f64, margin, 3.0, epsilon = 1e-6);
    }
    assert_approx_eq!(
        f64,
        get_column_pad_pts(&fig, &renderer, 0, false).unwrap(),
        margins.left,
        epsilon = 1e-9
    );
    assert_approx_eq!(
        f64,
        get_column_pad_pts(&fig, &renderer, 2, false).unwrap(),
        margins.right,
        epsilon = 1e-9
    );
    assert!(matches!(
        get_column_pad_pts(&fig, &renderer, 3, false),
        Err(FigLayoutError::IndexOutOfRange { .. })
    ));
}

#[test]
fn solve_separates_adjacent_columns() {
    let (mut fig, ids) = grid_figure(1, 2);
    let (a, b) = (ids[0][0], ids[0][1]);
    let left = get_panel_position_inches(&fig, a).unwrap();
    let right = get_panel_position_inches(&fig, b).unwrap();
    let touching = Bbox::from_extents(left.x1, right.y0, left.x1 + right.width(), right.y1);
    set_panel_position_inches(&mut fig, b, touching).unwrap();

    let mut renderer = renderer();
    // the y tick labels of b reach into a
    assert!(get_column_pad_pts(&fig, &renderer, 1, false).unwrap() < 0.0);

    make_me_nice(&mut fig, &mut renderer, LayoutConfig::default()).unwrap();

    let pad = get_column_pad_pts(&fig, &renderer, 1, false).unwrap();
    assert_approx_eq!(f64, pad, 10.0, epsilon = 0.1);
    let margins = get_margins_pts(&fig, &renderer, false).unwrap();
    for margin in margins.to_array() {
        assert_approx_eq!(f64, margin, 3.0, epsilon = 1e-6);
    }
    let size = get_panel_size_inches(&fig, b).unwrap();
    assert_approx_eq!(f64, size.width, right.width(), epsilon = 1e-9);
}

#[test]
fn solve_sets_row_pads_per_gap() {
    let (mut fig, _) = grid_figure(3, 1);
    let mut renderer = renderer();
    let config = LayoutConfig::default()
        .with_row_pad_pts(vec![20.0, 5.0])
        .with_margin_pad_pts([1.0, 2.0]);
    make_me_nice(&mut fig, &mut renderer, config).unwrap();

    assert_approx_eq!(f64, get_row_pad_pts(&fig, &renderer, 1, false).unwrap(), 20.0, epsilon = 0.1);
    assert_approx_eq!(f64, get_row_pad_pts(&fig, &renderer, 2, false).unwrap(), 5.0, epsilon = 0.1);
    assert_approx_eq!(f64, get_row_pad_pts(&fig, &renderer, 0, false).unwrap(), 1.0, epsilon = 1e-6);
    assert_approx_eq!(f64, get_row_pad_pts(&fig, &renderer, 3, false).unwrap(), 1.0, epsilon = 1e-6);
}

#[test]
fn ignoring_labels_measures_bare_panels() {
    let (mut fig, ids) = grid_figure(1, 2);
    let mut renderer = renderer();
    let config = LayoutConfig::default()
        .with_col_pad_pts(0.0)
        .with_col_pad_ignores_labels(true)
        .with_margin_pad_ignores_labels([false, false, true, false]);
    make_me_nice(&mut fig, &mut renderer, config).unwrap();

    let left = get_panel_position_inches(&fig, ids[0][0]).unwrap();
    let right = get_panel_position_inches(&fig, ids[0][1]).unwrap();
    assert_approx_eq!(f64, right.x0 - left.x1, 0.0, epsilon = 1e-9);
    assert_approx_eq!(f64, left.y0, 3.0 / 72.0, epsilon = 1e-9);
}

#[test]
fn wrong_number_of_gaps_is_rejected() {
    let (mut fig, _) = grid_figure(1, 3);
    let result = make_me_nice(
        &mut fig,
        &mut renderer(),
        LayoutConfig::default().with_col_pad_pts(vec![1.0, 2.0, 3.0]),
    );
    assert!(matches!(
        result,
        Err(FigLayoutError::InvalidArgument(
            FigLayoutCommonError::InvalidGapsLength {
                expected: 2,
                got: 3
            }
        ))
    ));
}

#[test]
fn too_wide_figure_is_rejected() {
    let (mut fig, _) = grid_figure(1, 2);
    let result = make_me_nice(
        &mut fig,
        &mut renderer(),
        LayoutConfig::default().with_max_figwidth(1.0),
    );
    assert!(matches!(result, Err(FigLayoutError::FigureTooWide { max, .. }) if max == 1.0));
}

#[test]
fn panel_sizes_survive_the_solve() {
    let (mut fig, ids) = grid_figure(2, 2);
    let before: Vec<Extent<f64>> = ids
        .iter()
        .flatten()
        .map(|id| get_panel_size_inches(&fig, *id).unwrap())
        .collect();
    make_me_nice(&mut fig, &mut renderer(), LayoutConfig::default()).unwrap();
    for (id, size) in ids.iter().flatten().zip(before) {
        let after = get_panel_size_inches(&fig, *id).unwrap();
        assert_approx_eq!(f64, after.width, size.width, epsilon = 1e-9);
        assert_approx_eq!(f64, after.height, size.height, epsilon = 1e-9);
    }
}

#[test]
fn draw_runs_attached_engine() {
    let (mut fig, _) = grid_figure(1, 1);
    let mut renderer = renderer();
    fig.draw(&mut renderer).unwrap();
    let margins = get_margins_pts(&fig, &renderer, false).unwrap();
    assert_approx_eq!(f64, margins.top, 3.0, epsilon = 1e-6);
    assert_approx_eq!(f64, margins.left, 3.0, epsilon = 1e-6);
    // initial render, then one per margin adjustment and pass
    assert_eq!(renderer.draw_count(), 1 + 2 + 1);
}

#[test]
fn colorbar_follows_parent_through_solve() {
    let (mut fig, ids) = grid_figure(1, 1);
    let ax = ids[0][0];
    let cb = add_colorbar(
        &mut fig,
        Mappable::new(ax, "atom", 0.0, 250.0),
        ax,
        ColorbarOptions::default()
            .with_location(Side::Right)
            .with_thickness_pts(7.2)
            .with_pad_pts(3.6),
    )
    .unwrap();
    assert_eq!(fig.gca(), Some(ax));

    let mut renderer = renderer();
    make_me_nice(&mut fig, &mut renderer, LayoutConfig::default()).unwrap();

    let parent = fig.panel_position_inches(ax).unwrap();
    let cax = fig.panel_position_inches(cb).unwrap();
    assert_approx_eq!(f64, cax.x0 - parent.x1, 0.05, epsilon = 1e-9);
    assert_approx_eq!(f64, cax.width(), 0.1, epsilon = 1e-9);
    assert_approx_eq!(f64, cax.y0, parent.y0, epsilon = 1e-9);
    assert_approx_eq!(f64, cax.y1, parent.y1, epsilon = 1e-9);

    // the right margin is measured from the colorbar labels
    let margins = get_margins_pts(&fig, &renderer, false).unwrap();
    assert_approx_eq!(f64, margins.right, 3.0, epsilon = 1e-6);
    let panel_margins = get_panel_margins_inches(&fig, &renderer, ax).unwrap();
    assert!(panel_margins.right > 0.15);
}

#[test]
fn align_free_panels() {
    let mut fig = Figure::new(Extent::new(4.0, 4.0)).unwrap();
    fig.set_layout_engine(Some(Rc::new(FixedPanelLayoutEngine::default())));
    let reference = fig.add_panel(Bbox::from_bounds(0.1, 0.5, 0.4, 0.4));
    let ax = fig.add_panel(Bbox::from_bounds(0.6, 0.1, 0.2, 0.2));

    align_panels_vertically(&mut fig, ax, reference, VerticalAlignment::Top).unwrap();
    let moved = get_panel_position_inches(&fig, ax).unwrap();
    assert_approx_eq!(f64, moved.y1, 3.6, epsilon = 1e-12);
    assert_approx_eq!(f64, moved.x0, 2.4, epsilon = 1e-12);

    align_panels_vertically(&mut fig, ax, reference, VerticalAlignment::Center).unwrap();
    let moved = get_panel_position_inches(&fig, ax).unwrap();
    assert_approx_eq!(f64, moved.center()[1], 2.8, epsilon = 1e-12);

    align_panels_horizontally(&mut fig, ax, reference, HorizontalAlignment::Right).unwrap();
    let moved = get_panel_position_inches(&fig, ax).unwrap();
    assert_approx_eq!(f64, moved.x1, 2.0, epsilon = 1e-12);
    assert_approx_eq!(f64, moved.width(), 0.8, epsilon = 1e-12);

    align_panels_horizontally(&mut fig, ax, reference, HorizontalAlignment::Left).unwrap();
    assert_approx_eq!(
        f64,
        get_panel_position_inches(&fig, ax).unwrap().x0,
        0.4,
        epsilon = 1e-12
    );
}
