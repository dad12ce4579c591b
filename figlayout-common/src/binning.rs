//! Helpers that turn bin centers into bin edges, for step plots and
//! pseudocolor meshes.
use crate::error::FigLayoutCommonError;
use ordered_float::OrderedFloat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

const EQUAL_SPACING_RTOL: f64 = 1e-5;

/// Work out bin edges from bin centers.
///
/// Equally spaced centers need no bounds. Otherwise the edges are walked
/// forward from `lower` or, failing that, backward from `upper`. `lower`
/// wins when both are given.
pub fn centers_to_edges(
    centers: &[f64],
    lower: Option<f64>,
    upper: Option<f64>,
) -> Result<Vec<f64>, FigLayoutCommonError> {
    let n = centers.len();
    if n == 0 {
        return Err(FigLayoutCommonError::TooFewValues { min: 1, got: 0 });
    }

    let binsizes: Vec<f64> = centers.windows(2).map(|w| w[1] - w[0]).collect();
    let equal = match binsizes.first() {
        Some(first) => binsizes
            .iter()
            .all(|b| (b - first).abs() <= EQUAL_SPACING_RTOL * first.abs()),
        None => false,
    };

    let mut edges = vec![0.0; n + 1];
    if equal {
        let half = 0.5 * binsizes[0];
        for (edge, center) in edges.iter_mut().zip(centers) {
            *edge = center - half;
        }
        edges[n] = centers[n - 1] + half;
    } else if let Some(lower) = lower {
        edges[0] = lower;
        for i in 0..n {
            edges[i + 1] = 2.0 * centers[i] - edges[i];
        }
    } else if let Some(upper) = upper {
        edges[n] = upper;
        for i in (0..n).rev() {
            edges[i] = 2.0 * centers[i] - edges[i + 1];
        }
    } else if n == 1 {
        return Err(FigLayoutCommonError::TooFewValues { min: 2, got: 1 });
    } else {
        return Err(FigLayoutCommonError::UnevenBins);
    }
    Ok(edges)
}

/// Where a step curve starts and ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepStart {
    Value(f64),
    /// Start at the first and end at the last y value
    Auto,
}

impl Default for StepStart {
    fn default() -> Self {
        StepStart::Value(0.0)
    }
}

/// Convert (x, y) samples, with x at the bin centers, to the vertices of a
/// step curve.
pub fn convert_to_steps(
    x: &[f64],
    y: &[f64],
    start_at: StepStart,
    xlim_lower: Option<f64>,
    xlim_upper: Option<f64>,
) -> Result<(Vec<f64>, Vec<f64>), FigLayoutCommonError> {
    if x.len() != y.len() {
        return Err(FigLayoutCommonError::LengthMismatch(format!(
            "x has {} values but y has {}",
            x.len(),
            y.len()
        )));
    }
    let edges = centers_to_edges(x, xlim_lower, xlim_upper)?;
    let xs: Vec<f64> = edges.iter().flat_map(|e| [*e, *e]).collect();

    let (first, last) = match start_at {
        StepStart::Value(v) => (v, v),
        StepStart::Auto => (y[0], y[y.len() - 1]),
    };
    let mut ys = Vec::with_capacity(xs.len());
    ys.push(first);
    ys.extend(y.iter().flat_map(|v| [*v, *v]));
    ys.push(last);

    Ok((xs, ys))
}

/// Order in which flat `(x, y, z)` samples iterate over the grid
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum IterationOrder {
    /// x varies fastest
    #[default]
    XFirst,
    /// y varies fastest
    YFirst,
}

/// Edge bounds for [`for_pcolormesh`]; these bound the bin edges, not the
/// centers.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub xedges: Vec<f64>,
    pub yedges: Vec<f64>,
    /// Row-major values, one row per y bin
    pub values: Vec<Vec<f64>>,
}

fn unique_sorted(values: &[f64]) -> Vec<f64> {
    let mut unique: Vec<OrderedFloat<f64>> = values.iter().copied().map(OrderedFloat).collect();
    unique.sort();
    unique.dedup();
    unique.into_iter().map(|v| v.0).collect()
}

/// Reshape flat `(xcenters[i], ycenters[i], z[i])` samples of a full grid
/// into bin edges and a 2D value array.
pub fn for_pcolormesh(
    xcenters: &[f64],
    ycenters: &[f64],
    z: &[f64],
    iteration_order: IterationOrder,
    bounds: MeshBounds,
) -> Result<Mesh, FigLayoutCommonError> {
    if xcenters.len() != ycenters.len() || xcenters.len() != z.len() {
        return Err(FigLayoutCommonError::LengthMismatch(
            "xcenters, ycenters, and z must have the same length".to_string(),
        ));
    }

    let xs = unique_sorted(xcenters);
    let ys = unique_sorted(ycenters);
    if xs.len() * ys.len() != z.len() {
        return Err(FigLayoutCommonError::LengthMismatch(format!(
            "{} values cannot fill a {}x{} grid",
            z.len(),
            ys.len(),
            xs.len()
        )));
    }

    let xedges = centers_to_edges(&xs, bounds.xmin, bounds.xmax)?;
    let yedges = centers_to_edges(&ys, bounds.ymin, bounds.ymax)?;

    let values = match iteration_order {
        IterationOrder::XFirst => z.chunks(xs.len()).map(|row| row.to_vec()).collect(),
        IterationOrder::YFirst => (0..ys.len())
            .map(|iy| (0..xs.len()).map(|ix| z[ix * ys.len() + iy]).collect())
            .collect(),
    };

    Ok(Mesh {
        xedges,
        yedges,
        values,
    })
}
