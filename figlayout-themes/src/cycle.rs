use crate::colormap::colormaps;
use crate::colors::{parse_hex, to_hex, OKABE_ITO};
use crate::error::FigLayoutThemeError;
use crate::theme::ThemeParams;
use figlayout_scenegraph::figure::Figure;
use tracing::debug;

/// Largest cycle the Okabe and Ito palette provides
pub const MAX_OKABE_ITO_STEPS: usize = 7;

/// Hex codes of a color cycle.
///
/// No `colors` selects the first `nsteps` Okabe and Ito colors. A single
/// registered colormap name samples `nsteps` evenly spaced colors from it.
/// Anything else is a list of hex codes, returned as lowercase `#rrggbb`.
pub fn resolve_color_cycle(
    colors: &[&str],
    nsteps: usize,
) -> Result<Vec<String>, FigLayoutThemeError> {
    if colors.is_empty() {
        if nsteps > MAX_OKABE_ITO_STEPS {
            return Err(FigLayoutThemeError::TooManyColors {
                requested: nsteps,
                max: MAX_OKABE_ITO_STEPS,
            });
        }
        return Ok(OKABE_ITO
            .hex_codes()
            .take(nsteps)
            .map(str::to_string)
            .collect());
    }

    if let [name] = colors {
        if let Some(cmap) = colormaps().get(name) {
            let denom = nsteps.saturating_sub(1).max(1) as f32;
            return Ok((0..nsteps)
                .map(|i| to_hex(cmap.sample(i as f32 / denom)))
                .collect());
        }
    }

    colors
        .iter()
        .map(|hex| parse_hex(hex).map(to_hex))
        .collect()
}

/// Set the color cycle of `params` and of every panel of `figure`.
/// Returns the resolved hex codes.
pub fn set_color_cycle(
    params: &mut ThemeParams,
    figure: Option<&mut Figure>,
    colors: &[&str],
    nsteps: usize,
) -> Result<Vec<String>, FigLayoutThemeError> {
    let cycle = resolve_color_cycle(colors, nsteps)?;
    debug!("color cycle set to {:?}", cycle);

    if let Some(figure) = figure {
        for panel in figure.panels_mut() {
            panel.style.color_cycle = cycle.clone();
        }
    }
    params.color_cycle = cycle.clone();
    Ok(cycle)
}
