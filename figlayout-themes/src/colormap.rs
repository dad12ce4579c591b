use crate::colors::{parse_hex, COLORS};
use crate::error::FigLayoutThemeError;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use palette::{Mix, Srgb};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Default number of lookup table entries
pub const DEFAULT_LUT_SIZE: usize = 256;

/// Colormap defined by colors at increasing positions in `[0, 1]`,
/// interpolated linearly in sRGB in between.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSegmentedColormap {
    name: String,
    stops: Vec<(f32, Srgb<f32>)>,
}

impl LinearSegmentedColormap {
    /// Build from `(position, color)` stops. Positions must increase from
    /// 0.0 to 1.0.
    pub fn from_stops(
        name: impl Into<String>,
        stops: Vec<(f32, Srgb<f32>)>,
    ) -> Result<Self, FigLayoutThemeError> {
        let name = name.into();
        let invalid = |msg: &str| FigLayoutThemeError::InvalidColormap(format!("{name}: {msg}"));
        match (stops.first(), stops.last()) {
            (Some((first, _)), Some((last, _))) if stops.len() >= 2 => {
                if *first != 0.0 || *last != 1.0 {
                    return Err(invalid("stops must start at 0.0 and end at 1.0"));
                }
            }
            _ => return Err(invalid("at least two stops are required")),
        }
        if stops.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(invalid("stop positions must not decrease"));
        }
        Ok(Self { name, stops })
    }

    /// Build from evenly spaced colors. A single color gives a constant map.
    pub fn from_colors(
        name: impl Into<String>,
        colors: &[Srgb<f32>],
    ) -> Result<Self, FigLayoutThemeError> {
        let stops = match colors {
            [] => Vec::new(),
            [color] => vec![(0.0, *color), (1.0, *color)],
            _ => {
                let last = (colors.len() - 1) as f32;
                colors
                    .iter()
                    .enumerate()
                    .map(|(i, color)| (i as f32 / last, *color))
                    .collect()
            }
        };
        Self::from_stops(name, stops)
    }

    fn from_hex_stops(name: &str, stops: &[(f32, &str)]) -> Result<Self, FigLayoutThemeError> {
        let stops = stops
            .iter()
            .map(|(x, hex)| Ok((*x, parse_hex(hex)?)))
            .collect::<Result<Vec<_>, FigLayoutThemeError>>()?;
        Self::from_stops(name, stops)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[(f32, Srgb<f32>)] {
        &self.stops
    }

    /// Color at `x`, clamped to `[0, 1]`
    pub fn sample(&self, x: f32) -> Srgb<f32> {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        let upper = self
            .stops
            .iter()
            .position(|(pos, _)| *pos >= x)
            .unwrap_or(self.stops.len() - 1)
            .max(1);
        let (x0, c0) = self.stops[upper - 1];
        let (x1, c1) = self.stops[upper];
        if x <= x0 {
            c0
        } else if x >= x1 {
            c1
        } else {
            c0.mix(c1, (x - x0) / (x1 - x0))
        }
    }

    /// `n` colors sampled evenly from 0.0 to 1.0
    pub fn lut(&self, n: usize) -> Vec<Srgb<f32>> {
        match n {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => (0..n)
                .map(|i| self.sample(i as f32 / (n - 1) as f32))
                .collect(),
        }
    }

    /// Rename the colormap
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Cyan, blue, red, yellow
pub fn atom() -> LinearSegmentedColormap {
    LinearSegmentedColormap {
        name: "atom".to_string(),
        stops: vec![
            (0.0, Srgb::new(0.5, 1.0, 1.0)),
            (0.3, Srgb::new(0.0, 0.0, 1.0)),
            (0.7, Srgb::new(1.0, 0.0, 0.0)),
            (1.0, Srgb::new(1.0, 1.0, 0.0)),
        ],
    }
}

/// [`atom`] starting from white
pub fn atom_from_white() -> LinearSegmentedColormap {
    LinearSegmentedColormap {
        name: "atom_from_white".to_string(),
        stops: vec![
            (0.0, Srgb::new(1.0, 1.0, 1.0)),
            (0.065, Srgb::new(0.5, 1.0, 1.0)),
            (0.3, Srgb::new(0.0, 0.0, 1.0)),
            (0.7, Srgb::new(1.0, 0.0, 0.0)),
            (1.0, Srgb::new(1.0, 1.0, 0.0)),
        ],
    }
}

/// Blue to orange
pub fn blor() -> Result<LinearSegmentedColormap, FigLayoutThemeError> {
    let blue = COLORS.get("blue").unwrap_or("#376EB5");
    let orange = COLORS.get("orange").unwrap_or("#ED7800");
    LinearSegmentedColormap::from_hex_stops("blor", &[(0.0, blue), (1.0, orange)])
}

/// Colormaps available by name
#[derive(Debug, Clone, Default)]
pub struct ColormapRegistry {
    maps: IndexMap<String, LinearSegmentedColormap>,
}

impl ColormapRegistry {
    /// Registry holding `atom`, `atom_from_white` and `blor`
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for cmap in [atom(), atom_from_white()] {
            registry.maps.insert(cmap.name.clone(), cmap);
        }
        if let Ok(cmap) = blor() {
            registry.maps.insert(cmap.name.clone(), cmap);
        }
        registry
    }

    /// Add `cmap` under its name. Existing entries are only replaced when
    /// `force` is set.
    pub fn register(
        &mut self,
        cmap: LinearSegmentedColormap,
        force: bool,
    ) -> Result<(), FigLayoutThemeError> {
        if !force && self.maps.contains_key(&cmap.name) {
            return Err(FigLayoutThemeError::ColormapExists(cmap.name));
        }
        debug!("registering colormap {}", cmap.name);
        self.maps.insert(cmap.name.clone(), cmap);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&LinearSegmentedColormap> {
        self.maps.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.maps.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }
}

lazy_static! {
    static ref COLORMAPS: Mutex<ColormapRegistry> = Mutex::new(ColormapRegistry::with_builtins());
}

/// Lock the process wide colormap registry
pub fn colormaps() -> MutexGuard<'static, ColormapRegistry> {
    COLORMAPS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Look up a colormap in the process wide registry
pub fn get_colormap(name: &str) -> Result<LinearSegmentedColormap, FigLayoutThemeError> {
    colormaps()
        .get(name)
        .cloned()
        .ok_or_else(|| FigLayoutThemeError::UnknownColormap(name.to_string()))
}

/// Add a colormap to the process wide registry
pub fn register_colormap(
    cmap: LinearSegmentedColormap,
    force: bool,
) -> Result<(), FigLayoutThemeError> {
    colormaps().register(cmap, force)
}

/// Options of [`crop_colormap`]
#[derive(Debug, Clone, PartialEq)]
pub struct CropOptions {
    /// Name of the new colormap, `_new_colormap` if unset
    pub name: Option<String>,
    /// Add the new colormap to the process wide registry
    pub register: bool,
    /// Number of colors sampled from the original colormap
    pub n_lut: usize,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            name: None,
            register: false,
            n_lut: DEFAULT_LUT_SIZE,
        }
    }
}

/// Colormap covering the range `x..y` (relative units) of `cmap`
pub fn crop_colormap(
    cmap: &LinearSegmentedColormap,
    x: f64,
    y: f64,
    options: CropOptions,
) -> Result<LinearSegmentedColormap, FigLayoutThemeError> {
    for (name, value) in [("x", x), ("y", y)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(FigLayoutThemeError::OutOfUnitRange { name, value });
        }
    }
    let colors = cmap.lut(options.n_lut);
    let len = colors.len() as f64;
    let low = (x * len) as usize;
    let high = (y * len) as usize;
    if low >= high {
        return Err(FigLayoutThemeError::InvalidColormap(format!(
            "cropping to {x}..{y} leaves no colors"
        )));
    }

    let name = options.name.unwrap_or_else(|| "_new_colormap".to_string());
    let cropped = LinearSegmentedColormap::from_colors(name, &colors[low..high])?;
    if options.register {
        register_colormap(cropped.clone(), false)?;
    }
    Ok(cropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::to_hex;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_sample_atom() {
        let cmap = atom();
        assert_eq!(cmap.sample(0.0), Srgb::new(0.5, 1.0, 1.0));
        assert_eq!(cmap.sample(1.0), Srgb::new(1.0, 1.0, 0.0));
        assert_eq!(cmap.sample(2.0), Srgb::new(1.0, 1.0, 0.0));

        let mid = cmap.sample(0.5);
        assert_approx_eq!(f32, mid.red, 0.5, epsilon = 1e-6);
        assert_approx_eq!(f32, mid.green, 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, mid.blue, 0.5, epsilon = 1e-6);

        let early = cmap.sample(0.15);
        assert_approx_eq!(f32, early.red, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_blor_endpoints() {
        let cmap = blor().unwrap();
        assert_eq!(to_hex(cmap.sample(0.0)), "#376eb5");
        assert_eq!(to_hex(cmap.sample(1.0)), "#ed7800");
    }

    #[test]
    fn test_invalid_stops() {
        let red = Srgb::new(1.0, 0.0, 0.0);
        assert!(LinearSegmentedColormap::from_stops("x", vec![(0.0, red)]).is_err());
        assert!(LinearSegmentedColormap::from_stops("x", vec![(0.1, red), (1.0, red)]).is_err());
        let unordered = vec![(0.0, red), (0.6, red), (0.5, red), (1.0, red)];
        assert!(LinearSegmentedColormap::from_stops("x", unordered).is_err());
        assert!(LinearSegmentedColormap::from_colors("x", &[]).is_err());
        let constant = LinearSegmentedColormap::from_colors("x", &[red]).unwrap();
        assert_eq!(constant.sample(0.3), red);
    }

    #[test]
    fn test_crop_colormap() {
        let cmap = atom();
        let cropped = crop_colormap(&cmap, 0.3, 1.0, CropOptions::default()).unwrap();
        assert_eq!(cropped.name(), "_new_colormap");
        // 0.3 * 256 = 76.8 truncates to index 76 of the lookup table
        let first = cmap.sample(76.0 / 255.0);
        assert_eq!(cropped.sample(0.0), first);
        assert_eq!(cropped.sample(1.0), cmap.sample(1.0));

        assert!(matches!(
            crop_colormap(&cmap, -0.1, 1.0, CropOptions::default()),
            Err(FigLayoutThemeError::OutOfUnitRange { name: "x", .. })
        ));
        assert!(matches!(
            crop_colormap(&cmap, 0.0, 1.5, CropOptions::default()),
            Err(FigLayoutThemeError::OutOfUnitRange { name: "y", .. })
        ));
        assert!(crop_colormap(&cmap, 0.5, 0.5, CropOptions::default()).is_err());
    }

    #[test]
    fn test_registry() {
        let mut registry = ColormapRegistry::with_builtins();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["atom", "atom_from_white", "blor"]
        );
        assert!(matches!(
            registry.register(atom(), false),
            Err(FigLayoutThemeError::ColormapExists(_))
        ));
        registry.register(atom().with_name("atom2"), false).unwrap();
        assert!(registry.contains("atom2"));

        assert!(get_colormap("atom_from_white").is_ok());
        assert!(matches!(
            get_colormap("no-such-map"),
            Err(FigLayoutThemeError::UnknownColormap(_))
        ));
    }
}
