use crate::error::FigLayoutCommonError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use strum::{Display, EnumString, VariantNames};

/// Elementwise arithmetic between two instances of the same vector type, and
/// broadcast arithmetic between an instance and a scalar.
macro_rules! impl_elementwise_ops {
    ($name:ident { $($field:ident),+ }) => {
        impl<T: Add<Output = T>> Add for $name<T> {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl<T: Sub<Output = T>> Sub for $name<T> {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl<T: Mul<Output = T>> Mul for $name<T> {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl<T: Div<Output = T>> Div for $name<T> {
            type Output = Self;
            fn div(self, rhs: Self) -> Self {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl<T: Neg<Output = T>> Neg for $name<T> {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl<T> $name<T> {
            /// Apply `f` to every component
            pub fn map<U>(self, f: impl Fn(T) -> U) -> $name<U> {
                $name { $($field: f(self.$field)),+ }
            }

            /// Convert every component into `U`
            pub fn cast<U: From<T>>(self) -> $name<U> {
                self.map(U::from)
            }
        }

        impl<T: Copy> $name<T> {
            /// Instance with every component set to `value`
            pub fn splat(value: T) -> Self {
                Self { $($field: value),+ }
            }
        }

        impl_elementwise_ops!(@scalar $name { $($field),+ } f64);
        impl_elementwise_ops!(@scalar $name { $($field),+ } f32);
    };

    (@scalar $name:ident { $($field:ident),+ } $scalar:ty) => {
        impl Add<$scalar> for $name<$scalar> {
            type Output = Self;
            fn add(self, rhs: $scalar) -> Self {
                Self { $($field: self.$field + rhs),+ }
            }
        }

        impl Sub<$scalar> for $name<$scalar> {
            type Output = Self;
            fn sub(self, rhs: $scalar) -> Self {
                Self { $($field: self.$field - rhs),+ }
            }
        }

        impl Mul<$scalar> for $name<$scalar> {
            type Output = Self;
            fn mul(self, rhs: $scalar) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$name<$scalar>> for $scalar {
            type Output = $name<$scalar>;
            fn mul(self, rhs: $name<$scalar>) -> $name<$scalar> {
                rhs * self
            }
        }

        impl Div<$scalar> for $name<$scalar> {
            type Output = Self;
            fn div(self, rhs: $scalar) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl $name<$scalar> {
            /// Elementwise floor division
            pub fn floor_div(self, rhs: Self) -> Self {
                Self { $($field: (self.$field / rhs.$field).floor()),+ }
            }

            /// Floor division of every component by a scalar
            pub fn floor_div_scalar(self, rhs: $scalar) -> Self {
                Self { $($field: (self.$field / rhs).floor()),+ }
            }
        }
    };
}

/// Top/right/bottom/left quantities around a rectangular region.
///
/// Used for margins (positive values point outwards) and for per-side flags
/// such as `Margins<bool>`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins<T = f64> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}
impl_elementwise_ops!(Margins { top, right, bottom, left });

impl<T> Margins<T> {
    pub fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl<T: Copy> Margins<T> {
    pub fn t(&self) -> T {
        self.top
    }
    pub fn r(&self) -> T {
        self.right
    }
    pub fn b(&self) -> T {
        self.bottom
    }
    pub fn l(&self) -> T {
        self.left
    }

    pub fn get(&self, side: Side) -> T {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub fn to_array(&self) -> [T; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// Expand a margins-like list of values.
    ///
    /// * 1 value: all four sides
    /// * 2 values: (top, bottom), (right, left)
    /// * 3 values: top, (right, left), bottom
    /// * 4 values: top, right, bottom, left
    pub fn from_slice(values: &[T]) -> Result<Self, FigLayoutCommonError> {
        match *values {
            [v] => Ok(Self::splat(v)),
            [tb, rl] => Ok(Self::new(tb, rl, tb, rl)),
            [t, rl, b] => Ok(Self::new(t, rl, b, rl)),
            [t, r, b, l] => Ok(Self::new(t, r, b, l)),
            _ => Err(FigLayoutCommonError::InvalidMarginsLength(values.len())),
        }
    }
}

impl Margins<f64> {
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Width and height of a rectangular region, in any unit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Extent<T = f64> {
    pub width: T,
    pub height: T,
}
impl_elementwise_ops!(Extent { width, height });

impl<T> Extent<T> {
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl<T: Copy> Extent<T> {
    pub fn w(&self) -> T {
        self.width
    }
    pub fn h(&self) -> T {
        self.height
    }
}

/// Axis-aligned rectangle given by its lower-left and upper-right corners.
///
/// Figure coordinates have their origin at the lower-left corner of the
/// figure and y grows upwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bbox {
    pub fn from_extents(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_bounds(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self {
            x0,
            y0,
            x1: x0 + width,
            y1: y0 + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn size(&self) -> Extent<f64> {
        Extent::new(self.width(), self.height())
    }

    pub fn center(&self) -> [f64; 2] {
        [
            self.x0 + self.width() / 2.0,
            self.y0 + self.height() / 2.0,
        ]
    }

    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a Bbox>) -> Option<Bbox> {
        boxes.into_iter().copied().reduce(|a, b| a.union(&b))
    }

    /// Multiply x coordinates by `sx` and y coordinates by `sy`
    pub fn scaled(&self, sx: f64, sy: f64) -> Bbox {
        Bbox {
            x0: self.x0 * sx,
            y0: self.y0 * sy,
            x1: self.x1 * sx,
            y1: self.y1 * sy,
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Bbox {
        Bbox {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    /// Grow the box outwards by `margins` (negative values shrink it)
    pub fn expanded(&self, margins: Margins<f64>) -> Bbox {
        Bbox {
            x0: self.x0 - margins.left,
            y0: self.y0 - margins.bottom,
            x1: self.x1 + margins.right,
            y1: self.y1 + margins.top,
        }
    }
}

/// Parse a string choice, reporting the valid names on failure
pub fn parse_choice<E>(name: &'static str, value: &str) -> Result<E, FigLayoutCommonError>
where
    E: FromStr + VariantNames,
{
    E::from_str(value.trim()).map_err(|_| FigLayoutCommonError::InvalidChoice {
        name,
        value: value.to_string(),
        valid: E::VARIANTS,
    })
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Left and right sides stack along the x axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    pub fn parse(value: &str) -> Result<Self, FigLayoutCommonError> {
        parse_choice("side", value)
    }
}

/// Vertical alignment of one panel relative to another
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Center,
    Top,
    Bottom,
}

impl VerticalAlignment {
    pub fn parse(value: &str) -> Result<Self, FigLayoutCommonError> {
        parse_choice("vertical alignment", value)
    }
}

/// Horizontal alignment of one panel relative to another
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum HorizontalAlignment {
    #[default]
    Center,
    Left,
    Right,
}

impl HorizontalAlignment {
    pub fn parse(value: &str) -> Result<Self, FigLayoutCommonError> {
        parse_choice("horizontal alignment", value)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum VerticalAnchor {
    Upper,
    #[default]
    Center,
    Lower,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum HorizontalAnchor {
    Left,
    #[default]
    Center,
    Right,
}

/// The point of a panel that stays fixed while it is resized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

impl Anchor {
    pub const NAMES: &'static [&'static str] = &[
        "center",
        "left",
        "right",
        "upper",
        "lower",
        "upper left",
        "upper right",
        "upper center",
        "center left",
        "center right",
        "center center",
        "lower left",
        "lower right",
        "lower center",
    ];

    pub fn new(vertical: VerticalAnchor, horizontal: HorizontalAnchor) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// All nine distinct anchor points
    pub fn all() -> Vec<Anchor> {
        let verticals = [
            VerticalAnchor::Upper,
            VerticalAnchor::Center,
            VerticalAnchor::Lower,
        ];
        let horizontals = [
            HorizontalAnchor::Left,
            HorizontalAnchor::Center,
            HorizontalAnchor::Right,
        ];
        verticals
            .iter()
            .flat_map(|v| horizontals.iter().map(move |h| Anchor::new(*v, *h)))
            .collect()
    }
}

impl FromStr for Anchor {
    type Err = FigLayoutCommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FigLayoutCommonError::InvalidChoice {
            name: "anchor",
            value: s.to_string(),
            valid: Anchor::NAMES,
        };
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["center"] => Ok(Anchor::default()),
            ["left"] => Ok(Anchor::new(VerticalAnchor::Center, HorizontalAnchor::Left)),
            ["right"] => Ok(Anchor::new(VerticalAnchor::Center, HorizontalAnchor::Right)),
            ["upper"] => Ok(Anchor::new(VerticalAnchor::Upper, HorizontalAnchor::Center)),
            ["lower"] => Ok(Anchor::new(VerticalAnchor::Lower, HorizontalAnchor::Center)),
            [vertical, horizontal] => {
                let vertical = VerticalAnchor::from_str(vertical).map_err(|_| invalid())?;
                let horizontal = HorizontalAnchor::from_str(horizontal).map_err(|_| invalid())?;
                Ok(Anchor::new(vertical, horizontal))
            }
            _ => Err(invalid()),
        }
    }
}
