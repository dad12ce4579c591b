use crate::error::FigLayoutCommonError;
use crate::types::Margins;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An argument that is either one value applied everywhere or one value per
/// position (per side, per gap, per cell).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarOrArray<T: Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Clone> ScalarOrArray<T> {
    pub fn as_iter(&self, scalar_len: usize) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            ScalarOrArray::Scalar(value) => Box::new(std::iter::repeat(value).take(scalar_len)),
            ScalarOrArray::Array(values) => Box::new(values.iter()),
        }
    }

    pub fn as_vec(&self, scalar_len: usize) -> Vec<T> {
        self.as_iter(scalar_len).cloned().collect()
    }

    pub fn map<U: Clone>(&self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArray::Scalar(value) => ScalarOrArray::Scalar(f(value)),
            ScalarOrArray::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }

    pub fn len(&self) -> Option<usize> {
        match self {
            ScalarOrArray::Scalar(_) => None,
            ScalarOrArray::Array(values) => Some(values.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScalarOrArray::Array(values) if values.is_empty())
    }

    /// Interpret as a margins-like argument (1 to 4 values)
    pub fn to_margins(&self) -> Result<Margins<T>, FigLayoutCommonError>
    where
        T: Copy,
    {
        match self {
            ScalarOrArray::Scalar(value) => Ok(Margins::splat(*value)),
            ScalarOrArray::Array(values) => Margins::from_slice(values),
        }
    }

    /// Interpret as one value per gap. A scalar broadcasts to all `ngaps`
    /// gaps, an array must have exactly `ngaps` entries.
    pub fn to_gaps(&self, ngaps: usize) -> Result<Vec<T>, FigLayoutCommonError> {
        match self {
            ScalarOrArray::Scalar(_) => Ok(self.as_vec(ngaps)),
            ScalarOrArray::Array(values) if values.len() == ngaps => Ok(values.clone()),
            ScalarOrArray::Array(values) => Err(FigLayoutCommonError::InvalidGapsLength {
                expected: ngaps,
                got: values.len(),
            }),
        }
    }

    /// Value for position `index`; a scalar answers for every index
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            ScalarOrArray::Scalar(value) => Some(value),
            ScalarOrArray::Array(values) => values.get(index),
        }
    }
}

impl<T: Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl<T: Clone, const N: usize> From<[T; N]> for ScalarOrArray<T> {
    fn from(values: [T; N]) -> Self {
        ScalarOrArray::Array(values.to_vec())
    }
}

impl<T: Clone> From<&[T]> for ScalarOrArray<T> {
    fn from(values: &[T]) -> Self {
        ScalarOrArray::Array(values.to_vec())
    }
}

impl From<f64> for ScalarOrArray<f64> {
    fn from(value: f64) -> Self {
        ScalarOrArray::Scalar(value)
    }
}

impl From<bool> for ScalarOrArray<bool> {
    fn from(value: bool) -> Self {
        ScalarOrArray::Scalar(value)
    }
}
