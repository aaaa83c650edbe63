use ndarray::{Array, ArrayView2, Axis, Ix2, IxDyn};

use crate::common::DetectError;

/// Model input or output, wrapper over [`Array<f32, IxDyn>`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tensor(pub Array<f32, IxDyn>);

impl From<Array<f32, IxDyn>> for Tensor {
    fn from(x: Array<f32, IxDyn>) -> Self {
        Self(x)
    }
}

impl From<Vec<f32>> for Tensor {
    fn from(x: Vec<f32>) -> Self {
        Self(Array::from_vec(x).into_dyn())
    }
}

impl std::ops::Deref for Tensor {
    type Target = Array<f32, IxDyn>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Tensor {
    pub fn from_shape_vec(shape: &[usize], xs: Vec<f32>) -> Result<Self, DetectError> {
        Ok(Self::from(Array::from_shape_vec(shape, xs)?))
    }

    pub fn dims(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn ndim(&self) -> usize {
        self.0.ndim()
    }

    pub fn into_inner(self) -> Array<f32, IxDyn> {
        self.0
    }

    /// Views a `[1, channels, anchors]` output as `[channels, anchors]`.
    pub(crate) fn prediction_planes(&self) -> Result<ArrayView2<'_, f32>, DetectError> {
        let dims = self.dims();
        if dims.len() != 3 {
            return Err(DetectError::ShapeMismatch(format!(
                "expected a rank 3 tensor, got shape {dims:?}"
            )));
        }
        if dims[0] != 1 {
            return Err(DetectError::ShapeMismatch(format!(
                "expected batch size 1, got {}",
                dims[0]
            )));
        }
        if dims[1] <= 4 {
            return Err(DetectError::ShapeMismatch(format!(
                "expected more than 4 channels, got {}",
                dims[1]
            )));
        }
        if dims[2] == 0 {
            return Err(DetectError::ShapeMismatch("tensor has no anchors".to_string()));
        }
        Ok(self.0.index_axis(Axis(0), 0).into_dimensionality::<Ix2>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_is_kept() {
        let t = Tensor::from_shape_vec(&[1, 5, 2], vec![0.; 10]).unwrap();
        assert_eq!(t.dims(), &[1, 5, 2]);
        assert_eq!(t.ndim(), 3);
        assert_eq!(t.prediction_planes().unwrap().dim(), (5, 2));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            Tensor::from_shape_vec(&[1, 5, 2], vec![0.; 9]),
            Err(DetectError::Tensor(_))
        ));
    }

    #[test]
    fn bad_prediction_shapes() {
        for shape in [vec![5, 2], vec![2, 5, 2], vec![1, 4, 8], vec![1, 6, 0]] {
            let len = shape.iter().product();
            let t = Tensor::from_shape_vec(&shape, vec![0.; len]).unwrap();
            assert!(
                matches!(t.prediction_planes(), Err(DetectError::ShapeMismatch(_))),
                "{shape:?}"
            );
        }
    }
}
