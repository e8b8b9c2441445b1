//! Dense embedding vectors and similarity functions.

pub mod distance;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SemretError};

pub use distance::{batch_cosine_similarity, cosine_similarity};

/// A dense vector representation of a text's semantic content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    /// The vector dimensions as floating point values.
    pub data: Vec<f32>,
}

impl Vector {
    /// Create a new vector with the given dimensions.
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Get the dimensionality of this vector.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Calculate the L2 norm (magnitude) of this vector.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Normalize this vector to unit length. Zero vectors are left unchanged.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.data {
                *value /= norm;
            }
        }
    }

    /// Get a normalized copy of this vector.
    pub fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.normalize();
        normalized
    }

    /// Validate that this vector has the expected dimension.
    pub fn validate_dimension(&self, expected_dim: usize, context: &str) -> Result<()> {
        if self.data.len() != expected_dim {
            return Err(SemretError::dimension_mismatch(
                expected_dim,
                self.data.len(),
                context,
            ));
        }
        Ok(())
    }

    /// Check if this vector contains any NaN or infinite values.
    pub fn is_valid(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    /// Borrow the raw components.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_creation() {
        let vector = Vector::new(vec![3.0, 4.0]);
        assert_eq!(vector.dimension(), 2);
        assert_eq!(vector.norm(), 5.0);
    }

    #[test]
    fn test_normalize() {
        let vector = Vector::new(vec![3.0, 4.0]).normalized();
        assert!((vector.data[0] - 0.6).abs() < 1e-6);
        assert!((vector.data[1] - 0.8).abs() < 1e-6);
        assert!((vector.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_is_noop() {
        let vector = Vector::new(vec![0.0, 0.0]).normalized();
        assert!(vector.is_zero());
    }

    #[test]
    fn test_validate_dimension() {
        let vector = Vector::new(vec![1.0, 2.0, 3.0]);
        assert!(vector.validate_dimension(3, "query").is_ok());
        let err = vector.validate_dimension(4, "query").unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_is_valid() {
        assert!(Vector::new(vec![1.0, -2.0]).is_valid());
        assert!(!Vector::new(vec![f32::NAN]).is_valid());
        assert!(!Vector::new(vec![f32::INFINITY]).is_valid());
    }

    #[test]
    fn test_serde_transparent() {
        let vector: Vector = serde_json::from_str("[0.5, 1.5]").unwrap();
        assert_eq!(vector.data, vec![0.5, 1.5]);
        assert_eq!(serde_json::to_string(&vector).unwrap(), "[0.5,1.5]");
    }
}
