use nalgebra::Vector3;
use serde::{Serialize, Deserialize};
use crate::utils::utils_errors::ArmIKError;

/// A rigid link of an arm chain.
///
/// `length` is the extrusion distance along the link's local forward (z) axis, while `width`
/// (local y) and `height` (local x) give the cross-section used for the link's bounding proxy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    length: f64,
    width: f64,
    height: f64
}
impl Link {
    pub fn new(length: f64, width: f64, height: f64) -> Result<Self, ArmIKError> {
        for (name, v) in [("length", length), ("width", width), ("height", height)] {
            if !v.is_finite() || v < 0.0 {
                return Err(ArmIKError::new_malformed_chain_error(&format!("Link {} must be a finite, non-negative number (given {}).", name, v), file!(), line!()));
            }
        }

        Ok(Self {
            length,
            width,
            height
        })
    }
    pub fn length(&self) -> f64 {
        self.length
    }
    pub fn width(&self) -> f64 {
        self.width
    }
    pub fn height(&self) -> f64 {
        self.height
    }
    pub fn max_extent(&self) -> f64 {
        self.length.max(self.width).max(self.height)
    }
    /// Half extents of the link's box in local (x, y, z) order.
    pub fn half_extents(&self) -> Vector3<f64> {
        Vector3::new(self.height / 2.0, self.width / 2.0, self.length / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_extents_follow_local_axes() {
        let l = Link::new(4.0, 1.2, 0.8).unwrap();
        assert_eq!(l.half_extents(), Vector3::new(0.4, 0.6, 2.0));
        assert_eq!(l.max_extent(), 4.0);
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        assert!(Link::new(-1.0, 1.0, 1.0).is_err());
        assert!(Link::new(1.0, f64::INFINITY, 1.0).is_err());
    }
}
