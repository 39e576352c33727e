pub mod homogeneous_matrix;
pub mod transform_loss;
