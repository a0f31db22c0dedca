pub use crate::MatShape;

mod mat;
pub use mat::Mat;
