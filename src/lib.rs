mod base;
pub use base::MatShape;

mod error;
pub use error::MatError;

pub mod dense;
pub use dense::Mat;
