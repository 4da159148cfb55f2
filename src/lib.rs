pub mod error;
pub mod math;
pub mod mesh;
pub mod model;
pub mod registry;

pub use error::{Result, SurfModelError};
