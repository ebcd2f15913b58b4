pub mod ecology;
pub mod error;
pub mod loader;
pub mod model;
pub mod targets;
mod validation;

pub use ecology::Ecology;
pub use error::EconomyError;
pub use loader::{load_ecology, load_economy, parse_ecology, parse_economy};
pub use model::{EconomyModel, EconomySeries};
pub use targets::Targets;

/// A dense `rows x columns` matrix for one period.
pub type Matrix = ndarray::Array2<f64>;

/// A dense vector for one period.
pub type Vector = ndarray::Array1<f64>;
