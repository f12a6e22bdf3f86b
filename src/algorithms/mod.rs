//! Estimation core: synchronization, fitting, decomposition, validation.

pub mod decompose;
pub mod fit;
pub mod sync;
pub mod validate;

pub use decompose::decompose;
pub use fit::{fit_affine, AffineFit};
pub use sync::{synchronize, SyncConfig, SyncOutput};
pub use validate::{validate, ValidationConfig, ValidationReport};
