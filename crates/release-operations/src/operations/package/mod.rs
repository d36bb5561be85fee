mod context;
mod data;
mod operation;
pub mod steps;

pub use context::PackageContext;
pub use operation::{PackageOperation, PackageOutput};
