mod check;
mod latest;
mod package;
mod setup;

pub use check::{CheckOperation, CheckReport};
pub use latest::LatestVersionOperation;
pub use package::{PackageContext, PackageOperation, PackageOutput};
pub use setup::{SetupOperation, SetupOutput};
