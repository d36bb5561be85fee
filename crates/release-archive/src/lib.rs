mod archive;
mod error;
mod staging;

pub use archive::{ArchiveTarget, archive};
pub use error::{ArchiveError, StagingError};
pub use staging::StagingArea;
