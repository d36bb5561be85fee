mod error;
mod stamp;

pub use error::StampError;
pub use stamp::{StampReport, stamp_content, stamp_version};
