pub mod aggregate;

pub use aggregate::{ContentDto, ContentId, ContentRecord, ContentStats, ContentStatus};
