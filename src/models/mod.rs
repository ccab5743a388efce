pub mod identifier;
pub mod level;
pub mod record;

pub use identifier::{Identifier, ResolvedSource};
pub use level::ExamLevel;
pub use record::{ErrorRecord, LegacyRecord, LookupResponse, ResultRecord};
