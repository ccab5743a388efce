pub mod lookup_flow;

pub use lookup_flow::{LookupFlow, LookupVariant, RowMatch};
