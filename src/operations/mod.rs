pub mod fit;
pub mod query;
