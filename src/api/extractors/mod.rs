//! Custom request extractors.

mod optional_json;
mod product_id;
mod validated_json;

pub use optional_json::OptionalJson;
pub use product_id::ProductIdPath;
pub use validated_json::ValidatedJson;
