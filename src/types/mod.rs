//! Shared transport types.

mod response;

pub use response::ApiResponse;
