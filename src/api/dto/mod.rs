//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies keep every field optional and validate in an `into_*`
//! conversion, so a missing field yields `"<field> is required"` instead
//! of a generic deserialization error. Numeric fields accept numbers or
//! numeric strings.

pub mod auth_dto;
pub mod common_dto;
pub mod pickup_dto;
pub mod product_dto;
pub mod reference_dto;
pub mod transaction_dto;
pub mod user_dto;

pub use auth_dto::*;
pub use common_dto::MessageResponse;
pub use pickup_dto::*;
pub use product_dto::*;
pub use reference_dto::*;
pub use transaction_dto::*;
pub use user_dto::*;
