//! Trait definitions for Write.as resource operations.
//!
//! Each resource type implements the traits its endpoints support. The
//! implementations own the endpoint's status table; the client only moves
//! envelopes.

mod create;
mod delete;
mod get;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use update::Update;
