//! Trait definitions for updown operations.
//!
//! Each model type implements the traits its endpoints support.

mod add;
mod get;
mod list;
mod remove;
mod update;

pub use add::Add;
pub use get::Get;
pub use list::{List, Paginate, MAX_PAGES};
pub use remove::Remove;
pub use update::Update;
