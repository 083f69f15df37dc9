//! updown API model types.

mod check;
mod downtime;
mod metric;
mod node;
mod recipient;
mod status_page;

pub use check::*;
pub use downtime::*;
pub use metric::*;
pub use node::*;
pub use recipient::*;
pub use status_page::*;
