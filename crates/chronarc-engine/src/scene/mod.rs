//! Per-frame draw stream.
//!
//! The clock and the UI overlay record shapes into one [`DrawList`]; each
//! renderer later reads the commands of its own kind in z + insertion order.
//! Shape payloads and their `push_*` helpers live under [`shapes`].

mod cmd;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList, SortKey};
pub use z_index::ZIndex;
