//! Domain types.

mod env;
mod stage;
mod target;

pub use env::{Secret, SecretsFile};
pub use stage::{Stage, StageStatus};
pub use target::{Lookup, Target};
