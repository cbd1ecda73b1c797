//! Domain records for the ADMS browser.
//!
//! All records are read projections built fresh per query. Every field has a
//! default so a partially populated document still produces a record.

mod battalion;
mod location;
mod medal;
mod soldier;
mod war;
mod weapon;

pub use battalion::*;
pub use location::*;
pub use medal::*;
pub use soldier::*;
pub use war::*;
pub use weapon::*;
