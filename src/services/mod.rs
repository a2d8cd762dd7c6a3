//! Setup services.

mod hypotheses;
mod setup;
mod shutdown;

pub use hypotheses::HypothesisGenerator;
pub use setup::{GameSetup, HYPOTHESES_KEY, IDS_KEY, catalog_parameters};
pub use shutdown::wait_for_interrupt;
