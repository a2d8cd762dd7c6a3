//! Data models for the game setup.
//!
//! This module contains the catalogs of individuals, the directives exchanged
//! with the reasoning service and the generated hypotheses.

mod catalog;
mod directive;
mod hypothesis;

pub use catalog::{Catalog, Catalogs, ClassTag, HYPOTHESIS_IDS, PEOPLE, PLACES, WEAPONS};
pub use directive::{Command, Directive, DirectiveResponse};
pub use hypothesis::{HYPOTHESIS_TEMPLATES, Hypothesis, HypothesisShape, HypothesisTemplate};
