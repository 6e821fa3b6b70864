pub mod availability;
pub mod catalog;
pub mod discovery;
pub mod enrichment;
pub mod interest_expander;
pub mod justification;
pub mod providers;
pub mod recommendations;
pub mod selection;

pub use recommendations::Recommender;
