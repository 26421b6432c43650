//! Change detection - equivalence decisions between local and remote state

mod compare;

pub use compare::{content_matches, is_up_to_date, refreshed_tags};
