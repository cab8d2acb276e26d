//! Short names for the string helpers in [`crate::ui`].

pub use crate::ui::{analyze, fraction, latex, report, simp, summary};
