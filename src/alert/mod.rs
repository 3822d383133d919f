pub mod chime;
pub mod sequence;

pub use chime::{Chime, ChimeKind};
pub use sequence::{ALERT_PLAYS, ALERT_SPACING, ring};
