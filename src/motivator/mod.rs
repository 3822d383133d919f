pub mod motivator;

pub use motivator::{pick_decorated, pick_plain, phrases, strip_decorations};
