//! Agni Template - JSON packet template loading and expansion
//!
//! Parses the declarative JSON template format and expands each template's
//! `packet_count` copies into a `PacketList`, tagging each payload with the
//! id it will occupy.

pub mod expand;
pub mod loader;
pub mod model;

pub use expand::expand_into;
pub use loader::load_templates;
pub use model::{PacketTemplate, Transport};
