pub mod part;
pub mod registry;

pub use crate::config::PartMap;
pub use part::{emit, fail, nothing, Part, PartContext, Produced};
pub use registry::{PartConstructor, PartOptions, PluginRegistry};
