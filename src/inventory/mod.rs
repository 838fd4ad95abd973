// Workstation inventory collection modules
pub mod types;
pub mod platform;
pub mod normalize;
pub mod collect_system;
pub mod collect_storage;
pub mod collect_sensors;
pub mod collect_software;
pub mod collect_network;
pub mod collect_node;
pub mod collector;

#[cfg(test)]
pub(crate) mod fake;

// Re-export main collection entry points
pub use collector::collect_inventory;
pub use platform::{Capabilities, FacilityError, Platform};
pub use types::{InventoryRecord, ProgressEvent, PHASES};
