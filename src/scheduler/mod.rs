/*!
 * Scheduler Module
 * Algorithm identifiers, selection policies and aging
 */

pub mod aging;
pub mod policy;
pub mod types;

// Re-export public API
pub use policy::Selector;
pub use types::Algorithm;
