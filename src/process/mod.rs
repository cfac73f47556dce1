/*!
 * Process Model
 * Schedulable units and their derived timing fields
 */

pub mod types;
pub(crate) mod validation;

pub use types::{Process, ProcessSpec};
