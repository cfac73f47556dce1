/*!
 * Workload Validation
 * Reject degenerate process lists before any driver runs
 */

use super::types::ProcessSpec;
use crate::core::errors::{Result, SimulationError};
use ahash::AHashSet;

/// Validate the process list of a workload
///
/// An empty list is valid; drivers return an empty result for it.
pub(crate) fn validate_processes(processes: &[ProcessSpec]) -> Result<()> {
    let mut seen = AHashSet::with_capacity(processes.len());

    for spec in processes {
        if spec.burst_time == 0 {
            return Err(SimulationError::InvalidBurstTime { process: spec.id });
        }
        if !seen.insert(spec.id) {
            return Err(SimulationError::DuplicateProcessId(spec.id));
        }
    }

    Ok(())
}
