/*!
 * Simulation Limits and Constants
 *
 * Centralized location for defaults, thresholds and safeguards.
 * Organized by domain for maintainability and discoverability.
 */

use super::types::{Priority, Time};

// =============================================================================
// CONFIGURATION DEFAULTS
// =============================================================================

/// Default number of simulated cores
pub const DEFAULT_CORES: usize = 1;

/// Default Round Robin time quantum (ticks)
pub const DEFAULT_QUANTUM: Time = 4;

/// Default context switch cost (ticks)
/// Zero means switches are counted but never occupy a core
pub const DEFAULT_CONTEXT_SWITCH_TIME: Time = 0;

// =============================================================================
// SAFEGUARDS
// =============================================================================

/// Default step budget for the preemptive tick driver
/// One step is one outer iteration (one tick, or one idle jump)
pub const DEFAULT_STEP_BUDGET: u64 = 1_000_000;

/// Most per-tick log lines a run may produce (horizon x cores)
pub const MAX_EXECUTION_LOG_TICKS: u64 = 5_000_000;

// =============================================================================
// AGING
// =============================================================================

/// Waiting ticks that improve a process's effective priority by one level
pub const AGING_THRESHOLD: Time = 10;

/// Best effective priority aging can reach
pub const AGING_PRIORITY_FLOOR: Priority = 1;

// =============================================================================
// PRESENTATION
// =============================================================================

/// Gantt colour for idle intervals
pub const IDLE_COLOR: &str = "hsl(var(--muted))";

/// Gantt colour for context switch intervals
pub const CONTEXT_SWITCH_COLOR: &str = "hsl(var(--destructive))";

/// Gantt label for idle intervals
pub const IDLE_LABEL: &str = "Idle";

/// Gantt label for context switch intervals
pub const CONTEXT_SWITCH_LABEL: &str = "Context Switch";

// =============================================================================
// OBSERVABILITY
// =============================================================================

/// Runs slower than this (wall clock) are logged at warn level
pub const SLOW_RUN_MS: u128 = 100;
