/*!
 * Core Types
 * Common types used across the simulator
 */

/// Simulated time in whole ticks
pub type Time = u64;

/// Process identifier, unique within one workload
pub type ProcessId = u32;

/// Core index in `[0, cores)`
pub type CoreId = usize;

/// Scheduling priority (lower value is more important)
pub type Priority = i64;
