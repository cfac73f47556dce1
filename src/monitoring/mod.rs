/*!
 * Monitoring
 * Tracing setup and per-run spans
 */

mod tracer;

pub use tracer::{init_tracing, RunSpan};
