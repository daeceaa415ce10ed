/*!
 * Monitoring
 * Tracing subscriber setup for binaries embedding the allocator
 */

mod tracer;

pub use tracer::init_tracing;
