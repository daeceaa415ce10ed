/*!
 * chain-alloc - Demo Entry Point
 *
 * Builds a memory manager from the environment, fragments it, serves a
 * request from the scattered free ranges, and dumps the resulting state.
 */

use chain_alloc::core::limits::{DEFAULT_CAPACITY, ENV_CAPACITY};
use chain_alloc::memory::{Allocator, BlockStorage, MemoryInfo};
use chain_alloc::{init_tracing, AllocatorConfig, MemoryManager};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{info, instrument, warn};

fn main() -> Result<()> {
    init_tracing();

    let capacity = match std::env::var(ENV_CAPACITY) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .into_diagnostic()
            .wrap_err_with(|| format!("{ENV_CAPACITY} must be a byte count, got {raw:?}"))?,
        Err(_) => DEFAULT_CAPACITY,
    };

    let config = AllocatorConfig::from_env();
    info!(capacity, ?config, "Starting allocator demo");

    let mut manager = MemoryManager::with_config(vec![b'.'; capacity], capacity, config)?;
    fragment_and_fill(&mut manager, "123")?;

    println!("Free memory:");
    print!("{}", manager.free_list_report());
    println!("{}", manager.buffer_report());

    let stats = manager.stats();
    info!(
        used = stats.used_bytes,
        free = stats.free_bytes,
        free_blocks = stats.free_blocks,
        pressure = %stats.memory_pressure(),
        "Demo complete"
    );
    Ok(())
}

/// Allocate the buffer one byte at a time, release every third byte, then
/// write `payload` through a chain built from the released bytes
#[instrument(skip(manager))]
fn fragment_and_fill<M>(manager: &mut M, payload: &str) -> Result<()>
where
    M: Allocator + BlockStorage + MemoryInfo,
{
    let (capacity, _, _) = manager.info();
    let mut blocks = Vec::with_capacity(capacity);
    for _ in 0..capacity {
        blocks.push(Some(manager.allocate(1)?));
    }

    let mut released = 0;
    for slot in blocks.iter_mut().skip(2).step_by(3) {
        if let Some(block) = slot.take() {
            manager.release(block)?;
            released += 1;
        }
    }

    let size = payload.len().min(released);
    if size == 0 {
        warn!(released, "Nothing to write into");
        return Ok(());
    }

    let chain = manager.allocate(size)?;
    manager.write(&chain, &payload.as_bytes()[..size])?;
    let read_back = manager.read(&chain)?;

    println!("{}", chain.chain_report());
    println!("Read back: {}", String::from_utf8_lossy(&read_back));
    Ok(())
}
