/*!
 * Allocator Invariant Tests
 * Property tests over random allocate/release/write sequences
 */

use chain_alloc::memory::{Block, MemoryError, MemoryManager};
use proptest::prelude::*;

const CAPACITY: usize = 32;

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize),
    Release(usize),
    Write(usize, Vec<u8>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1usize..=12).prop_map(Op::Allocate),
        2 => any::<usize>().prop_map(Op::Release),
        2 => (any::<usize>(), prop::collection::vec(any::<u8>(), 0..16))
            .prop_map(|(idx, data)| Op::Write(idx, data)),
    ]
}

/// Free ranges and live segments must tile `[0, capacity)` exactly
fn assert_partition(manager: &MemoryManager, live: &[Block]) -> Result<(), TestCaseError> {
    let mut ranges: Vec<(usize, usize)> = manager
        .free_blocks()
        .chain(live.iter().flat_map(Block::segments))
        .map(|s| (s.start(), s.end()))
        .collect();
    ranges.sort_unstable();

    let mut cursor = 0;
    for (start, end) in ranges {
        prop_assert_eq!(start, cursor, "gap or overlap at {}", cursor);
        prop_assert!(end > start);
        cursor = end;
    }
    prop_assert_eq!(cursor, manager.capacity());
    Ok(())
}

proptest! {
    #[test]
    fn accounting_and_partition_hold(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut manager = MemoryManager::with_capacity(CAPACITY);
        let mut live: Vec<Block> = Vec::new();

        for op in ops {
            match op {
                Op::Allocate(size) => {
                    let free_before = manager.free_bytes();
                    match manager.allocate(size) {
                        Ok(block) => {
                            prop_assert!(size <= free_before);
                            prop_assert_eq!(block.total_length(), size);
                            prop_assert_eq!(
                                block.segments().map(Block::length).sum::<usize>(),
                                size
                            );
                            live.push(block);
                        }
                        Err(err) => {
                            prop_assert!(size > free_before);
                            prop_assert_eq!(
                                err,
                                MemoryError::OutOfMemory { requested: size, available: free_before }
                            );
                            prop_assert_eq!(manager.free_bytes(), free_before);
                        }
                    }
                }
                Op::Release(idx) => {
                    if !live.is_empty() {
                        let block = live.swap_remove(idx % live.len());
                        manager.release(block).unwrap();
                    }
                }
                Op::Write(idx, data) => {
                    if live.is_empty() {
                        continue;
                    }
                    let block = &live[idx % live.len()];
                    let before = manager.buffer().to_vec();
                    if data.len() <= block.total_length() {
                        manager.write(block, &data).unwrap();
                        let read = manager.read(block).unwrap();
                        prop_assert_eq!(read.len(), block.total_length());
                        prop_assert_eq!(&read[..data.len()], &data[..]);
                    } else {
                        let is_capacity_exceeded = matches!(
                            manager.write(block, &data),
                            Err(MemoryError::CapacityExceeded { .. })
                        );
                        prop_assert!(is_capacity_exceeded);
                        prop_assert_eq!(manager.buffer(), &before[..]);
                    }
                }
            }

            let live_bytes: usize = live.iter().map(Block::total_length).sum();
            prop_assert_eq!(manager.free_bytes() + live_bytes, CAPACITY);
            assert_partition(&manager, &live)?;
        }
    }

    #[test]
    fn fragmented_round_trip(
        released in prop::collection::btree_set(0usize..CAPACITY, 1..12),
        seed in any::<u8>(),
    ) {
        let mut manager = MemoryManager::with_capacity(CAPACITY);
        let mut singles: Vec<Option<Block>> =
            (0..CAPACITY).map(|_| manager.allocate(1).ok()).collect();
        for &idx in &released {
            manager.release(singles[idx].take().unwrap()).unwrap();
        }

        let chain = manager.allocate(released.len()).unwrap();
        let starts: Vec<usize> = chain.segments().map(Block::start).collect();
        let expected: Vec<usize> = released.iter().copied().collect();
        prop_assert_eq!(starts, expected);

        let payload: Vec<u8> = (0..released.len()).map(|i| seed.wrapping_add(i as u8)).collect();
        manager.write(&chain, &payload).unwrap();
        prop_assert_eq!(manager.read(&chain).unwrap(), payload);
    }
}
