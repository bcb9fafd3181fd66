// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Snowflake-style 64-bit id generation.
//!
//! Ids are composed of, from the high bits down:
//!
//! - 45 bits: milliseconds since the lingua epoch (2023-01-01T00:00:00Z)
//! - 6 bits: generator id (distinguishes processes sharing a database)
//! - 12 bits: per-millisecond sequence counter
//!
//! Ids are strictly increasing within a process. When the sequence counter
//! overflows inside a single millisecond tick the generator spins until the
//! next tick instead of failing, so callers only ever observe added latency.
//!
//! The generator holds mutable state (last tick, sequence) behind a `Mutex`
//! and is shared as an injected `Arc<IdGenerator>` - it is never a global.

use std::sync::Mutex;

use crate::clock::now_millis;

/// The lingua epoch: 2023-01-01T00:00:00Z as Unix milliseconds.
pub const EPOCH_MILLIS: i64 = 1_672_531_200_000;

const GENERATOR_BITS: u32 = 6;
const SEQUENCE_BITS: u32 = 12;

const GENERATOR_MAX: i64 = (1 << GENERATOR_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Errors from id generator construction.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
	/// The generator id does not fit in the 6-bit field.
	#[error("generator id {0} out of range (0..={GENERATOR_MAX})")]
	GeneratorIdOutOfRange(i64),
}

#[derive(Debug)]
struct GeneratorState {
	last_tick: i64,
	sequence: i64,
}

/// Thread-safe snowflake id generator.
///
/// One instance per process; every create operation mints its row id here.
#[derive(Debug)]
pub struct IdGenerator {
	generator_id: i64,
	state: Mutex<GeneratorState>,
}

impl IdGenerator {
	/// Create a generator with the given 6-bit generator id.
	///
	/// # Errors
	/// Returns [`IdError::GeneratorIdOutOfRange`] if `generator_id` exceeds 63.
	pub fn new(generator_id: i64) -> Result<Self, IdError> {
		if !(0..=GENERATOR_MAX).contains(&generator_id) {
			return Err(IdError::GeneratorIdOutOfRange(generator_id));
		}

		Ok(Self {
			generator_id,
			state: Mutex::new(GeneratorState {
				last_tick: 0,
				sequence: 0,
			}),
		})
	}

	/// Mint the next id.
	///
	/// Strictly increasing across calls. Under sequence exhaustion within one
	/// millisecond this spins until the clock advances.
	pub fn next_id(&self) -> i64 {
		let mut state = self
			.state
			.lock()
			.unwrap_or_else(std::sync::PoisonError::into_inner);

		let mut tick = current_tick();
		// Never step backwards, even if the wall clock does.
		if tick < state.last_tick {
			tick = state.last_tick;
		}

		if tick == state.last_tick {
			state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
			if state.sequence == 0 {
				// Sequence exhausted for this tick; spin to the next one.
				while tick <= state.last_tick {
					std::hint::spin_loop();
					tick = current_tick();
				}
				state.last_tick = tick;
			}
		} else {
			state.last_tick = tick;
			state.sequence = 0;
		}

		(state.last_tick << (GENERATOR_BITS + SEQUENCE_BITS))
			| (self.generator_id << SEQUENCE_BITS)
			| state.sequence
	}

	/// The generator id this instance stamps into every id.
	pub fn generator_id(&self) -> i64 {
		self.generator_id
	}
}

/// Extract the creation timestamp of an id as Unix milliseconds.
pub fn timestamp_millis(id: i64) -> i64 {
	(id >> (GENERATOR_BITS + SEQUENCE_BITS)) + EPOCH_MILLIS
}

fn current_tick() -> i64 {
	now_millis() - EPOCH_MILLIS
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;
	use std::sync::Arc;

	#[test]
	fn rejects_out_of_range_generator_id() {
		assert!(IdGenerator::new(-1).is_err());
		assert!(IdGenerator::new(64).is_err());
		assert!(IdGenerator::new(0).is_ok());
		assert!(IdGenerator::new(63).is_ok());
	}

	#[test]
	fn ids_are_strictly_increasing() {
		let generator = IdGenerator::new(0).unwrap();
		let mut last = 0;
		for _ in 0..10_000 {
			let id = generator.next_id();
			assert!(id > last, "id {id} not greater than {last}");
			last = id;
		}
	}

	#[test]
	fn ids_are_unique_across_threads() {
		let generator = Arc::new(IdGenerator::new(1).unwrap());
		let mut handles = Vec::new();
		for _ in 0..8 {
			let generator = Arc::clone(&generator);
			handles.push(std::thread::spawn(move || {
				(0..2_000).map(|_| generator.next_id()).collect::<Vec<_>>()
			}));
		}

		let mut seen = HashSet::new();
		for handle in handles {
			for id in handle.join().unwrap() {
				assert!(seen.insert(id), "duplicate id {id}");
			}
		}
		assert_eq!(seen.len(), 16_000);
	}

	#[test]
	fn generator_id_is_embedded() {
		let generator = IdGenerator::new(42).unwrap();
		let id = generator.next_id();
		assert_eq!((id >> SEQUENCE_BITS) & GENERATOR_MAX, 42);
	}

	#[test]
	fn timestamp_roundtrips_through_id() {
		let generator = IdGenerator::new(0).unwrap();
		let before = now_millis();
		let id = generator.next_id();
		let after = now_millis();

		let ts = timestamp_millis(id);
		assert!(ts >= before && ts <= after, "{before} <= {ts} <= {after}");
	}

	#[test]
	fn sequence_overflow_spins_to_next_tick() {
		let generator = IdGenerator::new(0).unwrap();
		// Draining more than 4096 ids forces at least one overflow spin; all
		// ids must still be unique and increasing.
		let mut last = 0;
		for _ in 0..10_000 {
			let id = generator.next_id();
			assert!(id > last);
			last = id;
		}
	}

	mod properties {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn batches_are_unique_and_sorted(count in 1usize..2_000) {
				let generator = IdGenerator::new(3).unwrap();
				let ids: Vec<i64> = (0..count).map(|_| generator.next_id()).collect();

				let mut sorted = ids.clone();
				sorted.sort_unstable();
				sorted.dedup();
				prop_assert_eq!(sorted.len(), ids.len());
				prop_assert_eq!(sorted, ids);
			}
		}
	}
}
