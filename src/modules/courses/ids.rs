//! Id assignment for newly created courses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use courses_kernel::settings::IdStrategy;
use rand::Rng;
use uuid::Uuid;

/// Exclusive upper bound of ids drawn by [`RandomSmallId`].
pub const RANDOM_ID_RANGE: u32 = 100;

/// Produces ids for created courses.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Uniform random integer in `0..100`.
///
/// Ids are not checked against the store: a collision silently replaces the
/// existing course.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSmallId;

impl IdGenerator for RandomSmallId {
    fn next_id(&self) -> String {
        rand::thread_rng().gen_range(0..RANDOM_ID_RANGE).to_string()
    }
}

/// Monotonically increasing counter.
#[derive(Debug)]
pub struct SequentialId {
    next: AtomicU64,
}

impl SequentialId {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialId {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Random v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidId;

impl IdGenerator for UuidId {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Build the generator for the configured strategy.
///
/// `first_sequential` is the first id handed out by the sequential strategy,
/// so it can start past the seeded catalogue.
pub fn from_strategy(strategy: IdStrategy, first_sequential: u64) -> Arc<dyn IdGenerator> {
    match strategy {
        IdStrategy::Random => Arc::new(RandomSmallId),
        IdStrategy::Sequential => Arc::new(SequentialId::starting_at(first_sequential)),
        IdStrategy::Uuid => Arc::new(UuidId),
    }
}
