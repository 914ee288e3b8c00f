use crate::{
    context::{EnrollmentContext, SectionKey},
    validator::validate,
    verdict::Verdict,
};
use dashmap::DashMap;
use log::debug;
use std::sync::{Arc, Mutex, PoisonError};

/// Serialises validate-then-commit per course section.
///
/// Without it two attempts can both read the same enrollment count, both
/// pass the capacity check and both commit.
#[derive(Debug, Default)]
pub struct SectionGate {
    locks: DashMap<SectionKey, Arc<Mutex<()>>>,
}

impl SectionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets or creates the lock for a section
    fn section_lock(&self, key: SectionKey) -> Arc<Mutex<()>> {
        self.locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Validates and commits one enrollment attempt while holding the
    /// section's lock.
    ///
    /// # Arguments
    /// * `key` - The section being enrolled in
    /// * `load` - Reads a fresh context from storage
    /// * `commit` - Stores the enrollment; only called on [`Verdict::Accepted`]
    ///
    /// # Returns
    /// The verdict, or the first error from `load` or `commit`
    pub fn admit<L, C, E>(&self, key: SectionKey, load: L, commit: C) -> Result<Verdict, E>
    where
        L: FnOnce() -> Result<EnrollmentContext, E>,
        C: FnOnce(&EnrollmentContext) -> Result<(), E>,
    {
        let lock = self.section_lock(key);
        let result = {
            // Guards no data, so a poisoned lock is still usable
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            Self::decide(load, commit)
        };

        drop(lock);
        self.release(key);

        result
    }

    fn decide<L, C, E>(load: L, commit: C) -> Result<Verdict, E>
    where
        L: FnOnce() -> Result<EnrollmentContext, E>,
        C: FnOnce(&EnrollmentContext) -> Result<(), E>,
    {
        let ctx = load()?;
        let verdict = validate(&ctx);

        if verdict.is_accepted() {
            commit(&ctx)?;
            debug!(
                "Enrolled student {} in {} ({} of {})",
                ctx.student.id,
                ctx.course.code,
                ctx.enrolled_count + 1,
                ctx.course.capacity
            );
        }

        Ok(verdict)
    }

    /// Drops a section's lock once no attempt holds or waits on it.
    ///
    /// Lookup and removal share the map's shard lock, so a count of one
    /// means only the map still references it.
    fn release(&self, key: SectionKey) {
        self.locks.remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Number of sections with an attempt in flight
    #[cfg(test)]
    fn sections(&self) -> usize {
        self.locks.len()
    }
}
