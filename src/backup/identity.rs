//! Cross-store profile identity.
//!
//! Two stores assign ids independently, so a profile is recognised by its
//! identity key instead. Resolution is planned against a read of the local
//! profiles before anything is written; committing the plan then inserts the
//! new profiles and yields a fixed incoming-id to local-id map.

use std::collections::{HashMap, HashSet};

use rusqlite::Connection;

use crate::backup::types::ProfileStats;
use crate::model::Profile;
use crate::storage::records;

/// Where an incoming profile lands locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// An existing local profile.
    Existing(i64),
    /// The n-th profile to insert.
    New(usize),
}

/// Identity resolution for every profile of one envelope.
#[derive(Debug)]
pub struct IdentityPlan<'a> {
    targets: Vec<(i64, Target)>,
    to_insert: Vec<&'a Profile>,
    stats: ProfileStats,
}

impl<'a> IdentityPlan<'a> {
    /// Resolve `incoming` profiles against `local` ones.
    ///
    /// A repeated identity key inside `incoming` resolves to the same target
    /// as its first occurrence and counts as matched.
    #[must_use]
    pub fn resolve(local: &[Profile], incoming: &'a [Profile]) -> Self {
        let mut by_key: HashMap<String, Target> = local
            .iter()
            .map(|p| (p.identity_key(), Target::Existing(p.id)))
            .collect();
        let mut seen = HashSet::with_capacity(incoming.len());
        let mut plan = Self {
            targets: Vec::with_capacity(incoming.len()),
            to_insert: Vec::new(),
            stats: ProfileStats::default(),
        };

        for profile in incoming {
            let key = profile.identity_key();
            if !seen.insert(key.clone()) {
                plan.stats.duplicate_in_backup += 1;
            }

            let target = if let Some(existing) = by_key.get(&key) {
                plan.stats.matched += 1;
                *existing
            } else {
                let slot = Target::New(plan.to_insert.len());
                plan.to_insert.push(profile);
                plan.stats.inserted += 1;
                by_key.insert(key, slot);
                slot
            };
            plan.targets.push((profile.id, target));
        }

        plan
    }

    /// Counters this plan will produce once committed.
    #[must_use]
    pub const fn stats(&self) -> ProfileStats {
        self.stats
    }

    /// Insert the new profiles and return the resulting id map.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails.
    pub fn commit(self, conn: &Connection) -> rusqlite::Result<ProfileMap> {
        let new_ids = self
            .to_insert
            .iter()
            .map(|p| records::insert_profile(conn, p))
            .collect::<rusqlite::Result<Vec<i64>>>()?;

        let map = self
            .targets
            .into_iter()
            .map(|(incoming, target)| {
                let local = match target {
                    Target::Existing(id) => id,
                    Target::New(slot) => new_ids[slot],
                };
                (incoming, local)
            })
            .collect();

        Ok(ProfileMap { map })
    }
}

/// Immutable incoming-id to local-id map.
#[derive(Debug, Clone, Default)]
pub struct ProfileMap {
    map: HashMap<i64, i64>,
}

impl ProfileMap {
    /// Record a mapping.
    pub fn insert(&mut self, incoming: i64, local: i64) {
        self.map.insert(incoming, local);
    }

    /// Local id for an incoming profile id.
    #[must_use]
    pub fn get(&self, incoming: i64) -> Option<i64> {
        self.map.get(&incoming).copied()
    }

    /// Distinct local ids in the map.
    #[must_use]
    pub fn local_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.map.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
