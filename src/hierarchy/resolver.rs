//! Batch registration of instances and the export-parent lookup itself.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use log::{debug, trace};

use crate::hierarchy::{InstanceRecord, RegisterError};
use crate::ids::ObjectId;
use crate::instance_path::InstancePath;
use crate::multimap::MultiMap;

/// Collects the instances of one batch before any of them can be queried.
///
/// A batch covers one real object and every instance descending from it.
/// Registration order carries no meaning; any permutation of the same
/// records produces a hierarchy that answers every query identically.
#[derive(Debug, Default)]
pub struct InstanceBatch {
    instanced_objects: HashSet<ObjectId>,
    record_by_path: HashMap<InstancePath, InstanceRecord>,
    members_by_instancer: MultiMap<InstancePath, InstancePath>,
}

impl InstanceBatch {
    pub fn new() -> InstanceBatch {
        InstanceBatch {
            instanced_objects: HashSet::new(),
            record_by_path: HashMap::new(),
            members_by_instancer: MultiMap::new(),
        }
    }

    /// Records one instance into the batch.
    ///
    /// Two instances claiming the same nesting path is a fault in the data
    /// source. The collision is reported and the batch keeps the earlier
    /// record untouched, so resolution never depends on which registration
    /// happened to run last.
    pub fn register(&mut self, record: InstanceRecord) -> Result<(), RegisterError> {
        match self.record_by_path.entry(record.path) {
            Entry::Occupied(occupied) => {
                return Err(RegisterError::DuplicatePath {
                    path: record.path,
                    existing: occupied.get().instance,
                    rejected: record.instance,
                });
            }
            Entry::Vacant(vacant) => {
                vacant.insert(record);
            }
        }

        self.instanced_objects.insert(record.source);
        self.members_by_instancer
            .insert(record.path.instancer_path(), record.path);

        Ok(())
    }

    /// Number of instances recorded so far.
    pub fn len(&self) -> usize {
        self.record_by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_by_path.is_empty()
    }

    /// Seals the batch. From here on the records are immutable and the
    /// parent queries become available.
    pub fn finish(self) -> InstanceHierarchy {
        debug!(
            "sealed batch of {} instances in {} instancer groups",
            self.record_by_path.len(),
            self.members_by_instancer.len()
        );

        InstanceHierarchy {
            instanced_objects: self.instanced_objects,
            record_by_path: self.record_by_path,
            members_by_instancer: self.members_by_instancer,
        }
    }
}

/// The sealed, query-only form of a batch.
#[derive(Debug)]
pub struct InstanceHierarchy {
    instanced_objects: HashSet<ObjectId>,
    record_by_path: HashMap<InstancePath, InstanceRecord>,
    members_by_instancer: MultiMap<InstancePath, InstancePath>,
}

impl InstanceHierarchy {
    /// Whether the given real object is the source of at least one instance
    /// in this batch.
    pub fn is_duplicated(&self, object: ObjectId) -> bool {
        self.instanced_objects.contains(&object)
    }

    /// The previously-registered instance that should become the export
    /// parent of the instance at `path`, if any.
    ///
    /// The duplicated-parent lookup runs before the instancer lookup and the
    /// two are not interchangeable: the first can resolve through a sibling
    /// instance of the queried source when nothing at all is registered at
    /// the parent position. `None` means the instance attaches to the real
    /// scene parent outside this batch.
    pub fn find_suitable_export_parent(&self, path: &InstancePath) -> Option<&InstanceRecord> {
        let parent_path = path.instancer_path();
        if parent_path.is_empty() {
            trace!("instance at {:?} has no duplication parent", path);
            return None;
        }

        let parent = self
            .find_duplicated_parent(path, &parent_path)
            .or_else(|| self.find_instancer(&parent_path));

        if parent.is_none() {
            trace!("no export parent found for instance at {:?}", path);
        }
        parent
    }

    /// The instance to attach to when the queried instance duplicates an
    /// object that is itself present as an instance one level up.
    fn find_duplicated_parent(
        &self,
        path: &InstancePath,
        parent_path: &InstancePath,
    ) -> Option<&InstanceRecord> {
        // A path nobody registered carries no source object to match.
        let queried = self.record_by_path.get(path)?;

        if let Some(parent) = self.record_by_path.get(parent_path) {
            if parent.source == queried.source {
                return Some(parent);
            }
        }

        // The parent position is vacant, or holds a copy of something else.
        // Another instance of the queried source may still stand one sibling
        // over; the smallest such path wins so the pick is stable under any
        // registration order.
        let fallback = self
            .members_by_instancer
            .get(&parent_path.instancer_path())
            .iter()
            .filter(|member| member.is_from_same_instancer_as(parent_path))
            .filter_map(|member| self.record_by_path.get(member))
            .filter(|record| record.source == queried.source)
            .min_by_key(|record| record.path);

        if let Some(record) = fallback {
            trace!(
                "duplicated parent for {:?} found at sibling position {:?}",
                path,
                record.path
            );
        }
        fallback
    }

    /// The instance registered at exactly the parent position, whatever
    /// object it duplicates.
    fn find_instancer(&self, parent_path: &InstancePath) -> Option<&InstanceRecord> {
        self.record_by_path.get(parent_path)
    }
}
