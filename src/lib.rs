/*!
Stable identity and export parentage for instances produced by nested
duplication.

Duplication mechanisms (particle scatter, array duplicators, collection
instancing) emit flat sets of instances, in whatever order evaluation happens
to visit them. Exporters targeting hierarchical formats need two things that
generation order cannot provide: a name for each instance that stays the same
across runs, and the previously-seen instance each one should be parented
under.

[`InstancePath`] carries the identity: the index an instance was assigned at
each duplication level it passed through, compared and hashed as a
sentinel-terminated sequence so storage padding never leaks into equality.
[`InstanceBatch`] collects the [`InstanceRecord`]s of one real object's
instances; sealing it with [`InstanceBatch::finish`] yields an
[`InstanceHierarchy`], which answers the two export-time queries:
[`InstanceHierarchy::is_duplicated`] and
[`InstanceHierarchy::find_suitable_export_parent`].

Everything here is in-memory and batch-scoped. No state survives an export
run, and independent batches can be processed on separate threads since they
share nothing.
*/

mod hierarchy;
mod ids;
mod instance_path;
mod multimap;

pub use crate::hierarchy::{InstanceBatch, InstanceHierarchy, InstanceRecord, RegisterError};
pub use crate::ids::{InstanceId, ObjectId};
pub use crate::instance_path::{InstancePath, InstancePathError, MAX_NESTING_DEPTH};
