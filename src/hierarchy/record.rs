use serde::{Deserialize, Serialize};

use crate::ids::{InstanceId, ObjectId};
use crate::instance_path::InstancePath;

/// One instance observed by the evaluation layer: where nested duplication
/// placed it, and which real object it is a copy of.
///
/// Records are plain value data. The resolver indexes them by path and hands
/// back references; it never inspects the scene data behind the handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Stable identity of this instance within its batch.
    pub path: InstancePath,

    /// Handle of the concrete instance in the evaluated scene.
    pub instance: InstanceId,

    /// The real object this instance duplicates.
    pub source: ObjectId,
}

impl InstanceRecord {
    pub fn new(path: InstancePath, instance: InstanceId, source: ObjectId) -> InstanceRecord {
        InstanceRecord {
            path,
            instance,
            source,
        }
    }
}
