use thiserror::Error;

use crate::ids::InstanceId;
use crate::instance_path::InstancePath;

/// Problems detected while recording instances into a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The evaluation layer produced two instances with the same identity.
    /// Overwriting silently would make parent resolution depend on
    /// registration order, so the collision is reported instead; the earlier
    /// registration stays in effect.
    #[error("instance {rejected} claims nesting path {path:?}, already owned by instance {existing}")]
    DuplicatePath {
        path: InstancePath,
        existing: InstanceId,
        rejected: InstanceId,
    },
}
