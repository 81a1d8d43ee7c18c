use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a real scene object, assigned by the host's evaluation layer.
///
/// Two objects are the same object exactly when their ids are equal; the
/// contents behind the handle are never inspected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn new(raw: u64) -> ObjectId {
        ObjectId(raw)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, writer: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(writer, "{}", self.0)
    }
}

/// Identity of one concrete instance emitted by a duplication mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(u64);

impl InstanceId {
    pub const fn new(raw: u64) -> InstanceId {
        InstanceId(raw)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, writer: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(writer, "{}", self.0)
    }
}
