//! This module reconstructs export parentage from a flat batch of instances.
//!
//! The evaluation layer hands over every instance descending from one real
//! object as an unordered collection. Exporters for hierarchical formats need
//! the opposite shape: for each instance, the previously-seen instance that
//! should become its parent node. Rebuilding that relation after the fact,
//! from nesting paths alone, is what keeps the result independent of the
//! order in which duplication happened to generate the instances.
//!
//! A batch goes through exactly two phases. While it is an [`InstanceBatch`],
//! instances can be recorded but nothing can be queried; calling
//! [`InstanceBatch::finish`] seals the lookup structures and produces an
//! [`InstanceHierarchy`], which answers queries but accepts no further
//! instances. The phase split is encoded in the types so a half-built batch
//! can never be queried by accident.

mod error;
mod record;
mod resolver;

pub use error::RegisterError;
pub use record::InstanceRecord;
pub use resolver::{InstanceBatch, InstanceHierarchy};
