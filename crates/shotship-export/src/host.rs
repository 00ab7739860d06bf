//! Host item/tag model boundary.

use shotship_models::{ProvenanceTag, TagId};

use crate::error::ExportResult;

/// Tag storage on a host-owned item.
///
/// The host's registry historically reused a prior tag instance when a tag
/// of the same name already existed, carrying stale metadata across jobs.
/// This boundary takes a fully built [`ProvenanceTag`] instead, so the host
/// side only ever stores a fresh, complete record.
pub trait TagStore {
    /// Attach the tag to the item and return the stable identifier the host
    /// assigns to the attached instance.
    fn attach_tag(&mut self, tag: ProvenanceTag) -> ExportResult<TagId>;
}
