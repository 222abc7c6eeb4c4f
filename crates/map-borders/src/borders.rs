//! `Borders`: the inner/outer/center triple that backs a `Lane`.

use map_core::{CoreError, CoreResult, LaneId};

use crate::Border;

/// The inner, outer, and center borders of a single lane.
///
/// All three share `parent_id`; `center`'s `s` parameterization is derived
/// from inner/outer by [`reparameterize_based_on_reference`], not computed
/// independently, so center-line arc-length stays consistent with the
/// lane's own edges.
///
/// [`reparameterize_based_on_reference`]: Border::reparameterize_based_on_reference
#[derive(Debug, Clone)]
pub struct Borders {
    pub inner: Border,
    pub outer: Border,
    pub center: Border,
}

impl Borders {
    /// Construct a `Borders` triple, checking that `inner`, `outer`, and
    /// `center` share the same `parent_id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidInput`] on a parent-id mismatch.
    pub fn new(inner: Border, outer: Border, center: Border) -> CoreResult<Self> {
        if inner.parent_id != outer.parent_id || inner.parent_id != center.parent_id {
            return Err(CoreError::InvalidInput(
                "inner/outer/center borders must share one parent lane id".into(),
            ));
        }
        Ok(Self { inner, outer, center })
    }

    pub fn parent_id(&self) -> LaneId {
        self.inner.parent_id
    }
}
