//! Candidate model
//!
//! Metadata describing what discovery considers: classes with their
//! methods, and the plan that discovery produces.

pub mod class;
pub mod context;
pub mod method;
pub mod plan;

pub use class::{CandidateClass, ClassBuilder};
pub use context::TestContext;
pub use method::{CandidateMethod, SkipMarker};
pub use plan::{PlanEntry, TestPlan};

use std::any::Any;
use std::sync::Arc;

/// A resolved fixture with its concrete type erased
pub type FixtureInstance = Arc<dyn Any + Send + Sync>;

/// Recover the concrete fixture from an erased instance
pub(crate) fn downcast_fixture<T: Send + Sync + 'static>(
    instance: FixtureInstance,
) -> tcv_domain::Result<Arc<T>> {
    instance.downcast::<T>().map_err(|_| {
        tcv_domain::Error::invalid_plan(format!(
            "fixture instance is not a {}",
            std::any::type_name::<T>()
        ))
    })
}
