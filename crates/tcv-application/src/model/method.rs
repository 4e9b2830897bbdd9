//! Candidate methods

use super::{FixtureInstance, downcast_fixture};
use crate::ports::TestResult;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::{TypeId, type_name};
use std::fmt;
use std::sync::Arc;
use tcv_domain::{ParameterSet, TagSet};

type MethodBody = Arc<
    dyn Fn(FixtureInstance, ParameterSet) -> tcv_domain::Result<BoxFuture<'static, TestResult>>
        + Send
        + Sync,
>;

/// Marks a method as skipped, with an optional reason
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipMarker {
    pub reason: Option<String>,
}

impl SkipMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

/// A method of a test class, before filtering
///
/// Carries the declarative metadata (tags, exclusion, skip, parameter rows)
/// and the body bound to the fixture type `T` it was declared for.
#[derive(Clone)]
pub struct CandidateMethod {
    name: String,
    tags: TagSet,
    excluded: bool,
    special_name: bool,
    parameter_sets: Vec<ParameterSet>,
    skip: Option<SkipMarker>,
    owner: TypeId,
    owner_name: &'static str,
    body: MethodBody,
}

impl CandidateMethod {
    /// Declare a test method on fixture `T`
    pub fn new<T, F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Arc<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TestResult> + Send + 'static,
    {
        Self::parameterized::<T, _, _>(name, move |fixture, _| body(fixture))
    }

    /// Declare a test method on fixture `T` that receives a parameter row
    ///
    /// Without rows the body runs once with an empty [`ParameterSet`].
    pub fn parameterized<T, F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Arc<T>, ParameterSet) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TestResult> + Send + 'static,
    {
        let body: MethodBody = Arc::new(
            move |instance: FixtureInstance,
                  row: ParameterSet|
                  -> tcv_domain::Result<BoxFuture<'static, TestResult>> {
                let fixture = downcast_fixture::<T>(instance)?;
                Ok(body(fixture, row).boxed())
            },
        );
        Self {
            name: name.into(),
            tags: TagSet::new(),
            excluded: false,
            special_name: false,
            parameter_sets: Vec::new(),
            skip: None,
            owner: TypeId::of::<T>(),
            owner_name: type_name::<T>(),
            body,
        }
    }

    /// Attach one tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Attach several tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags);
        self
    }

    /// Add one parameter row; each row becomes its own test case
    pub fn with_row(mut self, row: ParameterSet) -> Self {
        self.parameter_sets.push(row);
        self
    }

    /// Add several parameter rows
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = ParameterSet>) -> Self {
        self.parameter_sets.extend(rows);
        self
    }

    /// Skip this method without running hooks or body
    pub fn skip(mut self) -> Self {
        self.skip = Some(SkipMarker::new());
        self
    }

    /// Skip this method, reporting `reason`
    pub fn skip_because(mut self, reason: impl Into<String>) -> Self {
        self.skip = Some(SkipMarker::with_reason(reason));
        self
    }

    /// Exclude this method from discovery
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Mark as compiler-generated or otherwise special
    pub fn special_name(mut self) -> Self {
        self.special_name = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub fn is_special_name(&self) -> bool {
        self.special_name
    }

    pub fn parameter_sets(&self) -> &[ParameterSet] {
        &self.parameter_sets
    }

    pub fn skip_marker(&self) -> Option<&SkipMarker> {
        self.skip.as_ref()
    }

    /// Number of test cases this method expands to
    pub fn case_count(&self) -> usize {
        self.parameter_sets.len().max(1)
    }

    /// Type of the fixture this method was declared on
    pub fn owner(&self) -> TypeId {
        self.owner
    }

    pub fn owner_name(&self) -> &'static str {
        self.owner_name
    }

    /// Start the body for one row
    ///
    /// Fails with [`Error::InvalidPlan`](tcv_domain::Error::InvalidPlan) when
    /// `instance` is not the fixture this method was declared on.
    pub fn invoke(
        &self,
        instance: FixtureInstance,
        row: ParameterSet,
    ) -> tcv_domain::Result<BoxFuture<'static, TestResult>> {
        (self.body)(instance, row)
    }
}

impl fmt::Debug for CandidateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateMethod")
            .field("name", &self.name)
            .field("owner", &self.owner_name)
            .field("tags", &self.tags)
            .field("excluded", &self.excluded)
            .field("special_name", &self.special_name)
            .field("parameter_sets", &self.parameter_sets.len())
            .field("skip", &self.skip)
            .finish()
    }
}
