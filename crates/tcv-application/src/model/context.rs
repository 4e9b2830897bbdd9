//! Per-case context available to fixtures

/// Describes the test method a case scope was created for
///
/// Registered in every case scope, so fixtures can resolve it like any other
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContext {
    class_name: String,
    method_name: String,
}

impl TestContext {
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
        }
    }

    /// Name of the test class being executed
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Name of the test method being executed
    pub fn method_name(&self) -> &str {
        &self.method_name
    }
}
