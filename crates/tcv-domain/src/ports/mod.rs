//! Ports
//!
//! Contracts the engine consumes without implementing them itself.

pub mod disposal;
pub mod reporting;

pub use disposal::Disposable;
pub use reporting::ResultReporter;
