//! Gantry - build profile manager for Apple platform build pipelines
//!
//! Gantry owns the build-configuration document a pipeline reads before
//! generating an Xcode project: it guarantees the default profile exists at
//! its well-known path and keeps the profile's registry of build steps in
//! sync with the step types compiled into the tool.

pub mod catalog;
pub mod diff;
pub mod error;
pub mod profile;
pub mod steps;
pub mod store;

// Re-exports for convenience
pub use catalog::{closest_name, StepCatalog, StepType};
pub use diff::{diff_documents, DiffResult};
pub use error::{GantryError, GantryResult};
pub use profile::{BuildProfile, ProfileSettings, StepRecord, SyncReport};
pub use steps::builtin_catalog;
pub use store::{parse_profile, render_profile, EnsureReport, ProfileStore, ProfileWarning};
