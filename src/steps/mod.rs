//! Built-in build-step types
//!
//! One module per step type. Each defines the typed settings a build
//! pipeline reads out of the step's opaque settings table, plus a
//! `step_type()` constructor whose factory produces the default table.
//!
//! Registration is explicit: `builtin_catalog()` is the table of everything
//! compiled into this binary. Library consumers can register more types on
//! top of it before syncing.

pub mod entitlements;
pub mod frameworks;
pub mod info_plist;
pub mod signing;

use crate::catalog::StepCatalog;

/// Catalog of all built-in step types, in pipeline order.
pub fn builtin_catalog() -> StepCatalog {
    let mut catalog = StepCatalog::new();
    catalog.register(info_plist::step_type());
    catalog.register(entitlements::step_type());
    catalog.register(signing::step_type());
    catalog.register(frameworks::step_type());
    catalog
}
