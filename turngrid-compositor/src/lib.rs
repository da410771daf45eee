//! Grid compositing for turngrid render batches
//!
//! This crate lays out ordered image sequences into balanced one- or two-row
//! grids and composites them onto a single canvas. It also provides the
//! batch-facing pieces around that core: render-directory scanning,
//! content-aware cropping, and flat image collection.

pub mod collect;
pub mod composite;
pub mod crop;
pub mod layout;
pub mod scan;

pub use collect::*;
pub use composite::*;
pub use crop::*;
pub use layout::*;
pub use scan::*;
