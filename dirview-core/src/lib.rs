#![warn(missing_docs)]

//! Core library for dirview => See `dirview` crate.
//!
//! Contains the ordered-list observer protocol and the role-based
//! item model abstraction that views bind to.

/// Contains the [ItemModel](model::ItemModel) trait and [ModelData](model::ModelData).
pub mod model;

/// Contains the [ListObserver](observer::ListObserver) protocol.
pub mod observer;
