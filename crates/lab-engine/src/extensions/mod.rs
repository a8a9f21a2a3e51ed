// extensions/mod.rs
//
// Scene hierarchy kept apart from the core Entity/Scene storage.
// Builders opt in by registering local transforms.

pub mod transform;

pub use transform::{TransformGraph, LocalTransform};
