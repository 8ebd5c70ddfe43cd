//! Target and module descriptors.
//!
//! - [`types`] - Descriptor data types
//! - [`store`] - The [`DescriptorSet`] store and project file loading
//! - [`validate`] - Whole-set consistency checks

pub mod store;
mod types;
pub mod validate;

pub use store::{DescriptorError, DescriptorSet};
pub use types::*;
