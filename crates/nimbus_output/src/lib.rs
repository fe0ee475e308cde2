//! Deferred outputs for Nimbus (Layer 1).
//!
//! `nimbus_output` provides the values an infrastructure program works with
//! before the orchestration engine has produced them:
//!
//! - [`Resource`] - Opaque identity of a remote resource
//! - [`DependencySet`] - Immutable set of contributing resources
//! - [`OutputData`] - Resolved state: value, knowability, secrecy, dependencies
//! - [`Output`] - Single-assignment asynchronous slot holding an [`OutputData`]
//! - [`OutputTuple`] / [`apply`] - Combining several outputs into one
//!
//! # Propagation Rules
//!
//! Every combinator derives the metadata of its result from its inputs:
//!
//! - **Known**: AND over the inputs. Transforms never run on unknown values.
//! - **Secret**: OR over the inputs. Only [`Output::unsecret`] lowers it.
//! - **Dependencies**: exact union of the inputs' sets.
//!
//! The rules are exposed as [`merge_known`], [`merge_secret`] and
//! [`merge_dependencies`].
//!
//! # Architecture
//!
//! This crate is Layer 1 of the Nimbus architecture:
//!
//! - **Layer 1** (`nimbus_output`): Outputs and resource identity (this crate)
//! - **Layer 2** (`nimbus_resource`): Resource references and stand-in resources

mod data;
mod dependencies;
mod error;
mod output;
mod resource;
mod tuple;

pub use data::{OutputData, merge_dependencies, merge_known, merge_secret};
pub use dependencies::DependencySet;
pub use error::{BoxError, OutputError};
pub use output::{Output, OutputFuture, OutputResolver, OutputResult, OutputValue};
pub use resource::{Resource, ResourceId};
pub use tuple::{OutputTuple, all, apply};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::{
        DependencySet, Output, OutputData, OutputError, OutputTuple, Resource, all, apply,
    };
}
