//! Request extractors applied before handlers run.
//!
//! - [`identity::CallerIdentity`] -- the user a request acts for.

pub mod identity;
