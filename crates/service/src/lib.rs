//! Service layer for the site collection.
//! - `storage` persists the whole collection (JSON file or memory).
//! - `sites` applies validation and the read-modify-write CRUD rules.
//! - Errors are reported through [`errors::ServiceError`].

pub mod errors;
pub mod runtime;
pub mod sites;
pub mod storage;
