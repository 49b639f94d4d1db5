//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod acronyms;
pub mod auth;
pub mod categories;
pub mod errors;
pub mod users;

#[cfg(test)]
pub mod test_support;
