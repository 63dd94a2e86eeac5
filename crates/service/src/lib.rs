//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access (`tuan::repository`).
//! - Reuses field validation and the table definition in the `models` crate.
//! - Surfaces failures as `ServiceError`, each carrying its HTTP status.

pub mod errors;
pub mod pagination;
pub mod storage;
pub mod tuan;
#[cfg(test)]
pub mod test_support;
