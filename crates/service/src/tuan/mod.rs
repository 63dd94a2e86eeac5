//! Tuan resource: three-layer architecture (domain, repository, service).
//!
//! `repo` holds the two persistence backends: a JSON document file and Postgres.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use repository::TuanRepository;
pub use service::TuanService;
