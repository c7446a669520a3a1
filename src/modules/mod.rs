//! Modules layer - Infrastructure components behind the domain services
//!
//! Contains the storage backends the report repository runs on.

pub mod storage;
