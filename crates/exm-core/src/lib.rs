//! # exm-core
//!
//! Core types shared across all Examina crates.
//!
//! This crate provides the foundational types for the exam hierarchy
//! (Exam → Section → Topic/Unit → Problem → Translation → Choice):
//! - Entity structs for every level, mirroring the relational rows
//! - Typed integer IDs, one newtype per entity kind
//! - Entity kinds and cascade levels
//! - The read-only exam tree produced by the tree assembler
//! - Cross-cutting error types
//!
//! No I/O happens here. Persistence lives in `exm-db`.

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod selector;
pub mod tree;
