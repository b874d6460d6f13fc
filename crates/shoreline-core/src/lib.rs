//! Shoreline Core Types and Definitions
//!
//! This crate provides the foundational types for the Shoreline beach guide.
//! It includes:
//!
//! - **Identifiers**: String-interned section identifiers ([`identifier::SectionId`])
//! - **Geometry**: Vertical page extents ([`geometry`] module)
//! - **Observation**: Visibility records and observer options ([`observation`] module)
//! - **Catalog**: The curated beaches and the page's sections ([`catalog`] module)

pub mod catalog;
pub mod geometry;
pub mod identifier;
pub mod observation;
