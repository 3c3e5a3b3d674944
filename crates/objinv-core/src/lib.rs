//! # objinv-core
//!
//! A library for building documentation cross-reference inventories and
//! serializing them in the Sphinx `objects.inv` format.
//!
//! This crate provides the core functionality for:
//! - Registering documented objects (name, domain, role, URI) as inventory
//!   items
//! - Rendering items into the space-delimited inventory line format,
//!   including the `$` anchor abbreviation
//! - Encoding the whole inventory into the version-2 artifact: a plain-text
//!   header followed by a zlib-compressed body
//!
//! The library produces bytes only; deciding which objects exist and writing
//! the artifact to storage belong to the caller.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`inventory`]: The inventory model and its item records
//! - [`sphinx`]: Artifact encoding
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use objinv_core::Inventory;
//!
//! let mut inv = Inventory::new("mkdocstrings", "0.18.0");
//! inv.register(
//!     "mkdocstrings.extension",
//!     "py",
//!     "module",
//!     "reference/extension/#mkdocstrings.extension",
//! );
//!
//! // Hand these bytes to whatever writes objects.inv at the site root.
//! let artifact = inv.format_sphinx()?;
//! # Ok::<(), objinv_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod inventory;
pub mod sphinx;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use inventory::{Inventory, InventoryItem};
pub use sphinx::BodyEncoding;

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
