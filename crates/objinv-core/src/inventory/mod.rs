//! Inventory of collected objects.
//!
//! This module provides the in-memory model for a documentation
//! cross-reference inventory: a set of [`InventoryItem`] records keyed by
//! object name, plus the project metadata echoed into the artifact header.
//!
//! Registration order is emission order. The mapping holds at most one item
//! per name; re-registering a name replaces the old record and moves the
//! entry to the end of the emission order.

mod item;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::Result;
use crate::sphinx::{self, BodyEncoding};

pub use item::InventoryItem;

/// Project name used when none is given
pub const DEFAULT_PROJECT: &str = "project";

/// Project version used when none is given
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Inventory of collected objects plus project metadata.
///
/// An `Inventory` is built incrementally while a documentation run collects
/// objects, then serialized once (or more; formatting never mutates it) via
/// [`format_sphinx`](Inventory::format_sphinx). Items are emitted in
/// registration order, so identical registration sequences produce identical
/// artifacts.
///
/// # Example
///
/// ```
/// use objinv_core::Inventory;
///
/// let mut inv = Inventory::new("mkdocstrings", "0.18.0");
/// inv.register(
///     "mkdocstrings.handlers",
///     "py",
///     "module",
///     "reference/handlers/#mkdocstrings.handlers",
/// );
/// let artifact = inv.format_sphinx()?;
/// assert!(artifact.starts_with(b"# Sphinx inventory version 2\n"));
/// # Ok::<(), objinv_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Inventory {
    project: String,
    version: String,
    items: IndexMap<String, InventoryItem>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT, DEFAULT_VERSION)
    }
}

impl Inventory {
    /// Creates an empty inventory with the given project metadata
    pub fn new(project: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            version: version.into(),
            items: IndexMap::new(),
        }
    }

    /// Creates and registers an item with default priority and display name.
    ///
    /// Arguments are stored as-is; nothing is validated. For a non-default
    /// priority or display name, build the [`InventoryItem`] yourself and
    /// pass it to [`insert`](Inventory::insert).
    pub fn register(
        &mut self,
        name: impl Into<String>,
        domain: impl Into<String>,
        role: impl Into<String>,
        uri: impl Into<String>,
    ) {
        self.insert(InventoryItem::new(name, domain, role, uri));
    }

    /// Inserts an item under its name.
    ///
    /// A name that is already registered is overwritten: the old record is
    /// dropped and the new one joins the end of the emission order.
    pub fn insert(&mut self, item: InventoryItem) {
        if self.items.shift_remove(&item.name).is_some() {
            trace!("re-registered '{}', entry moved to end", item.name);
        }
        self.items.insert(item.name.clone(), item);
    }

    /// Returns the item registered under `name`, if any
    pub fn get(&self, name: &str) -> Option<&InventoryItem> {
        self.items.get(name)
    }

    /// Iterates items in emission (registration) order
    pub fn items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.values()
    }

    /// Returns the number of registered items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are registered
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The project name echoed into the artifact header
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The project version echoed into the artifact header
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Formats this inventory as a Sphinx `objects.inv` artifact with the
    /// body compressed using zlib.
    ///
    /// Calling this does not mutate the inventory; formatting the same
    /// state twice yields identical bytes.
    pub fn format_sphinx(&self) -> Result<Vec<u8>> {
        self.format_sphinx_with(BodyEncoding::Zlib)
    }

    /// Formats this inventory with an explicit body encoding
    pub fn format_sphinx_with(&self, encoding: BodyEncoding) -> Result<Vec<u8>> {
        sphinx::encode(self, encoding)
    }
}

impl FromIterator<InventoryItem> for Inventory {
    fn from_iter<T: IntoIterator<Item = InventoryItem>>(iter: T) -> Self {
        let mut inv = Self::default();
        inv.extend(iter);
        inv
    }
}

impl Extend<InventoryItem> for Inventory {
    fn extend<T: IntoIterator<Item = InventoryItem>>(&mut self, iter: T) {
        for item in iter {
            self.insert(item);
        }
    }
}
