//! Inventory item records.
//!
//! An [`InventoryItem`] is one referenceable object: its name, the
//! domain/role pair classifying it, and the URI where its documentation
//! lives. Items know how to render themselves as one line of the
//! `objects.inv` body text.

/// A single documented object registered in an inventory.
///
/// Fields are stored exactly as given: no charset or whitespace validation
/// is performed. The line format is space-delimited, so `name`, `domain`,
/// `role`, `priority` and `uri` must not contain spaces or newlines;
/// `dispname` is the final field and may contain spaces. Keeping the
/// content well-formed is the caller's responsibility.
///
/// # Example
///
/// ```
/// use objinv_core::InventoryItem;
///
/// let item = InventoryItem::new("mod.Class", "py", "class", "page/#mod.Class");
/// assert_eq!(item.sphinx_line(), "mod.Class py:class 1 page/$ -");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    /// The object name; unique key within an inventory
    pub name: String,
    /// The object domain, like `py` or `rs`
    pub domain: String,
    /// The object role within its domain, like `class` or `method`
    pub role: String,
    /// The object URI, optionally carrying a `#fragment` anchor
    pub uri: String,
    /// Ranking hint consumers use for fuzzy match suggestions
    pub priority: String,
    /// Display name shown instead of `name`; `-` means "same as name"
    pub dispname: String,
}

impl InventoryItem {
    /// Default priority assigned to new items
    pub const DEFAULT_PRIORITY: &'static str = "1";

    /// Display-name placeholder meaning "same as the object name"
    pub const DEFAULT_DISPNAME: &'static str = "-";

    /// Creates a new item with default priority and display name
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        role: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            role: role.into(),
            uri: uri.into(),
            priority: Self::DEFAULT_PRIORITY.to_string(),
            dispname: Self::DEFAULT_DISPNAME.to_string(),
        }
    }

    /// Sets the priority hint
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets the display name
    pub fn dispname(mut self, dispname: impl Into<String>) -> Self {
        self.dispname = dispname.into();
        self
    }

    /// Formats this item as one line of a Sphinx v2 inventory body.
    ///
    /// The line layout is `name domain:role priority uri dispname`, single
    /// space delimited. When the URI ends with a fragment anchor equal to
    /// the object's own name (the literal suffix `#name`), that suffix is
    /// collapsed to the single character `$`, the standard abbreviation
    /// that lets readers reconstruct the anchor from the name. A trailing
    /// `name` not immediately preceded by `#` is left alone.
    pub fn sphinx_line(&self) -> String {
        let uri = match self
            .uri
            .strip_suffix(self.name.as_str())
            .and_then(|rest| rest.strip_suffix('#'))
        {
            Some(prefix) => format!("{prefix}$"),
            None => self.uri.clone(),
        };
        format!(
            "{} {}:{} {} {} {}",
            self.name, self.domain, self.role, self.priority, uri, self.dispname
        )
    }
}
