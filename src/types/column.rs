//! Column descriptors
//!
//! A column's identity is its `id`, never its position. Headers and accessors
//! come in a literal and a computed flavour; the computed ones cannot be
//! persisted or exported faithfully, which is why header-label matching and the
//! export projection only understand literal headers.

use super::row::GridRow;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Column identifier, unique within one grid instance
pub type ColumnId = String;

/// Column header
#[derive(Clone)]
pub enum Header {
    /// Plain text label
    Label(String),
    /// Label produced at render time
    Render(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Header {
    /// Literal label, if this header is one
    ///
    /// Render-function headers return `None`: they are opaque to preference
    /// resolution and export.
    pub fn label(&self) -> Option<&str> {
        match self {
            Header::Label(label) => Some(label),
            Header::Render(_) => None,
        }
    }

    /// Text to display, invoking the render function when needed
    pub fn display(&self) -> String {
        match self {
            Header::Label(label) => label.clone(),
            Header::Render(render) => render(),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Header::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl From<&str> for Header {
    fn from(label: &str) -> Self {
        Header::Label(label.to_string())
    }
}

impl From<String> for Header {
    fn from(label: String) -> Self {
        Header::Label(label)
    }
}

/// How a column reads its cell value from a row
pub enum Accessor<R> {
    /// Dot-separated field path
    Path(String),
    /// Arbitrary computation over the row
    Compute(Arc<dyn Fn(&R) -> Value + Send + Sync>),
    /// No accessor: structural and stub columns render empty
    None,
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Path(path) => Accessor::Path(path.clone()),
            Accessor::Compute(compute) => Accessor::Compute(Arc::clone(compute)),
            Accessor::None => Accessor::None,
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Accessor::Compute(_) => f.write_str("Compute(..)"),
            Accessor::None => f.write_str("None"),
        }
    }
}

/// Kind of column, as far as the engine cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Regular data column
    Data,
    /// Selection checkbox, row actions, expander
    Structural,
    /// Placeholder for a persisted column that no longer resolves
    Stub,
}

/// Description of one grid column
#[derive(Debug)]
pub struct ColumnDescriptor<R> {
    pub id: ColumnId,
    pub header: Header,
    pub accessor: Accessor<R>,
    /// Initial visibility when no preference says otherwise
    pub visible: bool,
    pub filterable: bool,
    pub can_hide: bool,
    pub kind: ColumnKind,
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        ColumnDescriptor {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            visible: self.visible,
            filterable: self.filterable,
            can_hide: self.can_hide,
            kind: self.kind,
        }
    }
}

impl<R> ColumnDescriptor<R> {
    /// Data column whose accessor is the path equal to its id
    pub fn new(id: &str, header: impl Into<Header>) -> Self {
        ColumnDescriptor {
            id: id.to_string(),
            header: header.into(),
            accessor: Accessor::Path(id.to_string()),
            visible: true,
            filterable: false,
            can_hide: true,
            kind: ColumnKind::Data,
        }
    }

    /// Structural column: never hideable, never filterable, never exported
    pub fn structural(id: &str) -> Self {
        ColumnDescriptor {
            id: id.to_string(),
            header: Header::Label(String::new()),
            accessor: Accessor::None,
            visible: true,
            filterable: false,
            can_hide: false,
            kind: ColumnKind::Structural,
        }
    }

    /// Header-only placeholder for a persisted column that did not resolve
    pub fn stub(id: &str, header: &str) -> Self {
        ColumnDescriptor {
            id: id.to_string(),
            header: Header::Label(header.to_string()),
            accessor: Accessor::None,
            visible: true,
            filterable: false,
            can_hide: true,
            kind: ColumnKind::Stub,
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.accessor = Accessor::Path(path.to_string());
        self
    }

    pub fn compute(mut self, compute: impl Fn(&R) -> Value + Send + Sync + 'static) -> Self {
        self.accessor = Accessor::Compute(Arc::new(compute));
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.can_hide = false;
        self
    }

    pub fn is_stub(&self) -> bool {
        self.kind == ColumnKind::Stub
    }
}

impl<R: GridRow> ColumnDescriptor<R> {
    /// Cell value for `row`; columns without an accessor yield `Null`
    pub fn cell(&self, row: &R) -> Value {
        match &self.accessor {
            Accessor::Path(path) => row.lookup(path).unwrap_or(Value::Null),
            Accessor::Compute(compute) => compute(row),
            Accessor::None => Value::Null,
        }
    }
}
