#![forbid(unsafe_code)]

//! Kinfolk public facade crate.
//!
//! [`Editor`] is one editing session: a [`Family`], the [`Scene`] projected
//! from it, the drag-reorder controller, and the viewport. Collaborators
//! (forms, menus, file dialogs, pointer input) call the editor; the editor
//! performs the store edit and immediately pumps the resulting events into
//! the scene.
//!
//! The component crates are re-exported under short names, and
//! [`prelude`] collects the everyday types.

use std::fmt;

pub mod config;
pub mod editor;

pub use config::EditorConfig;
pub use editor::Editor;

// --- Re-exports ------------------------------------------------------------

pub use kinfolk_core::{FamilyEvent, Person, PersonId, Point, Rect};
pub use kinfolk_layout::{LayoutMetrics, MetricsError, Placement, TreeLayout};
pub use kinfolk_scene::{
    DragState, ReorderController, Scene, SceneStyle, SvgRenderer, Viewport, Visual,
};
pub use kinfolk_store::{DocumentError, Family, FamilyObserver, StoreError};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Kinfolk sessions.
#[derive(Debug)]
pub enum Error {
    /// A structural edit was rejected by the store.
    Store(StoreError),
    /// A family document could not be read.
    Document(DocumentError),
    /// Layout metrics failed validation.
    Metrics(MetricsError),
    /// An editor configuration could not be parsed.
    Config(serde_json::Error),
    /// File I/O failed.
    Io(std::io::Error),
    /// The action needs a selected person.
    NoSelection,
    /// Saving without a path before any file was loaded or saved.
    NoPath,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Document(err) => write!(f, "{err}"),
            Self::Metrics(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid editor configuration: {err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::NoSelection => write!(f, "no person is selected"),
            Self::NoPath => write!(f, "no file path to save to"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Document(err) => Some(err),
            Self::Metrics(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::NoSelection | Self::NoPath => None,
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<DocumentError> for Error {
    fn from(err: DocumentError) -> Self {
        Self::Document(err)
    }
}

impl From<MetricsError> for Error {
    fn from(err: MetricsError) -> Self {
        Self::Metrics(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for Kinfolk APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Editor, EditorConfig, Error, Family, LayoutMetrics, Person, PersonId, Point, Result,
        Scene, SceneStyle,
    };

    pub use crate::{core, layout, scene, store};
}

pub use kinfolk_core as core;
pub use kinfolk_layout as layout;
pub use kinfolk_scene as scene;
pub use kinfolk_store as store;
