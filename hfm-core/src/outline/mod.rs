//! Project outline model
//!
//! The outline is the tree of project items shown in the window's sidebar.
//! Selecting an item in it decides which editor and playground the window
//! shows.
//!
//! # Module Structure
//!
//! - `types` - Item identity and kind (`ItemId`, `ItemKind`, `EditorKind`, `SelectedItem`)
//! - `model` - The `OutlineModel` trait, `ProjectOutline` and `SharedOutline`
//! - `fixture` - Serde description used to build outlines in tests and the CLI
//! - `error` - Error types (`OutlineError`)
//!
//! # Example
//!
//! ```
//! use hfm_core::outline::{ItemKind, OutlineModel, ProjectOutline};
//!
//! let mut outline = ProjectOutline::new("demo");
//! let root = outline.root_id();
//! let main = outline
//!     .add_item(root, "Main.hs", ItemKind::Module, Some("Main.hs".into()))
//!     .unwrap();
//!
//! let selected = outline.resolve(main).unwrap();
//! assert!(selected.has_playground());
//!
//! outline.remove_item(main).unwrap();
//! assert!(outline.resolve(main).is_none());
//! ```

mod error;
mod fixture;
mod model;
mod types;

pub use error::{OutlineError, OutlineResult};
pub use fixture::{FixtureItem, OutlineFixture};
pub use model::{OutlineModel, OutlineRow, ProjectItem, ProjectOutline, SharedOutline};
pub use types::{EditorKind, ItemId, ItemKind, SelectedItem};
