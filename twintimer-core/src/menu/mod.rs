//! Menu model, renderer capability and navigation engine

pub mod field;
pub mod model;
pub mod navigation;
pub mod renderer;

pub use field::{Direction, FieldKind, FieldText, Label, DAY_NAMES};
pub use model::{Menu, MenuItem, MAX_ITEMS};
pub use navigation::{EditMode, MenuSystem, MAX_MENUS};
pub use renderer::MenuRenderer;
