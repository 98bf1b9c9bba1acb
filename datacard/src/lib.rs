//! Paginated, horizontally scrollable data tables for terminal screens.

pub mod buffer;
pub mod column;
pub mod config;
pub mod error;
pub mod event;
pub mod frame;
pub mod layout;
pub mod menu;
pub mod pagination;
pub mod render;
pub mod row;
pub mod scroll;
pub mod style;
pub mod table;
pub mod text;

pub use buffer::{Buffer, Cell, Paint, Rect};
pub use column::{BadgeStyle, CellContent, CellRenderer, ColumnSpec};
pub use config::TableConfig;
pub use error::TableError;
pub use event::TableEvent;
pub use frame::{FrameBody, FrameRow, MenuOverlay, PaginationBar, TableFrame};
pub use layout::{ColumnSlot, SlotKind, TableLayout};
pub use menu::{MenuCloser, MenuContent, MenuItem};
pub use pagination::{ControlState, NavControl, Pager};
pub use render::{render_table, RenderOptions};
pub use row::{Row, PLACEHOLDER};
pub use scroll::{ScrollMetrics, ScrollThumb};
pub use style::{Rgb, TableTheme, TextStyle, Tone};
pub use table::{LocalPaginatedTable, PageSource, RemotePaginatedTable, TableView};
