//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`chart`]: the live throughput line chart (the only stateful data it
//!   touches is read through the registry's visibility flags)
//! - [`series`]: the selectable series sidebar
//! - [`common`]: shared components (header, status bar, help overlay)
//! - [`theme`]: light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` redraws when change events are pending:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────┬───────────────────────────┤
//! │ Series   │                           │
//! │ sidebar  │ Live chart                │
//! │ (series) │ (chart::render)           │
//! ├──────────┴───────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top: common::render_help
//! ```

pub mod chart;
pub mod common;
pub mod series;
pub mod theme;

pub use theme::Theme;
