//! # dirview-console
//!
//! Presentation layer of the directory console. The page is modelled as an
//! owned element tree; components render into it and a [`ConsoleContext`]
//! wires them to the backend.
//!
//! ## Modules
//!
//! - [`dom`] - Element tree and HTML rendering
//! - [`tree`] - Lazily expanded directory tree
//! - [`panels`] - Results and details panels
//! - [`status`] - Connection status indicator
//! - [`logs`] - Command history feed
//! - [`alerts`] - Alert banners and spinner
//! - [`sequence`] - Per-panel request sequencing
//! - [`page`] - Whole-page view state
//! - [`context`] - The console context, pollers and timers
//!
//! ## Example
//!
//! ```no_run
//! use dirview_console::ConsoleContext;
//! use dirview_core::config::ConsoleConfig;
//!
//! # async fn example() -> dirview_core::Result<()> {
//! let console = ConsoleContext::connect(ConsoleConfig::new("http://localhost:5000")?)?;
//! console.initialize().await?;
//! console.start();
//! println!("{}", console.render_page());
//! console.teardown();
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alerts;
pub mod context;
pub mod dom;
pub mod icons;
pub mod logs;
pub mod page;
pub mod panels;
pub mod sequence;
pub mod status;
pub mod tree;

pub use context::{ClickOutcome, ConsoleContext};
pub use page::Page;
pub use tree::NodePath;

/// Convenient result alias that reuses the core error type.
pub type Result<T> = dirview_core::Result<T>;
