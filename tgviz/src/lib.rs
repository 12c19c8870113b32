//! # tgviz
//!
//! Analytics middleware for Telegram bots.
//!
//! This library provides:
//! - An update processor that classifies incoming updates, reports them
//!   to the TGViz API, and gates handler dispatch on the API's decision
//! - A standalone reporting client for hosts that want direct control
//!   over error handling
//! - Configuration management with TOML loading for host applications
//!
//! ## Architecture
//!
//! Reporting is best-effort by design: a failed or slow API call is
//! logged and the bot's own handler still runs. The only exception is
//! synchronous mode, where an explicit `skip_update` decision from the
//! API suppresses the handler.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tgviz::{TgvizConfig, UpdateProcessor};
//!
//! # async fn run() -> tgviz::Result<()> {
//! let processor = UpdateProcessor::new(TgvizConfig::new("tgv_live_xxx"))?;
//!
//! let update: tgviz::Update =
//!     serde_json::from_str(r#"{"update_id": 1, "message": {"text": "hi"}}"#).unwrap();
//!
//! let result = processor
//!     .process_update(update, |update| async move {
//!         // the bot's own handling goes here
//!         update.len()
//!     })
//!     .await;
//! assert!(result.is_some());
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use client::{ApiResponse, BotAction, TgvizClient};
pub use config::{TgvizConfig, DEFAULT_API_URL};
pub use error::{Error, Result};
pub use processor::UpdateProcessor;
pub use update::{EventType, Update};

// Public modules
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod processor;
pub mod update;
