//! # MOSAIC Shared Types
//!
//! Common vocabulary for every window process:
//! - 2D math in screen coordinates
//! - Window geometry and the peer roster element
//! - Visual object kinds and styles
//! - Startup configuration
//!
//! ## ARCHITECT'S RULE
//!
//! Nothing in this crate may depend on the registry or the rendering
//! surface. Both sides of the system speak these types; neither owns them.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod constants;
pub mod math;
pub mod visual;
pub mod window;

pub use config::{ConfigError, EngineConfig, ViewportConfig};
pub use math::Vec2;
pub use visual::{Color, ObjectHandle, ObjectKind, ObjectStyle};
pub use window::{PeerWindow, WindowId, WindowMetadata, WindowShape};
