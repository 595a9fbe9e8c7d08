//! # MOSAIC Rendering
//!
//! The concrete rendering surface behind the core's glass wall: an
//! orthographic camera over screen coordinates, a scene graph whose world
//! node carries the canvas offset, and a frame product that is an ordered
//! batch of render commands.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                  FRAME PIPELINE                         │
//! ├────────────────────────────────────────────────────────┤
//! │  Scene Nodes → World Offset → Command Batch → (submit) │
//! │       ↓              ↓              ↓                   │
//! │  Slab reuse    One translation   Slot order kept        │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no GPU here: submission is the host's problem.
//! Everything observable about a frame is in its [`RenderCommand`] batch,
//! which is also exactly what the tests assert against.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod camera;
pub mod scene;
pub mod surface;

pub use camera::OrthographicCamera;
pub use scene::{SceneGraph, SceneNode};
pub use surface::{HeadlessSurface, RenderCommand};
