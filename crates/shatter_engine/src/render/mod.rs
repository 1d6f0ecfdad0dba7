//! # Rendering interface
//!
//! This crate does not draw anything itself. [`GraphicsBackend`] is the
//! narrow surface it needs from a real renderer (submit geometry, set
//! transform, bind shader, bounding passes), and [`RecordingBackend`] is a
//! GPU-less implementation that records calls for tests and tooling.

pub mod backend;
pub mod recording;

pub use backend::{BackfaceStyle, BoundsStatus, GeometryView, GraphicsBackend, ShaderBinding};
pub use recording::{BackendCommand, RecordingBackend};
