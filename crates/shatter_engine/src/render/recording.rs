//! Command-recording backend
//!
//! Implements [`GraphicsBackend`] by logging every call into a command list
//! and computing exact bounds from submitted geometry. Used by tests and by
//! tools that need traversal output without a GPU.

use crate::foundation::math::{Mat4, Point3};
use crate::scene::{Aabb, BoundingSphere};

use super::backend::{BackfaceStyle, BoundsStatus, GeometryView, GraphicsBackend, ShaderBinding};

/// A recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// `push_state`
    PushState,
    /// `pop_state`
    PopState,
    /// `set_backface_style`
    Backface(BackfaceStyle),
    /// `submit_shader`
    Shader(ShaderBinding),
    /// `submit_transform`
    Transform(Mat4),
    /// `reset_transform`
    ResetTransform,
    /// `submit_geometry`
    Geometry {
        /// Submitted point count
        points: usize,
        /// Submitted triangle count
        triangles: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundingPass {
    Box,
    Sphere,
}

/// Backend that records commands instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    viewport: (u32, u32),
    commands: Vec<BackendCommand>,
    transform: Mat4,
    state_depth: usize,
    bounding: Option<BoundingPass>,
    bounded_points: Vec<Point3>,
    retraverse_requests: u32,
    bounding_passes: u32,
}

impl RecordingBackend {
    /// Backend with the given viewport size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            commands: Vec::new(),
            transform: Mat4::identity(),
            state_depth: 0,
            bounding: None,
            bounded_points: Vec::new(),
            retraverse_requests: 0,
            bounding_passes: 0,
        }
    }

    /// Answer `Retraverse` to the next `count` bounding passes
    pub fn with_retraverse_requests(mut self, count: u32) -> Self {
        self.retraverse_requests = count;
        self
    }

    /// Recorded commands (bounding passes are not recorded)
    pub fn commands(&self) -> &[BackendCommand] {
        &self.commands
    }

    /// Forget recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of unmatched `push_state` calls
    pub fn state_depth(&self) -> usize {
        self.state_depth
    }

    /// Number of bounding passes finished so far
    pub fn bounding_passes(&self) -> u32 {
        self.bounding_passes
    }

    /// Number of geometry submissions recorded
    pub fn geometry_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, BackendCommand::Geometry { .. }))
            .count()
    }

    fn begin_bounding(&mut self, pass: BoundingPass) {
        self.bounding = Some(pass);
        self.bounded_points.clear();
    }

    fn finish_bounding<T>(&mut self, build: impl FnOnce(&[Point3]) -> T) -> BoundsStatus<T> {
        self.bounding_passes += 1;
        if self.retraverse_requests > 0 {
            self.retraverse_requests -= 1;
            self.bounded_points.clear();
            return BoundsStatus::Retraverse;
        }

        self.bounding = None;
        let result = build(&self.bounded_points);
        self.bounded_points.clear();
        BoundsStatus::Complete(result)
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl GraphicsBackend for RecordingBackend {
    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn push_state(&mut self) {
        self.state_depth += 1;
        self.commands.push(BackendCommand::PushState);
    }

    fn pop_state(&mut self) {
        if self.state_depth == 0 {
            log::warn!("pop_state without matching push_state");
        }
        self.state_depth = self.state_depth.saturating_sub(1);
        self.commands.push(BackendCommand::PopState);
    }

    fn set_backface_style(&mut self, style: BackfaceStyle) {
        self.commands.push(BackendCommand::Backface(style));
    }

    fn submit_shader(&mut self, shader: ShaderBinding) {
        self.commands.push(BackendCommand::Shader(shader));
    }

    fn submit_transform(&mut self, transform: &Mat4) {
        self.transform = *transform;
        if self.bounding.is_none() {
            self.commands.push(BackendCommand::Transform(*transform));
        }
    }

    fn reset_transform(&mut self) {
        self.transform = Mat4::identity();
        if self.bounding.is_none() {
            self.commands.push(BackendCommand::ResetTransform);
        }
    }

    fn submit_geometry(&mut self, geometry: GeometryView<'_>) {
        if self.bounding.is_some() {
            let transform = self.transform;
            self.bounded_points
                .extend(geometry.points.iter().map(|p| transform.transform_point(p)));
            return;
        }

        self.commands.push(BackendCommand::Geometry {
            points: geometry.points.len(),
            triangles: geometry.triangles.len(),
        });
    }

    fn begin_bounding_box(&mut self) {
        self.begin_bounding(BoundingPass::Box);
    }

    fn end_bounding_box(&mut self) -> BoundsStatus<Aabb> {
        debug_assert_eq!(self.bounding, Some(BoundingPass::Box));
        self.finish_bounding(|points| Aabb::from_points(points.iter().copied()))
    }

    fn begin_bounding_sphere(&mut self) {
        self.begin_bounding(BoundingPass::Sphere);
    }

    fn end_bounding_sphere(&mut self) -> BoundsStatus<BoundingSphere> {
        debug_assert_eq!(self.bounding, Some(BoundingPass::Sphere));
        self.finish_bounding(BoundingSphere::enclosing)
    }
}
