//! Bounding volumes and object radius
//!
//! Bounding boxes and spheres are computed by the graphics backend: the
//! subtree is submitted inside a bounding pass and the backend accumulates
//! the result, re-running the pass once if it asks for it. The object radius
//! is computed here by walking every mesh point through the working matrix.

use crate::core::config::TraversalLimits;
use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::render::{BoundsStatus, GraphicsBackend};

use super::error::{SceneError, SceneResult};
use super::mesh::TriMesh;
use super::node::{NodeHandle, SceneGraph};
use super::traversal::{SceneVisitor, SceneWalker};

/// Passes submitted before giving up on a backend that keeps retraversing
const MAX_BOUNDING_PASSES: u32 = 2;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any point will expand
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Smallest box containing all points (empty if there are none)
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Self {
        points.into_iter().fold(Self::empty(), |mut aabb, p| {
            aabb.extend(&p);
            aabb
        })
    }

    /// Whether no point has been added
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to include `point`
    pub fn extend(&mut self, point: &Point3) {
        self.min = self.min.inf(&point.coords);
        self.max = self.max.sup(&point.coords);
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
}

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere centre
    pub center: Vec3,
    /// Sphere radius
    pub radius: f32,
    /// No geometry contributed
    pub is_empty: bool,
}

impl BoundingSphere {
    /// Sphere around `center`
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius, is_empty: false }
    }

    /// Sphere centred on the points' box, reaching the farthest point
    pub fn enclosing(points: &[Point3]) -> Self {
        let aabb = Aabb::from_points(points.iter().copied());
        if aabb.is_empty() {
            return Self { center: Vec3::zeros(), radius: 0.0, is_empty: true };
        }

        let center = aabb.center();
        let radius = points
            .iter()
            .map(|p| (p.coords - center).norm())
            .fold(0.0_f32, f32::max);
        Self::new(center, radius)
    }
}

/// Submits each mesh with its world matrix
struct SubmitVisitor<'b, B: GraphicsBackend + ?Sized> {
    backend: &'b mut B,
    submitted: usize,
}

impl<B: GraphicsBackend + ?Sized> SceneVisitor for SubmitVisitor<'_, B> {
    fn on_mesh(&mut self, _node: NodeHandle, mesh: &TriMesh, work: &Mat4) -> SceneResult<()> {
        self.backend.submit_transform(work);
        self.backend.submit_geometry(mesh.view());
        self.backend.reset_transform();
        self.submitted += 1;
        Ok(())
    }
}

/// Submit every mesh under `root` to the backend with its accumulated transform
///
/// Returns the number of meshes submitted.
pub fn submit_scene<B: GraphicsBackend + ?Sized>(
    scene: &SceneGraph,
    root: NodeHandle,
    backend: &mut B,
    limits: TraversalLimits,
) -> SceneResult<usize> {
    let mut visitor = SubmitVisitor { backend, submitted: 0 };
    SceneWalker::new(scene.nodes(), limits).walk(root, &mut visitor)?;
    Ok(visitor.submitted)
}

fn bounding_pass<B, T>(
    scene: &SceneGraph,
    root: NodeHandle,
    backend: &mut B,
    limits: TraversalLimits,
    begin: fn(&mut B),
    end: fn(&mut B) -> BoundsStatus<T>,
) -> SceneResult<T>
where
    B: GraphicsBackend + ?Sized,
{
    begin(backend);
    for pass in 1..=MAX_BOUNDING_PASSES {
        submit_scene(scene, root, backend, limits)?;
        match end(backend) {
            BoundsStatus::Complete(bounds) => return Ok(bounds),
            BoundsStatus::Retraverse => log::debug!("Bounding pass {} asked for retraverse", pass),
        }
    }

    Err(SceneError::BoundsNotConverged { passes: MAX_BOUNDING_PASSES })
}

/// Exact axis-aligned bounds of the subtree, computed by the backend
pub fn calc_bounding_box<B: GraphicsBackend + ?Sized>(
    scene: &SceneGraph,
    root: NodeHandle,
    backend: &mut B,
    limits: TraversalLimits,
) -> SceneResult<Aabb> {
    bounding_pass(scene, root, backend, limits, B::begin_bounding_box, B::end_bounding_box)
}

/// Exact bounding sphere of the subtree, computed by the backend
pub fn calc_bounding_sphere<B: GraphicsBackend + ?Sized>(
    scene: &SceneGraph,
    root: NodeHandle,
    backend: &mut B,
    limits: TraversalLimits,
) -> SceneResult<BoundingSphere> {
    bounding_pass(scene, root, backend, limits, B::begin_bounding_sphere, B::end_bounding_sphere)
}

struct RadiusVisitor {
    max_radius: f32,
}

impl SceneVisitor for RadiusVisitor {
    fn on_mesh(&mut self, _node: NodeHandle, mesh: &TriMesh, work: &Mat4) -> SceneResult<()> {
        for point in mesh.points() {
            let distance = work.transform_point(point).coords.norm();
            if distance > self.max_radius {
                self.max_radius = distance;
            }
        }
        Ok(())
    }
}

/// Distance from the origin to the farthest transformed mesh vertex
///
/// Returns 0.0 when the subtree holds no meshes.
pub fn calc_object_radius(scene: &SceneGraph, root: NodeHandle, limits: TraversalLimits) -> SceneResult<f32> {
    let mut visitor = RadiusVisitor { max_radius: 0.0 };
    SceneWalker::new(scene.nodes(), limits).walk(root, &mut visitor)?;
    Ok(visitor.max_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;
    use crate::render::RecordingBackend;
    use crate::scene::test_support::{mesh_with_points, unit_triangle};
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points([Point3::new(-1.0, 2.0, 0.0), Point3::new(3.0, -4.0, 1.0)]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 2.0, 1.0));
        assert!(aabb.contains_point(Vec3::zeros()));
        assert!(Aabb::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_radius_is_max_transformed_distance() {
        let mut scene = SceneGraph::new();
        let near = scene.add_mesh(mesh_with_points(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]));
        let shift = scene.add_transform(Mat4::translation(&Vec3::new(3.0, 0.0, 0.0)));
        let scale = scene.add_transform(Mat4::uniform_scale(2.0));
        let far = scene.add_mesh(mesh_with_points(&[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]]));
        let branch = scene.add_group(vec![shift, scale, far]).unwrap();
        let root = scene.add_group(vec![near, branch]).unwrap();

        // farthest point: (1,0,0) scaled to (2,0,0) then shifted to (5,0,0)
        let radius = calc_object_radius(&scene, root, TraversalLimits::default()).unwrap();
        assert_relative_eq!(radius, 5.0);
    }

    #[test]
    fn test_radius_of_empty_group_is_zero() {
        let mut scene = SceneGraph::new();
        let root = scene.add_group(Vec::new()).unwrap();
        assert_eq!(calc_object_radius(&scene, root, TraversalLimits::default()).unwrap(), 0.0);
    }

    #[test]
    fn test_radius_ignores_transform_after_group_exit() {
        let mut scene = SceneGraph::new();
        let scale = scene.add_transform(Mat4::uniform_scale(10.0));
        let inner = scene.add_group(vec![scale]).unwrap();
        let mesh = scene.add_mesh(unit_triangle());
        let root = scene.add_group(vec![inner, mesh]).unwrap();

        let radius = calc_object_radius(&scene, root, TraversalLimits::default()).unwrap();
        assert_relative_eq!(radius, 1.0);
    }

    #[test]
    fn test_bounding_box_via_backend() {
        let mut scene = SceneGraph::new();
        let shift = scene.add_transform(Mat4::translation(&Vec3::new(0.0, 5.0, 0.0)));
        let mesh = scene.add_mesh(unit_triangle());
        let root = scene.add_group(vec![shift, mesh]).unwrap();

        let mut backend = RecordingBackend::default();
        let aabb = calc_bounding_box(&scene, root, &mut backend, TraversalLimits::default()).unwrap();

        assert_relative_eq!(aabb.min, Vec3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(aabb.max, Vec3::new(1.0, 6.0, 0.0));
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn test_bounding_sphere_retraverses_once() {
        let mut scene = SceneGraph::new();
        let mesh = scene.add_mesh(mesh_with_points(&[[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]));

        let mut backend = RecordingBackend::default().with_retraverse_requests(1);
        let sphere = calc_bounding_sphere(&scene, mesh, &mut backend, TraversalLimits::default()).unwrap();

        assert_eq!(backend.bounding_passes(), 2);
        assert_relative_eq!(sphere.radius, 1.0);
        assert_relative_eq!(sphere.center, Vec3::zeros());
    }

    #[test]
    fn test_bounding_gives_up_after_second_retraverse() {
        let mut scene = SceneGraph::new();
        let mesh = scene.add_mesh(unit_triangle());

        let mut backend = RecordingBackend::default().with_retraverse_requests(5);
        let err = calc_bounding_box(&scene, mesh, &mut backend, TraversalLimits::default()).unwrap_err();
        assert_eq!(err, SceneError::BoundsNotConverged { passes: 2 });
    }

    #[test]
    fn test_submit_scene_wraps_each_mesh_in_transform() {
        let mut scene = SceneGraph::new();
        let a = scene.add_mesh(unit_triangle());
        let b = scene.add_mesh(unit_triangle());
        let root = scene.add_group(vec![a, b]).unwrap();

        let mut backend = RecordingBackend::default();
        let submitted = submit_scene(&scene, root, &mut backend, TraversalLimits::default()).unwrap();

        assert_eq!(submitted, 2);
        assert_eq!(backend.geometry_count(), 2);
        assert_eq!(backend.commands().len(), 6);
    }
}
