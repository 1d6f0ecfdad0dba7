//! Shatter demo
//!
//! Builds a small ship-like scene, runs every scene operation on it, then
//! blows it up and simulates the debris for a few seconds against a
//! recording backend, logging what happens.

use std::time::Duration;

use shatter_engine::foundation::logging;
use shatter_engine::prelude::*;
use shatter_engine::scene::{textured_quad, ShaderHandle, ShaderKind, TextureId};

const CONFIG_PATH: &str = "shatter_demo.toml";
const SIMULATED_SECONDS: f32 = 4.0;
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Octahedron of the given radius with outward normals and planar UVs
fn octahedron(radius: f32) -> Result<TriMesh, SceneError> {
    let points = vec![
        Point3::new(radius, 0.0, 0.0),
        Point3::new(-radius, 0.0, 0.0),
        Point3::new(0.0, radius, 0.0),
        Point3::new(0.0, -radius, 0.0),
        Point3::new(0.0, 0.0, radius),
        Point3::new(0.0, 0.0, -radius),
    ];
    let normals = points.iter().map(|p| p.coords.normalize()).collect();
    let uvs = points
        .iter()
        .map(|p| Vec2::new(p.x / radius * 0.5 + 0.5, p.y / radius * 0.5 + 0.5))
        .collect();
    let triangles = vec![
        [0, 2, 4], [2, 1, 4], [1, 3, 4], [3, 0, 4],
        [2, 0, 5], [1, 2, 5], [3, 1, 5], [0, 3, 5],
    ];
    TriMesh::new(points, normals, Some(uvs), triangles)
}

struct DemoScene {
    scene: SceneGraph,
    root: NodeHandle,
    hull_texture: ShaderHandle,
    scorched_texture: ShaderHandle,
}

fn build_scene() -> Result<DemoScene, SceneError> {
    let mut scene = SceneGraph::new();
    let hull_texture = scene.add_shader(Shader::surface(TextureId(1)));
    let scorched_texture = scene.add_shader(Shader::surface(TextureId(2)));
    let lit = scene.add_shader(Shader::of_kind(ShaderKind::Illumination));

    let hull = octahedron(40.0)?.with_attributes(AttributeSet {
        surface_shader: Some(hull_texture),
        diffuse_color: Some(Vec3::new(0.8, 0.8, 0.9)),
    });
    let wing = octahedron(15.0)?.with_attributes(AttributeSet {
        surface_shader: None,
        diffuse_color: Some(Vec3::new(0.9, 0.2, 0.1)),
    });

    let lit_node = scene.add_shader_node(lit)?;
    let hull = scene.add_mesh(hull);
    let wing = scene.add_mesh(wing);

    let left_offset = scene.add_transform(Mat4::translation(&Vec3::new(-55.0, 0.0, 0.0)));
    let left = scene.add_group(vec![left_offset, wing])?;
    let right_offset = scene.add_transform(Mat4::translation(&Vec3::new(55.0, 0.0, 0.0)));
    let right = scene.add_group(vec![right_offset, wing])?;

    let badge = textured_quad(&mut scene, hull_texture, 1.5)?;
    let badge_offset = scene.add_transform(Mat4::scale_rotate_translate(
        10.0,
        &Vec3::zeros(),
        &Vec3::new(0.0, 45.0, 0.0),
    ));
    let badge = scene.add_group(vec![badge_offset, badge.group])?;

    let placement = scene.add_transform(Mat4::translation(&Vec3::new(0.0, 200.0, -300.0)));
    let root = scene.add_group(vec![placement, lit_node, hull, left, right, badge])?;

    Ok(DemoScene {
        scene,
        root,
        hull_texture,
        scorched_texture,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting shatter demo");

    let config = EngineConfig::load_or_default(CONFIG_PATH)?;
    config.validate()?;
    let limits = config.traversal;

    let DemoScene {
        mut scene,
        root,
        hull_texture,
        scorched_texture,
    } = build_scene()?;
    log::info!("Scene built with {} nodes", scene.node_count());

    let mut backend = RecordingBackend::new(1024, 768);

    let radius = calc_object_radius(&scene, root, limits)?;
    let aabb = calc_bounding_box(&scene, root, &mut backend, limits)?;
    let sphere = calc_bounding_sphere(&scene, root, &mut backend, limits)?;
    log::info!(
        "Radius {:.1}, box {:?} .. {:?}, sphere r={:.1}",
        radius,
        aabb.min,
        aabb.max,
        sphere.radius
    );

    let scrolled = scroll_uvs(&mut scene, root, 0.25, 0.0, ShaderSelector::All, limits)?;
    log::info!("UV scroll touched {}/{} surface shaders", scrolled.applied, scrolled.matched);
    log::debug!(
        "Hull UV transform: {:?}",
        scene.shader(hull_texture)?.uv_transform
    );

    let patched = replace_texture(&mut scene, root, scorched_texture, limits)?;
    log::info!("Scorched texture applied to {} meshes", patched);

    // last child first: badge is mesh 0, the shared wing meshes 1 and 2, the hull mesh 3
    let masked = for_each_mesh(&mut scene, root, 0b1010, limits.max_depth, clear_diffuse_color)?;
    log::info!("Cleared diffuse colour on {} of {} meshes", masked.invoked, masked.meshes_found);

    let mut pool = ParticlePool::new();
    let params = ExplosionParams::new(600.0, 0.4)
        .with_mode(ParticleMode::BOUNCE | ParticleMode::UPTHRUST)
        .with_density(1);
    let report = explode(&scene, root, &mut pool, &params, limits, &mut rand::thread_rng())?;
    log::info!(
        "Explosion spawned {} particles ({} dropped), pool {}/{}",
        report.spawned,
        report.dropped,
        pool.live_count(),
        pool.capacity()
    );

    let simulator = ParticleSimulator::new(config.simulation);
    let renderer = ParticleRenderer::new();
    let mut clock = FrameClock::new(config.frame);
    let mut elapsed = 0.0;
    let mut previous = None;

    while elapsed < SIMULATED_SECONDS && pool.live_count() > 0 {
        let dt = clock.advance(previous);
        previous = Some(FRAME_TIME);
        elapsed += dt;

        let step = simulator.step(&mut pool, dt, &NoTerrain);
        backend.clear();
        let drawn = renderer.draw(&pool, &mut backend);

        if clock.frame_count() % 30 == 0 || step.expired + step.grounded > 0 {
            log::info!(
                "t={:.2}s live={} drawn={} expired={} grounded={}",
                elapsed,
                pool.live_count(),
                drawn,
                step.expired,
                step.grounded
            );
        }
    }

    log::info!(
        "Demo finished after {} frames with {} particles left",
        clock.frame_count(),
        pool.live_count()
    );
    Ok(())
}
