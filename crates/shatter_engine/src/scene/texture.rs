//! Texture replacement
//!
//! Repoints every mesh that already has a surface shader at a new one. This
//! is a topology-only edit, so it descends the graph directly instead of
//! going through the matrix-accumulating walker.

use crate::core::config::TraversalLimits;

use super::error::{SceneError, SceneResult};
use super::node::{NodeHandle, SceneGraph, SceneNode, ShaderHandle};

/// Replace the surface shader of every mesh under `root` that has one
///
/// Meshes without a surface shader attribute are left alone. Returns the
/// number of meshes patched; a mesh shared by several groups is patched once
/// per reference.
pub fn replace_texture(
    scene: &mut SceneGraph,
    root: NodeHandle,
    new_shader: ShaderHandle,
    limits: TraversalLimits,
) -> SceneResult<usize> {
    scene.shader(new_shader)?;

    let patched = replace_in(scene, root, new_shader, 0, limits.max_depth)?;
    log::debug!("Replaced surface shader on {} meshes", patched);
    Ok(patched)
}

fn replace_in(
    scene: &mut SceneGraph,
    node: NodeHandle,
    new_shader: ShaderHandle,
    depth: usize,
    max_depth: usize,
) -> SceneResult<usize> {
    match scene.node_mut(node)? {
        SceneNode::Mesh(mesh) => {
            let attributes = mesh.attributes_mut();
            if attributes.has_surface_shader() {
                attributes.surface_shader = Some(new_shader);
                Ok(1)
            } else {
                Ok(0)
            }
        }
        SceneNode::Group(children) => {
            if depth >= max_depth {
                return Err(SceneError::DepthExceeded { max_depth });
            }

            let children = children.clone();
            let mut patched = 0;
            for child in children {
                patched += replace_in(scene, child, new_shader, depth + 1, max_depth)?;
            }
            Ok(patched)
        }
        _ => Ok(0),
    }
}
