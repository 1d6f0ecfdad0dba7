//! Scene node model
//!
//! Nodes live in a slot-map arena owned by [`SceneGraph`] and refer to one
//! another through `Copy` handles. A group's child list holds handles, not
//! nodes, so the same child may sit under several groups and no traversal
//! ever frees anything: "releasing" a visited child is simply dropping the
//! handle.

use slotmap::SlotMap;

use crate::foundation::math::Mat4;

use super::error::{SceneError, SceneResult};
use super::mesh::TriMesh;
use super::shader::Shader;

slotmap::new_key_type! {
    /// Handle to a node in a [`SceneGraph`]
    pub struct NodeHandle;

    /// Handle to a shader in a [`SceneGraph`]'s shader library
    pub struct ShaderHandle;
}

/// A scene graph node
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// Local transform applied to later siblings and their subtrees
    Transform(Mat4),
    /// Triangle geometry
    Mesh(TriMesh),
    /// Ordered, non-owning list of children
    Group(Vec<NodeHandle>),
    /// Reference to a shared shader
    Shader(ShaderHandle),
    /// Anything traversal does not interpret (lights, styles, ...)
    Other,
}

/// Variant tag of a [`SceneNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`SceneNode::Transform`]
    Transform,
    /// [`SceneNode::Mesh`]
    Mesh,
    /// [`SceneNode::Group`]
    Group,
    /// [`SceneNode::Shader`]
    Shader,
    /// [`SceneNode::Other`]
    Other,
}

impl SceneNode {
    /// Variant tag
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Transform(_) => NodeKind::Transform,
            Self::Mesh(_) => NodeKind::Mesh,
            Self::Group(_) => NodeKind::Group,
            Self::Shader(_) => NodeKind::Shader,
            Self::Other => NodeKind::Other,
        }
    }
}

/// Node storage
#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    nodes: SlotMap<NodeHandle, SceneNode>,
}

impl NodeArena {
    /// Look up a node
    pub fn get(&self, handle: NodeHandle) -> SceneResult<&SceneNode> {
        self.nodes.get(handle).ok_or(SceneError::InvalidNode(handle))
    }

    /// Look up a node mutably
    pub fn get_mut(&mut self, handle: NodeHandle) -> SceneResult<&mut SceneNode> {
        self.nodes.get_mut(handle).ok_or(SceneError::InvalidNode(handle))
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, node: SceneNode) -> NodeHandle {
        self.nodes.insert(node)
    }
}

/// Shader storage
#[derive(Debug, Default, Clone)]
pub struct ShaderLibrary {
    shaders: SlotMap<ShaderHandle, Shader>,
}

impl ShaderLibrary {
    /// Look up a shader
    pub fn get(&self, handle: ShaderHandle) -> SceneResult<&Shader> {
        self.shaders.get(handle).ok_or(SceneError::InvalidShader(handle))
    }

    /// Look up a shader mutably
    pub fn get_mut(&mut self, handle: ShaderHandle) -> SceneResult<&mut Shader> {
        self.shaders.get_mut(handle).ok_or(SceneError::InvalidShader(handle))
    }

    /// Number of shaders
    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}

/// Arena-backed scene graph
#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: NodeArena,
    shaders: ShaderLibrary,
}

impl SceneGraph {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an arbitrary node
    pub fn add_node(&mut self, node: SceneNode) -> NodeHandle {
        self.nodes.insert(node)
    }

    /// Insert a transform node
    pub fn add_transform(&mut self, matrix: Mat4) -> NodeHandle {
        self.add_node(SceneNode::Transform(matrix))
    }

    /// Insert a mesh node
    pub fn add_mesh(&mut self, mesh: TriMesh) -> NodeHandle {
        self.add_node(SceneNode::Mesh(mesh))
    }

    /// Insert a group with the given children
    ///
    /// Children must already exist; a handle may appear in several groups.
    pub fn add_group(&mut self, children: Vec<NodeHandle>) -> SceneResult<NodeHandle> {
        if let Some(&missing) = children.iter().find(|&&child| self.nodes.get(child).is_err()) {
            return Err(SceneError::InvalidNode(missing));
        }
        Ok(self.add_node(SceneNode::Group(children)))
    }

    /// Insert a shader node referencing a library shader
    pub fn add_shader_node(&mut self, shader: ShaderHandle) -> SceneResult<NodeHandle> {
        self.shaders.get(shader)?;
        Ok(self.add_node(SceneNode::Shader(shader)))
    }

    /// Insert a node traversal ignores
    pub fn add_other(&mut self) -> NodeHandle {
        self.add_node(SceneNode::Other)
    }

    /// Add a shader to the library
    pub fn add_shader(&mut self, shader: Shader) -> ShaderHandle {
        self.shaders.shaders.insert(shader)
    }

    /// Append `child` to the end of `group`'s child list
    pub fn add_child(&mut self, group: NodeHandle, child: NodeHandle) -> SceneResult<()> {
        self.nodes.get(child)?;
        match self.nodes.get_mut(group)? {
            SceneNode::Group(children) => {
                children.push(child);
                Ok(())
            }
            _ => Err(SceneError::NotAGroup(group)),
        }
    }

    /// Look up a node
    pub fn node(&self, handle: NodeHandle) -> SceneResult<&SceneNode> {
        self.nodes.get(handle)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, handle: NodeHandle) -> SceneResult<&mut SceneNode> {
        self.nodes.get_mut(handle)
    }

    /// Variant tag of a node
    pub fn kind(&self, handle: NodeHandle) -> SceneResult<NodeKind> {
        self.nodes.get(handle).map(SceneNode::kind)
    }

    /// Children of a group, in insertion order
    pub fn children(&self, handle: NodeHandle) -> SceneResult<&[NodeHandle]> {
        match self.nodes.get(handle)? {
            SceneNode::Group(children) => Ok(children),
            _ => Err(SceneError::NotAGroup(handle)),
        }
    }

    /// Mesh stored at `handle`
    pub fn mesh(&self, handle: NodeHandle) -> SceneResult<&TriMesh> {
        match self.nodes.get(handle)? {
            SceneNode::Mesh(mesh) => Ok(mesh),
            _ => Err(SceneError::NotAMesh(handle)),
        }
    }

    /// Mesh stored at `handle`, mutably
    pub fn mesh_mut(&mut self, handle: NodeHandle) -> SceneResult<&mut TriMesh> {
        match self.nodes.get_mut(handle)? {
            SceneNode::Mesh(mesh) => Ok(mesh),
            _ => Err(SceneError::NotAMesh(handle)),
        }
    }

    /// Look up a library shader
    pub fn shader(&self, handle: ShaderHandle) -> SceneResult<&Shader> {
        self.shaders.get(handle)
    }

    /// Look up a library shader mutably
    pub fn shader_mut(&mut self, handle: ShaderHandle) -> SceneResult<&mut Shader> {
        self.shaders.get_mut(handle)
    }

    /// Node storage
    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    /// Shader storage
    pub fn shaders(&self) -> &ShaderLibrary {
        &self.shaders
    }

    /// Read-only nodes alongside writable shaders
    ///
    /// Lets a traversal walk the node arena while patching shared shaders.
    pub fn split_mut(&mut self) -> (&NodeArena, &mut ShaderLibrary) {
        (&self.nodes, &mut self.shaders)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
