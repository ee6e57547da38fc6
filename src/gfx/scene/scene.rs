use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::VisualResult;
use crate::gfx::rendering::{RenderBackend, RenderContext};

use super::node::SceneNode;

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Identifier a node records for the scene that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(pub u32);

/// Owns scene nodes and the render context they share
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    context: RenderContext,
    nodes: Vec<SceneNode>,
}

impl Scene {
    /// Creates an empty scene with a process-unique id
    pub fn new(context: RenderContext) -> Self {
        Self {
            id: SceneId(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed)),
            context,
            nodes: Vec::new(),
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Context to hand to [`SceneNode::new`]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Takes ownership of a node and binds it to this scene.
    ///
    /// Nodes that were never finalized are built here. Fails if the node
    /// already belongs to a scene or its build fails.
    pub fn add_node(&mut self, mut node: SceneNode) -> VisualResult<usize> {
        node.set_parent(self.id)?;
        if !node.is_finalized() {
            node.finalize()?;
        }
        let unique = self.ensure_unique_name(node.name());
        node.set_name(unique);

        log::info!(
            "Added {} '{}' to scene {}",
            node.kind(),
            node.name(),
            self.id.0
        );
        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }

    /// Renders every node in insertion order, stopping at the first failure
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> VisualResult<()> {
        for node in &mut self.nodes {
            node.render(backend)?;
        }
        Ok(())
    }

    /// Removes a node, releasing its backend resources first.
    ///
    /// The returned node keeps its parent binding and cannot join another
    /// scene.
    pub fn remove_node(
        &mut self,
        index: usize,
        backend: &mut dyn RenderBackend,
    ) -> Option<SceneNode> {
        if index >= self.nodes.len() {
            return None;
        }
        let mut node = self.nodes.remove(index);
        node.release(backend);
        log::info!("Removed '{}' from scene {}", node.name(), self.id.0);
        Some(node)
    }

    /// Releases and drops every node
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        for node in &mut self.nodes {
            node.release(backend);
        }
        self.nodes.clear();
    }

    // UI helper methods

    /// Gets all node names for UI display
    pub fn get_node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.name().to_string()).collect()
    }

    /// Gets the total number of nodes
    pub fn get_node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_node(&self, index: usize) -> Option<&SceneNode> {
        self.nodes.get(index)
    }

    pub fn get_node_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        self.nodes.get_mut(index)
    }

    /// Finds a node by its (unique) name
    pub fn find_node_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|node| node.name() == name)
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            node_count: self.nodes.len(),
            label_count: self.nodes.iter().map(|n| n.labels().len()).sum(),
            total_triangles: self
                .nodes
                .iter()
                .map(|n| n.buffers().triangle_count())
                .sum(),
            total_vertices: self.nodes.iter().map(|n| n.buffers().vertex_count()).sum(),
        }
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.nodes.iter().any(|node| node.name() == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub label_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}
