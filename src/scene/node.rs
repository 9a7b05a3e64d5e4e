use crate::math::Point3;
use crate::source::PointSource;
use crate::tessellation::MeshDescriptor;

slotmap::new_key_type! {
    /// Unique identifier for a node in the scene.
    pub struct NodeId;
}

/// A set of user-placed control points.
#[derive(Debug, Clone, Default)]
pub struct MarkupsData {
    /// Display name of the node.
    pub name: String,
    /// Control points in placement order.
    pub points: Vec<Point3>,
}

impl MarkupsData {
    /// Creates an empty markups node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }
}

impl PointSource for MarkupsData {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> usize {
        self.points.len()
    }

    fn point_at(&self, index: usize) -> Option<Point3> {
        self.points.get(index).copied()
    }
}

/// A container for generated surface geometry.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    /// Display name of the node.
    pub name: String,
    /// The current mesh and its display style, if any was stored.
    pub descriptor: Option<MeshDescriptor>,
}

impl ModelData {
    /// Creates an empty model node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: None,
        }
    }
}

/// Data held by a scene node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Point annotations.
    Markups(MarkupsData),
    /// Surface geometry.
    Model(ModelData),
}

impl NodeData {
    /// Returns the node's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Markups(m) => &m.name,
            Self::Model(m) => &m.name,
        }
    }
}
