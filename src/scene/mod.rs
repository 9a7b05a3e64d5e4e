//! In-memory scene context.
//!
//! The scene owns every markups and model node and is passed explicitly to
//! whoever needs it. Point edits on subscribed markups nodes are queued as
//! [`SceneEvent`]s and handed out per subscription by [`Scene::take_events`]
//! or all at once by [`Scene::drain_events`].

pub mod node;

pub use node::{MarkupsData, ModelData, NodeData, NodeId};

use std::collections::VecDeque;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{OutputError, Result, SceneError};
use crate::math::Point3;
use crate::sink::OutputSink;
use crate::tessellation::MeshDescriptor;

slotmap::new_key_type! {
    /// Unique identifier for a point-change subscription.
    pub struct SubscriptionId;
}

/// A notification queued by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// A control point was added, moved or removed on a subscribed node.
    PointsModified {
        node: NodeId,
        subscription: SubscriptionId,
    },
}

/// Central arena that owns all scene nodes.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, NodeData>,
    order: Vec<NodeId>,
    subscriptions: SlotMap<SubscriptionId, NodeId>,
    events: VecDeque<SceneEvent>,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the scene holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every node, subscription and pending event.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.subscriptions.clear();
        self.events.clear();
    }

    // --- Nodes ---

    fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.order.push(id);
        id
    }

    /// Inserts an empty markups node and returns its ID.
    pub fn add_markups(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(NodeData::Markups(MarkupsData::new(name)))
    }

    /// Inserts an empty model node and returns its ID.
    pub fn add_model(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(NodeData::Model(ModelData::new(name)))
    }

    /// Removes a node together with its subscriptions.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the scene.
    pub fn remove_node(&mut self, id: NodeId) -> Result<NodeData> {
        let data = self
            .nodes
            .remove(id)
            .ok_or_else(|| SceneError::NodeNotFound(format!("{id:?}")))?;
        self.order.retain(|&n| n != id);
        self.subscriptions.retain(|_, &mut node| node != id);
        self.events
            .retain(|event| !matches!(event, SceneEvent::PointsModified { node, .. } if *node == id));
        Ok(data)
    }

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the scene.
    pub fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes
            .get(id)
            .ok_or_else(|| SceneError::NodeNotFound(format!("{id:?}")).into())
    }

    /// Returns the markups data of a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or is not a markups node.
    pub fn markups(&self, id: NodeId) -> Result<&MarkupsData> {
        match self.nodes.get(id) {
            Some(NodeData::Markups(m)) => Ok(m),
            _ => Err(SceneError::NodeNotFound(format!("markups {id:?}")).into()),
        }
    }

    fn markups_mut(&mut self, id: NodeId) -> Result<&mut MarkupsData> {
        match self.nodes.get_mut(id) {
            Some(NodeData::Markups(m)) => Ok(m),
            _ => Err(SceneError::NodeNotFound(format!("markups {id:?}")).into()),
        }
    }

    /// Returns the model data of a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or is not a model node.
    pub fn model(&self, id: NodeId) -> Result<&ModelData> {
        match self.nodes.get(id) {
            Some(NodeData::Model(m)) => Ok(m),
            _ => Err(SceneError::NodeNotFound(format!("model {id:?}")).into()),
        }
    }

    /// Returns the earliest-inserted markups node still in the scene.
    #[must_use]
    pub fn first_markups(&self) -> Option<NodeId> {
        self.order
            .iter()
            .copied()
            .find(|&id| matches!(self.nodes.get(id), Some(NodeData::Markups(_))))
    }

    // --- Control points ---

    /// Appends a control point and returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a markups node.
    pub fn add_control_point(&mut self, id: NodeId, point: Point3) -> Result<usize> {
        let markups = self.markups_mut(id)?;
        markups.points.push(point);
        let index = markups.points.len() - 1;
        self.notify(id);
        Ok(index)
    }

    /// Moves the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a markups node or `index` is out of range.
    pub fn set_control_point(&mut self, id: NodeId, index: usize, point: Point3) -> Result<()> {
        let markups = self.markups_mut(id)?;
        let count = markups.points.len();
        let slot = markups
            .points
            .get_mut(index)
            .ok_or(SceneError::PointIndexOutOfRange { index, count })?;
        *slot = point;
        self.notify(id);
        Ok(())
    }

    /// Removes the control point at `index` and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a markups node or `index` is out of range.
    pub fn remove_control_point(&mut self, id: NodeId, index: usize) -> Result<Point3> {
        let markups = self.markups_mut(id)?;
        let count = markups.points.len();
        if index >= count {
            return Err(SceneError::PointIndexOutOfRange { index, count }.into());
        }
        let point = markups.points.remove(index);
        self.notify(id);
        Ok(point)
    }

    /// Removes every control point of a markups node.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a markups node.
    pub fn clear_control_points(&mut self, id: NodeId) -> Result<()> {
        self.markups_mut(id)?.points.clear();
        self.notify(id);
        Ok(())
    }

    // --- Subscriptions ---

    /// Subscribes to point modifications of a markups node.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is not a markups node.
    pub fn subscribe(&mut self, node: NodeId) -> Result<SubscriptionId> {
        self.markups(node)?;
        Ok(self.subscriptions.insert(node))
    }

    /// Cancels a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.events.retain(|event| {
            !matches!(event, SceneEvent::PointsModified { subscription: s, .. } if *s == subscription)
        });
        self.subscriptions.remove(subscription).is_some()
    }

    /// Returns `true` if the subscription is still active.
    #[must_use]
    pub fn is_subscribed(&self, subscription: SubscriptionId) -> bool {
        self.subscriptions.contains_key(subscription)
    }

    /// Takes all pending events in the order they were raised.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.events.drain(..).collect()
    }

    /// Takes the pending events of one subscription, leaving the rest queued.
    pub fn take_events(&mut self, subscription: SubscriptionId) -> Vec<SceneEvent> {
        let (taken, kept): (Vec<_>, Vec<_>) = self.events.drain(..).partition(|event| {
            matches!(event, SceneEvent::PointsModified { subscription: s, .. } if *s == subscription)
        });
        self.events = kept.into();
        taken
    }

    fn notify(&mut self, node: NodeId) {
        for (subscription, &target) in &self.subscriptions {
            if target == node {
                debug!(?node, ?subscription, "points modified");
                self.events
                    .push_back(SceneEvent::PointsModified { node, subscription });
            }
        }
    }
}

impl OutputSink for Scene {
    type Target = NodeId;

    fn is_valid_target(&self, target: NodeId) -> bool {
        matches!(self.nodes.get(target), Some(NodeData::Model(_)))
    }

    fn allocate_target(&mut self, name: &str) -> NodeId {
        self.add_model(name)
    }

    fn discard_target(&mut self, target: NodeId) -> Result<()> {
        self.remove_node(target).map(|_| ())
    }

    fn store(&mut self, target: NodeId, descriptor: MeshDescriptor) -> Result<()> {
        match self.nodes.get_mut(target) {
            Some(NodeData::Model(model)) => {
                model.descriptor = Some(descriptor);
                Ok(())
            }
            Some(other) => Err(OutputError::InvalidTarget(other.name().to_owned()).into()),
            None => Err(OutputError::InvalidTarget("removed node".into()).into()),
        }
    }
}
