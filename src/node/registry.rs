use crate::node::{Node, NodeDescription};
use crate::nodes::{
    CouriersNode, DraftOrdersNode, LocationsNode, MapsNode, OrdersNode, RatesNode, TrackingNode,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Node registry keyed by node type name
#[derive(Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<String, Arc<dyn Node>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all seven Biteship nodes
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CouriersNode::new()));
        registry.register(Arc::new(DraftOrdersNode::new()));
        registry.register(Arc::new(LocationsNode::new()));
        registry.register(Arc::new(MapsNode::new()));
        registry.register(Arc::new(OrdersNode::new()));
        registry.register(Arc::new(RatesNode::new()));
        registry.register(Arc::new(TrackingNode::new()));
        registry
    }

    pub fn register(&mut self, node: Arc<dyn Node>) {
        let name = node.name().to_string();
        if self.is_registered(&name) {
            warn!("Replacing registered node: {}", name);
        }
        debug!("Registering node: {}", name);
        self.nodes.insert(name, node);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Node>> {
        self.nodes.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn descriptions(&self) -> Vec<&NodeDescription> {
        self.nodes.values().map(|n| n.description()).collect()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_empty() {
        let registry = NodeRegistry::new();
        assert!(registry.names().is_empty());
        assert!(registry.get("biteshipOrders").is_none());
    }

    #[test]
    fn test_registry_defaults() {
        let registry = NodeRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![
                "biteshipCouriers",
                "biteshipDraftOrders",
                "biteshipLocations",
                "biteshipMaps",
                "biteshipOrders",
                "biteshipRates",
                "biteshipTracking",
            ]
        );
        assert!(registry.is_registered("biteshipRates"));
        assert_eq!(registry.descriptions().len(), 7);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = NodeRegistry::new();
        registry.register(Arc::new(MapsNode::new()));
        let first = registry.get("biteshipMaps").unwrap();

        registry.register(Arc::new(MapsNode::new()));
        let second = registry.get("biteshipMaps").unwrap();

        assert_eq!(registry.names(), vec!["biteshipMaps"]);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_every_node_declares_operations_and_credential() {
        let registry = NodeRegistry::with_defaults();
        for description in registry.descriptions() {
            assert!(!description.operations().is_empty(), "{}", description.name);
            assert_eq!(description.credentials[0].name, "biteshipApi");
        }
    }
}
