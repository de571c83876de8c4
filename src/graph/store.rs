//! In-memory resource graph
//!
//! Resources are kept in input order (re-adding a key overwrites in place),
//! relationships in an append-only list. Lookups by endpoint scan the whole
//! list, which is fine at manifest-set scale.

use super::store_models::{Relationship, ResourceGroup};
use crate::models::{ProcessedResource, ResourceKey};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceGraph {
    #[serde(serialize_with = "serialize_resources")]
    resources: IndexMap<ResourceKey, ProcessedResource>,
    relationships: Vec<Relationship>,
    groups: Vec<ResourceGroup>,
    orphans: Vec<ResourceKey>,
}

fn serialize_resources<S: serde::Serializer>(
    resources: &IndexMap<ResourceKey, ProcessedResource>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(resources.values())
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, replacing any previous one with the same key
    pub fn add_resource(&mut self, resource: ProcessedResource) {
        self.resources.insert(resource.key.clone(), resource);
    }

    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    pub fn add_group(&mut self, group: ResourceGroup) {
        self.groups.push(group);
    }

    pub fn add_orphan(&mut self, key: ResourceKey) {
        self.orphans.push(key);
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&ProcessedResource> {
        self.resources.get(key)
    }

    pub fn get_mut(&mut self, key: &ResourceKey) -> Option<&mut ProcessedResource> {
        self.resources.get_mut(key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.resources.contains_key(key)
    }

    /// Service name of a resource, empty when the key is not in the graph
    pub fn service_of(&self, key: &ResourceKey) -> &str {
        self.resources
            .get(key)
            .map(|r| r.service_name.as_str())
            .unwrap_or("")
    }

    /// All resources in insertion order
    pub fn resources(&self) -> impl Iterator<Item = &ProcessedResource> {
        self.resources.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResourceKey> {
        self.resources.keys()
    }

    pub fn resources_by_kind<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a ProcessedResource> + 'a {
        self.resources.values().filter(move |r| r.key.kind == kind)
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.resources.keys().any(|k| k.kind == kind)
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Edges leaving `key`, in insertion order
    pub fn relationships_from<'a>(
        &'a self,
        key: &'a ResourceKey,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships.iter().filter(move |r| &r.from == key)
    }

    /// Edges arriving at `key`, in insertion order
    pub fn relationships_to<'a>(
        &'a self,
        key: &'a ResourceKey,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships.iter().filter(move |r| &r.to == key)
    }

    pub fn groups(&self) -> &[ResourceGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&ResourceGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn orphans(&self) -> &[ResourceKey] {
        &self.orphans
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub(crate) fn set_groups(&mut self, groups: Vec<ResourceGroup>) {
        self.groups = groups;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RelationshipType;

    fn key(kind: &str, name: &str) -> ResourceKey {
        ResourceKey::new("", "v1", kind, "default", name)
    }

    #[test]
    fn test_add_resource_overwrites_in_place() {
        let mut graph = ResourceGraph::new();
        graph.add_resource(ProcessedResource::new(key("ConfigMap", "a")));
        graph.add_resource(ProcessedResource::new(key("ConfigMap", "b")));
        graph.add_resource(ProcessedResource::new(key("ConfigMap", "a")).with_service("svc"));

        assert_eq!(graph.resource_count(), 2);
        let names: Vec<_> = graph.resources().map(|r| r.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(graph.service_of(&key("ConfigMap", "a")), "svc");
    }

    #[test]
    fn test_lookup_missing_is_not_an_error() {
        let graph = ResourceGraph::new();
        assert!(graph.get(&key("Service", "x")).is_none());
        assert_eq!(graph.service_of(&key("Service", "x")), "");
        assert_eq!(graph.relationships_from(&key("Service", "x")).count(), 0);
    }

    #[test]
    fn test_relationship_direction_lookup() {
        let mut graph = ResourceGraph::new();
        let svc = key("Service", "web");
        let dep = key("Deployment", "web");
        graph.add_relationship(Relationship::new(
            svc.clone(),
            dep.clone(),
            RelationshipType::LabelSelector,
        ));

        assert_eq!(graph.relationships_from(&svc).count(), 1);
        assert_eq!(graph.relationships_to(&svc).count(), 0);
        assert_eq!(graph.relationships_to(&dep).count(), 1);
    }

    #[test]
    fn test_resources_by_kind() {
        let mut graph = ResourceGraph::new();
        graph.add_resource(ProcessedResource::new(key("Service", "a")));
        graph.add_resource(ProcessedResource::new(key("Secret", "b")));
        graph.add_resource(ProcessedResource::new(key("Service", "c")));
        assert_eq!(graph.resources_by_kind("Service").count(), 2);
        assert!(graph.has_kind("Secret"));
        assert!(!graph.has_kind("Ingress"));
    }

    #[test]
    fn test_groups_and_orphans_added_by_callers() {
        let mut graph = ResourceGraph::new();
        let mut group = ResourceGroup::new("web", "default");
        group.resources.push(key("Deployment", "web"));
        graph.add_group(group);
        graph.add_orphan(key("Secret", "stray"));

        assert_eq!(graph.group("web").map(|g| g.resources.len()), Some(1));
        assert!(graph.group("api").is_none());
        assert_eq!(graph.orphans(), &[key("Secret", "stray")]);
    }
}
