//! Service grouping
//!
//! Partitions every resource of a graph into exactly one named group:
//!
//! 1. **Seed** - resources with a pre-assigned service join that group.
//! 2. **Propagate** - each ungrouped resource scans its outgoing edges, then its
//!    incoming edges (both in insertion order), and joins the service of the
//!    first related resource that is already grouped at that moment.
//! 3. **Fallback** - whatever is left becomes a standalone group named after
//!    the resource (or its unmatched service name, if it has one).
//!
//! Pass 2 runs once. Two ungrouped resources related only to each other do
//! not resolve to a common group; both fall through to pass 3.

use super::store::ResourceGraph;
use super::store_models::ResourceGroup;
use crate::models::ResourceKey;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Assign every resource in `graph` to a group and record the groups.
///
/// Resources that end up in a group have their `service_name` set to it.
/// Any groups previously stored on the graph are replaced.
pub fn group_resources(graph: &mut ResourceGraph) {
    let keys: Vec<ResourceKey> = graph.keys().cloned().collect();
    let mut groups = GroupSet::default();
    let mut grouped: FxHashSet<ResourceKey> = FxHashSet::default();

    // Pass 1: seed
    for key in &keys {
        let service = graph.service_of(key);
        if !service.is_empty() {
            let service = service.to_string();
            groups.join(&service, key);
            grouped.insert(key.clone());
        }
    }
    let seeded = grouped.len();

    // Pass 2: single-hop propagation
    for key in &keys {
        if grouped.contains(key) {
            continue;
        }
        let outgoing = graph.relationships_from(key).map(|r| &r.to);
        let incoming = graph.relationships_to(key).map(|r| &r.from);
        let inherited = outgoing
            .chain(incoming)
            .find(|other| grouped.contains(*other))
            .map(|other| graph.service_of(other).to_string());

        if let Some(service) = inherited {
            assign(graph, key, &service);
            groups.join(&service, key);
            grouped.insert(key.clone());
        }
    }
    let propagated = grouped.len() - seeded;

    // Pass 3: standalone fallback
    let mut standalone = 0;
    for key in &keys {
        if grouped.contains(key) {
            continue;
        }
        let service = match graph.service_of(key) {
            "" => key.name.clone(),
            existing => existing.to_string(),
        };
        assign(graph, key, &service);
        groups.join(&service, key);
        grouped.insert(key.clone());
        standalone += 1;
    }

    debug!(
        "Grouping: {} seeded, {} propagated, {} standalone into {} groups",
        seeded,
        propagated,
        standalone,
        groups.groups.len()
    );

    graph.set_groups(groups.groups);
}

fn assign(graph: &mut ResourceGraph, key: &ResourceKey, service: &str) {
    if let Some(resource) = graph.get_mut(key) {
        resource.service_name = service.to_string();
    }
}

/// Groups in creation order with a name index
#[derive(Default)]
struct GroupSet {
    groups: Vec<ResourceGroup>,
    index: FxHashMap<String, usize>,
}

impl GroupSet {
    fn join(&mut self, name: &str, key: &ResourceKey) {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.groups
                    .push(ResourceGroup::new(name, key.namespace.clone()));
                let idx = self.groups.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        self.groups[idx].resources.push(key.clone());
    }
}
