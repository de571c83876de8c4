use crate::models::ResourceKey;
use serde::{Deserialize, Serialize};

/// Why one resource points at another
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    LabelSelector,
    NameReference,
    VolumeMount,
    VolumeClaim,
    EnvFrom,
    EnvValueFrom,
    OwnerReference,
    ServiceAccount,
    ImagePullSecret,
    IngressBackend,
    IngressTls,
    ScaleTarget,
    PdbSelector,
    NetworkPolicy,
    ServiceMonitor,
    RoleBinding,
    RoleRef,
    StorageClass,
    CustomResource,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::LabelSelector => "label-selector",
            RelationshipType::NameReference => "name-reference",
            RelationshipType::VolumeMount => "volume-mount",
            RelationshipType::VolumeClaim => "volume-claim",
            RelationshipType::EnvFrom => "env-from",
            RelationshipType::EnvValueFrom => "env-value-from",
            RelationshipType::OwnerReference => "owner-reference",
            RelationshipType::ServiceAccount => "service-account",
            RelationshipType::ImagePullSecret => "image-pull-secret",
            RelationshipType::IngressBackend => "ingress-backend",
            RelationshipType::IngressTls => "ingress-tls",
            RelationshipType::ScaleTarget => "scale-target",
            RelationshipType::PdbSelector => "pdb-selector",
            RelationshipType::NetworkPolicy => "network-policy",
            RelationshipType::ServiceMonitor => "service-monitor",
            RelationshipType::RoleBinding => "role-binding",
            RelationshipType::RoleRef => "role-ref",
            RelationshipType::StorageClass => "storage-class",
            RelationshipType::CustomResource => "custom-resource",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge between two resources.
///
/// Either endpoint may be missing from the graph; such dangling edges are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    pub from: ResourceKey,
    pub to: ResourceKey,
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    /// Field path the reference was found at
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub details: String,
}

impl Relationship {
    pub fn new(from: ResourceKey, to: ResourceKey, kind: RelationshipType) -> Self {
        Self {
            from,
            to,
            kind,
            field: String::new(),
            details: String::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}

/// A named service and the resources that belong to it
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResourceGroup {
    pub name: String,
    pub namespace: String,
    pub resources: Vec<ResourceKey>,
}

impl ResourceGroup {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            resources: Vec::new(),
        }
    }

    pub fn contains_kind(&self, kind: &str) -> bool {
        self.resources.iter().any(|k| k.kind == kind)
    }
}
