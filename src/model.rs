//! Output document model for the client specification.
//!
//! These types form the wire contract consumed by downstream client-code
//! generators. The serialized names (lowercase type kinds, camelCase endpoint
//! fields) must stay stable — generators parse them verbatim.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed vocabulary of payload shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicTypeId {
    Void,
    Char,
    String,
    Integer,
    Float,
    Boolean,
    User,
    Array,
    Generic,
    Any,
}

/// A recursive description of a payload shape.
///
/// Leaf kinds carry neither a reference nor nested entries. `user` and
/// `generic` carry a nominal reference; `array` and `generic` always carry at
/// least one nested entry (the element type or the type arguments in
/// declaration order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicType {
    pub kind: DynamicTypeId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub nested: Vec<DynamicType>,
}

impl DynamicType {
    /// A leaf shape with no reference and no nested entries.
    pub fn scalar(kind: DynamicTypeId) -> Self {
        Self {
            kind,
            reference: None,
            nested: Vec::new(),
        }
    }

    /// A user-defined (domain) type, referenced by simple name.
    pub fn user(reference: impl Into<String>) -> Self {
        Self {
            kind: DynamicTypeId::User,
            reference: Some(reference.into()),
            nested: Vec::new(),
        }
    }

    /// A sequence shape with one element type.
    pub fn array(element: DynamicType) -> Self {
        Self {
            kind: DynamicTypeId::Array,
            reference: None,
            nested: vec![element],
        }
    }

    /// A named generic shape carrying its resolved type arguments.
    pub fn generic(reference: impl Into<String>, arguments: Vec<DynamicType>) -> Self {
        Self {
            kind: DynamicTypeId::Generic,
            reference: Some(reference.into()),
            nested: arguments,
        }
    }
}

/// A payload shape paired with a presence flag.
///
/// Used for bound parameters as well as request/response bodies. The flag is
/// only meaningful for path and query bindings; bodies carry fixed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestValue {
    #[serde(rename = "type")]
    pub value_type: DynamicType,
    pub required: bool,
}

impl RequestValue {
    pub fn new(value_type: DynamicType, required: bool) -> Self {
        Self {
            value_type,
            required,
        }
    }
}

/// A normalized path template together with its variable bindings.
///
/// The template uses double-brace placeholders (`{{id}}`) so it can be fed
/// into a general-purpose templating step downstream. Every placeholder in
/// the template is expected to have an entry in `path_variables`; declared
/// variables the template never references are a validation concern left to
/// the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointTemplate {
    pub template: String,
    pub path_variables: HashMap<String, RequestValue>,
    pub query_variables: HashMap<String, RequestValue>,
}

/// One handler's endpoint descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    pub name: String,
    pub endpoint: String,
    pub method: String,
    pub path_variables: HashMap<String, RequestValue>,
    pub query_variables: HashMap<String, RequestValue>,
    pub request_body: RequestValue,
    pub response_body: RequestValue,
}

/// A named service (controller) and its endpoints, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    pub endpoints: Vec<ApiEndpoint>,
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoints: Vec::new(),
        }
    }

    pub fn add_endpoint(&mut self, endpoint: ApiEndpoint) {
        self.endpoints.push(endpoint);
    }
}

/// An entity (data shape) referenced by services.
///
/// Populated by a separate collaborator; the extraction pass here only emits
/// services, so documents produced by this tool carry an empty entity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    pub properties: HashMap<String, RequestValue>,
}

/// The top-level client specification document.
///
/// Mutable only while the extraction pass assembles it; treated as immutable
/// once handed to the serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSpec {
    pub name: String,
    pub entities: Vec<EntitySpec>,
    pub services: Vec<ServiceSpec>,
}

impl ApiSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            services: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, entity: EntitySpec) {
        self.entities.push(entity);
    }

    pub fn add_service(&mut self, service: ServiceSpec) {
        self.services.push(service);
    }
}
