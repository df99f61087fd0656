//! Handler metadata extraction - reduces routing decorations to verb + path.
//!
//! Every decoration form, verb-specific or generic, collapses into the same
//! [`EndpointMetadata`] shape before path joining and binding happen.

use crate::declaration::{HttpMethod, MappingAttrs, RouteAttrs, RouteDecoration};
use crate::error::{Error, Result};

/// The decomposed form of a routing decoration: raw path fragments plus the
/// single HTTP method the handler responds to.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointMetadata {
    pub fragments: Vec<String>,
    pub method: HttpMethod,
}

/// Decompose a routing decoration into an (HTTP method, path fragments) pair.
///
/// Verb-specific decorations carry their verb directly. The generic `route`
/// decoration takes the first verb of its declared method list; a generic
/// decoration with no methods at all is unroutable. Additional verbs on one
/// decoration are not expanded into extra endpoints — a known limitation,
/// kept deliberately.
pub fn decompose(decoration: &RouteDecoration) -> Result<EndpointMetadata> {
    match decoration {
        RouteDecoration::Get(attrs) => Ok(verb_metadata(attrs, HttpMethod::Get)),
        RouteDecoration::Post(attrs) => Ok(verb_metadata(attrs, HttpMethod::Post)),
        RouteDecoration::Put(attrs) => Ok(verb_metadata(attrs, HttpMethod::Put)),
        RouteDecoration::Patch(attrs) => Ok(verb_metadata(attrs, HttpMethod::Patch)),
        RouteDecoration::Delete(attrs) => Ok(verb_metadata(attrs, HttpMethod::Delete)),
        RouteDecoration::Route(attrs) => decompose_generic(attrs),
    }
}

/// Pick the effective path fragments of a decoration: an explicit `path`
/// attribute wins over the positional `value` when both are present.
pub fn select_fragments(value: &[String], path: &[String]) -> Vec<String> {
    if !path.is_empty() {
        path.to_vec()
    } else {
        value.to_vec()
    }
}

fn verb_metadata(attrs: &MappingAttrs, method: HttpMethod) -> EndpointMetadata {
    EndpointMetadata {
        fragments: select_fragments(&attrs.value, &attrs.path),
        method,
    }
}

fn decompose_generic(attrs: &RouteAttrs) -> Result<EndpointMetadata> {
    let method = attrs
        .methods
        .first()
        .copied()
        .ok_or_else(|| Error::UnroutableHandler {
            handler: String::new(),
            reason: "generic route decoration declares no HTTP method".to_string(),
        })?;

    Ok(EndpointMetadata {
        fragments: select_fragments(&attrs.value, &attrs.path),
        method,
    })
}
