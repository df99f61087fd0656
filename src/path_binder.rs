//! Endpoint path binder - normalizes route templates and binds parameters.
//!
//! Takes a handler's raw path template plus its declared parameters and
//! produces an [`EndpointTemplate`]: the template rewritten into double-brace
//! placeholder form, together with name-keyed path and query variable maps.

use crate::declaration::{BindingAttrs, BindingDecoration, MethodDecl, ParamDecl};
use crate::error::Result;
use crate::model::{EndpointTemplate, RequestValue};
use crate::type_resolver;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Finds placeholder groups in a path template. Already-normalized
    /// double-brace groups match without a capture so they pass through
    /// untouched; single-brace groups capture their identifier for
    /// rewriting. Whitespace padding inside the braces is tolerated.
    static ref PLACEHOLDER: Regex = Regex::new(
        r"\{\{\s*[a-zA-Z_][a-zA-Z0-9_]*\s*\}\}|\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}"
    )
    .expect("valid placeholder pattern");
}

/// Bind a handler's declared parameters against its raw path template.
///
/// Path and query bindings land in two separate name-keyed maps. If two
/// parameters resolve to the same binding name within one map, the later
/// declaration silently overwrites the earlier one.
pub fn bind(raw_template: &str, method: &MethodDecl) -> Result<EndpointTemplate> {
    debug!("binding template {:?} for {}", raw_template, method.name);

    let path_variables = collect_path_variables(method)?;
    let query_variables = collect_query_variables(method)?;
    let template = normalize_template(raw_template);

    // a placeholder without a bound parameter makes the template unusable for
    // client generation; surface it, but leave enforcement to the consumer
    for capture in PLACEHOLDER.captures_iter(raw_template) {
        if let Some(placeholder) = capture.get(1) {
            if !path_variables.contains_key(placeholder.as_str()) {
                warn!(
                    "template {:?} references {{{}}} but {} declares no matching path variable",
                    raw_template,
                    placeholder.as_str(),
                    method.name
                );
            }
        }
    }

    Ok(EndpointTemplate {
        template,
        path_variables,
        query_variables,
    })
}

/// Rewrite every single-brace placeholder to its double-brace form.
///
/// `{ id }` becomes `{{id}}`; text that is not a well-formed placeholder
/// passes through untouched. Idempotent: a group already in double-brace
/// form is matched whole and emitted unchanged.
pub fn normalize_template(raw: &str) -> String {
    PLACEHOLDER
        .replace_all(raw, |caps: &regex::Captures| match caps.get(1) {
            Some(ident) => format!("{{{{{}}}}}", ident.as_str()),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn collect_path_variables(method: &MethodDecl) -> Result<HashMap<String, RequestValue>> {
    let mut variables = HashMap::new();

    for param in &method.params {
        if let Some(BindingDecoration::PathVariable(attrs)) = &param.binding {
            let name = binding_name(attrs, &param.name);
            let value = bound_value(param, attrs, method)?;
            if variables.insert(name.clone(), value).is_some() {
                debug!("path variable {:?} rebound by a later parameter", name);
            }
        }
    }

    Ok(variables)
}

fn collect_query_variables(method: &MethodDecl) -> Result<HashMap<String, RequestValue>> {
    let mut variables = HashMap::new();

    for param in &method.params {
        if let Some(BindingDecoration::QueryParam(attrs)) = &param.binding {
            let name = binding_name(attrs, &param.name);
            let value = bound_value(param, attrs, method)?;
            if variables.insert(name.clone(), value).is_some() {
                debug!("query variable {:?} rebound by a later parameter", name);
            }
        }
    }

    Ok(variables)
}

fn bound_value(
    param: &ParamDecl,
    attrs: &BindingAttrs,
    method: &MethodDecl,
) -> Result<RequestValue> {
    let value_type = type_resolver::resolve(&param.ty).map_err(|e| e.locate(&method.name))?;
    Ok(RequestValue::new(value_type, attrs.required))
}

/// Resolve the binding name: explicit `name` wins, then the positional
/// `value`, then the parameter's own identifier.
fn binding_name(attrs: &BindingAttrs, identifier: &str) -> String {
    if !attrs.name.is_empty() {
        attrs.name.clone()
    } else if !attrs.value.is_empty() {
        attrs.value.clone()
    } else {
        identifier.to_string()
    }
}
