//! Service visitor - assembles one service descriptor per controller.
//!
//! Orchestrates the extraction core over a controller declaration: per
//! handler, decompose the routing decoration, join the class-wide prefix
//! onto the handler path, bind parameters, and resolve payload shapes. Any
//! failure below aborts the whole declaration — a half-extracted service is
//! worse than none, because generated clients would silently diverge.

use crate::declaration::{
    BindingDecoration, ControllerDecl, DeclarationKind, MethodDecl, RouteDecoration,
};
use crate::error::{Error, Result};
use crate::metadata::{self, EndpointMetadata};
use crate::model::{ApiEndpoint, DynamicType, DynamicTypeId, RequestValue, ServiceSpec};
use crate::path_binder;
use crate::type_resolver;
use log::{debug, info};

/// Visit a controller declaration and produce its service specification.
///
/// The declaration must be class-shaped; handing anything else in is a
/// caller error, reported as [`Error::NotAController`]. Methods without any
/// routing decoration are skipped entirely — a service with zero endpoints
/// is valid output.
pub fn visit_controller(controller: &ControllerDecl) -> Result<ServiceSpec> {
    if controller.kind != DeclarationKind::Class {
        return Err(Error::NotAController(controller.name.clone()));
    }

    info!("visiting controller {}", controller.name);

    let root_path = match &controller.route {
        Some(attrs) => join_fragments("", &metadata::select_fragments(&attrs.value, &attrs.path)),
        None => String::new(),
    };
    debug!("root path for {}: {:?}", controller.name, root_path);

    let mut service = ServiceSpec::new(controller.name.clone());
    for method in &controller.methods {
        match method.routes.first() {
            Some(decoration) => {
                let endpoint = visit_handler(method, decoration, &root_path)?;
                service.add_endpoint(endpoint);
            }
            None => {
                debug!("skipping {}::{}: no routing decoration", controller.name, method.name);
            }
        }
    }

    Ok(service)
}

fn visit_handler(
    method: &MethodDecl,
    decoration: &RouteDecoration,
    prefix: &str,
) -> Result<ApiEndpoint> {
    debug!("visiting handler {}", method.name);

    let EndpointMetadata { fragments, method: http_method } =
        metadata::decompose(decoration).map_err(|e| e.locate(&method.name))?;

    let handler_path = join_fragments(prefix, &fragments);
    let template = path_binder::bind(&handler_path, method)?;

    let response_type =
        type_resolver::resolve(&method.return_type).map_err(|e| e.locate(&method.name))?;
    // a handler always yields a value of its declared return type, even void
    let response_body = RequestValue::new(response_type, true);

    let request_body_type = method
        .params
        .iter()
        .find(|param| matches!(param.binding, Some(BindingDecoration::RequestBody)))
        .map(|param| type_resolver::resolve(&param.ty).map_err(|e| e.locate(&method.name)))
        .transpose()?
        .unwrap_or_else(|| DynamicType::scalar(DynamicTypeId::Void));
    let request_body = RequestValue::new(request_body_type, false);

    Ok(ApiEndpoint {
        name: method.name.clone(),
        endpoint: template.template,
        method: http_method.as_str().to_string(),
        path_variables: template.path_variables,
        query_variables: template.query_variables,
        request_body,
        response_body,
    })
}

/// Join a path prefix onto a list of path fragments.
///
/// Blank fragments are dropped; the survivors are joined with `/`. A single
/// separator is inserted between a non-empty prefix and suffix unless one
/// already provides it. A boundary that arrives with slashes on both sides
/// is kept as-is, double slash and all.
pub fn join_fragments(prefix: &str, fragments: &[String]) -> String {
    let suffix = fragments
        .iter()
        .filter(|fragment| !fragment.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("/");

    if prefix.is_empty() {
        return suffix;
    }
    if suffix.is_empty() {
        return prefix.to_string();
    }

    if suffix.starts_with('/') || prefix.ends_with('/') {
        format!("{}{}", prefix, suffix)
    } else {
        format!("{}/{}", prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{
        BindingAttrs, MappingAttrs, ParamDecl, PrimitiveKind, RouteAttrs, TypeRef,
    };

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn get_decoration(path: &[&str]) -> RouteDecoration {
        RouteDecoration::Get(MappingAttrs {
            value: strings(path),
            path: Vec::new(),
        })
    }

    fn class_route(fragments: &[&str]) -> RouteAttrs {
        RouteAttrs {
            value: strings(fragments),
            path: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[test]
    fn test_join_drops_blank_fragments() {
        let joined = join_fragments("", &strings(&["", "a", "  ", "b"]));
        assert_eq!(joined, "a/b");
        assert_eq!(joined, join_fragments("", &strings(&["a", "b"])));
    }

    #[test]
    fn test_join_empty_sides() {
        assert_eq!(join_fragments("", &[]), "");
        assert_eq!(join_fragments("/users", &[]), "/users");
        assert_eq!(join_fragments("", &strings(&["/users"])), "/users");
    }

    #[test]
    fn test_join_inserts_single_separator() {
        assert_eq!(join_fragments("/users", &strings(&["detail"])), "/users/detail");
    }

    #[test]
    fn test_join_respects_existing_separator() {
        assert_eq!(join_fragments("/users", &strings(&["/detail"])), "/users/detail");
        assert_eq!(join_fragments("/users/", &strings(&["detail"])), "/users/detail");
    }

    #[test]
    fn test_join_does_not_strip_double_slash() {
        // slashes on both sides of the boundary are concatenated untouched
        assert_eq!(join_fragments("/users/", &strings(&["/detail"])), "/users//detail");
    }

    #[test]
    fn test_non_class_declaration_is_rejected() {
        let controller = ControllerDecl {
            name: "UserApi".to_string(),
            kind: DeclarationKind::Trait,
            route: None,
            methods: Vec::new(),
        };

        match visit_controller(&controller) {
            Err(Error::NotAController(name)) => assert_eq!(name, "UserApi"),
            other => panic!("expected NotAController, got {:?}", other),
        }
    }

    #[test]
    fn test_path_variable_scenario() {
        // class prefix /users, GET /{id}, one path-bound integer parameter
        let controller = ControllerDecl {
            name: "UserController".to_string(),
            kind: DeclarationKind::Class,
            route: Some(class_route(&["/users"])),
            methods: vec![MethodDecl {
                name: "get_user".to_string(),
                routes: vec![get_decoration(&["/{id}"])],
                params: vec![ParamDecl::new(
                    "id",
                    TypeRef::Primitive(PrimitiveKind::I64),
                    Some(BindingDecoration::PathVariable(BindingAttrs::default())),
                )],
                return_type: TypeRef::named("User"),
            }],
        };

        let service = visit_controller(&controller).unwrap();
        assert_eq!(service.name, "UserController");
        assert_eq!(service.endpoints.len(), 1);

        let endpoint = &service.endpoints[0];
        assert_eq!(endpoint.endpoint, "/users/{{id}}");
        assert_eq!(endpoint.method, "GET");

        let id = &endpoint.path_variables["id"];
        assert_eq!(id.value_type, DynamicType::scalar(DynamicTypeId::Integer));
        assert!(id.required);
        assert!(endpoint.query_variables.is_empty());
    }

    #[test]
    fn test_request_and_response_body_scenario() {
        // POST with a body-bound user type and a user-typed return value
        let controller = ControllerDecl {
            name: "UserController".to_string(),
            kind: DeclarationKind::Class,
            route: None,
            methods: vec![MethodDecl {
                name: "create_user".to_string(),
                routes: vec![RouteDecoration::Post(MappingAttrs {
                    value: strings(&["/users"]),
                    path: Vec::new(),
                })],
                params: vec![ParamDecl::new(
                    "user",
                    TypeRef::named("NewUser"),
                    Some(BindingDecoration::RequestBody),
                )],
                return_type: TypeRef::named("User"),
            }],
        };

        let service = visit_controller(&controller).unwrap();
        let endpoint = &service.endpoints[0];

        assert_eq!(endpoint.request_body.value_type, DynamicType::user("NewUser"));
        assert!(!endpoint.request_body.required);
        assert_eq!(endpoint.response_body.value_type, DynamicType::user("User"));
        assert!(endpoint.response_body.required);
    }

    #[test]
    fn test_void_bodies() {
        let controller = ControllerDecl {
            name: "HealthController".to_string(),
            kind: DeclarationKind::Class,
            route: None,
            methods: vec![MethodDecl {
                name: "ping".to_string(),
                routes: vec![get_decoration(&["/ping"])],
                params: Vec::new(),
                return_type: TypeRef::Primitive(PrimitiveKind::Unit),
            }],
        };

        let service = visit_controller(&controller).unwrap();
        let endpoint = &service.endpoints[0];

        // no body-bound parameter falls back to void, return stays required
        assert_eq!(
            endpoint.request_body.value_type,
            DynamicType::scalar(DynamicTypeId::Void)
        );
        assert_eq!(
            endpoint.response_body.value_type,
            DynamicType::scalar(DynamicTypeId::Void)
        );
        assert!(endpoint.response_body.required);
    }

    #[test]
    fn test_undecorated_methods_are_skipped() {
        let controller = ControllerDecl {
            name: "MixedController".to_string(),
            kind: DeclarationKind::Class,
            route: None,
            methods: vec![
                MethodDecl {
                    name: "helper".to_string(),
                    routes: Vec::new(),
                    params: Vec::new(),
                    return_type: TypeRef::Primitive(PrimitiveKind::Bool),
                },
                MethodDecl {
                    name: "list".to_string(),
                    routes: vec![get_decoration(&["/items"])],
                    params: Vec::new(),
                    return_type: TypeRef::Named {
                        name: "Vec".to_string(),
                        args: vec![TypeRef::named("Item")],
                    },
                },
            ],
        };

        let service = visit_controller(&controller).unwrap();
        assert_eq!(service.endpoints.len(), 1);
        assert_eq!(service.endpoints[0].name, "list");
    }

    #[test]
    fn test_service_with_zero_endpoints_is_valid() {
        let controller = ControllerDecl {
            name: "EmptyController".to_string(),
            kind: DeclarationKind::Class,
            route: None,
            methods: vec![MethodDecl {
                name: "helper".to_string(),
                routes: Vec::new(),
                params: Vec::new(),
                return_type: TypeRef::Primitive(PrimitiveKind::Unit),
            }],
        };

        let service = visit_controller(&controller).unwrap();
        assert!(service.endpoints.is_empty());
    }

    #[test]
    fn test_unroutable_handler_aborts_the_controller() {
        let controller = ControllerDecl {
            name: "BrokenController".to_string(),
            kind: DeclarationKind::Class,
            route: None,
            methods: vec![
                MethodDecl {
                    name: "fine".to_string(),
                    routes: vec![get_decoration(&["/fine"])],
                    params: Vec::new(),
                    return_type: TypeRef::Primitive(PrimitiveKind::Unit),
                },
                MethodDecl {
                    name: "broken".to_string(),
                    routes: vec![RouteDecoration::Route(RouteAttrs {
                        value: strings(&["/broken"]),
                        path: Vec::new(),
                        methods: Vec::new(),
                    })],
                    params: Vec::new(),
                    return_type: TypeRef::Primitive(PrimitiveKind::Unit),
                },
            ],
        };

        match visit_controller(&controller) {
            Err(Error::UnroutableHandler { handler, .. }) => assert_eq!(handler, "broken"),
            other => panic!("expected UnroutableHandler, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolvable_return_type_aborts_the_controller() {
        let controller = ControllerDecl {
            name: "OpaqueController".to_string(),
            kind: DeclarationKind::Class,
            route: None,
            methods: vec![MethodDecl {
                name: "stream".to_string(),
                routes: vec![get_decoration(&["/stream"])],
                params: Vec::new(),
                return_type: TypeRef::Opaque,
            }],
        };

        match visit_controller(&controller) {
            Err(Error::UnsupportedType { declaration, .. }) => {
                assert_eq!(declaration, "stream");
            }
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_only_first_decoration_is_honored() {
        let controller = ControllerDecl {
            name: "DoubleController".to_string(),
            kind: DeclarationKind::Class,
            route: None,
            methods: vec![MethodDecl {
                name: "both".to_string(),
                routes: vec![
                    get_decoration(&["/first"]),
                    RouteDecoration::Post(MappingAttrs {
                        value: strings(&["/second"]),
                        path: Vec::new(),
                    }),
                ],
                params: Vec::new(),
                return_type: TypeRef::Primitive(PrimitiveKind::Unit),
            }],
        };

        let service = visit_controller(&controller).unwrap();
        assert_eq!(service.endpoints.len(), 1);
        assert_eq!(service.endpoints[0].method, "GET");
        assert_eq!(service.endpoints[0].endpoint, "/first");
    }

    #[test]
    fn test_generic_route_prefix_with_path_attribute() {
        let controller = ControllerDecl {
            name: "AdminController".to_string(),
            kind: DeclarationKind::Class,
            route: Some(RouteAttrs {
                value: strings(&["/ignored"]),
                path: strings(&["/admin"]),
                methods: Vec::new(),
            }),
            methods: vec![MethodDecl {
                name: "dashboard".to_string(),
                routes: vec![get_decoration(&["/dashboard"])],
                params: Vec::new(),
                return_type: TypeRef::named("Dashboard"),
            }],
        };

        let service = visit_controller(&controller).unwrap();
        assert_eq!(service.endpoints[0].endpoint, "/admin/dashboard");
    }
}
