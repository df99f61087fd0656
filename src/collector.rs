//! Controller collector - lowers parsed source into declaration records.
//!
//! Walks every syntax tree looking for `impl` blocks decorated with
//! `#[controller]` and lowers their methods, routing decorations, parameter
//! bindings, and types into the plain [`ControllerDecl`] tree. This is the
//! only module that touches `syn` types on the way into the core.
//!
//! Recognized decorations:
//!
//! - `#[controller]` on an `impl` block marks a controller; an optional
//!   `#[route("/prefix")]` beside it supplies the class-wide path prefix
//! - `#[get]`, `#[post]`, `#[put]`, `#[patch]`, `#[delete]` and the generic
//!   `#[route(..., method = "VERB")]` mark handler methods; all accept
//!   positional path fragments and `path = "..."` pairs
//! - `#[path_variable]`, `#[query_param]` (both accepting a positional name,
//!   `name = "..."`, `value = "..."` and `required = <bool>`) and
//!   `#[request_body]` bind parameters

use crate::declaration::{
    BindingAttrs, BindingDecoration, ControllerDecl, DeclarationKind, HttpMethod, MappingAttrs,
    MethodDecl, ParamDecl, PrimitiveKind, RouteAttrs, RouteDecoration, TypeRef,
};
use crate::error::{Error, Result};
use crate::parser::ParsedFile;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use syn::parse::{Parse, ParseStream};
use syn::visit::Visit;
use syn::{
    Attribute, FnArg, GenericArgument, GenericParam, ImplItem, ImplItemFn, ItemImpl, ItemTrait,
    LitBool, LitStr, Meta, Pat, PatType, PathArguments, ReturnType, Token, TraitBound, Type,
    TypeParamBound,
};

/// Collects controller declarations from parsed source files.
pub struct ControllerCollector;

impl ControllerCollector {
    /// Scan all parsed files and lower every controller declaration found.
    ///
    /// Declarations are returned in file order, then source order within a
    /// file. Malformed decoration arguments are fatal.
    pub fn collect(parsed_files: &[ParsedFile]) -> Result<Vec<ControllerDecl>> {
        let mut controllers = Vec::new();

        for file in parsed_files {
            let mut visitor = DeclVisitor {
                file: file.path.clone(),
                controllers: Vec::new(),
                failure: None,
            };
            visitor.visit_file(&file.ast);

            if let Some(failure) = visitor.failure {
                return Err(failure);
            }
            controllers.extend(visitor.controllers);
        }

        debug!("collected {} controller declaration(s)", controllers.len());
        Ok(controllers)
    }
}

/// Visitor that walks a single file's AST, stashing the first failure.
struct DeclVisitor {
    file: PathBuf,
    controllers: Vec<ControllerDecl>,
    failure: Option<Error>,
}

impl DeclVisitor {
    fn record(&mut self, result: syn::Result<Option<ControllerDecl>>) {
        match result {
            Ok(Some(controller)) => self.controllers.push(controller),
            Ok(None) => {}
            Err(e) => {
                self.failure = Some(Error::Parse {
                    file: self.file.clone(),
                    message: e.to_string(),
                })
            }
        }
    }
}

impl<'ast> Visit<'ast> for DeclVisitor {
    fn visit_item_impl(&mut self, node: &'ast ItemImpl) {
        if self.failure.is_none() && has_decoration(&node.attrs, "controller") {
            self.record(lower_impl(node));
        }
        syn::visit::visit_item_impl(self, node);
    }

    fn visit_item_trait(&mut self, node: &'ast ItemTrait) {
        if self.failure.is_none() && has_decoration(&node.attrs, "controller") {
            // lowered with its real shape; the visitor rejects non-classes
            self.controllers.push(ControllerDecl {
                name: node.ident.to_string(),
                kind: DeclarationKind::Trait,
                route: None,
                methods: Vec::new(),
            });
        }
        syn::visit::visit_item_trait(self, node);
    }
}

fn lower_impl(node: &ItemImpl) -> syn::Result<Option<ControllerDecl>> {
    let Some(name) = self_type_name(&node.self_ty) else {
        warn!("skipping #[controller] impl with an unnameable self type");
        return Ok(None);
    };
    debug!("lowering controller {}", name);

    let route = node
        .attrs
        .iter()
        .filter(|attr| attribute_name(attr).as_deref() == Some("route"))
        .map(route_attrs)
        .next()
        .transpose()?;

    let mut methods = Vec::new();
    for item in &node.items {
        if let ImplItem::Fn(func) = item {
            methods.push(lower_method(func, &node.generics)?);
        }
    }

    Ok(Some(ControllerDecl {
        name,
        kind: DeclarationKind::Class,
        route,
        methods,
    }))
}

fn lower_method(func: &ImplItemFn, impl_generics: &syn::Generics) -> syn::Result<MethodDecl> {
    let scope = generic_scope(&[impl_generics, &func.sig.generics]);

    let mut routes = Vec::new();
    for attr in &func.attrs {
        if let Some(decoration) = lower_route_decoration(attr)? {
            routes.push(decoration);
        }
    }

    let mut params = Vec::new();
    for (index, input) in func.sig.inputs.iter().enumerate() {
        if let FnArg::Typed(pat_type) = input {
            params.push(lower_param(pat_type, index, &scope)?);
        }
    }

    let return_type = match &func.sig.output {
        ReturnType::Default => TypeRef::Primitive(PrimitiveKind::Unit),
        ReturnType::Type(_, ty) => lower_type(ty, &scope),
    };

    Ok(MethodDecl {
        name: func.sig.ident.to_string(),
        routes,
        params,
        return_type,
    })
}

fn lower_param(
    pat_type: &PatType,
    index: usize,
    scope: &HashMap<String, Option<TypeRef>>,
) -> syn::Result<ParamDecl> {
    let name = match &*pat_type.pat {
        Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
        _ => format!("arg{}", index),
    };

    let mut binding = None;
    for attr in &pat_type.attrs {
        let Some(decoration) = attribute_name(attr) else {
            continue;
        };
        match decoration.as_str() {
            "path_variable" => {
                binding = Some(BindingDecoration::PathVariable(binding_attrs(attr)?));
            }
            "query_param" => {
                binding = Some(BindingDecoration::QueryParam(binding_attrs(attr)?));
            }
            "request_body" => binding = Some(BindingDecoration::RequestBody),
            _ => {}
        }
    }

    Ok(ParamDecl {
        name,
        ty: lower_type(&pat_type.ty, scope),
        binding,
    })
}

fn lower_route_decoration(attr: &Attribute) -> syn::Result<Option<RouteDecoration>> {
    let Some(name) = attribute_name(attr) else {
        return Ok(None);
    };

    let decoration = match name.as_str() {
        "get" => RouteDecoration::Get(verb_attrs(attr)?),
        "post" => RouteDecoration::Post(verb_attrs(attr)?),
        "put" => RouteDecoration::Put(verb_attrs(attr)?),
        "patch" => RouteDecoration::Patch(verb_attrs(attr)?),
        "delete" => RouteDecoration::Delete(verb_attrs(attr)?),
        "route" => RouteDecoration::Route(route_attrs(attr)?),
        _ => return Ok(None),
    };

    Ok(Some(decoration))
}

fn verb_attrs(attr: &Attribute) -> syn::Result<MappingAttrs> {
    let args = parse_decoration_args(attr)?;
    if let Some(lit) = args.methods.first() {
        return Err(syn::Error::new(
            lit.span(),
            "`method` is only valid on the generic `route` decoration",
        ));
    }
    Ok(MappingAttrs {
        value: args.value,
        path: args.path,
    })
}

fn route_attrs(attr: &Attribute) -> syn::Result<RouteAttrs> {
    let args = parse_decoration_args(attr)?;

    let mut methods = Vec::new();
    for lit in &args.methods {
        let method = HttpMethod::from_name(&lit.value()).ok_or_else(|| {
            syn::Error::new(lit.span(), format!("unknown HTTP method `{}`", lit.value()))
        })?;
        methods.push(method);
    }

    Ok(RouteAttrs {
        value: args.value,
        path: args.path,
        methods,
    })
}

fn binding_attrs(attr: &Attribute) -> syn::Result<BindingAttrs> {
    match &attr.meta {
        Meta::Path(_) => Ok(BindingAttrs::default()),
        Meta::List(_) => attr.parse_args::<BindingArgs>().map(BindingArgs::into_attrs),
        Meta::NameValue(nv) => Err(syn::Error::new_spanned(
            nv,
            "expected list-style binding arguments",
        )),
    }
}

fn parse_decoration_args(attr: &Attribute) -> syn::Result<DecorationArgs> {
    match &attr.meta {
        Meta::Path(_) => Ok(DecorationArgs::default()),
        Meta::List(_) => attr.parse_args::<DecorationArgs>(),
        Meta::NameValue(nv) => Err(syn::Error::new_spanned(
            nv,
            "expected list-style decoration arguments",
        )),
    }
}

/// Parsed arguments of a routing decoration. Positional string literals are
/// path fragments; `path`, `value` and `method` pairs are collected by key.
#[derive(Default)]
struct DecorationArgs {
    value: Vec<String>,
    path: Vec<String>,
    methods: Vec<LitStr>,
}

impl Parse for DecorationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = DecorationArgs::default();

        while !input.is_empty() {
            if input.peek(LitStr) {
                let lit: LitStr = input.parse()?;
                args.value.push(lit.value());
            } else {
                let key: syn::Ident = input.parse()?;
                input.parse::<Token![=]>()?;
                match key.to_string().as_str() {
                    "value" => {
                        let lit: LitStr = input.parse()?;
                        args.value.push(lit.value());
                    }
                    "path" => {
                        let lit: LitStr = input.parse()?;
                        args.path.push(lit.value());
                    }
                    "method" => {
                        let lit: LitStr = input.parse()?;
                        args.methods.push(lit);
                    }
                    other => {
                        return Err(syn::Error::new(
                            key.span(),
                            format!("unknown decoration argument `{}`", other),
                        ))
                    }
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// Parsed arguments of a parameter binding decoration.
struct BindingArgs {
    value: String,
    name: String,
    required: bool,
}

impl BindingArgs {
    fn into_attrs(self) -> BindingAttrs {
        BindingAttrs {
            value: self.value,
            name: self.name,
            required: self.required,
        }
    }
}

impl Parse for BindingArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = BindingArgs {
            value: String::new(),
            name: String::new(),
            required: true,
        };

        while !input.is_empty() {
            if input.peek(LitStr) {
                let lit: LitStr = input.parse()?;
                args.value = lit.value();
            } else {
                let key: syn::Ident = input.parse()?;
                input.parse::<Token![=]>()?;
                match key.to_string().as_str() {
                    "value" => {
                        let lit: LitStr = input.parse()?;
                        args.value = lit.value();
                    }
                    "name" => {
                        let lit: LitStr = input.parse()?;
                        args.name = lit.value();
                    }
                    "required" => {
                        let lit: LitBool = input.parse()?;
                        args.required = lit.value();
                    }
                    other => {
                        return Err(syn::Error::new(
                            key.span(),
                            format!("unknown binding argument `{}`", other),
                        ))
                    }
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// Lower a declared type into the closed [`TypeRef`] category set.
///
/// References are stripped, in-scope generic parameters become type
/// variables carrying their first trait bound, and anything without a
/// client-side representation lands in one of the failing categories.
fn lower_type(ty: &Type, scope: &HashMap<String, Option<TypeRef>>) -> TypeRef {
    match ty {
        Type::Path(type_path) => {
            if type_path.qself.is_none() {
                if let Some(ident) = type_path.path.get_ident() {
                    let name = ident.to_string();
                    if let Some(kind) = primitive_kind(&name) {
                        return TypeRef::Primitive(kind);
                    }
                    if let Some(bound) = scope.get(&name) {
                        return TypeRef::Variable {
                            name,
                            bound: bound.clone().map(Box::new),
                        };
                    }
                }
            }

            match type_path.path.segments.last() {
                Some(segment) => {
                    let name = segment.ident.to_string();
                    match &segment.arguments {
                        PathArguments::None => TypeRef::Named {
                            name,
                            args: Vec::new(),
                        },
                        PathArguments::AngleBracketed(bracketed) => {
                            let args = bracketed
                                .args
                                .iter()
                                .filter_map(|arg| match arg {
                                    GenericArgument::Type(inner) => {
                                        Some(lower_type(inner, scope))
                                    }
                                    _ => None,
                                })
                                .collect();
                            TypeRef::Named { name, args }
                        }
                        // Fn(A) -> B sugar is still a function type
                        PathArguments::Parenthesized(_) => TypeRef::Function,
                    }
                }
                None => TypeRef::Unknown,
            }
        }
        Type::Reference(reference) => lower_type(&reference.elem, scope),
        Type::Slice(slice) => TypeRef::Array(Box::new(lower_type(&slice.elem, scope))),
        Type::Array(array) => TypeRef::Array(Box::new(lower_type(&array.elem, scope))),
        Type::Tuple(tuple) if tuple.elems.is_empty() => TypeRef::Primitive(PrimitiveKind::Unit),
        Type::Tuple(_) => TypeRef::Unknown,
        Type::BareFn(_) => TypeRef::Function,
        Type::Never(_) => TypeRef::Never,
        Type::Infer(_) => TypeRef::Wildcard,
        Type::TraitObject(_) | Type::ImplTrait(_) => TypeRef::Opaque,
        Type::Paren(paren) => lower_type(&paren.elem, scope),
        Type::Group(group) => lower_type(&group.elem, scope),
        _ => TypeRef::Unknown,
    }
}

fn primitive_kind(name: &str) -> Option<PrimitiveKind> {
    match name {
        "bool" => Some(PrimitiveKind::Bool),
        "char" => Some(PrimitiveKind::Char),
        "i8" => Some(PrimitiveKind::I8),
        "i16" => Some(PrimitiveKind::I16),
        "i32" => Some(PrimitiveKind::I32),
        "i64" => Some(PrimitiveKind::I64),
        "i128" => Some(PrimitiveKind::I128),
        "u8" => Some(PrimitiveKind::U8),
        "u16" => Some(PrimitiveKind::U16),
        "u32" => Some(PrimitiveKind::U32),
        "u64" => Some(PrimitiveKind::U64),
        "u128" => Some(PrimitiveKind::U128),
        "isize" => Some(PrimitiveKind::Isize),
        "usize" => Some(PrimitiveKind::Usize),
        "f32" => Some(PrimitiveKind::F32),
        "f64" => Some(PrimitiveKind::F64),
        _ => None,
    }
}

/// Build the generic-parameter scope for a method: parameter name to its
/// first trait bound. Where-clause bounds are not consulted.
fn generic_scope(generics: &[&syn::Generics]) -> HashMap<String, Option<TypeRef>> {
    let mut scope = HashMap::new();

    for list in generics {
        for param in &list.params {
            if let GenericParam::Type(type_param) = param {
                let bound = type_param.bounds.iter().find_map(|bound| match bound {
                    TypeParamBound::Trait(trait_bound) => Some(lower_trait_bound(trait_bound)),
                    _ => None,
                });
                scope.insert(type_param.ident.to_string(), bound);
            }
        }
    }

    scope
}

fn lower_trait_bound(bound: &TraitBound) -> TypeRef {
    match bound.path.segments.last() {
        Some(segment) => {
            let name = segment.ident.to_string();
            let args = match &segment.arguments {
                PathArguments::AngleBracketed(bracketed) => bracketed
                    .args
                    .iter()
                    .filter_map(|arg| match arg {
                        GenericArgument::Type(inner) => Some(lower_type(inner, &HashMap::new())),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            TypeRef::Named { name, args }
        }
        None => TypeRef::Unknown,
    }
}

fn self_type_name(self_ty: &Type) -> Option<String> {
    match self_ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

fn attribute_name(attr: &Attribute) -> Option<String> {
    attr.path()
        .segments
        .last()
        .map(|segment| segment.ident.to_string())
}

fn has_decoration(attrs: &[Attribute], name: &str) -> bool {
    attrs
        .iter()
        .any(|attr| attribute_name(attr).as_deref() == Some(name))
}
