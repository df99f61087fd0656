//! Input declaration model consumed by the extraction core.
//!
//! The collector front end lowers parsed source into this tree of plain
//! records; the core never inspects an AST directly. Everything here is a
//! passive value — decorations arrive already resolved into structured form.

/// Primitive type categories as declared in source, widths preserved.
///
/// The resolver collapses widths into the output vocabulary; keeping them
/// distinct here lets the front end stay a dumb lowering step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    Isize,
    Usize,
    F32,
    F64,
    /// The unit type, declared `()` or by omitting a return type
    Unit,
}

/// A declared type reference, classified into a closed set of categories.
///
/// The last four variants are categories a client specification cannot
/// express; resolving them is an explicit failure, never a silent fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    /// Slice or fixed-size array of an element type
    Array(Box<TypeRef>),
    /// A nominal type, possibly carrying generic arguments
    Named { name: String, args: Vec<TypeRef> },
    /// A generic parameter in scope, with its first declared bound (if any)
    Variable {
        name: String,
        bound: Option<Box<TypeRef>>,
    },
    /// The inferred type `_`
    Wildcard,
    /// Function pointers and closure types
    Function,
    /// The never type `!`
    Never,
    /// `dyn Trait` and `impl Trait` types
    Opaque,
    /// Anything the front end could not classify
    Unknown,
}

impl TypeRef {
    /// Shorthand for a nominal type without generic arguments.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Human-readable category label, used in failure messages.
    pub fn category(&self) -> &'static str {
        match self {
            TypeRef::Primitive(_) => "primitive type",
            TypeRef::Array(_) => "array type",
            TypeRef::Named { .. } => "nominal type",
            TypeRef::Variable { .. } => "type variable",
            TypeRef::Wildcard => "wildcard type",
            TypeRef::Function => "function type",
            TypeRef::Never => "never type",
            TypeRef::Opaque => "opaque type",
            TypeRef::Unknown => "unresolved type",
        }
    }
}

/// HTTP methods a routing decoration can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// The uppercase verb name emitted into the specification document.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Look up a verb by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<HttpMethod> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            "HEAD" => Some(HttpMethod::Head),
            "OPTIONS" => Some(HttpMethod::Options),
            "TRACE" => Some(HttpMethod::Trace),
            _ => None,
        }
    }
}

/// Attributes of a verb-specific routing decoration (`#[get]`, `#[post]`, ...).
///
/// `value` holds positional path fragments, `path` the ones given as
/// `path = "..."`. Both may be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappingAttrs {
    pub value: Vec<String>,
    pub path: Vec<String>,
}

/// Attributes of the generic `#[route]` decoration, which additionally
/// declares the permitted HTTP methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteAttrs {
    pub value: Vec<String>,
    pub path: Vec<String>,
    pub methods: Vec<HttpMethod>,
}

/// A routing decoration attached to a handler method (or, for the generic
/// form, to a controller declaration as a class-wide prefix).
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecoration {
    Get(MappingAttrs),
    Post(MappingAttrs),
    Put(MappingAttrs),
    Patch(MappingAttrs),
    Delete(MappingAttrs),
    Route(RouteAttrs),
}

/// Attributes of a parameter binding decoration.
///
/// Empty strings mean "not specified". `required` defaults to true.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingAttrs {
    pub value: String,
    pub name: String,
    pub required: bool,
}

impl Default for BindingAttrs {
    fn default() -> Self {
        Self {
            value: String::new(),
            name: String::new(),
            required: true,
        }
    }
}

/// How a handler parameter binds into the request.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingDecoration {
    PathVariable(BindingAttrs),
    QueryParam(BindingAttrs),
    RequestBody,
}

/// A declared handler parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeRef,
    pub binding: Option<BindingDecoration>,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef, binding: Option<BindingDecoration>) -> Self {
        Self {
            name: name.into(),
            ty,
            binding,
        }
    }
}

/// A method enclosed in a controller declaration.
///
/// Methods without routing decorations are carried through and skipped by
/// the visitor; only the first decoration of a handler is honored.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub routes: Vec<RouteDecoration>,
    pub params: Vec<ParamDecl>,
    pub return_type: TypeRef,
}

/// The shape of the declaration a controller decoration was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Trait,
}

/// A controller-like declaration handed to the visitor.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerDecl {
    pub name: String,
    pub kind: DeclarationKind,
    /// Optional class-wide routing decoration supplying a path prefix
    pub route: Option<RouteAttrs>,
    pub methods: Vec<MethodDecl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::from_name("delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_name("TRACE"), Some(HttpMethod::Trace));
        assert_eq!(HttpMethod::from_name("CONNECT"), None);
    }

    #[test]
    fn test_binding_attrs_default_required() {
        let attrs = BindingAttrs::default();
        assert!(attrs.required);
        assert!(attrs.value.is_empty());
        assert!(attrs.name.is_empty());
    }

    #[test]
    fn test_type_ref_categories() {
        assert_eq!(TypeRef::Function.category(), "function type");
        assert_eq!(TypeRef::Never.category(), "never type");
        assert_eq!(TypeRef::named("User").category(), "nominal type");
    }
}
