//! Every per-schema decision: which conversions are safe, whether a constructor
//! is needed, and which synthesis requests are issued in what order.

use std::cell::Cell;

use directed_visit::Visitor;
use quote::ToTokens as _;
use syn::spanned::Spanned as _;

use crate::{
    parsing::{self, MacroOptions},
    schema::{VariantField, VariantSchema},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Request {
    Constructor,
    Factories,
    Accessors,
    Dispatch,
    Introspection,
    Conversions,
    Equality,
    Serde,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstructorPlan {
    Generate,
    HandWritten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct FieldPlan {
    /// `impl From<Payload> for Owner`
    pub(crate) from: bool,
    /// `impl TryFrom<Owner> for Payload`
    pub(crate) try_from: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EqualityPlan {
    pub(crate) eq: bool,
    pub(crate) hash: bool,
}

#[derive(Debug)]
pub(crate) struct SynthesisPlan {
    pub(crate) has_duplicate_types: bool,
    pub(crate) constructor: ConstructorPlan,
    pub(crate) fields: Vec<FieldPlan>,
    pub(crate) equality: EqualityPlan,
    pub(crate) requests: Vec<Request>,
}

/// Whether two slots could hold the same concrete type, however it is spelled.
pub(crate) fn has_duplicate_types(fields: &[VariantField]) -> bool {
    fields.iter().enumerate().any(|(index, field)| {
        fields[index + 1..]
            .iter()
            .any(|other| may_unify(&field.ty, &other.ty, &[]))
    })
}

struct MentionVisitor<'i> {
    idents: &'i [syn::Ident],
    found: Cell<bool>,
}

impl directed_visit::syn::visit::Full for MentionVisitor<'_> {
    fn visit_type<D>(visitor: Visitor<'_, D, Self>, node: &syn::Type)
    where
        D: directed_visit::Direct<Self, syn::Type> + ?Sized,
    {
        if let syn::Type::Path(type_path) = node {
            if type_path.qself.is_none() && type_path.path.leading_colon.is_none() {
                if let Some(first_segment) = type_path.path.segments.first() {
                    if visitor.idents.contains(&first_segment.ident) {
                        visitor.found.set(true);
                        return;
                    }
                }
            }
        }

        Visitor::visit(visitor, node);
    }
}

/// Whether any path inside `ty` starts with one of `idents`.
pub(crate) fn mentions(ty: &syn::Type, idents: &[syn::Ident]) -> bool {
    let mut visitor = MentionVisitor {
        idents,
        found: Cell::new(false),
    };
    directed_visit::visit(&mut crate::direct::OneOfDirect, &mut visitor, ty);
    visitor.found.get()
}

/// `T`, `&T` or `Box<T>` for a type parameter `T`, which the orphan rules treat as uncovered.
pub(crate) fn is_uncovered_param(ty: &syn::Type, params: &[syn::Ident]) -> bool {
    match parsing::strip_groups(ty) {
        syn::Type::Reference(reference) => is_uncovered_param(&reference.elem, params),
        syn::Type::Path(type_path) if type_path.qself.is_none() => {
            let segments = &type_path.path.segments;
            let Some(last) = segments.last() else {
                return false;
            };
            if segments.len() == 1 && matches!(last.arguments, syn::PathArguments::None) {
                return params.contains(&last.ident);
            }
            if last.ident == "Box" {
                if let syn::PathArguments::AngleBracketed(args) = &last.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return is_uncovered_param(inner, params);
                    }
                }
            }
            false
        }
        _ => false,
    }
}

fn constructor_matches(sig: &syn::Signature, fields: &[VariantField]) -> bool {
    if sig.receiver().is_some() || sig.inputs.len() != fields.len() {
        return false;
    }

    sig.inputs.iter().zip(fields).all(|(input, field)| match input {
        syn::FnArg::Typed(pat_type) => parsing::option_payload(&pat_type.ty)
            .is_some_and(|payload| parsing::type_key(payload) == parsing::type_key(&field.ty)),
        syn::FnArg::Receiver(_) => false,
    })
}

fn plan_constructor(schema: &VariantSchema) -> syn::Result<ConstructorPlan> {
    let Some(sig) = &schema.existing_constructor else {
        return Ok(ConstructorPlan::Generate);
    };

    if constructor_matches(sig, &schema.fields) {
        Ok(ConstructorPlan::HandWritten)
    } else {
        let expected: Vec<String> = schema
            .fields
            .iter()
            .map(|field| format!("{}: Option<{}>", field.ident, parsing::type_display(&field.ty)))
            .collect();
        Err(syn::Error::new(
            sig.span(),
            format!(
                "`new` is used by the generated factories and must have the signature `fn new({})`",
                expected.join(", ")
            ),
        ))
    }
}

/// Whether some instantiation of the owner's type parameters could make `a` and `b` the same type.
///
/// Paths are matched from their last segment backwards, so `String` and
/// `std::string::String` are considered the same while `io::Error` and `fmt::Error`
/// are not.
pub(crate) fn may_unify(a: &syn::Type, b: &syn::Type, params: &[syn::Ident]) -> bool {
    let (a, b) = (parsing::strip_groups(a), parsing::strip_groups(b));
    if is_bare_param(a, params) || is_bare_param(b, params) {
        return true;
    }

    match (a, b) {
        (syn::Type::Path(a), syn::Type::Path(b)) if a.qself.is_none() && b.qself.is_none() => {
            paths_may_match(&a.path, &b.path, params)
        }
        (syn::Type::Reference(a), syn::Type::Reference(b)) => {
            a.mutability.is_some() == b.mutability.is_some() && may_unify(&a.elem, &b.elem, params)
        }
        (syn::Type::Slice(a), syn::Type::Slice(b)) => may_unify(&a.elem, &b.elem, params),
        (syn::Type::Array(a), syn::Type::Array(b)) => {
            lengths_may_match(&a.len, &b.len) && may_unify(&a.elem, &b.elem, params)
        }
        (syn::Type::Tuple(a), syn::Type::Tuple(b)) => {
            a.elems.len() == b.elems.len()
                && a.elems.iter().zip(&b.elems).all(|(a, b)| may_unify(a, b, params))
        }
        (a, b) if is_structural(a, params) && is_structural(b, params) && !same_kind(a, b) => {
            false
        }
        (syn::Type::Ptr(_), syn::Type::Ptr(_))
        | (syn::Type::BareFn(_), syn::Type::BareFn(_))
        | (syn::Type::TraitObject(_), syn::Type::TraitObject(_))
            if !mentions(a, params) && !mentions(b, params) =>
        {
            parsing::type_key(a) == parsing::type_key(b)
        }
        // Anything else is compared conservatively
        _ => true,
    }
}

fn same_kind(a: &syn::Type, b: &syn::Type) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

fn paths_may_match(a: &syn::Path, b: &syn::Path, params: &[syn::Ident]) -> bool {
    // `Self` may stand for any other spelling of the owner
    if a.is_ident("Self") || b.is_ident("Self") {
        return true;
    }
    if is_projection(a, params) || is_projection(b, params) {
        return true;
    }

    let (a, b) = (named_segments(a), named_segments(b));
    a.iter().rev().zip(b.iter().rev()).all(|(a, b)| {
        a.ident == b.ident && arguments_may_match(&a.arguments, &b.arguments, params)
    })
}

/// Segments after any leading `crate`, `self` or `super`, which can reach the same item
/// under a different spelling.
fn named_segments(path: &syn::Path) -> Vec<&syn::PathSegment> {
    path.segments
        .iter()
        .skip_while(|segment| {
            segment.ident == "crate"
                || segment.ident == "self"
                || segment.ident == "super"
                || segment.ident == "$crate"
        })
        .collect()
}

fn arguments_may_match(
    a: &syn::PathArguments,
    b: &syn::PathArguments,
    params: &[syn::Ident],
) -> bool {
    match (a, b) {
        (syn::PathArguments::None, syn::PathArguments::None) => true,
        (syn::PathArguments::AngleBracketed(a), syn::PathArguments::AngleBracketed(b)) => {
            a.args.len() == b.args.len()
                && a.args.iter().zip(&b.args).all(|pair| match pair {
                    (syn::GenericArgument::Type(a), syn::GenericArgument::Type(b)) => {
                        may_unify(a, b, params)
                    }
                    // The impls are generic over the owner's lifetimes
                    (syn::GenericArgument::Lifetime(_), syn::GenericArgument::Lifetime(_)) => true,
                    (a, b) => a.to_token_stream().to_string() == b.to_token_stream().to_string(),
                })
        }
        (syn::PathArguments::Parenthesized(a), syn::PathArguments::Parenthesized(b)) => {
            a.to_token_stream().to_string() == b.to_token_stream().to_string()
        }
        _ => false,
    }
}

/// Array lengths only differ for certain when both are literals.
fn lengths_may_match(a: &syn::Expr, b: &syn::Expr) -> bool {
    match (a, b) {
        (syn::Expr::Lit(a), syn::Expr::Lit(b)) => {
            a.lit.to_token_stream().to_string() == b.lit.to_token_stream().to_string()
        }
        _ => true,
    }
}

/// `T::Item`, which projects out of a parameter and can be anything.
fn is_projection(path: &syn::Path, params: &[syn::Ident]) -> bool {
    path.segments.len() > 1
        && path
            .segments
            .first()
            .is_some_and(|segment| params.contains(&segment.ident))
}

/// Types whose outermost constructor is known from the syntax alone.
fn is_structural(ty: &syn::Type, params: &[syn::Ident]) -> bool {
    match ty {
        syn::Type::Path(type_path) => {
            type_path.qself.is_none() && !is_projection(&type_path.path, params)
        }
        syn::Type::Reference(_)
        | syn::Type::Slice(_)
        | syn::Type::Array(_)
        | syn::Type::Tuple(_)
        | syn::Type::Ptr(_)
        | syn::Type::BareFn(_)
        | syn::Type::Never(_) => true,
        _ => false,
    }
}

fn is_bare_param(ty: &syn::Type, params: &[syn::Ident]) -> bool {
    match parsing::strip_groups(ty) {
        syn::Type::Path(type_path) => {
            type_path.qself.is_none()
                && type_path
                    .path
                    .get_ident()
                    .is_some_and(|ident| params.contains(ident))
        }
        _ => false,
    }
}

fn plan_fields(schema: &VariantSchema, has_duplicate_types: bool) -> Vec<FieldPlan> {
    let params = schema.type_params();
    let fields = &schema.fields;

    let overlapping = fields.iter().enumerate().any(|(index, field)| {
        fields[index + 1..]
            .iter()
            .any(|other| may_unify(&field.ty, &other.ty, &params))
    });
    if has_duplicate_types || overlapping {
        return vec![FieldPlan::default(); fields.len()];
    }

    fields
        .iter()
        .map(|field| FieldPlan {
            from: true,
            try_from: !is_uncovered_param(&field.ty, &params) && !schema.is_recursive(field),
        })
        .collect()
}

fn check_derives(schema: &VariantSchema, equality: &EqualityPlan, use_serde: bool) -> syn::Result<()> {
    let mut synthesized = vec!["PartialEq"];
    if equality.hash {
        synthesized.push("Hash");
    }
    if equality.eq {
        synthesized.push("Eq");
    }
    if use_serde {
        synthesized.extend(["Serialize", "Deserialize"]);
    }

    let mut errors: Option<syn::Error> = None;
    for path in &schema.derives {
        let Some(last) = path.segments.last() else {
            continue;
        };
        if synthesized.iter().any(|name| last.ident == name) {
            let error = syn::Error::new(
                path.span(),
                format!("`{}` is implemented by #[one_of] and cannot also be derived", last.ident),
            );
            match errors.as_mut() {
                Some(es) => es.combine(error),
                None => errors = Some(error),
            }
        }
    }

    match errors {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub(crate) fn analyze(schema: &VariantSchema, options: &MacroOptions) -> syn::Result<SynthesisPlan> {
    let equality = EqualityPlan {
        eq: options.derive_eq(),
        hash: options.derive_hash(),
    };
    check_derives(schema, &equality, options.use_serde())?;

    let constructor = plan_constructor(schema)?;
    let has_duplicate_types = has_duplicate_types(&schema.fields);
    let fields = plan_fields(schema, has_duplicate_types);

    let mut requests = vec![];
    if constructor == ConstructorPlan::Generate {
        requests.push(Request::Constructor);
    }
    requests.extend([
        Request::Factories,
        Request::Accessors,
        Request::Dispatch,
        Request::Introspection,
    ]);
    if fields.iter().any(|plan| plan.from || plan.try_from) {
        requests.push(Request::Conversions);
    }
    requests.push(Request::Equality);
    if options.use_serde() {
        requests.push(Request::Serde);
    }

    Ok(SynthesisPlan {
        has_duplicate_types,
        constructor,
        fields,
        equality,
        requests,
    })
}
