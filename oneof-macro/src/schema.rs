use std::collections::HashMap;

use convert_case::{Case, Casing as _};
use quote::format_ident;
use syn::ext::IdentExt as _;

use crate::{analysis, parsing};

/// The struct a OneOf is synthesized for, together with any inherent impl
/// blocks written next to it.
pub(crate) struct Declaration<'a> {
    pub(crate) item: &'a syn::ItemStruct,
    pub(crate) impls: Vec<&'a syn::ItemImpl>,
}

impl<'a> Declaration<'a> {
    pub(crate) fn new(item: &'a syn::ItemStruct) -> Self {
        Self {
            item,
            impls: vec![],
        }
    }

    pub(crate) fn with_impls(mut self, impls: impl IntoIterator<Item = &'a syn::ItemImpl>) -> Self {
        self.impls.extend(impls);
        self
    }

    /// Whether `item_impl` is an inherent impl of this declaration's struct.
    pub(crate) fn owns(&self, item_impl: &syn::ItemImpl) -> bool {
        if item_impl.trait_.is_some() {
            return false;
        }
        let syn::Type::Path(type_path) = parsing::strip_groups(&item_impl.self_ty) else {
            return false;
        };
        type_path.qself.is_none()
            && type_path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == self.item.ident)
    }
}

pub(crate) struct VariantField {
    pub(crate) ident: syn::Ident,
    pub(crate) ty: syn::Type,
}

impl VariantField {
    fn trimmed(&self) -> String {
        self.ident.unraw().to_string().trim_start_matches('_').to_string()
    }

    /// snake_case base for generated method names (`from_*`, `on_*`, ...).
    pub(crate) fn stem(&self) -> String {
        self.trimmed().to_case(Case::Snake)
    }

    /// PascalCase name, as the slot would be spelled as an enum variant.
    pub(crate) fn variant_name(&self) -> String {
        self.trimmed().to_case(Case::Pascal)
    }

    /// Serialized key of the slot.
    pub(crate) fn key(&self) -> String {
        self.ident.unraw().to_string()
    }

    pub(crate) fn method_ident(&self, prefix: &str) -> syn::Ident {
        format_ident!("{prefix}_{}", self.stem(), span = self.ident.span())
    }
}

pub(crate) struct VariantSchema {
    pub(crate) owner: syn::Ident,
    pub(crate) vis: syn::Visibility,
    pub(crate) generics: syn::Generics,
    pub(crate) fields: Vec<VariantField>,
    /// Named fields which are not slots. They are default-initialized by the generated constructor.
    pub(crate) other_fields: Vec<syn::Ident>,
    pub(crate) derives: Vec<syn::Path>,
    pub(crate) existing_constructor: Option<syn::Signature>,
}

impl VariantSchema {
    pub(crate) fn owner_type(&self) -> syn::Type {
        let owner = &self.owner;
        let (_, type_generics, _) = self.generics.split_for_impl();
        syn::parse_quote!(#owner #type_generics)
    }

    /// Identifiers a payload type would use to refer back to the owner.
    fn owner_idents(&self) -> [syn::Ident; 2] {
        [
            self.owner.clone(),
            syn::Ident::new("Self", self.owner.span()),
        ]
    }

    pub(crate) fn is_recursive(&self, field: &VariantField) -> bool {
        analysis::mentions(&field.ty, &self.owner_idents())
    }

    /// The owner's generics with `Payload: bound` added for every slot.
    ///
    /// Recursive payloads are left out, proving them goes through the impl being generated.
    pub(crate) fn bounded_generics(&self, bound: &syn::Path) -> syn::Generics {
        let mut generics = self.generics.clone();
        for field in &self.fields {
            if self.is_recursive(field) {
                continue;
            }
            let ty = &field.ty;
            generics
                .make_where_clause()
                .predicates
                .push(syn::parse_quote!(#ty: #bound));
        }
        generics
    }

    pub(crate) fn type_params(&self) -> Vec<syn::Ident> {
        self.generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect()
    }
}

fn is_slot_candidate(field: &syn::Field) -> bool {
    matches!(field.vis, syn::Visibility::Inherited) && parsing::option_payload(&field.ty).is_some()
}

/// Reads the slots of `declaration`.
///
/// `Ok(None)` means there is nothing to synthesize and the item should be left as is.
pub(crate) fn extract_schema(declaration: &Declaration) -> syn::Result<Option<VariantSchema>> {
    let item = declaration.item;

    let syn::Fields::Named(named) = &item.fields else {
        return Ok(None);
    };

    let mut errors: Option<syn::Error> = None;
    let mut fields = vec![];
    let mut other_fields = vec![];

    for field in &named.named {
        let Some(ident) = &field.ident else {
            continue;
        };

        let options = match parsing::FieldOptions::from_attrs(&field.attrs) {
            Ok(options) => options,
            Err(e) => {
                match errors.as_mut() {
                    Some(es) => es.combine(e),
                    None => errors = Some(e),
                }
                continue;
            }
        };

        match parsing::option_payload(&field.ty) {
            Some(payload) if is_slot_candidate(field) && !options.skip() => {
                fields.push(VariantField {
                    ident: ident.clone(),
                    ty: payload.clone(),
                });
            }
            _ => other_fields.push(ident.clone()),
        }
    }

    // Generated method names must stay unique
    let mut stems: HashMap<String, &syn::Ident> = HashMap::new();
    for field in &fields {
        let stem = field.stem();
        if let Some(first) = stems.get(&stem) {
            let e = syn::Error::new(
                field.ident.span(),
                format!("`{}` and `{first}` both generate `from_{stem}`", field.ident),
            );
            match errors.as_mut() {
                Some(es) => es.combine(e),
                None => errors = Some(e),
            }
        } else {
            stems.insert(stem, &field.ident);
        }
    }

    if let Some(errors) = errors {
        return Err(errors);
    }

    if fields.is_empty() {
        return Ok(None);
    }

    let mut existing_constructor = None;
    for item_impl in &declaration.impls {
        for impl_item in &item_impl.items {
            if let syn::ImplItem::Fn(impl_fn) = impl_item {
                if impl_fn.sig.ident == "new" && existing_constructor.is_none() {
                    existing_constructor = Some(impl_fn.sig.clone());
                }
            }
        }
    }

    Ok(Some(VariantSchema {
        owner: item.ident.clone(),
        vis: item.vis.clone(),
        generics: item.generics.clone(),
        fields,
        other_fields,
        derives: parsing::derived_paths(&item.attrs)?,
        existing_constructor,
    }))
}
