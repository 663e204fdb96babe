use proc_macro2::TokenStream;
use quote::quote;

use crate::{parsing, schema::VariantSchema, tokens};

pub(crate) fn one_of_impl(schema: &VariantSchema) -> TokenStream {
    let crate_path = tokens::crate_path();
    let private_module = tokens::private_module();

    let owner = schema.owner_type();
    let owner_name = schema.owner.to_string();
    let (impl_generics, _type_generics, where_clause) = schema.generics.split_for_impl();

    let variants = schema.fields.iter().map(|field| field.variant_name());
    let payload_types = schema
        .fields
        .iter()
        .map(|field| parsing::type_display(&field.ty));
    let checks = schema.fields.iter().enumerate().map(|(index, field)| {
        let ident = &field.ident;
        quote! {
            if self.#ident.is_some() {
                return #private_module::Option::Some(#index);
            }
        }
    });

    quote! {
        impl #impl_generics #crate_path::OneOf for #owner
        #where_clause {
            const NAME: &'static str = ::core::concat!(::core::module_path!(), "::", #owner_name);
            const VARIANTS: &'static [&'static str] = &[#(#variants),*];
            const PAYLOAD_TYPES: &'static [&'static str] = &[#(#payload_types),*];

            fn occupied_index(&self) -> #private_module::Option<usize> {
                #(#checks)*
                #private_module::Option::None
            }
        }
    }
}

/// `is_<slot>` and `as_<slot>` for every slot.
pub(crate) fn accessors(schema: &VariantSchema) -> TokenStream {
    let private_module = tokens::private_module();
    let vis = &schema.vis;

    let accessors = schema.fields.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        let is_ident = field.method_ident("is");
        let as_ident = field.method_ident("as");
        let is_doc = format!("Whether the `{}` slot is occupied.", field.key());
        let as_doc = format!("The payload of the `{}` slot, if occupied.", field.key());

        quote! {
            #[doc = #is_doc]
            #vis fn #is_ident(&self) -> bool {
                self.#ident.is_some()
            }

            #[doc = #as_doc]
            #vis fn #as_ident(&self) -> #private_module::Option<&#ty> {
                self.#ident.as_ref()
            }
        }
    });

    quote! {
        #(#accessors)*
    }
}
