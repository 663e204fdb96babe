use proc_macro2::TokenStream;
use quote::quote;

use crate::{schema::VariantSchema, tokens};

/// The multi-slot constructor every factory goes through.
pub(crate) fn constructor(schema: &VariantSchema) -> TokenStream {
    let private_module = tokens::private_module();

    let params = schema.fields.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        quote!(#ident: #private_module::Option<#ty>)
    });
    let slots = schema.fields.iter().map(|field| &field.ident);
    let others = &schema.other_fields;

    quote! {
        #[allow(clippy::too_many_arguments)]
        fn new(#(#params),*) -> Self {
            Self {
                #(#slots,)*
                #(#others: #private_module::Default::default(),)*
            }
        }
    }
}

/// One `from_<slot>` factory per slot, each occupying only its own slot.
pub(crate) fn factories(schema: &VariantSchema) -> TokenStream {
    let private_module = tokens::private_module();
    let vis = &schema.vis;

    let factories = schema.fields.iter().enumerate().map(|(index, field)| {
        let factory = field.method_ident("from");
        let ty = &field.ty;
        let doc = format!("Creates a value with only the `{}` slot occupied.", field.key());

        let args = (0..schema.fields.len()).map(|other| {
            if other == index {
                quote!(#private_module::Option::Some(payload))
            } else {
                quote!(#private_module::Option::None)
            }
        });

        quote! {
            #[doc = #doc]
            #vis fn #factory(payload: #ty) -> Self {
                Self::new(#(#args),*)
            }
        }
    });

    quote! {
        #(#factories)*
    }
}
