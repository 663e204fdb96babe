use proc_macro2::TokenStream;
use quote::quote;

use crate::{analysis::SynthesisPlan, schema::VariantSchema, tokens};

pub(crate) fn conversions(schema: &VariantSchema, plan: &SynthesisPlan) -> TokenStream {
    let crate_path = tokens::crate_path();
    let private_module = tokens::private_module();

    let owner = schema.owner_type();
    let (impl_generics, _type_generics, where_clause) = schema.generics.split_for_impl();

    let mut impls = vec![];
    for (index, (field, field_plan)) in schema.fields.iter().zip(&plan.fields).enumerate() {
        let ident = &field.ident;
        let ty = &field.ty;
        let factory = field.method_ident("from");

        if field_plan.from {
            impls.push(quote! {
                impl #impl_generics #private_module::From<#ty> for #owner
                #where_clause {
                    fn from(payload: #ty) -> Self {
                        Self::#factory(payload)
                    }
                }
            });
        }

        if field_plan.try_from {
            impls.push(quote! {
                impl #impl_generics #private_module::TryFrom<#owner> for #ty
                #where_clause {
                    type Error = #owner;

                    fn try_from(mut value: #owner) -> #private_module::Result<Self, Self::Error> {
                        if #crate_path::OneOf::occupied_index(&value) == #private_module::Option::Some(#index) {
                            if let #private_module::Option::Some(payload) = value.#ident.take() {
                                return #private_module::Result::Ok(payload);
                            }
                        }
                        #private_module::Result::Err(value)
                    }
                }
            });
        }
    }

    quote! {
        #(#impls)*
    }
}
