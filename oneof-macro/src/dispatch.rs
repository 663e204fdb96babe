use proc_macro2::TokenStream;
use quote::quote;

use crate::{schema::VariantSchema, tokens};

/// `map`, `visit`, `map_or_else` and `visit_or_else`.
///
/// All four scan the slots in declaration order and stop at the first match, so an
/// instance with several occupied slots (only reachable by bypassing the factories)
/// still dispatches deterministically.
pub(crate) fn dispatch(schema: &VariantSchema) -> TokenStream {
    let crate_path = tokens::crate_path();
    let private_module = tokens::private_module();
    let output = tokens::output_param();
    let vis = &schema.vis;

    let idents: Vec<_> = schema.fields.iter().map(|field| &field.ident).collect();
    let handlers: Vec<_> = schema
        .fields
        .iter()
        .map(|field| field.method_ident("on"))
        .collect();
    let types: Vec<_> = schema.fields.iter().map(|field| &field.ty).collect();

    quote! {
        /// Transforms the occupied slot with its handler.
        ///
        /// Fails with `NoVariantOccupied` if no slot is occupied.
        #[allow(clippy::too_many_arguments)]
        #vis fn map<#output>(
            &self,
            #(#handlers: impl #private_module::FnOnce(&#types) -> #output,)*
        ) -> #private_module::Result<#output, #crate_path::NoVariantOccupied> {
            #(
                if let #private_module::Option::Some(payload) = &self.#idents {
                    return #private_module::Result::Ok(#handlers(payload));
                }
            )*
            #private_module::Result::Err(#crate_path::NoVariantOccupied::of::<Self>())
        }

        /// Runs the handler of the occupied slot.
        ///
        /// Fails if no slot is occupied.
        #[allow(clippy::too_many_arguments)]
        #vis fn visit(
            &self,
            #(#handlers: impl #private_module::FnOnce(&#types),)*
        ) -> #private_module::Result<(), #crate_path::NoVariantOccupied> {
            #(
                if let #private_module::Option::Some(payload) = &self.#idents {
                    #handlers(payload);
                    return #private_module::Result::Ok(());
                }
            )*
            #private_module::Result::Err(#crate_path::NoVariantOccupied::of::<Self>())
        }

        /// Transforms the first slot that is occupied and has a handler, or computes
        /// `default` when there is no such slot.
        #[allow(clippy::too_many_arguments)]
        #vis fn map_or_else<#output>(
            &self,
            default: impl #private_module::FnOnce() -> #output,
            #(#handlers: #private_module::Option<&mut dyn #private_module::FnMut(&#types) -> #output>,)*
        ) -> #output {
            #(
                if let (#private_module::Option::Some(payload), #private_module::Option::Some(handler)) =
                    (&self.#idents, #handlers)
                {
                    return handler(payload);
                }
            )*
            default()
        }

        /// Runs the handler of the first slot that is occupied and has a handler, or
        /// `default` when there is no such slot.
        #[allow(clippy::too_many_arguments)]
        #vis fn visit_or_else(
            &self,
            default: impl #private_module::FnOnce(),
            #(#handlers: #private_module::Option<&mut dyn #private_module::FnMut(&#types)>,)*
        ) {
            #(
                if let (#private_module::Option::Some(payload), #private_module::Option::Some(handler)) =
                    (&self.#idents, #handlers)
                {
                    handler(payload);
                    return;
                }
            )*
            default()
        }
    }
}
