use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;

use crate::{analysis::EqualityPlan, schema::VariantSchema, tokens};

pub(crate) fn equality(schema: &VariantSchema, plan: &EqualityPlan) -> TokenStream {
    let private_module = tokens::private_module();
    let owner = schema.owner_type();

    let partial_eq_bound: syn::Path = parse_quote!(#private_module::PartialEq);
    let generics = schema.bounded_generics(&partial_eq_bound);
    let (impl_generics, _type_generics, where_clause) = generics.split_for_impl();

    // Equal when one slot is occupied on both sides with equal payloads and every
    // other slot is absent on both sides.
    let arms = schema.fields.iter().map(|field| {
        let ident = &field.ident;
        let others: Vec<_> = schema
            .fields
            .iter()
            .filter(|other| other.ident != field.ident)
            .map(|other| {
                let other = &other.ident;
                quote!(self.#other.is_none() && other.#other.is_none())
            })
            .collect();
        let all_others_absent = others
            .into_iter()
            .reduce(|a, b| quote!(#a && #b))
            .unwrap_or_else(|| quote!(true));

        quote! {
            if let (#private_module::Option::Some(left), #private_module::Option::Some(right)) =
                (&self.#ident, &other.#ident)
            {
                if #all_others_absent {
                    return left == right;
                }
            }
        }
    });

    let mut output = quote! {
        impl #impl_generics #private_module::PartialEq for #owner
        #where_clause {
            fn eq(&self, other: &Self) -> bool {
                if #private_module::ptr_eq(self, other) {
                    return true;
                }
                #(#arms)*
                false
            }
        }
    };

    if plan.eq {
        let eq_bound: syn::Path = parse_quote!(#private_module::Eq);
        let generics = schema.bounded_generics(&eq_bound);
        let (impl_generics, _type_generics, where_clause) = generics.split_for_impl();

        output.extend(quote! {
            impl #impl_generics #private_module::Eq for #owner
            #where_clause {}
        });
    }

    if plan.hash {
        let hash_bound: syn::Path = parse_quote!(#private_module::Hash);
        let generics = schema.bounded_generics(&hash_bound);
        let (impl_generics, _type_generics, where_clause) = generics.split_for_impl();

        let slots = schema.fields.iter().map(|field| {
            let ident = &field.ident;
            quote! {
                match &self.#ident {
                    #private_module::Option::Some(payload) => #private_module::Hash::hash(payload, state),
                    #private_module::Option::None => #private_module::Hash::hash(&0u8, state),
                }
            }
        });

        output.extend(quote! {
            impl #impl_generics #private_module::Hash for #owner
            #where_clause {
                fn hash<__H: #private_module::Hasher>(&self, state: &mut __H) {
                    #(#slots)*
                }
            }
        });
    }

    output
}
