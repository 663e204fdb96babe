use proc_macro2::TokenStream;
use quote::quote;

use crate::{
    analysis::{Request, SynthesisPlan},
    constructor, conversion, dispatch, equality, introspection,
    schema::VariantSchema,
    serde_impl,
};

/// Collects the output of each synthesis request.
///
/// Inherent methods are gathered into a single impl block, trait impls are emitted
/// next to it, and everything is wrapped in an anonymous const.
pub(crate) struct Emitter<'s> {
    schema: &'s VariantSchema,
    plan: &'s SynthesisPlan,
    inherent: Vec<TokenStream>,
    trait_impls: Vec<TokenStream>,
}

impl<'s> Emitter<'s> {
    pub(crate) fn new(schema: &'s VariantSchema, plan: &'s SynthesisPlan) -> Self {
        Self {
            schema,
            plan,
            inherent: vec![],
            trait_impls: vec![],
        }
    }

    pub(crate) fn request(&mut self, request: Request) {
        let schema = self.schema;
        match request {
            Request::Constructor => self.inherent.push(constructor::constructor(schema)),
            Request::Factories => self.inherent.push(constructor::factories(schema)),
            Request::Accessors => self.inherent.push(introspection::accessors(schema)),
            Request::Dispatch => self.inherent.push(dispatch::dispatch(schema)),
            Request::Introspection => self.trait_impls.push(introspection::one_of_impl(schema)),
            Request::Conversions => self
                .trait_impls
                .push(conversion::conversions(schema, self.plan)),
            Request::Equality => self
                .trait_impls
                .push(equality::equality(schema, &self.plan.equality)),
            Request::Serde => self.trait_impls.push(serde_impl::serde_impls(schema)),
        }
    }

    pub(crate) fn finish(self) -> TokenStream {
        let owner = self.schema.owner_type();
        let (impl_generics, _type_generics, where_clause) = self.schema.generics.split_for_impl();
        let inherent = self.inherent;
        let trait_impls = self.trait_impls;

        quote! {
            const _: () = {
                #[allow(dead_code)]
                impl #impl_generics #owner
                #where_clause {
                    #(#inherent)*
                }

                #(#trait_impls)*
            };
        }
    }
}

/// Runs every request of `plan` in order.
pub(crate) fn emit(schema: &VariantSchema, plan: &SynthesisPlan) -> TokenStream {
    let mut emitter = Emitter::new(schema, plan);
    for &request in &plan.requests {
        emitter.request(request);
    }
    emitter.finish()
}
