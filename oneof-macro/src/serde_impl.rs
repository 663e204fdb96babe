use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;

use crate::{schema::VariantSchema, tokens};

fn serde_module() -> syn::Path {
    let private_module = tokens::private_module();
    parse_quote!(#private_module::serde)
}

/// `Serialize` and `Deserialize` as a map with a single entry keyed by the occupied slot.
pub(crate) fn serde_impls(schema: &VariantSchema) -> TokenStream {
    let serialize = serialize(schema);
    let deserialize = deserialize(schema);

    quote! {
        #serialize
        #deserialize
    }
}

fn serialize(schema: &VariantSchema) -> TokenStream {
    let private_module = tokens::private_module();
    let serde_module = serde_module();
    let owner = schema.owner_type();

    let bound: syn::Path = parse_quote!(#serde_module::serde_crate::Serialize);
    let generics = schema.bounded_generics(&bound);
    let (impl_generics, _type_generics, where_clause) = generics.split_for_impl();

    let slots = schema.fields.iter().map(|field| {
        let ident = &field.ident;
        let key = field.key();
        quote! {
            if let #private_module::Option::Some(payload) = &self.#ident {
                return #serde_module::serialize_slot(serializer, #key, payload);
            }
        }
    });

    quote! {
        impl #impl_generics #serde_module::serde_crate::Serialize for #owner
        #where_clause {
            fn serialize<__S>(&self, serializer: __S) -> #private_module::Result<__S::Ok, __S::Error>
            where
                __S: #serde_module::serde_crate::Serializer,
            {
                #(#slots)*
                #serde_module::serialize_vacant(serializer)
            }
        }
    }
}

fn deserialize(schema: &VariantSchema) -> TokenStream {
    let private_module = tokens::private_module();
    let serde_module = serde_module();
    let owner = schema.owner_type();

    let bound: syn::Path = parse_quote!(#serde_module::serde_crate::Deserialize<'de>);
    let mut de_generics = schema.bounded_generics(&bound);
    de_generics.params.insert(0, parse_quote!('de));
    let (de_impl_generics, _de_type_generics, de_where_clause) = de_generics.split_for_impl();
    let (impl_generics, type_generics, where_clause) = schema.generics.split_for_impl();

    let keys: Vec<String> = schema.fields.iter().map(|field| field.key()).collect();
    let factories = schema.fields.iter().map(|field| field.method_ident("from"));
    let vacant = schema
        .fields
        .iter()
        .map(|_| quote!(#private_module::Option::None));

    let expecting = format!(
        "a map with at most one entry, keyed by one of: {}",
        keys.iter()
            .map(|key| format!("`{key}`"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    quote! {
        impl #de_impl_generics #serde_module::serde_crate::Deserialize<'de> for #owner
        #de_where_clause {
            fn deserialize<__D>(deserializer: __D) -> #private_module::Result<Self, __D::Error>
            where
                __D: #serde_module::serde_crate::Deserializer<'de>,
            {
                struct __Visitor #impl_generics (#private_module::PhantomData<fn() -> #owner>)
                #where_clause;

                impl #de_impl_generics #serde_module::serde_crate::de::Visitor<'de> for __Visitor #type_generics
                #de_where_clause {
                    type Value = #owner;

                    fn expecting(&self, formatter: &mut #private_module::fmt::Formatter<'_>) -> #private_module::fmt::Result {
                        formatter.write_str(#expecting)
                    }

                    fn visit_map<__A>(self, mut map: __A) -> #private_module::Result<Self::Value, __A::Error>
                    where
                        __A: #serde_module::serde_crate::de::MapAccess<'de>,
                    {
                        const KEYS: &[&str] = &[#(#keys),*];

                        let #private_module::Option::Some(key) = map.next_key::<#private_module::String>()? else {
                            return #private_module::Result::Ok(<#owner>::new(#(#vacant),*));
                        };
                        let value = match key.as_str() {
                            #(#keys => <#owner>::#factories(map.next_value()?),)*
                            _ => {
                                return #private_module::Result::Err(
                                    <__A::Error as #serde_module::serde_crate::de::Error>::unknown_variant(&key, KEYS),
                                );
                            }
                        };
                        #serde_module::end_single_entry(&mut map, &self)?;
                        #private_module::Result::Ok(value)
                    }
                }

                #serde_module::serde_crate::Deserializer::deserialize_map(
                    deserializer,
                    __Visitor(#private_module::PhantomData),
                )
            }
        }
    }
}
