use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::spanned::Spanned as _;

use crate::{
    analysis, emit, helper_attrs,
    parsing::{self, MacroOptions},
    schema::{self, Declaration},
};

/// `#[one_of(...)] struct ...`
pub(crate) fn one_of(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let options: MacroOptions = syn::parse2(attr)?;
    let mut item: syn::Item = syn::parse2(item)?;

    let syn::Item::Struct(item_struct) = &item else {
        return Err(syn::Error::new(
            item.span(),
            "#[one_of] can only be applied to a struct",
        ));
    };

    let synthesized = synthesize(&Declaration::new(item_struct), &options)?;
    helper_attrs::strip_helper_attrs(&mut item);

    Ok(quote! {
        #item
        #synthesized
    })
}

struct BlockInput {
    items: Vec<syn::Item>,
}

impl syn::parse::Parse for BlockInput {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut items = vec![];
        while !input.is_empty() {
            items.push(input.parse()?);
        }
        Ok(Self { items })
    }
}

fn block_options(item_struct: &syn::ItemStruct) -> syn::Result<MacroOptions> {
    let mut attrs = item_struct
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident(parsing::IDENT));

    let options = match attrs.next() {
        Some(attr) => MacroOptions::from_attribute(attr)?,
        None => MacroOptions::default(),
    };
    if let Some(duplicate) = attrs.next() {
        return Err(syn::Error::new(
            duplicate.span(),
            "only one #[one_of(...)] attribute is allowed on the struct",
        ));
    }
    Ok(options)
}

/// `one_of_block! { struct ... impl ... }`
///
/// Unlike the attribute, this sees the inherent impls of the struct, so a hand-written
/// `new` is used instead of a generated one.
pub(crate) fn one_of_block(input: TokenStream) -> syn::Result<TokenStream> {
    let BlockInput { mut items } = syn::parse2(input)?;

    let mut structs = items.iter().filter_map(|item| match item {
        syn::Item::Struct(item_struct) => Some(item_struct),
        _ => None,
    });
    let Some(item_struct) = structs.next() else {
        return Err(syn::Error::new(
            Span::call_site(),
            "one_of_block! expects a struct declaration",
        ));
    };
    if let Some(extra) = structs.next() {
        return Err(syn::Error::new(
            extra.ident.span(),
            "one_of_block! accepts exactly one struct",
        ));
    }

    let options = block_options(item_struct)?;
    let declaration = Declaration::new(item_struct);
    let impls: Vec<&syn::ItemImpl> = items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Impl(item_impl) if declaration.owns(item_impl) => Some(item_impl),
            _ => None,
        })
        .collect();

    let synthesized = synthesize(&declaration.with_impls(impls), &options)?;

    for item in &mut items {
        helper_attrs::strip_helper_attrs(item);
    }

    Ok(quote! {
        #(#items)*
        #synthesized
    })
}

fn synthesize(declaration: &Declaration, options: &MacroOptions) -> syn::Result<TokenStream> {
    let Some(schema) = schema::extract_schema(declaration)? else {
        return Ok(TokenStream::new());
    };
    let plan = analysis::analyze(&schema, options)?;
    Ok(emit::emit(&schema, &plan))
}

#[cfg(test)]
mod test {
    use quote::quote;

    use super::*;

    fn expand(attr: TokenStream, item: TokenStream) -> syn::File {
        syn::parse2(one_of(attr, item).unwrap()).unwrap()
    }

    fn impl_traits(file: &syn::File) -> Vec<String> {
        let mut traits = vec![];
        for item in &file.items {
            let syn::Item::Const(item_const) = item else {
                continue;
            };
            let syn::Expr::Block(block) = item_const.expr.as_ref() else {
                continue;
            };
            for stmt in &block.block.stmts {
                if let syn::Stmt::Item(syn::Item::Impl(item_impl)) = stmt {
                    if let Some((_, path, _)) = &item_impl.trait_ {
                        if let Some(last) = path.segments.last() {
                            traits.push(last.ident.to_string());
                        }
                    }
                }
            }
        }
        traits
    }

    #[test]
    fn expansion_keeps_the_struct_and_adds_impls() {
        let file = expand(
            quote!(),
            quote! {
                #[derive(Debug)]
                pub struct Event {
                    created: Option<String>,
                    #[one_of(skip)]
                    note: Option<u8>,
                    updated: Option<u64>,
                }
            },
        );

        assert_eq!(file.items.len(), 2);
        assert!(matches!(&file.items[0], syn::Item::Struct(s) if s.ident == "Event"));
        assert_eq!(
            impl_traits(&file),
            ["OneOf", "From", "TryFrom", "From", "TryFrom", "PartialEq", "Hash"]
        );
    }

    #[test]
    fn options_add_and_remove_impls() {
        let file = expand(
            quote!(serde, eq, no_hash),
            quote! {
                struct Names {
                    first: Option<String>,
                    second: Option<String>,
                }
            },
        );
        assert_eq!(
            impl_traits(&file),
            ["OneOf", "PartialEq", "Eq", "Serialize", "Deserialize"]
        );
    }

    #[test]
    fn slotless_structs_pass_through() {
        let item = quote! {
            struct Plain {
                pub a: Option<u8>,
            }
        };
        let output = one_of(quote!(), item.clone()).unwrap();
        assert_eq!(output.to_string(), item.to_string());
    }

    #[test]
    fn non_structs_are_rejected() {
        assert!(one_of(quote!(), quote!(enum E { A })).is_err());
        assert!(one_of(quote!(bogus), quote!(struct S { a: Option<u8> })).is_err());
    }

    #[test]
    fn block_sees_the_hand_written_constructor() {
        let output = one_of_block(quote! {
            #[one_of(eq)]
            struct Event {
                created: Option<String>,
                updated: Option<u64>,
                revision: u32,
            }

            impl Event {
                fn new(created: Option<String>, updated: Option<u64>) -> Self {
                    Self { created, updated, revision: 1 }
                }
            }

            fn unrelated() {}
        })
        .unwrap();
        let file: syn::File = syn::parse2(output).unwrap();

        // struct, impl, fn, const
        assert_eq!(file.items.len(), 4);
        let new_count = file
            .items
            .iter()
            .map(|item| quote!(#item).to_string())
            .map(|text| text.matches("fn new").count())
            .sum::<usize>();
        assert_eq!(new_count, 1);
        assert!(impl_traits(&file).contains(&"Eq".to_string()));
    }

    #[test]
    fn block_requires_one_struct() {
        assert!(one_of_block(quote!(fn f() {})).is_err());
        assert!(one_of_block(quote! {
            struct A { a: Option<u8> }
            struct B { b: Option<u8> }
        })
        .is_err());
    }
}
