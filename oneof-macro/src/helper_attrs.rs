use directed_visit::{DirectMut, Visitor, syn::visit::FullMut};

use crate::parsing;

/// Drops `#[one_of(...)]` from structs and their fields, the only places it is read.
struct HelperAttrs;

impl HelperAttrs {
    fn strip(attrs: &mut Vec<syn::Attribute>) {
        attrs.retain(|attr| !attr.path().is_ident(parsing::IDENT));
    }
}

impl FullMut for HelperAttrs {
    fn visit_item_struct_mut<D>(visitor: Visitor<'_, D, Self>, node: &mut syn::ItemStruct)
    where
        D: DirectMut<Self, syn::ItemStruct> + ?Sized,
    {
        Self::strip(&mut node.attrs);
        Visitor::visit_mut(visitor, node);
    }

    fn visit_field_mut<D>(visitor: Visitor<'_, D, Self>, node: &mut syn::Field)
    where
        D: DirectMut<Self, syn::Field> + ?Sized,
    {
        Self::strip(&mut node.attrs);
        Visitor::visit_mut(visitor, node);
    }
}

/// Removes the helper attributes the compiler would otherwise reject once `item` is
/// re-emitted.
pub(crate) fn strip_helper_attrs(item: &mut syn::Item) {
    directed_visit::visit_mut(&mut crate::direct::OneOfDirect, &mut HelperAttrs, item);
}

#[cfg(test)]
mod test {
    use quote::ToTokens as _;
    use syn::parse_quote;

    #[test]
    fn struct_and_field_options_are_stripped() {
        let mut item: syn::Item = parse_quote! {
            #[one_of(eq)]
            #[derive(Debug)]
            struct S {
                #[one_of(skip)]
                a: Option<u8>,
                #[doc = "kept"]
                b: Option<u8>,
            }
        };
        super::strip_helper_attrs(&mut item);

        let syn::Item::Struct(item_struct) = &item else {
            panic!("still a struct");
        };
        assert_eq!(item_struct.attrs.len(), 1);
        assert!(item_struct.attrs[0].path().is_ident("derive"));
        let field_attrs: Vec<usize> = item_struct
            .fields
            .iter()
            .map(|field| field.attrs.len())
            .collect();
        assert_eq!(field_attrs, [0, 1]);

        let text = item.to_token_stream().to_string();
        assert!(!text.contains("one_of"));
        assert!(text.contains("kept"));
    }

    #[test]
    fn other_items_pass_through() {
        let original: syn::Item = parse_quote! {
            impl S {
                #[inline]
                fn new(a: Option<u8>) -> Self {
                    Self { a }
                }
            }
        };
        let mut item = original.clone();
        super::strip_helper_attrs(&mut item);
        assert_eq!(
            item.to_token_stream().to_string(),
            original.to_token_stream().to_string()
        );
    }
}
