mod analysis;
mod constructor;
mod conversion;
mod direct;
mod dispatch;
mod emit;
mod equality;
mod helper_attrs;
mod introspection;
mod one_of;
mod parsing;
mod schema;
mod serde_impl;
mod tokens;

#[proc_macro_attribute]
pub fn one_of(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let (Ok(tokens) | Err(tokens)) =
        one_of::one_of(attr.into(), item.into()).map_err(|e| e.into_compile_error());
    tokens.into()
}

#[proc_macro]
pub fn one_of_block(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let (Ok(tokens) | Err(tokens)) =
        one_of::one_of_block(input.into()).map_err(|e| e.into_compile_error());
    tokens.into()
}
