use syn::parse_quote;

pub(crate) fn crate_path() -> syn::Path {
    parse_quote!(::oneof)
}

pub(crate) fn private_module() -> syn::Path {
    parse_quote!(::oneof::__private)
}

/// Generic parameter for the result of `map`-style dispatch. Chosen so it cannot
/// shadow a parameter of the owning type.
pub(crate) fn output_param() -> syn::Ident {
    quote::format_ident!("__Output")
}
