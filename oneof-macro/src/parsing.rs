use quote::ToTokens as _;
use syn::spanned::Spanned as _;

type CommaList<T> = syn::punctuated::Punctuated<T, syn::Token![,]>;

/// The helper attribute used on the struct (block form) and its fields.
pub(crate) const IDENT: &str = "one_of";

mod kw {
    syn::custom_keyword!(serde);
    syn::custom_keyword!(eq);
    syn::custom_keyword!(no_hash);
    syn::custom_keyword!(skip);
}

/// Arguments of `#[one_of(...)]` on the owning struct.
#[derive(Clone, Default)]
pub(crate) struct MacroOptions {
    serde: Option<kw::serde>,
    eq: Option<kw::eq>,
    no_hash: Option<kw::no_hash>,
}

impl MacroOptions {
    pub(crate) fn use_serde(&self) -> bool {
        self.serde.is_some()
    }

    pub(crate) fn derive_eq(&self) -> bool {
        self.eq.is_some()
    }

    pub(crate) fn derive_hash(&self) -> bool {
        self.no_hash.is_none()
    }

    /// Reads the options from a struct-level `#[one_of]` or `#[one_of(...)]` attribute.
    pub(crate) fn from_attribute(attr: &syn::Attribute) -> syn::Result<Self> {
        match &attr.meta {
            syn::Meta::Path(_) => Ok(Self::default()),
            syn::Meta::List(list) => list.parse_args(),
            syn::Meta::NameValue(name_value) => Err(syn::Error::new(
                name_value.span(),
                "expected `#[one_of]` or `#[one_of(...)]`",
            )),
        }
    }
}

fn set_once<T: syn::parse::Parse + syn::spanned::Spanned>(
    slot: &mut Option<T>,
    input: syn::parse::ParseStream,
    name: &str,
) -> syn::Result<()> {
    let token: T = input.parse()?;
    if slot.is_some() {
        return Err(syn::Error::new(
            token.span(),
            format!("duplicate `{name}` option"),
        ));
    }
    *slot = Some(token);
    Ok(())
}

impl syn::parse::Parse for MacroOptions {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut options = Self::default();

        while !input.is_empty() {
            let lookahead = input.lookahead1();
            if lookahead.peek(kw::serde) {
                set_once(&mut options.serde, input, "serde")?;
            } else if lookahead.peek(kw::eq) {
                set_once(&mut options.eq, input, "eq")?;
            } else if lookahead.peek(kw::no_hash) {
                set_once(&mut options.no_hash, input, "no_hash")?;
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            input.parse::<syn::Token![,]>()?;
        }

        Ok(options)
    }
}

/// Arguments of `#[one_of(...)]` on a field.
#[derive(Default)]
pub(crate) struct FieldOptions {
    skip: Option<kw::skip>,
}

impl FieldOptions {
    pub(crate) fn skip(&self) -> bool {
        self.skip.is_some()
    }

    pub(crate) fn from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(IDENT) {
                continue;
            }

            let parsed: Self = attr.parse_args()?;
            if let Some(skip) = parsed.skip {
                if options.skip.replace(skip).is_some() {
                    return Err(syn::Error::new(skip.span, "duplicate `skip` option"));
                }
            }
        }
        Ok(options)
    }
}

impl syn::parse::Parse for FieldOptions {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut options = Self::default();

        while !input.is_empty() {
            let lookahead = input.lookahead1();
            if lookahead.peek(kw::skip) {
                set_once(&mut options.skip, input, "skip")?;
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            input.parse::<syn::Token![,]>()?;
        }

        Ok(options)
    }
}

/// Paths listed in every `#[derive(...)]` attribute.
pub(crate) fn derived_paths(attrs: &[syn::Attribute]) -> syn::Result<Vec<syn::Path>> {
    let mut paths = vec![];
    for attr in attrs {
        if attr.path().is_ident("derive") {
            let list = attr.parse_args_with(CommaList::<syn::Path>::parse_terminated)?;
            paths.extend(list);
        }
    }
    Ok(paths)
}

/// Looks through the invisible groups and parentheses `macro_rules!` expansion leaves behind.
pub(crate) fn strip_groups(ty: &syn::Type) -> &syn::Type {
    match ty {
        syn::Type::Group(group) => strip_groups(&group.elem),
        syn::Type::Paren(paren) => strip_groups(&paren.elem),
        _ => ty,
    }
}

/// `Some(T)` when `ty` is `Option<T>`, `std::option::Option<T>` or `core::option::Option<T>`.
pub(crate) fn option_payload(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = strip_groups(ty) else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segments: Vec<&syn::PathSegment> = type_path.path.segments.iter().collect();
    let (last, prefix) = segments.split_last()?;
    if last.ident != "Option" {
        return None;
    }
    if prefix
        .iter()
        .any(|segment| !matches!(segment.arguments, syn::PathArguments::None))
    {
        return None;
    }

    let prefix: Vec<String> = prefix.iter().map(|segment| segment.ident.to_string()).collect();
    let known_path = match prefix.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => type_path.path.leading_colon.is_none(),
        ["std", "option"] | ["core", "option"] => true,
        _ => false,
    };
    if !known_path {
        return None;
    }

    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first() {
        Some(syn::GenericArgument::Type(payload)) => Some(payload),
        _ => None,
    }
}

/// Canonical text of a type, used to decide whether two payload types are the same.
pub(crate) fn type_key(ty: &syn::Type) -> String {
    strip_groups(ty).to_token_stream().to_string()
}

/// Human readable type name, e.g. `Vec<String>` rather than `Vec < String >`.
pub(crate) fn type_display(ty: &syn::Type) -> String {
    let mut display = type_key(ty);
    for (from, to) in [
        (" :: ", "::"),
        (":: ", "::"),
        (" < ", "<"),
        ("< ", "<"),
        (" <", "<"),
        (" >", ">"),
        (" ,", ","),
        ("& ", "&"),
        (" ;", ";"),
        ("[ ", "["),
        (" ]", "]"),
        ("( ", "("),
        (" )", ")"),
    ] {
        display = display.replace(from, to);
    }
    display
}

#[cfg(test)]
mod test {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn option_shapes() {
        let accepted: [syn::Type; 4] = [
            parse_quote!(Option<u8>),
            parse_quote!(std::option::Option<u8>),
            parse_quote!(::core::option::Option<u8>),
            parse_quote!((Option<u8>)),
        ];
        for ty in &accepted {
            assert_eq!(option_payload(ty).map(type_key).as_deref(), Some("u8"));
        }

        let rejected: [syn::Type; 4] = [
            parse_quote!(u8),
            parse_quote!(my::Option<u8>),
            parse_quote!(::Option<u8>),
            parse_quote!(Vec<Option<u8>>),
        ];
        for ty in &rejected {
            assert!(option_payload(ty).is_none());
        }
    }

    #[test]
    fn display_is_compact() {
        let ty: syn::Type = parse_quote!(std::collections::HashMap<String, Vec<&'static str>>);
        assert_eq!(
            type_display(&ty),
            "std::collections::HashMap<String, Vec<&'static str>>"
        );
    }

    #[test]
    fn options_parse() {
        let options: MacroOptions = parse_quote!(serde, no_hash);
        assert!(options.use_serde());
        assert!(!options.derive_eq());
        assert!(!options.derive_hash());

        let options: MacroOptions = parse_quote!();
        assert!(!options.use_serde());
        assert!(options.derive_hash());

        assert!(syn::parse2::<MacroOptions>(quote::quote!(eq, eq)).is_err());
        assert!(syn::parse2::<MacroOptions>(quote::quote!(unknown)).is_err());
    }
}
