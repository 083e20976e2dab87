use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, GenericArgument, Ident, PathArguments,
    Type, Variant,
};

/// What the expansion needs to know about a single variant.
struct VariantInfo<'a> {
    ident: &'a Ident,
    source: Option<&'a Field>,
    has_context: bool,
    cfg: Vec<&'a Attribute>,
}

impl VariantInfo<'_> {
    fn is_internal(&self) -> bool {
        self.ident == "Internal"
    }
}

pub fn expand(input: DeriveInput) -> TokenStream {
    match try_expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(input: &DeriveInput) -> Result<TokenStream, Error> {
    let Data::Enum(data) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "beacon_error can only be applied to enums"));
    };

    let variants =
        data.variants.iter().map(inspect_variant).collect::<Result<Vec<_>, Error>>()?;

    let name = &input.ident;
    let ext = format_ident!("{name}Ext");

    let derives = missing_derives(&input.attrs)?;
    let ext_trait = context_trait(name, &ext, &variants);
    let conversions = variants.iter().filter_map(|v| source_conversion(name, &ext, v));
    let internal = internal_conversions(name, &variants);

    Ok(quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #ext_trait
        #(#conversions)*
        #internal

        #[allow(dead_code)]
        fn format_context(
            context: &::std::option::Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            match context {
                Some(c) => ::std::borrow::Cow::Owned(format!(" ({c})")),
                None => ::std::borrow::Cow::Borrowed(""),
            }
        }
    })
}

fn inspect_variant(variant: &Variant) -> Result<VariantInfo<'_>, Error> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(Error::new_spanned(
            variant,
            "beacon_error variants must use named fields (`message`/`source` and `context`)",
        ));
    };

    let mut source = None;
    let mut has_context = false;
    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        if ident == "context" {
            if !is_cow_option(&field.ty) {
                return Err(Error::new_spanned(
                    &field.ty,
                    "`context` must be `Option<Cow<'static, str>>`",
                ));
            }
            has_context = true;
        } else if ident == "source" || field.attrs.iter().any(|a| a.path().is_ident("source")) {
            source = Some(field);
        }
    }

    if source.is_some() && !has_context {
        return Err(Error::new_spanned(
            &variant.ident,
            "variants wrapping a source also need `context: Option<Cow<'static, str>>`",
        ));
    }

    Ok(VariantInfo {
        ident: &variant.ident,
        source,
        has_context,
        cfg: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).collect(),
    })
}

fn missing_derives(attrs: &[Attribute]) -> Result<TokenStream, Error> {
    let mut has_debug = false;
    let mut has_error = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                has_debug |= last.ident == "Debug";
                has_error |= last.ident == "Error";
            }
            Ok(())
        })?;
    }

    let mut derives = Vec::new();
    if !has_debug {
        derives.push(quote!(Debug));
    }
    if !has_error {
        derives.push(quote!(::thiserror::Error));
    }
    Ok(if derives.is_empty() { quote!() } else { quote!(#[derive(#(#derives),*)]) })
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[VariantInfo<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        let cfg = &v.cfg;
        quote! { #(#cfg)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn source_conversion(name: &Ident, ext: &Ident, v: &VariantInfo<'_>) -> Option<TokenStream> {
    if v.is_internal() {
        return None;
    }
    let field = v.source?;
    let field_ident = field.ident.as_ref()?;
    let ty = &field.ty;
    let ident = v.ident;
    let cfg = &v.cfg;

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field_ident: #ty) -> Self {
                Self::#ident { #field_ident, context: None }
            }
        }

        #(#cfg)*
        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, #name> {
                self.map_err(|#field_ident| #name::#ident {
                    #field_ident,
                    context: Some(context.into()),
                })
            }
        }
    })
}

fn internal_conversions(name: &Ident, variants: &[VariantInfo<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.is_internal()) else {
        return quote!();
    };
    let cfg = &internal.cfg;

    quote! {
        #(#cfg)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfg)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

/// Matches `Option<Cow<'static, str>>` by its last path segments.
fn is_cow_option(ty: &Type) -> bool {
    let Some(inner) = single_type_arg(ty, "Option") else {
        return false;
    };
    let Type::Path(cow) = inner else {
        return false;
    };
    let Some(seg) = cow.path.segments.last() else {
        return false;
    };
    if seg.ident != "Cow" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return false;
    };
    let mut args = args.args.iter();
    let lifetime_ok =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_ok = matches!(
        args.next(),
        Some(GenericArgument::Type(Type::Path(p)))
            if p.path.segments.last().is_some_and(|s| s.ident == "str")
    );
    lifetime_ok && str_ok && args.next().is_none()
}

fn single_type_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let seg = path.path.segments.last()?;
    if seg.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn existing_derives_are_not_repeated() {
        let input: DeriveInput = parse_quote! {
            #[derive(Debug, thiserror::Error)]
            enum Sample {}
        };

        let derives = missing_derives(&input.attrs).expect("valid derive list");
        assert!(derives.is_empty());
    }

    #[test]
    fn missing_derives_are_added() {
        let input: DeriveInput = parse_quote! {
            #[derive(Clone)]
            enum Sample {}
        };

        let derives = missing_derives(&input.attrs).expect("valid derive list").to_string();
        assert!(derives.contains("Debug"));
        assert!(derives.contains("thiserror"));
    }

    #[test]
    fn malformed_derive_is_rejected() {
        let input: DeriveInput = parse_quote! {
            #[derive(Debug = 1)]
            enum Sample {}
        };

        assert!(missing_derives(&input.attrs).is_err());
        assert!(try_expand(&input).is_err());
    }
}
