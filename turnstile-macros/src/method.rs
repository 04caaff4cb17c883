//! Shared parsing of annotated inherent impls.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, ReturnType, Token, Type, Visibility,
    parse::{Parse, ParseStream},
};

/// Arguments of `#[controller(...)]` and `#[plugin(...)]`.
pub(crate) struct MacroArgs {
    pub name: Option<LitStr>,
}

impl Parse for MacroArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(MacroArgs { name })
    }
}

/// What an argument of a dispatchable method receives.
pub(crate) enum ArgKind {
    Context,
    Params,
}

/// A declared method of an annotated impl.
pub(crate) struct Declared {
    pub ident: Ident,
    pub name: String,
    pub public: bool,
    pub receiver: bool,
    pub sealed: bool,
    pub returns_unit: bool,
    pub routes: Vec<LitStr>,
    item: ImplItemFn,
}

impl Declared {
    /// Public, not sealed, with a receiver.
    pub fn is_dispatchable(&self) -> bool {
        self.public && self.receiver && !self.sealed
    }

    /// `MethodFlags` expression for the descriptor table.
    pub fn flags(&self) -> TokenStream2 {
        let mut flags = quote! { ::turnstile::MethodFlags::empty() };
        if self.public {
            flags = quote! { #flags.union(::turnstile::MethodFlags::PUBLIC) };
        }
        if self.sealed {
            flags = quote! { #flags.union(::turnstile::MethodFlags::FINAL) };
        }
        if !self.receiver {
            flags = quote! { #flags.union(::turnstile::MethodFlags::CONSTRUCTOR) };
        }
        flags
    }

    /// `MethodDescriptor` expression for the descriptor table.
    pub fn descriptor(&self) -> TokenStream2 {
        let name = &self.name;
        let flags = self.flags();
        quote! { ::turnstile::MethodDescriptor::new(#name, #flags) }
    }

    /// Classify the non-receiver arguments of a dispatchable method.
    ///
    /// `context` is the accepted context type name.
    pub fn arg_kinds(&self, context: &str) -> syn::Result<Vec<ArgKind>> {
        self.item
            .sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                FnArg::Typed(pat_type) => Some(pat_type),
                FnArg::Receiver(_) => None,
            })
            .map(|pat_type| match type_name(&pat_type.ty).as_deref() {
                Some(name) if name == context => Ok(ArgKind::Context),
                Some("Params") => Ok(ArgKind::Params),
                _ => Err(syn::Error::new_spanned(
                    &pat_type.ty,
                    format!("arguments must be `&mut {context}` or `&Params`"),
                )),
            })
            .collect()
    }
}

/// Options read from a method marker attribute (`#[action(..)]`, `#[hook(..)]`).
#[derive(Default)]
struct Marker {
    skip: bool,
    sealed: bool,
    name: Option<String>,
}

/// Collect the declared methods of an impl, stripping the macro's own
/// attributes from it.
///
/// `marker` is the per-method attribute (`action` or `hook`); `route`
/// attributes are collected only when `routes` is set. Methods marked
/// `skip` are left out.
pub(crate) fn collect(
    item: &mut ItemImpl,
    marker: &str,
    routes: bool,
    rename: fn(&str) -> String,
) -> syn::Result<Vec<Declared>> {
    let mut declared = Vec::new();

    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let mut options = Marker::default();
        let mut patterns = Vec::new();
        let mut error: Option<syn::Error> = None;

        method.attrs.retain(|attr| {
            if attr.path().is_ident(marker) {
                if let Err(e) = parse_marker(attr, &mut options) {
                    combine(&mut error, e);
                }
                false
            } else if routes && attr.path().is_ident("route") {
                match attr.parse_args::<LitStr>() {
                    Ok(lit) => patterns.push(lit),
                    Err(e) => combine(&mut error, e),
                }
                false
            } else {
                true
            }
        });

        if let Some(error) = error {
            return Err(error);
        }
        if options.skip {
            if let Some(route) = patterns.first() {
                return Err(syn::Error::new_spanned(route, "a skipped method cannot declare routes"));
            }
            continue;
        }

        let ident = method.sig.ident.clone();
        let name = options.name.unwrap_or_else(|| rename(&ident.to_string()));
        declared.push(Declared {
            ident,
            name,
            public: matches!(method.vis, Visibility::Public(_)),
            receiver: method.sig.receiver().is_some(),
            sealed: options.sealed,
            returns_unit: matches!(method.sig.output, ReturnType::Default),
            routes: patterns,
            item: method.clone(),
        });
    }

    Ok(declared)
}

fn parse_marker(attr: &syn::Attribute, options: &mut Marker) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("skip") {
            options.skip = true;
            Ok(())
        } else if meta.path.is_ident("sealed") {
            options.sealed = true;
            Ok(())
        } else if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            options.name = Some(lit.value());
            Ok(())
        } else {
            Err(meta.error("expected `skip`, `sealed` or `name = \"...\"`"))
        }
    })
}

fn combine(slot: &mut Option<syn::Error>, error: syn::Error) {
    match slot {
        Some(existing) => existing.combine(error),
        None => *slot = Some(error),
    }
}

/// Last path segment of a type, looking through references.
fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => type_name(&reference.elem),
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// The identity used when none is given: the self type's name.
pub(crate) fn default_name(item: &ItemImpl) -> syn::Result<String> {
    type_name(&item.self_ty).ok_or_else(|| {
        syn::Error::new_spanned(&item.self_ty, "cannot derive a name; use `name = \"...\"`")
    })
}

/// Reject trait impls: only inherent methods are declared.
pub(crate) fn require_inherent(item: &ItemImpl, macro_name: &str) -> syn::Result<()> {
    match &item.trait_ {
        Some((_, path, _)) => Err(syn::Error::new_spanned(
            path,
            format!("#[{macro_name}] must be used on an inherent impl block"),
        )),
        None => Ok(()),
    }
}

/// `action_before` -> `actionBefore`.
pub(crate) fn camel_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, word) in ident.split('_').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("action_before"), "actionBefore");
        assert_eq!(camel_case("index"), "index");
        assert_eq!(camel_case("_private_thing"), "privateThing");
        assert_eq!(camel_case("edit__profile"), "editProfile");
    }
}
