//! `#[controller]` - declare a controller from an inherent impl.

use crate::method::{self, ArgKind, MacroArgs};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ItemImpl;

/// Implementation of the `#[controller]` macro.
///
/// Generates `IDENTITY` and a `Controller` implementation:
/// - `actions()` lists every method of the impl,
/// - `routes()` lists every `#[route("...")]`, in source order,
/// - `call_action()` dispatches to the public, unsealed methods with a
///   receiver.
pub(crate) fn expand(args: MacroArgs, mut item: ItemImpl) -> syn::Result<TokenStream2> {
    method::require_inherent(&item, "controller")?;
    let identity = match args.name {
        Some(lit) => lit.value(),
        None => method::default_name(&item)?,
    };

    let declared = method::collect(&mut item, "action", true, method::camel_case)?;

    let descriptors = declared.iter().map(|m| m.descriptor());

    let mut patterns = Vec::new();
    let mut targets = Vec::new();
    for m in &declared {
        if !m.routes.is_empty() && !m.is_dispatchable() {
            return Err(syn::Error::new_spanned(
                &m.routes[0],
                "routes must target a public, unsealed method with a receiver",
            ));
        }
        for route in &m.routes {
            patterns.push(route.clone());
            targets.push(m.name.clone());
        }
    }

    let mut arms = Vec::new();
    for m in declared.iter().filter(|m| m.is_dispatchable()) {
        let ident = &m.ident;
        let name = &m.name;
        let call_args = m.arg_kinds("Context")?.into_iter().map(|kind| match kind {
            ArgKind::Context => quote! { ctx },
            ArgKind::Params => quote! { params },
        });
        let call = quote! { self.#ident(#(#call_args),*) };
        arms.push(if m.returns_unit {
            quote! { #name => { #call; ::core::result::Result::Ok(()) } }
        } else {
            quote! { #name => (#call).map_err(::core::convert::Into::into), }
        });
    }

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics #self_ty #where_clause {
            /// Identity this controller is registered and resolved under.
            pub const IDENTITY: &'static str = #identity;
        }

        impl #impl_generics ::turnstile::Controller for #self_ty #where_clause {
            fn name(&self) -> &'static str {
                #identity
            }

            fn actions(&self) -> &'static [::turnstile::MethodDescriptor] {
                const ACTIONS: &[::turnstile::MethodDescriptor] = &[#(#descriptors),*];
                ACTIONS
            }

            fn routes(&self) -> ::turnstile::Routes {
                ::turnstile::Routes::new()
                    #(.route(#patterns, #targets))*
            }

            #[allow(unused_variables)]
            fn call_action(
                &mut self,
                action: &str,
                ctx: &mut ::turnstile::Context<'_>,
                params: &::turnstile::Params,
            ) -> ::core::result::Result<(), ::turnstile::BoxError> {
                match action {
                    #(#arms)*
                    other => ::core::result::Result::Err(::turnstile::unknown_action(#identity, other)),
                }
            }
        }
    })
}
