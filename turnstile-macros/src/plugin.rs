//! `#[plugin]` - declare a plugin from an inherent impl.

use crate::method::{self, ArgKind, MacroArgs};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ItemImpl;

/// Implementation of the `#[plugin]` macro.
///
/// Public methods with a receiver become hooks named by camel-casing the
/// method name. Methods provided by traits are never seen here, so they can
/// not become hooks.
pub(crate) fn expand(args: MacroArgs, mut item: ItemImpl) -> syn::Result<TokenStream2> {
    method::require_inherent(&item, "plugin")?;
    let identity = match args.name {
        Some(lit) => lit.value(),
        None => method::default_name(&item)?,
    };

    let declared = method::collect(&mut item, "hook", false, method::camel_case)?;
    let descriptors = declared.iter().map(|m| m.descriptor());

    let mut arms = Vec::new();
    for m in declared.iter().filter(|m| m.is_dispatchable()) {
        let ident = &m.ident;
        let name = &m.name;
        let call_args = m.arg_kinds("HookContext")?.into_iter().map(|kind| match kind {
            ArgKind::Context => quote! { ctx },
            ArgKind::Params => quote! { params },
        });
        let call = quote! {{
            let params = ctx.params;
            self.#ident(#(#call_args),*)
        }};
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
            /// Identity this plugin is registered and discovered under.
            pub const IDENTITY: &'static str = #identity;
        }

        impl #impl_generics ::turnstile::Plugin for #self_ty #where_clause {
            fn methods(&self) -> &'static [::turnstile::MethodDescriptor] {
                const METHODS: &[::turnstile::MethodDescriptor] = &[#(#descriptors),*];
                METHODS
            }

            #[allow(unused_variables)]
            fn call_hook(
                &mut self,
                hook: &str,
                ctx: &mut ::turnstile::HookContext<'_>,
            ) -> ::core::result::Result<(), ::turnstile::BoxError> {
                match hook {
                    #(#arms)*
                    other => ::core::result::Result::Err(::turnstile::unknown_hook(#identity, other)),
                }
            }
        }
    })
}
