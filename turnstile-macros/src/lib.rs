//! Procedural macros for Turnstile.
//!
//! - `#[controller]` turns an inherent impl into a `Controller`
//! - `#[plugin]` turns an inherent impl into a `Plugin`
//!
//! Both replace runtime introspection with a static method table generated
//! from the annotated impl block.

use proc_macro::TokenStream;
use syn::{ItemImpl, parse_macro_input};

mod controller;
mod method;
mod plugin;

/// Declare a controller from an inherent impl block.
///
/// Every method is listed in the action table:
/// - `pub` methods with a receiver are actions, named by camel-casing the
///   method name (`edit_profile` -> `editProfile`),
/// - associated functions without a receiver are constructors,
/// - `#[action(sealed)]` keeps a public method out of dispatch,
/// - `#[action(skip)]` leaves a method out of the table entirely,
/// - `#[action(name = "...")]` overrides the action name,
/// - `#[route("pattern")]` declares a custom route to the action.
///
/// Action arguments are `&mut Context<'_>` and/or `&Params`, in any order.
/// Actions return `()` or `Result<(), E>` with `E: Into<BoxError>`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Blog;
///
/// #[turnstile::controller(name = "Blog")]
/// impl Blog {
///     pub fn index(&mut self, ctx: &mut Context<'_>) {
///         ctx.assign("title", "Blog");
///     }
///
///     #[route("blog/:slug")]
///     pub fn show(&mut self, ctx: &mut Context<'_>, params: &Params) -> Result<(), BoxError> {
///         ctx.assign("slug", params.named("slug").unwrap_or_default());
///         Ok(())
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as method::MacroArgs);
    let input = parse_macro_input!(item as ItemImpl);

    controller::expand(args, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Declare a plugin from an inherent impl block.
///
/// `pub` methods with a receiver become hooks, named by camel-casing the
/// method name (`action_before` -> `actionBefore`). `#[hook(name = "...")]`
/// overrides the name; `#[hook(sealed)]` and `#[hook(skip)]` exclude a
/// method.
///
/// Hook arguments are `&mut HookContext<'_>` and/or `&Params`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Audit;
///
/// #[turnstile::plugin(name = "Audit")]
/// impl Audit {
///     pub fn action_before(&mut self, ctx: &mut HookContext<'_>) {
///         ctx.view.assign("audited", ctx.controller.name().to_string());
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn plugin(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as method::MacroArgs);
    let input = parse_macro_input!(item as ItemImpl);

    plugin::expand(args, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
