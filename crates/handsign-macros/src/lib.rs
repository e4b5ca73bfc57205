//! Procedural macros used by `handsign`.
//!
//! Do not use this crate directly, use `handsign` instead.

use proc_macro::{Span, TokenStream};
use quote::quote;
use syn::{parse::Error, ItemFn};

/// Marks the entry point of a `handsign` tool.
///
/// Initializes logging before invoking the annotated `main` function, and logs an error if it
/// reports failure.
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    match expand_main(args, item.clone()) {
        Ok(tokens) => tokens,
        Err(err) => {
            // Emit the `compile_error!` invocation alongside the original item so that IDEs still
            // see the function.
            let mut error = item.clone();
            error.extend(TokenStream::from(err.to_compile_error()));
            error
        }
    }
}

fn expand_main(args: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !args.is_empty() {
        return Err(Error::new(
            Span::call_site().into(),
            "`#[handsign::main]` does not accept arguments",
        ));
    }

    let item = syn::parse::<ItemFn>(item)?;

    if item.sig.ident != "main" {
        return Err(Error::new(
            item.sig.ident.span(),
            "`#[handsign::main]` must be applied to a function called `main`",
        ));
    }
    if !item.sig.inputs.is_empty() {
        return Err(Error::new(
            item.sig.ident.span(),
            "`#[handsign::main]` functions must not take arguments",
        ));
    }
    if let Some(asyncness) = &item.sig.asyncness {
        return Err(Error::new(
            asyncness.span,
            "`#[handsign::main]` cannot be applied to `async fn`",
        ));
    }

    let output = &item.sig.output;

    Ok(quote! {
        fn main() #output {
            #item

            ::handsign::init_logger!();

            ::handsign::run(main)
        }
    }
    .into())
}
