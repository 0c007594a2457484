mod attribute;
mod method;

use crate::{Error, Result, TokenStream2};
use attribute::ManagedAttribute;
use method::GaugeMethod;
use quote::quote;

pub fn managed_impl(args: TokenStream2, input: TokenStream2) -> Result<TokenStream2> {
    let attr = ManagedAttribute::parse(args)?;
    let mut item = syn::parse2::<syn::ItemImpl>(input)?;

    if let Some((_, path, _)) = &item.trait_ {
        return Err(Error::new_spanned(
            path,
            "Can not use #[managed] on a trait implementation.",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &item.generics,
            "Can not use #[managed] on a generic impl block.",
        ));
    }

    let self_ty = (*item.self_ty).clone();
    let class_name = match attr.name {
        Some(name) => name,
        None => match &self_ty {
            syn::Type::Path(path) => {
                let segment = path.path.segments.last().ok_or_else(|| {
                    Error::new_spanned(&self_ty, "Expected a named type.")
                })?;
                syn::LitStr::new(&segment.ident.to_string(), segment.ident.span())
            }
            _ => {
                return Err(Error::new_spanned(
                    &self_ty,
                    "Expected a named type, or `#[managed(name = \"...\")]`.",
                ));
            }
        },
    };

    let builder_calls = item
        .items
        .iter_mut()
        .filter_map(|item| match item {
            syn::ImplItem::Fn(f) => Some(f),
            _ => None,
        })
        .try_fold(vec![], |mut acc, f| {
            if let Some(method) = GaugeMethod::take(f)? {
                acc.push(method.builder_call(&self_ty));
            }
            Ok::<Vec<TokenStream2>, syn::Error>(acc)
        })?;

    let init = attr.init.map(|init| {
        quote! {
            fn init(&self) {
                self.#init();
            }
        }
    });

    Ok(quote! {
        #item

        impl ::managed_gauges::reflect::Managed for #self_ty {
            fn class() -> ::managed_gauges::reflect::Class {
                ::managed_gauges::reflect::ClassBuilder::<#self_ty>::new(#class_name)
                    #(#builder_calls)*
                    .build()
            }

            #init
        }
    })
}
