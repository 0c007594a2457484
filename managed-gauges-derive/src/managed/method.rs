use quote::quote;

use super::attribute::GaugeAttribute;
use crate::{Error, Result, TokenStream2};

// do not derive debug since this needs "extra-traits"
// feature for crate `syn`, which slows compile time
// too much, and is not needed as this struct is not
// public.
pub struct GaugeMethod {
    ident: syn::Ident,
    attr: GaugeAttribute,
    params: Vec<syn::Type>,
}

impl GaugeMethod {
    /// Removes the `#[gauge]` attributes of `f`, returning the gauge method
    /// they describe, if any.
    pub(super) fn take(f: &mut syn::ImplItemFn) -> Result<Option<Self>> {
        let (gauge_attrs, attrs): (Vec<_>, Vec<_>) = f
            .attrs
            .drain(..)
            .partition(|attr| attr.path().is_ident("gauge"));
        f.attrs = attrs;

        if gauge_attrs.is_empty() {
            return Ok(None);
        }

        let attr = gauge_attrs
            .iter()
            .try_fold(GaugeAttribute::default(), |acc, attr| {
                acc.merge(GaugeAttribute::try_from(attr)?)
            })?;

        let sig = &f.sig;
        if let Some(asyncness) = &sig.asyncness {
            return Err(Error::new_spanned(
                asyncness,
                "`#[gauge]` methods can not be async.",
            ));
        }
        if !sig.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &sig.generics,
                "`#[gauge]` methods can not be generic.",
            ));
        }

        let mut inputs = sig.inputs.iter();
        match inputs.next() {
            Some(syn::FnArg::Receiver(receiver))
                if receiver.reference.is_some()
                    && receiver.mutability.is_none()
                    && receiver.colon_token.is_none() => {}
            _ => {
                return Err(Error::new_spanned(
                    &sig.ident,
                    "`#[gauge]` methods must take `&self`.",
                ));
            }
        }

        let params = inputs
            .map(|input| match input {
                syn::FnArg::Typed(pat_type) => Ok((*pat_type.ty).clone()),
                syn::FnArg::Receiver(receiver) => Err(Error::new_spanned(
                    receiver,
                    "Unexpected receiver.",
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(GaugeMethod {
            ident: sig.ident.clone(),
            attr,
            params,
        }))
    }

    fn annotation(&self) -> TokenStream2 {
        let named = self.attr.name.as_ref().map(|name| quote! { .named(#name) });
        let absolute = self.attr.absolute.then(|| quote! { .absolute(true) });

        quote! {
            ::std::option::Option::Some(
                ::managed_gauges::annotation::GaugeAnnotation::default() #named #absolute
            )
        }
    }

    /// The `ClassBuilder` call describing this method.
    pub(super) fn builder_call(&self, self_ty: &syn::Type) -> TokenStream2 {
        let ident = &self.ident;
        let name = syn::LitStr::new(&ident.to_string(), ident.span());
        let annotation = self.annotation();

        if self.params.is_empty() {
            return quote! {
                .getter(#name, #annotation, |this: &#self_ty| {
                    ::managed_gauges::value::Value::from(this.#ident())
                })
            };
        }

        let parameter_types = self
            .params
            .iter()
            .map(|ty| syn::LitStr::new(&quote!(#ty).to_string(), ident.span()));
        let args = self.params.iter().enumerate().map(|(index, ty)| {
            quote! {
                <#ty as ::managed_gauges::value::FromValue>::from_value(&args[#index], #index)?
            }
        });

        quote! {
            .method(
                #name,
                &[#(#parameter_types),*],
                #annotation,
                |this: &#self_ty, args: &[::managed_gauges::value::Value]| {
                    ::std::result::Result::Ok(
                        ::managed_gauges::value::Value::from(this.#ident(#(#args),*))
                    )
                },
            )
        }
    }
}
