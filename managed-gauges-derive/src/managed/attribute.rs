use syn::spanned::Spanned;

// do not derive debug since this needs "extra-traits"
// feature for crate `syn`, which slows compile time
// too much, and is not needed as these structs are not
// public.
#[derive(Default)]
pub struct ManagedAttribute {
    pub name: Option<syn::LitStr>,
    pub init: Option<syn::Ident>,
}

impl ManagedAttribute {
    pub(super) fn parse(args: proc_macro2::TokenStream) -> syn::Result<Self> {
        let mut attr = ManagedAttribute::default();
        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("name") {
                if attr.name.is_some() {
                    return Err(meta.error("Duplicate `name` argument"));
                }
                attr.name = Some(meta.value()?.parse::<syn::LitStr>()?);
            } else if meta.path.is_ident("init") {
                if attr.init.is_some() {
                    return Err(meta.error("Duplicate `init` argument"));
                }
                let init = meta.value()?.parse::<syn::LitStr>()?;
                attr.init = Some(init.parse::<syn::Ident>()?);
            } else {
                return Err(meta.error("Unknown argument, expected `name` or `init`"));
            }
            Ok(())
        });
        syn::parse::Parser::parse2(parser, args)?;

        Ok(attr)
    }
}

#[derive(Default)]
pub struct GaugeAttribute {
    pub name: Option<syn::LitStr>,
    pub absolute: bool,
}

impl GaugeAttribute {
    pub(super) fn merge(self, other: Self) -> syn::Result<Self> {
        let mut merged = self;

        if let Some(name) = other.name {
            if merged.name.is_some() {
                return Err(syn::Error::new_spanned(
                    merged.name,
                    "Duplicate `name` attribute",
                ));
            }

            merged.name = Some(name);
        }
        merged.absolute = merged.absolute || other.absolute;

        Ok(merged)
    }
}

impl TryFrom<&syn::Attribute> for GaugeAttribute {
    type Error = syn::Error;

    fn try_from(attr: &syn::Attribute) -> syn::Result<Self> {
        match &attr.meta {
            syn::Meta::Path(_) => Ok(GaugeAttribute::default()),
            syn::Meta::List(list) => {
                let mut gauge = GaugeAttribute::default();
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("name") {
                        if gauge.name.is_some() {
                            return Err(syn::Error::new(
                                meta.path.span(),
                                "Duplicate `name` attribute",
                            ));
                        }
                        gauge.name = Some(meta.value()?.parse::<syn::LitStr>()?);
                    } else if meta.path.is_ident("absolute") {
                        if gauge.absolute {
                            return Err(syn::Error::new(
                                meta.path.span(),
                                "Duplicate `absolute` attribute",
                            ));
                        }
                        gauge.absolute = true;
                    } else {
                        return Err(meta.error("Unknown attribute, expected `name` or `absolute`"));
                    }
                    Ok(())
                })?;
                Ok(gauge)
            }
            syn::Meta::NameValue(meta) => Err(syn::Error::new_spanned(
                meta,
                r#"Expected `#[gauge]` or `#[gauge(<key>[=value], ...)]`"#,
            )),
        }
    }
}
