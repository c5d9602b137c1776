use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, LitStr, Member, Type};

pub enum Family {
    Event,
    Command,
}

pub fn derive_message(input: TokenStream, family: Family) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    expand(&input, family)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput, family: Family) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "message types cannot be generic: every message type needs its own tag",
        ));
    }

    let name = &input.ident;

    let tag = match extract_name(input)? {
        Some(lit) => quote! { #lit },
        None => {
            let type_name = name.to_string();
            quote! { concat!(module_path!(), "::", #type_name) }
        }
    };

    let sender_methods = match extract_sender_field(input)? {
        Some(field) => quote! {
            fn sender(&self) -> ::core::option::Option<&::typed_mediator::Sender> {
                self.#field.as_ref()
            }

            fn set_sender(&mut self, sender: ::typed_mediator::Sender) {
                self.#field = ::core::option::Option::Some(sender);
            }
        },
        None => quote! {},
    };

    let family_impl = match family {
        Family::Event => quote! {
            impl ::typed_mediator::Event for #name {}
        },
        Family::Command => {
            let output = extract_output(input)?;
            quote! {
                impl ::typed_mediator::Command for #name {
                    type Output = #output;
                }
            }
        }
    };

    Ok(quote! {
        impl ::typed_mediator::Message for #name {
            const MESSAGE_TYPE: ::typed_mediator::MessageType =
                ::typed_mediator::MessageType::new(#tag);

            #sender_methods
        }

        #family_impl
    })
}

/// `#[message(name = "...")]` on the type.
fn extract_name(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut name = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("message") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(meta.error("message name cannot be empty"));
                }
                name = Some(value);
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(name)
}

/// `#[command(output = Type)]` on the type, `()` when absent.
fn extract_output(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let mut output: Option<Type> = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("command") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("output") {
                output = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `output = Type`"))
            }
        })?;
    }

    Ok(match output {
        Some(ty) => quote! { #ty },
        None => quote! { () },
    })
}

/// The field marked `#[message(sender)]`, if any. At most one is allowed.
fn extract_sender_field(input: &DeriveInput) -> syn::Result<Option<Member>> {
    let fields = match &input.data {
        Data::Struct(data_struct) => &data_struct.fields,
        _ => return Ok(None),
    };

    let mut found: Option<Member> = None;

    for (index, field) in fields.iter().enumerate() {
        for attr in &field.attrs {
            if !attr.path().is_ident("message") {
                continue;
            }

            let mut is_sender = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("sender") {
                    is_sender = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `sender`"))
                }
            })?;

            if !is_sender {
                continue;
            }
            if found.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field can be marked #[message(sender)]",
                ));
            }

            found = Some(match (&field.ident, fields) {
                (Some(ident), Fields::Named(_)) => Member::Named(ident.clone()),
                _ => Member::Unnamed(Index::from(index)),
            });
        }
    }

    Ok(found)
}
