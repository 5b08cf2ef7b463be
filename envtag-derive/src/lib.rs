//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `EnvConfig` derive macro
///
/// Implements `envtag::EnvConfig::fields` for a struct with named fields,
/// exposing every field that carries at least one annotation.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env("NAME=DEFAULT,json")]`: annotation under the `env` key
/// - `#[tag(key = "NAME=DEFAULT")]`: annotation under any other key
///
/// Fields without annotations are left at their `Default` value.
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(EnvConfig, attributes(env, tag))]
pub fn derive_env_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvConfig only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvConfig only supports structs",
            ));
        }
    };

    let mut entries = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        if attrs.is_empty() {
            continue;
        }

        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let ident = field_name.unraw().to_string();
        let keys = attrs.tags.iter().map(|(key, _)| key);
        let annotations = attrs.tags.iter().map(|(_, annotation)| annotation);

        entries.push(quote! {
            ::envtag::Field::new(
                #ident,
                &[#((#keys, #annotations)),*],
                &mut self.#field_name,
            )
        });
    }

    Ok(quote! {
        impl #impl_generics ::envtag::EnvConfig for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::envtag::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}
