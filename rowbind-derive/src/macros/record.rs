//! Derive macro for the `Record` trait
//!
//! For every named field this emits a getter (`ToSource`) and, unless the field is
//! `#[readonly]`, a setter (`AsSlot`). The field table is stored in a `Lazy` static so
//! it is built once per type.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use crate::attributes;

/// Generate the `Record` implementation for a struct with named fields
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(syn::DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs with named fields",
            ));
        }
    };

    let mut accessors: Vec<TokenStream2> = Vec::new();
    let mut descriptors: Vec<TokenStream2> = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let plain_name = field_name.unraw().to_string();
        let column_name = attributes::extract_column_name(field)?.unwrap_or_else(|| plain_name.clone());

        let getter = format_ident!("__rowbind_get_{}", plain_name);
        let setter = format_ident!("__rowbind_set_{}", plain_name);

        accessors.push(quote! {
            #[allow(non_snake_case)]
            fn #getter(record: &#struct_name) -> ::rowbind::SourceValue {
                ::rowbind::ToSource::to_source(&record.#field_name)
            }
        });

        if attributes::has_readonly_attr(field) {
            descriptors.push(quote! {
                ::rowbind::FieldDescriptor::readonly(#column_name, #getter)
            });
        } else {
            accessors.push(quote! {
                #[allow(non_snake_case)]
                fn #setter(record: &mut #struct_name) -> ::rowbind::Slot<'_> {
                    ::rowbind::AsSlot::as_slot(&mut record.#field_name)
                }
            });
            descriptors.push(quote! {
                ::rowbind::FieldDescriptor::writable(#column_name, #getter, #setter)
            });
        }
    }

    Ok(quote! {
        const _: () = {
            #(#accessors)*

            impl ::rowbind::Record for #struct_name {
                fn shape() -> &'static ::rowbind::RecordShape<Self> {
                    static SHAPE: ::rowbind::__private::Lazy<::rowbind::RecordShape<#struct_name>> =
                        ::rowbind::__private::Lazy::new(|| {
                            ::rowbind::RecordShape::new(vec![
                                #(#descriptors),*
                            ])
                        });
                    &*SHAPE
                }
            }
        };
    })
}
