//! Derive macro for the dross `Record` trait.
//!
//! This crate provides `#[derive(Record)]`, which generates:
//! - `impl Record for {Name}`: the field descriptor table plus the
//!   per-field assign/descend/catch-all dispatch used by the decoder
//! - `impl Decode for {Name}`: top-level dispatch for the type itself
//!
//! # Usage
//!
//! ```ignore
//! use dross::{CatchAll, Record};
//!
//! #[derive(Default, Record)]
//! struct Document {
//!     #[dross(rename = "_id")]
//!     id: String,
//!     #[dross(descend)]
//!     meta: Meta,
//!     #[dross(catch_all)]
//!     rest: CatchAll,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields, Ident, LitStr};

/// Derive the `Record` trait for a struct with named fields.
///
/// # Field Attributes
///
/// - `#[dross(rename = "json_name")]`: external member name to look up in
///   the JSON object (default: the field's own name)
/// - `#[dross(descend)]`: recurse into the field with the same decoding
///   rules; the field type must itself implement `Record`
/// - `#[dross(catch_all)]`: collect every member not claimed by another
///   field; the field type must be `CatchAll`, and a record may declare at
///   most one such field
/// - `#[dross(skip)]`: the field takes no part in decoding and is left at
///   its default value; a matching member, if any, flows to the catch-all
///   field
///
/// The struct must implement `Default`, which supplies the value of every
/// field whose member is absent from the input.
#[proc_macro_derive(Record, attributes(dross))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Behavior of one declared field.
#[derive(Clone, Copy, PartialEq)]
enum Tag {
    Plain,
    Descend,
    CatchAll,
}

/// One field that participates in decoding (skipped fields are dropped
/// before this point).
struct RecordField {
    ident: Ident,
    /// External member name.
    name: String,
    tag: Tag,
}

/// Attributes collected from `#[dross(...)]` on a single field.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    descend: bool,
    catch_all: bool,
    skip: bool,
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("dross") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.rename = Some(lit.value());
            } else if meta.path.is_ident("descend") {
                attrs.descend = true;
            } else if meta.path.is_ident("catch_all") {
                attrs.catch_all = true;
            } else if meta.path.is_ident("skip") {
                attrs.skip = true;
            } else {
                return Err(meta.error(
                    "unknown dross attribute, expected `rename`, `descend`, `catch_all`, or `skip`",
                ));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

/// Main entry point for code generation.
fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new_spanned(
                    input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut fields: Vec<RecordField> = Vec::new();
    let mut catch_all_seen = false;

    for field in named {
        let attrs = parse_field_attrs(field)?;

        if attrs.skip {
            if attrs.descend || attrs.catch_all || attrs.rename.is_some() {
                return Err(Error::new_spanned(
                    field,
                    "`skip` cannot be combined with other dross attributes",
                ));
            }
            continue;
        }
        if attrs.descend && attrs.catch_all {
            return Err(Error::new_spanned(
                field,
                "a field cannot be tagged both `descend` and `catch_all`",
            ));
        }

        let tag = if attrs.descend {
            Tag::Descend
        } else if attrs.catch_all {
            if catch_all_seen {
                return Err(Error::new_spanned(
                    field,
                    "a record may declare at most one `catch_all` field",
                ));
            }
            catch_all_seen = true;
            Tag::CatchAll
        } else {
            Tag::Plain
        };

        // Named fields always carry an ident.
        let ident = match &field.ident {
            Some(ident) => ident.clone(),
            None => continue,
        };
        let name = attrs.rename.unwrap_or_else(|| ident.to_string());

        fields.push(RecordField { ident, name, tag });
    }

    let record_impl = generate_record_impl(input, &fields);
    let decode_impl = generate_decode_impl(input);

    Ok(quote! {
        #record_impl
        #decode_impl
    })
}

fn generate_record_impl(input: &DeriveInput, fields: &[RecordField]) -> TokenStream2 {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = fields.iter().map(|field| {
        let name = &field.name;
        let tag = match field.tag {
            Tag::Plain => quote!(Plain),
            Tag::Descend => quote!(Descend),
            Tag::CatchAll => quote!(CatchAll),
        };
        quote! {
            ::dross::FieldDescriptor {
                name: #name,
                tag: ::dross::FieldTag::#tag,
            }
        }
    });

    let assign_arms: Vec<TokenStream2> = fields
        .iter()
        .filter(|field| field.tag == Tag::Plain)
        .map(|field| {
            let name = &field.name;
            let ident = &field.ident;
            quote! {
                #name => {
                    self.#ident = ::dross::decode::convert(field, value)?;
                    ::std::result::Result::Ok(())
                }
            }
        })
        .collect();

    let descend_arms: Vec<TokenStream2> = fields
        .iter()
        .filter(|field| field.tag == Tag::Descend)
        .map(|field| {
            let name = &field.name;
            let ident = &field.ident;
            quote! {
                #name => ::dross::decode::descend_record(&mut self.#ident, object),
            }
        })
        .collect();

    let catch_all_arms: Vec<TokenStream2> = fields
        .iter()
        .filter(|field| field.tag == Tag::CatchAll)
        .map(|field| {
            let name = &field.name;
            let ident = &field.ident;
            quote! {
                #name => {
                    self.#ident = rest;
                    ::std::result::Result::Ok(())
                }
            }
        })
        .collect();

    let assign_fn = if assign_arms.is_empty() {
        quote! {
            fn assign(
                &mut self,
                _field: &'static str,
                _value: ::dross::Value,
            ) -> ::std::result::Result<(), ::dross::DecodeError> {
                ::std::result::Result::Ok(())
            }
        }
    } else {
        quote! {
            fn assign(
                &mut self,
                field: &'static str,
                value: ::dross::Value,
            ) -> ::std::result::Result<(), ::dross::DecodeError> {
                match field {
                    #(#assign_arms)*
                    _ => ::std::result::Result::Ok(()),
                }
            }
        }
    };

    let descend_names: Vec<&String> = fields
        .iter()
        .filter(|field| field.tag == Tag::Descend)
        .map(|field| &field.name)
        .collect();

    let can_descend_fn = if descend_names.is_empty() {
        quote!()
    } else {
        quote! {
            fn can_descend(&self, field: &'static str) -> bool {
                match field {
                    #(#descend_names)|* => true,
                    _ => false,
                }
            }
        }
    };

    let descend_fn = if descend_arms.is_empty() {
        quote!()
    } else {
        quote! {
            fn descend(
                &mut self,
                field: &'static str,
                object: &mut ::dross::Map<::std::string::String, ::dross::Value>,
            ) -> ::std::result::Result<(), ::dross::DecodeError> {
                match field {
                    #(#descend_arms)*
                    _ => ::std::result::Result::Err(::dross::DecodeError::NotARecord { field }),
                }
            }
        }
    };

    let catch_all_fn = if catch_all_arms.is_empty() {
        quote!()
    } else {
        quote! {
            fn set_catch_all(
                &mut self,
                field: &'static str,
                rest: ::dross::CatchAll,
            ) -> ::std::result::Result<(), ::dross::DecodeError> {
                match field {
                    #(#catch_all_arms)*
                    _ => ::std::result::Result::Err(::dross::DecodeError::NotACatchAll { field }),
                }
            }
        }
    };

    quote! {
        #[automatically_derived]
        impl #impl_generics ::dross::Record for #ident #ty_generics #where_clause {
            const FIELDS: &'static [::dross::FieldDescriptor] = &[
                #(#descriptors),*
            ];

            #assign_fn
            #can_descend_fn
            #descend_fn
            #catch_all_fn
        }
    }
}

fn generate_decode_impl(input: &DeriveInput) -> TokenStream2 {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        #[automatically_derived]
        impl #impl_generics ::dross::Decode for #ident #ty_generics #where_clause {
            fn decode_value(
                &mut self,
                value: ::dross::Value,
            ) -> ::std::result::Result<(), ::dross::DecodeError> {
                ::dross::decode::decode_record_value(self, value)
            }
        }
    }
}
