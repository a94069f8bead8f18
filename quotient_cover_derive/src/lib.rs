extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Attribute, Data, DeriveInput, Fields, Ident, Meta, NestedMeta, Type};

/// Derive macro that automatically implements the `HasStateSpaceData` trait for a struct.
///
/// The `HasStateSpaceData` trait is used to provide access to the `StateSpaceCommonData` struct
/// that is used to store common data for all state spaces.
///
/// The struct must have a member named `state_space_data` of type `StateSpaceCommonData`.
#[proc_macro_derive(WithStateSpaceData)]
pub fn with_state_space_data_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let mut field_found = false;

    find_struct_field(
        &input.data,
        &Ident::new("state_space_data", input.span()),
        |field| {
            find_segment_ident(field, "StateSpaceCommonData", |segment| {
                field_found = segment.arguments.is_empty();
            });
        },
    );

    if !field_found {
        return syn::Error::new_spanned(
            input,
            "Struct must have a field `state_space_data` of type `StateSpaceCommonData`",
        )
        .to_compile_error()
        .into();
    }

    let name = input.ident;

    let expanded = quote! {
        impl crate::prelude::HasStateSpaceData for #name {
            fn state_space_data(&self) -> &crate::base::statespace::StateSpaceCommonData {
                &self.state_space_data
            }

            fn state_space_data_mut(&mut self) -> &mut crate::base::statespace::StateSpaceCommonData {
                &mut self.state_space_data
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro that implements the `HasPlannerData` trait for a level planner.
///
/// The struct must have a member named `planner_data` of type `PlannerCommonData`.
/// The `planner` attribute sets the name prefix returned by `planner_name_prefix`; the
/// level index is appended to it at construction.
///
/// Example:
/// ```ignore
/// #[derive(WithPlannerData)]
/// #[planner(name = "QuotientCover")]
/// struct QuotientCover {
///    planner_data: PlannerCommonData,
/// }
/// ```
#[proc_macro_derive(WithPlannerData, attributes(planner))]
pub fn with_planner_data_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let mut planner_name: Option<String> = None;

    for meta_name_value in MetaNameValueIterator::new(&input.attrs, "planner") {
        if meta_name_value.path.is_ident("name") {
            if let syn::Lit::Str(lit_str) = &meta_name_value.lit {
                planner_name = Some(lit_str.value());
            } else {
                return syn::Error::new_spanned(meta_name_value, "name should be a string literal")
                    .to_compile_error()
                    .into();
            }
        } else {
            return syn::Error::new_spanned(
                &meta_name_value,
                format!(
                    "Unknown attribute: {:?}",
                    meta_name_value
                        .path
                        .get_ident()
                        .map(|ident| ident.to_string())
                        .unwrap_or_default()
                ),
            )
            .to_compile_error()
            .into();
        }
    }

    let planner_name = match planner_name {
        Some(planner_name) => planner_name,
        None => {
            return syn::Error::new_spanned(input, "Missing required `planner(name = ...)` attribute")
                .to_compile_error()
                .into();
        }
    };

    let mut field_found = false;

    find_struct_field(
        &input.data,
        &Ident::new("planner_data", input.span()),
        |field| {
            find_segment_ident(field, "PlannerCommonData", |segment| {
                field_found = segment.arguments.is_empty();
            });
        },
    );

    if !field_found {
        return syn::Error::new_spanned(
            input,
            "Struct must have a field `planner_data` of type `PlannerCommonData`",
        )
        .to_compile_error()
        .into();
    }

    let name = input.ident;

    let expanded = quote! {
        impl crate::prelude::HasPlannerData for #name {
            fn planner_name_prefix() -> &'static str
            where
                Self: Sized,
            {
                #planner_name
            }

            fn planner_data(&self) -> &crate::planners::planner_common::PlannerCommonData {
                &self.planner_data
            }

            fn planner_data_mut(&mut self) -> &mut crate::planners::planner_common::PlannerCommonData {
                &mut self.planner_data
            }
        }
    };

    TokenStream::from(expanded)
}

/// Iterates over the `name = value` pairs of every attribute called `attribute_name`.
struct MetaNameValueIterator<'a> {
    attributes: Vec<&'a Attribute>,
    attr_idx: usize,
    meta_idx: usize,
}

impl<'a> MetaNameValueIterator<'a> {
    fn new(attributes: &'a [Attribute], attribute_name: &str) -> MetaNameValueIterator<'a> {
        MetaNameValueIterator {
            attributes: attributes
                .iter()
                .filter(|attr| attr.path.is_ident(attribute_name))
                .collect(),
            attr_idx: 0,
            meta_idx: 0,
        }
    }
}

impl Iterator for MetaNameValueIterator<'_> {
    type Item = syn::MetaNameValue;

    fn next(&mut self) -> Option<Self::Item> {
        while self.attr_idx < self.attributes.len() {
            let attr = self.attributes[self.attr_idx];
            if let Ok(Meta::List(meta_list)) = attr.parse_meta() {
                while self.meta_idx < meta_list.nested.len() {
                    let nested = &meta_list.nested[self.meta_idx];
                    self.meta_idx += 1;
                    if let NestedMeta::Meta(Meta::NameValue(name_value)) = nested {
                        return Some(name_value.clone());
                    }
                }
            }
            self.attr_idx += 1;
            self.meta_idx = 0;
        }
        None
    }
}

/// Find a struct field with the given name and call a closure with the field as an argument.
///
/// # Example
/// ```ignore
/// find_struct_field(
///     &input.data,
///     &Ident::new("state_space_data", input.span()),
///     |field| {
///         find_segment_ident(field, "StateSpaceCommonData", |segment| {
///             field_found = segment.arguments.is_empty();
///         });
///     },
/// );
/// ```
fn find_struct_field(input_data: &Data, target_field: &Ident, mut closure: impl FnMut(&syn::Field)) {
    if let syn::Data::Struct(data_struct) = &input_data {
        if let Fields::Named(fields) = &data_struct.fields {
            for field in &fields.named {
                if field.ident.as_ref() == Some(target_field) {
                    closure(field);
                    break;
                }
            }
        }
    }
}

/// Find a segment with the given name and call a closure with the segment as an argument.
fn find_segment_ident(field: &syn::Field, ident_name: &str, mut closure: impl FnMut(&syn::PathSegment)) {
    if let Type::Path(type_path) = &field.ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == ident_name {
                closure(segment);
            }
        }
    }
}
