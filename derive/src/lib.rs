extern crate proc_macro;

use itertools::izip;
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, Ident, Type,
};

/// Largest number of enum variants a one-byte union tag can address.
const MAX_VARIANTS: usize = 256;

/// Field attributes parsed from `#[schema(...)]` annotations
///
/// # Fields
///
/// * `fixed` - Byte length of a fixed-width string field, if requested
#[derive(Debug, Clone, Default)]
struct FieldAttributes {
    fixed: Option<usize>,
}

/// Extract and parse `#[schema(...)]` attribute values from field attributes
///
/// # Supported Attributes
///
/// * `#[schema(fixed = N)]` - Encode a `String` field as a fixed string of `N` bytes
fn get_field_attributes(attrs: &[Attribute], ty: &Type) -> syn::Result<FieldAttributes> {
    let mut field_attrs = FieldAttributes::default();

    for attr in attrs {
        if !attr.path().is_ident("schema") {
            continue;
        }
        attr.parse_args_with(|input: syn::parse::ParseStream| {
            while !input.is_empty() {
                let ident = input.parse::<syn::Ident>()?;

                if ident == "fixed" {
                    input.parse::<syn::Token![=]>()?;
                    let lit = input.parse::<syn::LitInt>()?;
                    field_attrs.fixed = Some(lit.base10_parse::<usize>()?);
                    if !is_string_type(ty) {
                        return Err(syn::Error::new(
                            ident.span(),
                            "`fixed` can only be applied to String fields",
                        ));
                    }
                } else {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("Unknown attribute: {}", ident),
                    ));
                }

                // Consume comma if present, otherwise end
                if input.peek(syn::Token![,]) {
                    input.parse::<syn::Token![,]>()?;
                }
            }
            Ok(())
        })?;
    }

    Ok(field_attrs)
}

/// Check if a type is `String`
fn is_string_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .map_or(false, |seg| seg.ident == "String")
    } else {
        false
    }
}

/// Per-field pieces of generated code.
struct FieldCode {
    schema: TokenStream2,
    decode: TokenStream2,
}

/// Generates the schema expression and the decode expression for one field.
fn field_code(ty: &Type, attrs: &FieldAttributes) -> FieldCode {
    let schema = match attrs.fixed {
        Some(len) => quote! { schema_codec::Schema::fixed_string(#len) },
        None => quote! { <#ty as schema_codec::Typed>::schema() },
    };
    let decode = quote! {
        <#ty as schema_codec::Typed>::from_value(schema_codec::next_element(&mut elements)?)?
    };
    FieldCode { schema, decode }
}

/// Code generated for one set of fields (a struct body or an enum variant).
struct FieldsCode {
    /// Schema of the fields as a tuple.
    schema: TokenStream2,
    /// Pattern binding every field, without the leading path.
    pattern: TokenStream2,
    /// `Value::Tuple` built from the bindings of `pattern`.
    to_value: TokenStream2,
    /// Constructor body (without the leading path) reading from `elements`.
    construct: TokenStream2,
    /// Number of fields.
    count: usize,
}

fn fields_code(fields: &Fields) -> syn::Result<FieldsCode> {
    match fields {
        Fields::Named(fields) => {
            let idents: Vec<&Ident> = fields
                .named
                .iter()
                .map(|f| f.ident.as_ref().expect("named field"))
                .collect();
            let types: Vec<&Type> = fields.named.iter().map(|f| &f.ty).collect();
            let attrs = fields
                .named
                .iter()
                .map(|f| get_field_attributes(&f.attrs, &f.ty))
                .collect::<syn::Result<Vec<_>>>()?;

            let mut schemas = Vec::new();
            let mut assignments = Vec::new();
            for (ident, ty, attrs) in izip!(idents.iter(), types.iter(), attrs.iter()) {
                let code = field_code(ty, attrs);
                schemas.push(code.schema);
                let decode = code.decode;
                assignments.push(quote! { #ident: #decode, });
            }

            Ok(FieldsCode {
                schema: quote! { schema_codec::Schema::tuple(vec![#(#schemas),*]) },
                pattern: quote! { { #(#idents),* } },
                to_value: quote! {
                    schema_codec::Value::Tuple(vec![#(schema_codec::Typed::to_value(#idents)),*])
                },
                construct: quote! { { #(#assignments)* } },
                count: idents.len(),
            })
        }
        Fields::Unnamed(fields) => {
            let bindings: Vec<Ident> = (0..fields.unnamed.len())
                .map(|i| Ident::new(&format!("field{}", i), Span::call_site()))
                .collect();
            let attrs = fields
                .unnamed
                .iter()
                .map(|f| get_field_attributes(&f.attrs, &f.ty))
                .collect::<syn::Result<Vec<_>>>()?;

            let mut schemas = Vec::new();
            let mut decodes = Vec::new();
            for (f, attrs) in fields.unnamed.iter().zip(attrs.iter()) {
                let code = field_code(&f.ty, attrs);
                schemas.push(code.schema);
                decodes.push(code.decode);
            }

            Ok(FieldsCode {
                schema: quote! { schema_codec::Schema::tuple(vec![#(#schemas),*]) },
                pattern: quote! { ( #(#bindings),* ) },
                to_value: quote! {
                    schema_codec::Value::Tuple(vec![#(schema_codec::Typed::to_value(#bindings)),*])
                },
                construct: quote! { ( #(#decodes),* ) },
                count: bindings.len(),
            })
        }
        Fields::Unit => Ok(FieldsCode {
            schema: quote! { schema_codec::Schema::tuple(vec![]) },
            pattern: quote! {},
            to_value: quote! { schema_codec::Value::Tuple(vec![]) },
            construct: quote! {},
            count: 0,
        }),
    }
}

fn expand_typed(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(schema_codec::Typed));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (schema, to_value, from_value) = match &input.data {
        Data::Struct(s) => {
            let code = fields_code(&s.fields)?;
            let FieldsCode {
                schema,
                pattern,
                to_value,
                construct,
                count,
            } = code;
            (
                schema,
                quote! {
                    let #name #pattern = self;
                    #to_value
                },
                quote! {
                    let mut elements = schema_codec::tuple_elements(value, #count)?;
                    Ok(#name #construct)
                },
            )
        }
        Data::Enum(e) => {
            if e.variants.len() > MAX_VARIANTS {
                return Err(syn::Error::new_spanned(
                    name,
                    format!(
                        "enum '{}' has {} variants; a union tag addresses at most {}",
                        name,
                        e.variants.len(),
                        MAX_VARIANTS
                    ),
                ));
            }
            let alternatives = e.variants.len();
            let mut schemas = Vec::new();
            let mut encode_arms = Vec::new();
            let mut decode_arms = Vec::new();

            for (tag, v) in e.variants.iter().enumerate() {
                let tag = tag as u8;
                let variant_ident = &v.ident;
                let FieldsCode {
                    schema,
                    pattern,
                    to_value,
                    construct,
                    count,
                } = fields_code(&v.fields)?;

                schemas.push(schema);
                encode_arms.push(quote! {
                    #name::#variant_ident #pattern => schema_codec::Value::union(#tag, #to_value),
                });
                decode_arms.push(quote! {
                    #tag => {
                        let mut elements = schema_codec::tuple_elements(inner, #count)?;
                        Ok(#name::#variant_ident #construct)
                    }
                });
            }

            // An enum without variants has no values to convert.
            let to_value = if encode_arms.is_empty() {
                quote! { match *self {} }
            } else {
                quote! {
                    match self {
                        #(#encode_arms)*
                    }
                }
            };

            (
                quote! { schema_codec::Schema::union(vec![#(#schemas),*]) },
                to_value,
                quote! {
                    let (tag, inner) = schema_codec::union_parts(value)?;
                    match tag {
                        #(#decode_arms)*
                        tag => Err(schema_codec::CodecError::UnknownTag {
                            tag,
                            alternatives: #alternatives,
                        }),
                    }
                },
            )
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Typed cannot be derived for unions",
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics schema_codec::Typed for #name #ty_generics #where_clause {
            fn schema() -> schema_codec::Schema {
                #schema
            }

            fn to_value(&self) -> schema_codec::Value {
                #to_value
            }

            #[allow(unused_mut, unused_variables, unreachable_patterns)]
            fn from_value(value: schema_codec::Value) -> schema_codec::Result<Self> {
                #from_value
            }
        }
    })
}

/// Derive macro for implementing the `Typed` trait
///
/// Structs map onto a tuple schema of their fields in declaration order. Enums
/// map onto a union whose alternative `i` is the tuple of variant `i`'s fields;
/// unit structs and unit variants use the empty tuple.
///
/// # Supported Attributes
///
/// * `#[schema(fixed = N)]` - Encode a `String` field as a fixed string of `N` bytes
///
/// # Examples
///
/// ```rust,ignore
/// #[derive(Typed)]
/// struct Player {
///     id: u32,
///     #[schema(fixed = 3)]
///     country: String,
///     scores: Vec<u16>,
/// }
/// ```
#[proc_macro_derive(Typed, attributes(schema))]
pub fn derive_typed(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_typed(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
