use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Path};

/// Derive macro for record declarations.
///
/// Implements `attrtype_types::Record` for a struct with named fields. Every
/// field must carry exactly one `#[attr(...)]` tag:
///
/// - `#[attr(name = "...")]`: typed-value field exposed under that name
/// - `#[attr(flatten)]`: embedded record whose fields join this record
/// - `#[attr(skip)]`: field left out of the record shape, decoded as `Default`
///
/// A field without a tag still compiles; deriving the record type then fails
/// with a missing field tag error.
///
/// The generated code refers to `::attrtype_types`. Use
/// `#[attr(crate = "path")]` on the struct to point it elsewhere, for example
/// at the `attrtype` facade. The path is used as written, so `crate::reexported`
/// and `::attrtype` both work.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Record)]
/// pub struct Rule {
///     #[attr(name = "name")]
///     pub name: StringValue,
///
///     #[attr(name = "cidr_blocks")]
///     pub cidr_blocks: SetValue<CidrBlockValue>,
///
///     #[attr(flatten)]
///     pub common: CommonFields,
/// }
/// ```
#[proc_macro_derive(Record, attributes(attr))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

enum Tag {
    Named(LitStr),
    Flatten,
    Skip,
    Missing,
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let krate = crate_path(input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Record only supports structs")),
    };

    let mut decls = Vec::new();
    let mut encode = Vec::new();
    let mut decode = Vec::new();
    let mut validate = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let ident_str = ident.to_string();
        let ty = &field.ty;

        match field_tag(field)? {
            Tag::Named(attr_name) => {
                decls.push(quote! {
                    #krate::FieldDecl::named(
                        #ident_str,
                        #attr_name,
                        <#ty as #krate::TypedValue>::descriptor,
                    )
                });
                encode.push(quote! {
                    __fields.insert(
                        ::std::string::String::from(#attr_name),
                        #krate::Value::to_wire(&self.#ident),
                    );
                });
                decode.push(quote! {
                    #ident: #krate::decode_field::<#ty>(__fields, #attr_name)?
                });
                validate.push(quote! {
                    #krate::Validate::validate(&self.#ident, &__path.attribute(#attr_name), __diags);
                });
            }
            Tag::Flatten => {
                decls.push(quote! {
                    #krate::FieldDecl::embedded(#ident_str, <#ty as #krate::Record>::fields)
                });
                encode.push(quote! {
                    __fields.extend(#krate::Record::to_wire_fields(&self.#ident));
                });
                decode.push(quote! {
                    #ident: <#ty as #krate::Record>::from_wire_fields(__fields)?
                });
                validate.push(quote! {
                    #krate::Record::validate_fields(&self.#ident, __path, __diags);
                });
            }
            Tag::Skip => {
                decls.push(quote! { #krate::FieldDecl::excluded(#ident_str) });
                decode.push(quote! { #ident: ::std::default::Default::default() });
            }
            Tag::Missing => {
                decls.push(quote! { #krate::FieldDecl::missing(#ident_str) });
                decode.push(quote! { #ident: ::std::default::Default::default() });
            }
        }
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Record for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<#krate::FieldDecl> {
                ::std::vec![#(#decls),*]
            }

            fn to_wire_fields(
                &self,
            ) -> #krate::IndexMap<::std::string::String, #krate::WireValue> {
                #[allow(unused_mut)]
                let mut __fields = #krate::IndexMap::new();
                #(#encode)*
                __fields
            }

            fn from_wire_fields(
                __fields: &#krate::IndexMap<::std::string::String, #krate::WireValue>,
            ) -> #krate::ValueResult<Self> {
                ::std::result::Result::Ok(Self {
                    #(#decode),*
                })
            }

            fn validate_fields(
                &self,
                __path: &#krate::AttributePath,
                __diags: &mut #krate::Diagnostics,
            ) {
                #(#validate)*
            }
        }
    })
}

fn field_tag(field: &syn::Field) -> Result<Tag, syn::Error> {
    let mut tag = Tag::Missing;
    for attr in &field.attrs {
        if !attr.path().is_ident("attr") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let next = if meta.path.is_ident("name") {
                Tag::Named(meta.value()?.parse()?)
            } else if meta.path.is_ident("flatten") {
                Tag::Flatten
            } else if meta.path.is_ident("skip") {
                Tag::Skip
            } else {
                return Err(meta.error("expected `name = \"...\"`, `flatten` or `skip`"));
            };
            if !matches!(tag, Tag::Missing) {
                return Err(meta.error("a field takes exactly one of `name`, `flatten` or `skip`"));
            }
            tag = next;
            Ok(())
        })?;
    }
    Ok(tag)
}

fn crate_path(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let mut path: Option<Path> = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("attr") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                path = Some(value.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `crate = \"...\"`"))
            }
        })?;
    }
    Ok(match path {
        Some(path) => quote! { #path },
        None => quote! { ::attrtype_types },
    })
}
