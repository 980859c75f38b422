extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Index};

/// Derives `bitcoin::consensus::{Encodable, Decodable}` for a struct by encoding
/// every field in declaration order, the way special transaction payloads are
/// laid out on the wire.
#[proc_macro_derive(ConsensusEncoding)]
pub fn consensus_encoding_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return syn::Error::new_spanned(name, "ConsensusEncoding only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let (encode_fields, decode_body): (Vec<TokenStream2>, TokenStream2) = match fields {
        Fields::Named(named) => {
            let idents: Vec<_> = named.named.iter().filter_map(|f| f.ident.as_ref()).collect();
            let encode = idents
                .iter()
                .map(|ident| quote! { &self.#ident })
                .collect();
            let decode = quote! {
                Self {
                    #(#idents: bitcoin::consensus::Decodable::consensus_decode(r)?,)*
                }
            };
            (encode, decode)
        }
        Fields::Unnamed(unnamed) => {
            let indices: Vec<_> = (0..unnamed.unnamed.len()).map(Index::from).collect();
            let encode = indices
                .iter()
                .map(|index| quote! { &self.#index })
                .collect();
            let decoders = indices
                .iter()
                .map(|_| quote! { bitcoin::consensus::Decodable::consensus_decode(r)? });
            let decode = quote! { Self(#(#decoders,)*) };
            (encode, decode)
        }
        Fields::Unit => (Vec::new(), quote! { Self }),
    };

    let expanded = quote! {
        impl #impl_generics bitcoin::consensus::Encodable for #name #ty_generics #where_clause {
            fn consensus_encode<W: bitcoin::io::Write + ?Sized>(
                &self,
                w: &mut W,
            ) -> ::core::result::Result<usize, bitcoin::io::Error> {
                let mut len = 0;
                #(len += bitcoin::consensus::Encodable::consensus_encode(#encode_fields, w)?;)*
                Ok(len)
            }
        }

        impl #impl_generics bitcoin::consensus::Decodable for #name #ty_generics #where_clause {
            fn consensus_decode<R: bitcoin::io::Read + ?Sized>(
                r: &mut R,
            ) -> ::core::result::Result<Self, bitcoin::consensus::encode::Error> {
                Ok(#decode_body)
            }
        }
    };

    TokenStream::from(expanded)
}
