//! 数据对象登记宏实现

use crate::utils::{ensure_no_generics, registration_fn_name};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, ItemStruct, Meta,
    Result, Token,
};

/// 数据对象参数
#[derive(Debug, Clone, Default)]
pub struct DataObjectArgs {
    /// 是否通过 serde 实现 `to_json`
    pub serialize: bool,
}

impl Parse for DataObjectArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = DataObjectArgs::default();

        for meta in Punctuated::<Meta, Token![,]>::parse_terminated(input)? {
            match meta {
                Meta::Path(path) if path.is_ident("serialize") => args.serialize = true,
                other => return Err(syn::Error::new_spanned(other, "未知的 data_object 参数")),
            }
        }

        Ok(args)
    }
}

/// 实现 #[data_object] 宏
pub fn data_object_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = if args.is_empty() {
        DataObjectArgs::default()
    } else {
        match syn::parse::<DataObjectArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    if let Err(e) = ensure_no_generics(&input_struct, "data_object") {
        return e.to_compile_error().into();
    }

    let struct_name = &input_struct.ident;
    let registration_fn = registration_fn_name("register_data_object", struct_name);

    let to_json = args.serialize.then(|| {
        quote! {
            fn to_json(&self) -> ::serde_json::Value {
                ::infrastructure_common::data_object_json(self)
            }
        }
    });

    let expanded = quote! {
        #input_struct

        impl ::infrastructure_common::DataObject for #struct_name {
            #to_json
        }

        // 程序启动时登记到全局数据对象目录
        #[::ctor::ctor]
        fn #registration_fn() {
            ::infrastructure_common::submit_data_object(
                ::infrastructure_common::DataObjectDescriptor::of::<#struct_name>(module_path!()),
            );
        }
    };

    TokenStream::from(expanded)
}
