//! bean 类型登记宏实现

use crate::utils::{ensure_no_generics, expect_int, expect_str, registration_fn_name};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, ItemStruct,
    Meta, Result, Token,
};

/// 组件配置参数
#[derive(Clone)]
pub struct ComponentArgs {
    /// 自定义 bean 名称
    pub name: Option<String>,
    /// 是否作为服务自动创建
    pub service: bool,
    /// 自定义工厂函数
    pub factory: Option<Expr>,
    /// 服务创建优先级，数值大的先创建
    pub priority: i32,
    /// 是否对容器可见
    pub enabled: bool,
}

impl Default for ComponentArgs {
    fn default() -> Self {
        Self {
            name: None,
            service: false,
            factory: None,
            priority: 0,
            enabled: true,
        }
    }
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ComponentArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) if path.is_ident("service") => args.service = true,
                Meta::Path(path) if path.is_ident("enabled") => args.enabled = true,
                Meta::Path(path) if path.is_ident("disabled") => args.enabled = false,
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    args.name = Some(expect_str(&nv.value)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("priority") => {
                    args.priority = expect_int(&nv.value)?;
                }
                Meta::NameValue(nv) if nv.path.is_ident("factory") => {
                    args.factory = Some(nv.value);
                }
                other => return Err(syn::Error::new_spanned(other, "未知的 component 参数")),
            }
        }

        Ok(args)
    }
}

/// 实现 #[component] 宏
pub fn component_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let component_args = if args.is_empty() {
        ComponentArgs::default()
    } else {
        match syn::parse::<ComponentArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    if let Err(e) = ensure_no_generics(&input_struct, "component") {
        return e.to_compile_error().into();
    }

    let struct_name = &input_struct.ident;
    let type_key = quote! { concat!(module_path!(), "::", stringify!(#struct_name)) };
    let bean_name = match &component_args.name {
        Some(name) => quote! { #name },
        None => type_key.clone(),
    };

    let priority = component_args.priority;
    let enabled = component_args.enabled;

    let descriptor = match &component_args.factory {
        Some(factory) => quote! {
            ::di_abstractions::BeanTypeDescriptor::with_factory::<#struct_name>(#type_key, #factory)
        },
        None => quote! {
            ::di_abstractions::BeanTypeDescriptor::of::<#struct_name>(#type_key)
        },
    };
    let service = component_args.service.then(|| quote! { .as_service() });
    let disabled = (!enabled).then(|| quote! { .disabled() });
    let registration_fn = registration_fn_name("register_bean_type", struct_name);

    let expanded = quote! {
        #input_struct

        impl ::infrastructure_common::NamedBean for #struct_name {
            const BEAN_NAME: &'static str = #bean_name;
        }

        impl ::infrastructure_common::Component for #struct_name {
            fn name(&self) -> &'static str {
                <Self as ::infrastructure_common::NamedBean>::BEAN_NAME
            }

            fn priority(&self) -> i32 {
                #priority
            }

            fn is_enabled(&self) -> bool {
                #enabled
            }
        }

        // 程序启动时登记到全局 bean 类型目录
        #[::ctor::ctor]
        fn #registration_fn() {
            ::di_abstractions::submit_bean_type(
                #descriptor
                    .named(<#struct_name as ::infrastructure_common::NamedBean>::BEAN_NAME)
                    .with_priority(#priority)
                    #service
                    #disabled,
            );
        }
    };

    TokenStream::from(expanded)
}
