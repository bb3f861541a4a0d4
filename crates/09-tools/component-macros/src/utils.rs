//! 宏工具函数

use proc_macro2::Span;
use syn::{Expr, Ident, ItemStruct, Lit, Result};

/// 生成登记函数名称
pub fn registration_fn_name(prefix: &str, ident: &Ident) -> Ident {
    Ident::new(
        &format!("__{}_{}", prefix, ident.to_string().to_lowercase()),
        Span::call_site(),
    )
}

/// 登记的类型必须是具体类型
pub fn ensure_no_generics(item: &ItemStruct, macro_name: &str) -> Result<()> {
    if item.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &item.generics,
            format!("#[{}] 不支持泛型结构体", macro_name),
        ))
    }
}

/// 读取字符串字面量
pub fn expect_str(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.value()),
            other => Err(syn::Error::new_spanned(other, "期望字符串字面量")),
        },
        other => Err(syn::Error::new_spanned(other, "期望字符串字面量")),
    }
}

/// 读取整数字面量
pub fn expect_int(expr: &Expr) -> Result<i32> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Int(lit_int) => lit_int.base10_parse(),
            other => Err(syn::Error::new_spanned(other, "期望整数字面量")),
        },
        Expr::Unary(unary) if matches!(unary.op, syn::UnOp::Neg(_)) => {
            Ok(-expect_int(&unary.expr)?)
        }
        other => Err(syn::Error::new_spanned(other, "期望整数字面量")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_registration_fn_name_is_lowercase() {
        let ident: Ident = parse_quote!(MessageService);
        assert_eq!(
            registration_fn_name("register_bean_type", &ident).to_string(),
            "__register_bean_type_messageservice"
        );
    }

    #[test]
    fn test_generic_structs_are_rejected() {
        let plain: ItemStruct = parse_quote!(struct Plain;);
        let generic: ItemStruct = parse_quote!(struct Wrapper<T>(T););
        assert!(ensure_no_generics(&plain, "data_object").is_ok());
        assert!(ensure_no_generics(&generic, "data_object").is_err());
    }

    #[test]
    fn test_literal_readers() {
        assert_eq!(expect_str(&parse_quote!("bean")).unwrap(), "bean");
        assert_eq!(expect_int(&parse_quote!(42)).unwrap(), 42);
        assert_eq!(expect_int(&parse_quote!(-3)).unwrap(), -3);
        assert!(expect_str(&parse_quote!(42)).is_err());
    }
}
