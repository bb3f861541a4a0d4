//! 全局访问器缓存
//!
//! 通过环境变量属性来源配置占位符和定义位置。

use component_macros::component;
use infrastructure_composition::{get_container_bean, instance};
use serde::Deserialize;
use std::sync::Arc;

#[component(name = "fooHolder")]
#[derive(Debug, Deserialize)]
pub struct FooHolder {
    message: String,
}

#[tokio::test]
async fn test_instance_is_cached_across_calls() {
    std::env::set_var("APP__CONTAINER__FOO", "foo");
    std::env::set_var(
        "APP__CONTAINER__ACCESSOR__CONTEXT_DEFINITION__0",
        "classpath*:global_instance.yaml",
    );

    let first = instance().await.unwrap();
    let second = instance().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let holder = first.get_bean::<FooHolder>().unwrap();
    assert_eq!(holder.message, "I am the foo");
    assert!(Arc::ptr_eq(&holder, &second.get_bean::<FooHolder>().unwrap()));

    // 缓存之后不能再直接启动
    assert!(get_container_bean::<FooHolder>().await.is_err());
}
