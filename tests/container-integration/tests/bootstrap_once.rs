//! 全局启动器只能启动一次
//!
//! 每个测试文件是独立进程，全局状态不会与其他文件共享。

use component_macros::component;
use infrastructure_common::{DependencyError, InfrastructureError};
use infrastructure_composition::{
    get_container_bean, get_container_bean_with, instance, ContainerBootstrap, ContextDefinitions,
};
use serde::Deserialize;

#[component(name = "fooHolder")]
#[derive(Debug, Deserialize)]
pub struct FooHolder {
    message: String,
}

fn is_already_bootstrapped(err: &InfrastructureError) -> bool {
    matches!(
        err,
        InfrastructureError::DependencyError {
            source: DependencyError::ContainerAlreadyBootstrapped
        }
    )
}

#[tokio::test]
async fn test_second_bootstrap_fails() {
    assert!(!ContainerBootstrap::global().is_bootstrapped().await);

    let definitions = ContextDefinitions::new(["classpath*:bootstrap_once.toml"]);
    let holder = get_container_bean_with::<FooHolder>(&definitions)
        .await
        .unwrap();
    assert_eq!(holder.message, "I am the default foo");
    assert!(ContainerBootstrap::global().is_bootstrapped().await);

    let err = get_container_bean_with::<FooHolder>(&definitions)
        .await
        .unwrap_err();
    assert!(is_already_bootstrapped(&err));

    let err = get_container_bean::<FooHolder>().await.unwrap_err();
    assert!(is_already_bootstrapped(&err));

    // 直接启动后 instance() 也不能再启动
    let err = instance().await.unwrap_err();
    assert!(is_already_bootstrapped(&err));
}
