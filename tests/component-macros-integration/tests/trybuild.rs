//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_component_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/component_ok.rs");
    t.pass("tests/trybuild/data_object_ok.rs");
    t.compile_fail("tests/trybuild/get_bean_without_name.rs");
}
