use infrastructure_composition::ContainerAccessor;

#[derive(Debug)]
struct Plain;

fn main() {
    let accessor = ContainerAccessor::unmanaged();
    let _ = accessor.get_bean::<Plain>();
}
