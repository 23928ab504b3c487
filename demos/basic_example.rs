fn main() {
    use obb_collide::{is_rotated_box_collision, Body};

    let a = Body::new([0.0, 0.0], 2.0, 0.5);
    let b = Body::new([1.2, 1.2], 2.0, 0.5);

    for rotation in [0.0, 30.0, 60.0, 90.0] {
        let b = b.with_rotation(rotation);
        println!(
            "b at {:>4} degrees: colliding = {}",
            rotation,
            is_rotated_box_collision(&a, &b)
        );
    }
}
