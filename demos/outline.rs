use euclid::default::Point2D;
use obb_collide::{is_rotated_box_collision, Body, Vector2};

// Prints the outline of two bodies as euclid points, the way a debug overlay would draw them.
fn main() {
    let bodies = [
        Body::new([0.0, 0.0], 200.0, 100.0).with_rotation(30.0),
        Body::new([120.0, 40.0], 100.0, 200.0),
    ];

    for (i, body) in bodies.iter().enumerate() {
        println!("body {}:", i);
        for edge in body.edges() {
            let src: Point2D<f32> = edge.src.into();
            let dst: Point2D<f32> = edge.dst.into();
            println!("  {:?} -> {:?}", src, dst);
        }
    }

    let probe: Vector2 = Point2D::new(10.0, 5.0).into();
    println!("probe inside body 0: {}", bodies[0].contains_point(probe));
    println!(
        "bodies colliding: {}",
        is_rotated_box_collision(&bodies[0], &bodies[1])
    );
}
