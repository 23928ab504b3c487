use obb_collide::{Body, BodyWorld, Vector2};

#[derive(Copy, Clone)]
struct Car {
    speed: f32,
}

fn main() {
    // Creates the world with cell size 10
    let mut w: BodyWorld<Car> = BodyWorld::new(10);

    // create cars in the range x: [-50..50], y: [-50..50], all driving towards the center
    for _ in 0..100 {
        let pos = Vector2::new(
            100.0 * rand::random::<f32>() - 50.0,
            100.0 * rand::random::<f32>() - 50.0,
        );
        let mut body = Body::new(pos, 4.0, 2.0);
        body.point_toward(Vector2::ZERO);
        let tags: &[&str] = if rand::random::<f32>() < 0.2 {
            &["truck"]
        } else {
            &[]
        };
        w.insert_with_tags(
            body,
            Car {
                speed: 0.5 + rand::random::<f32>(),
            },
            tags.iter().copied(),
        );
    }

    for _ in 0..50 {
        update_loop(&mut w);
    }
}

fn update_loop(w: &mut BodyWorld<Car>) {
    println!("{} cars left", w.len());

    // Cars hit by a truck are removed
    let handles: Vec<_> = w.handles().collect();
    for &h in &handles {
        if w.get(h).is_some() && w.touching_any_with_tag(h, "truck") {
            w.remove(h);
        }
    }

    // Update positions
    for h in w.handles().collect::<Vec<_>>() {
        let (body, car) = match w.get(h) {
            Some((b, c)) => (*b, *c),
            None => continue,
        };
        let mut body = body;
        body.move_forward(car.speed);
        w.set_body(h, body);
    }
}
