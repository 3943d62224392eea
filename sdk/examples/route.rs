//! Print the route between two map objects.
//!
//! `cargo run -p wayfinder-sdk --example route -- data/map.json r1 r2`

use wayfinder_sdk::query::RouteStep;
use wayfinder_sdk::Wayfinder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    wayfinder_core::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [path, from, to] = args.as_slice() else {
        eprintln!("usage: route <map.json> <from-object-id> <to-object-id>");
        std::process::exit(2);
    };

    let wayfinder = Wayfinder::open(path).await?;
    let Some(route) = wayfinder.route(from, to) else {
        println!("route not found");
        return Ok(());
    };

    println!("{} -> {} ({:.1})", route.start.name, route.end.name, route.total_weight);
    for step in &route.steps {
        match step {
            RouteStep::Walk { floor, to, distance, .. } => println!(
                "  walk {:.1} on floor {} to {}",
                distance,
                floor.as_ref().map(|f| f.as_str()).unwrap_or("?"),
                to.as_deref().unwrap_or("waypoint")
            ),
            RouteStep::ChangeFloor { via, direction, to_floor, .. } => println!(
                "  go {:?} via {} to floor {}",
                direction,
                via.as_deref().unwrap_or("transition"),
                to_floor
            ),
        }
    }
    Ok(())
}
