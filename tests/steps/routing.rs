//! Step definitions for route registration and dispatch

use crate::common::world::RoutingWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};

// === ROUTE SETUP ===

#[given(regex = r#"^a route "([^"]*)" named "([^"]*)"$"#)]
async fn given_route_named(world: &mut RoutingWorld, pattern: String, name: String) {
    world.register_route(&pattern, &name);
}

#[given("the routes:")]
async fn given_routes_table(world: &mut RoutingWorld, step: &Step) {
    let table = step.table.as_ref().expect("routes table");
    for row in table.rows.iter().skip(1) {
        world.register_route(&row[0], &row[1]);
    }
}

#[given(regex = r#"^the default route named "([^"]*)"$"#)]
async fn given_default_route(world: &mut RoutingWorld, name: String) {
    world.register_route("", &name);
}

// === NAVIGATION ===

#[when("I start the router")]
async fn when_start_router(world: &mut RoutingWorld) {
    world.clear_observations();
    world.router.start();
}

#[when(regex = r#"^I navigate to "([^"]*)"$"#)]
async fn when_navigate(world: &mut RoutingWorld, hash: String) {
    world.clear_observations();
    world.router.navigate(&hash);
}

// === DISPATCH ASSERTIONS ===

#[then(regex = r#"^route "([^"]*)" should be dispatched$"#)]
async fn then_route_dispatched(world: &mut RoutingWorld, name: String) {
    let dispatch = world.last_dispatch().expect("a route should have been dispatched");
    assert_eq!(dispatch.name, name);
    assert_eq!(world.dispatches.lock().unwrap().len(), 1);
}

#[then("no route should be dispatched")]
async fn then_no_route(world: &mut RoutingWorld) {
    assert!(world.dispatches.lock().unwrap().is_empty());
    assert!(world.route_events.lock().unwrap().is_empty());
}

#[then(regex = r#"^param "([^"]*)" should be "([^"]*)"$"#)]
async fn then_param_equals(world: &mut RoutingWorld, name: String, value: String) {
    let dispatch = world.last_dispatch().expect("a route should have been dispatched");
    assert_eq!(dispatch.found.param(&name), Some(value.as_str()));
}

#[then(regex = r#"^param "([^"]*)" should be absent$"#)]
async fn then_param_absent(world: &mut RoutingWorld, name: String) {
    let dispatch = world.last_dispatch().expect("a route should have been dispatched");
    assert!(dispatch.found.params.contains_key(&name));
    assert_eq!(dispatch.found.param(&name), None);
}

#[then(regex = r#"^the positional args should be "([^"]*)"$"#)]
async fn then_positional_args(world: &mut RoutingWorld, expected: String) {
    let dispatch = world.last_dispatch().expect("a route should have been dispatched");
    let args: Vec<&str> = dispatch
        .found
        .args
        .iter()
        .map(|arg| arg.as_deref().unwrap_or("-"))
        .collect();
    assert_eq!(args.join(","), expected);
}

#[then(regex = r#"^a route event should be broadcast for "([^"]*)"$"#)]
async fn then_route_event(world: &mut RoutingWorld, pattern: String) {
    let events = world.route_events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].pattern, pattern);
}
