//! Step definitions for controller-driven view transitions

use crate::common::world::RoutingWorld;
use corona::Viewable;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};

#[given(regex = r#"^a view "([^"]*)" rendering "([^"]*)" into "([^"]*)"$"#)]
async fn given_view(world: &mut RoutingWorld, name: String, template: String, element: String) {
    world.add_view(&name, &element, &template);
}

#[given("a controller with routes:")]
async fn given_controller(world: &mut RoutingWorld, step: &Step) {
    let table = step.table.as_ref().expect("routes table");
    let routes: Vec<(String, String)> = table
        .rows
        .iter()
        .skip(1)
        .map(|row| (row[0].clone(), row[1].clone()))
        .collect();
    world.create_controller(&routes);
}

#[when(regex = r#"^I render view "([^"]*)"$"#)]
async fn when_render_view(world: &mut RoutingWorld, name: String) {
    world.view(&name).render();
}

#[then(regex = r#"^view "([^"]*)" should be (enabled|disabled)$"#)]
async fn then_view_state(world: &mut RoutingWorld, name: String, state: String) {
    assert_eq!(world.view(&name).is_enabled(), state == "enabled");
}

#[then(regex = r#"^the current view should be "([^"]*)"$"#)]
async fn then_current_view(world: &mut RoutingWorld, name: String) {
    let current = world.controller().current_view();
    assert_eq!(world.view_name_in(current), Some(name));
}

#[then(regex = r#"^the previous view should be "([^"]*)"$"#)]
async fn then_previous_view(world: &mut RoutingWorld, name: String) {
    let previous = world.controller().previous_view();
    assert_eq!(world.view_name_in(previous), Some(name));
}

#[then(regex = r"^the controller should have transitioned (\d+) times?$")]
async fn then_transition_count(world: &mut RoutingWorld, count: usize) {
    assert_eq!(world.transitions.lock().unwrap().len(), count);
}

#[then(regex = r#"^element "([^"]*)" should contain "([^"]*)"$"#)]
async fn then_element_contains(world: &mut RoutingWorld, element: String, html: String) {
    assert_eq!(world.document.html(&element).as_deref(), Some(html.as_str()));
}
