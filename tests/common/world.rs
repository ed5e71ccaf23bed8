use corona::mvc::events::{names, ControllerEvent, RouterEvent};
use corona::{
    Controller, ControllerConfig, Evented, MemoryDocument, MemoryLocation, RouteMatch, Router,
    View, ViewConfig, Viewable,
};
use cucumber::World;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A dispatch observed through a route handler
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub name: String,
    pub found: RouteMatch,
}

/// Router, document and views for one scenario
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct RoutingWorld {
    pub location: Arc<MemoryLocation>,
    pub router: Arc<Router>,
    pub document: Arc<MemoryDocument>,

    /// Route handler calls since the last navigation
    pub dispatches: Arc<Mutex<Vec<Dispatch>>>,

    /// `route` events since the last navigation
    pub route_events: Arc<Mutex<Vec<RouteMatch>>>,

    pub views: HashMap<String, Arc<View>>,
    pub controller: Option<Arc<Controller>>,
    pub transitions: Arc<Mutex<Vec<ControllerEvent>>>,
}

impl RoutingWorld {
    pub fn new() -> Self {
        let location = Arc::new(MemoryLocation::new());
        let router = Arc::new(Router::new(location.clone()));
        let route_events = Arc::new(Mutex::new(Vec::new()));
        {
            let route_events = route_events.clone();
            router.subscribe(names::ROUTE, move |event| {
                let RouterEvent::Route(found) = event;
                route_events.lock().unwrap().push(found.clone());
            });
        }

        Self {
            location,
            router,
            document: Arc::new(MemoryDocument::new()),
            dispatches: Arc::new(Mutex::new(Vec::new())),
            route_events,
            views: HashMap::new(),
            controller: None,
            transitions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register `pattern` with a handler recording dispatches under `name`
    pub fn register_route(&self, pattern: &str, name: &str) {
        let dispatches = self.dispatches.clone();
        let name = name.to_string();
        self.router.register(pattern, move |found| {
            dispatches.lock().unwrap().push(Dispatch {
                name: name.clone(),
                found: found.clone(),
            });
        });
    }

    pub fn clear_observations(&self) {
        self.dispatches.lock().unwrap().clear();
        self.route_events.lock().unwrap().clear();
    }

    pub fn last_dispatch(&self) -> Option<Dispatch> {
        self.dispatches.lock().unwrap().last().cloned()
    }

    pub fn add_view(&mut self, name: &str, element: &str, template: &str) {
        self.document.insert(element);
        let view = Arc::new(View::new(
            ViewConfig::new().element(element).template(template),
            self.document.clone(),
        ));
        self.views.insert(name.to_string(), view);
    }

    pub fn view(&self, name: &str) -> Arc<View> {
        self.views
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("view \"{name}\" not defined"))
    }

    /// Build a controller whose routes stage the named views
    pub fn create_controller(&mut self, routes: &[(String, String)]) {
        let mut config = ControllerConfig::new();
        for (pattern, view_name) in routes {
            let view: Arc<dyn Viewable> = self.view(view_name);
            config = config.route(pattern.clone(), move |controller, _| {
                controller.set_next_view(view.clone());
            });
        }

        let controller = Controller::new(self.router.clone(), config);
        let transitions = self.transitions.clone();
        controller.subscribe(names::TRANSITIONED, move |event| {
            transitions.lock().unwrap().push(event.clone());
        });
        self.controller = Some(controller);
    }

    /// Name of the view occupying `slot` on the controller
    pub fn view_name_in(&self, view: Option<Arc<dyn Viewable>>) -> Option<String> {
        let view = view?;
        self.views
            .iter()
            .find(|(_, candidate)| {
                let candidate: Arc<dyn Viewable> = (*candidate).clone();
                Arc::ptr_eq(&candidate, &view)
            })
            .map(|(name, _)| name.clone())
    }

    pub fn controller(&self) -> &Arc<Controller> {
        self.controller
            .as_ref()
            .expect("controller should have been created")
    }
}

impl Default for RoutingWorld {
    fn default() -> Self {
        Self::new()
    }
}
