//! # Corona Main Entry Point
//!
//! Headless route checker: loads a routes file, navigates an in-memory
//! router through the given hashes and reports which route each one hit.

use anyhow::{bail, Result};
use corona::cmd_args::CommandLineArgs;
use corona::config::{get_routes_path, RoutesConfig};
use corona::logging::init_tracing_subscriber;
use corona::mvc::events::{names, RouterEvent};
use corona::mvc::models::{Collection, CollectionConfig, ModelConfig};
use corona::mvc::services::HttpService;
use corona::{Evented, RouteMatch, Router};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();
    let routes_path = cmd_args
        .routes()
        .map(str::to_string)
        .unwrap_or_else(get_routes_path);

    tracing::debug!("Loading routes from '{}'", routes_path);
    let config = RoutesConfig::load(&routes_path)?;
    if config.is_empty() {
        tracing::warn!("No routes found in '{}'", routes_path);
    }

    navigate_all(&config, cmd_args.hashes());

    if let Some(url) = cmd_args.fetch() {
        fetch_collection(&config, url).await?;
    }
    Ok(())
}

fn drain(matches: &Mutex<Vec<RouteMatch>>) -> Vec<RouteMatch> {
    std::mem::take(&mut *matches.lock().unwrap_or_else(PoisonError::into_inner))
}

/// Register every configured route, start the router and report each hash
fn navigate_all(config: &RoutesConfig, hashes: &[String]) {
    let router = Arc::new(Router::in_memory());
    let mut route_names: HashMap<String, String> = HashMap::new();

    for (pattern, name) in config.entries() {
        let label = name.clone();
        router.register(&pattern, move |found| {
            tracing::debug!("Route '{}' matched {:?}", label, found.args);
        });
        route_names.entry(pattern).or_insert(name);
    }

    let dispatched = Arc::new(Mutex::new(Vec::new()));
    {
        let dispatched = dispatched.clone();
        router.subscribe(names::ROUTE, move |event| {
            let RouterEvent::Route(found) = event;
            dispatched
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(found.clone());
        });
    }

    router.start();
    drain(&dispatched);

    for hash in hashes {
        let hash = hash.trim_start_matches('#');
        let unchanged = router.current_hash() == hash;
        router.navigate(hash);
        if unchanged && router.is_started() {
            router.dispatch();
        }

        match drain(&dispatched).pop() {
            Some(found) => {
                let name = route_names
                    .get(&found.pattern)
                    .map(String::as_str)
                    .unwrap_or("?");
                let params: BTreeMap<_, _> = found.params.iter().collect();
                let params = serde_json::to_string(&params).unwrap_or_default();
                println!("#{hash} -> {name} ({}) {params}", found.pattern);
            }
            None => println!("#{hash} -> no route"),
        }
    }
}

/// Fetch `url` into a collection and print its JSON
async fn fetch_collection(config: &RoutesConfig, url: &str) -> Result<()> {
    let http = HttpService::with_settings(config.http())?;
    let collection = Collection::new(
        CollectionConfig::new()
            .http(http.clone())
            .model(ModelConfig::new().http(http)),
    );

    let failure = Arc::new(Mutex::new(None));
    {
        let failure = failure.clone();
        collection.subscribe(names::FETCH_FAILURE, move |event| {
            *failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(format!("{event:?}"));
        });
    }

    collection.fetch(url).await;

    if let Some(error) = failure.lock().unwrap_or_else(PoisonError::into_inner).take() {
        bail!("Fetching '{}' failed: {}", url, error);
    }
    println!("{}", serde_json::to_string_pretty(&collection.json())?);
    Ok(())
}
