//! # Controllers Module

pub mod controller;

pub use controller::{Controller, ControllerAction, ControllerConfig, ControllerInit};
