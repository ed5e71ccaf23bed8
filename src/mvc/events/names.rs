//! Event names published by the framework entities.

pub const FETCH_SUCCESS: &str = "fetchSuccess";
pub const FETCH_FAILURE: &str = "fetchFailure";
pub const CREATE_SUCCESS: &str = "createSuccess";
pub const CREATE_FAILURE: &str = "createFailure";
pub const UPDATE_SUCCESS: &str = "updateSuccess";
pub const UPDATE_FAILURE: &str = "updateFailure";
pub const DESTROY_SUCCESS: &str = "destroySuccess";
pub const DESTROY_FAILURE: &str = "destroyFailure";
pub const CHANGED: &str = "changed";
pub const RESET: &str = "reset";

pub const ADDED: &str = "added";
pub const REMOVED: &str = "removed";
pub const SWAPPED: &str = "swapped";

pub const RENDER_BEFORE: &str = "renderBefore";
pub const RENDER_AFTER: &str = "renderAfter";
pub const ENABLED: &str = "enabled";
pub const DISABLED: &str = "disabled";

pub const ROUTE: &str = "route";
pub const TRANSITIONED: &str = "transitioned";
