//! The session handle every entity keeps a clone of.

use std::{
    collections::HashSet,
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{Arc, RwLock},
};

use crate::{
    config::Config,
    http::HttpClient,
    types::{
        id::{marker::ApplicationMarker, Id},
        user::User,
    },
};

struct Inner {
    http: HttpClient,
    user: User,
    application_id: Id<ApplicationMarker>,
    config: Config,
    /// Top-level names of every declared command, consulted when stale
    /// remote commands are cleaned up.
    declared: RwLock<HashSet<String>>,
}

/// Shared session state: the router, who we are, and configuration.
///
/// Cheap to clone; clones share the same inner state.
#[derive(Clone)]
pub struct State {
    inner: Arc<Inner>,
}

impl State {
    pub fn new(
        http: HttpClient,
        user: User,
        application_id: Id<ApplicationMarker>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                user,
                application_id,
                config,
                declared: RwLock::new(HashSet::new()),
            }),
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    /// The authenticated bot user.
    pub fn user(&self) -> &User {
        &self.inner.user
    }

    pub fn application_id(&self) -> Id<ApplicationMarker> {
        self.inner.application_id
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Record a declared top-level command name.
    pub(crate) fn declare(&self, name: &str) {
        let mut declared = self
            .inner
            .declared
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        declared.insert(name.to_owned());
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.inner
            .declared
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(name)
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("State")
            .field("user", &self.inner.user.id)
            .field("application_id", &self.inner.application_id)
            .field("config", &self.inner.config)
            .finish()
    }
}
