use tracing::info;

pub const NAV_LINKS: [(&str, &str); 2] = [("Home", "/"), ("About", "/about")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    NotFound(String),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let path = path.trim();
        let normalized = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        match normalized {
            "" | "/" => Route::Home,
            "/about" => Route::About,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::NotFound(path) => path,
        }
    }
}

#[derive(Debug)]
pub struct Router {
    current: Route,
}

impl Router {
    pub fn new(initial_path: &str) -> Self {
        Self { current: Route::from_path(initial_path) }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Returns true when the route actually changed.
    pub fn navigate(&mut self, path: &str) -> bool {
        let next = Route::from_path(path);
        if next == self.current {
            return false;
        }
        info!("🧭 Navigate {} -> {}", self.current.path(), next.path());
        self.current = next;
        true
    }
}
