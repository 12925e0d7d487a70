use super::{DetectedRoute, RouteDetection};
use serde::Serialize;
use std::collections::HashMap;

/// Recorded when more routes were detected than the cap allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Truncation {
    pub detected: usize,
    pub kept: usize,
}

impl Truncation {
    pub fn message(&self) -> String {
        format!(
            "Detected {} routes, capping at {}. Use --max-routes to increase.",
            self.detected, self.kept
        )
    }
}

/// Dedups by path, orders by confidence and caps at `max_routes`.
pub fn aggregate(routes: Vec<DetectedRoute>, max_routes: usize) -> RouteDetection {
    let mut routes = dedup_by_path(routes);

    // Stable: equal tiers keep their first-seen order.
    routes.sort_by_key(|r| r.confidence);

    let mut truncation = None;
    if routes.len() > max_routes {
        let detected = routes.len();
        routes.truncate(max_routes);
        tracing::debug!(detected, kept = max_routes, "route list truncated");
        truncation = Some(Truncation {
            detected,
            kept: max_routes,
        });
    }

    RouteDetection { routes, truncation }
}

/// One route per path. A later entry replaces an earlier one only when its
/// confidence is strictly higher; the path keeps its first-seen position.
pub fn dedup_by_path(routes: Vec<DetectedRoute>) -> Vec<DetectedRoute> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<DetectedRoute> = Vec::with_capacity(routes.len());

    for route in routes {
        match index.get(&route.path) {
            Some(&i) => {
                if route.confidence < unique[i].confidence {
                    unique[i] = route;
                }
            }
            None => {
                index.insert(route.path.clone(), unique.len());
                unique.push(route);
            }
        }
    }

    unique
}
