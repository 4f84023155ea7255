// ── Route table ──
//
// Static, data-only route descriptors consumed by the navigation guard.
// Role requirements and visibility live here; the guard owns the
// decision logic.

/// A single route: path pattern, display metadata, and access rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Path pattern; segments starting with `:` match any one segment.
    pub path: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub icon: Option<&'static str>,
    /// Empty means no role requirement.
    pub required_roles: &'static [&'static str],
    /// Hidden routes are reachable but not listed in menus.
    pub hidden: bool,
    /// Routes that only forward somewhere else.
    pub redirect: Option<&'static str>,
    /// Menu section the route is grouped under, if any.
    pub parent_title: Option<&'static str>,
}

impl RouteDescriptor {
    const fn new(path: &'static str, name: &'static str, title: &'static str) -> Self {
        Self {
            path,
            name,
            title,
            icon: None,
            required_roles: &[],
            hidden: false,
            redirect: None,
            parent_title: None,
        }
    }

    const fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    const fn roles(mut self, roles: &'static [&'static str]) -> Self {
        self.required_roles = roles;
        self
    }

    const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    const fn redirect_to(mut self, target: &'static str) -> Self {
        self.redirect = Some(target);
        self
    }

    const fn under(mut self, section: &'static str) -> Self {
        self.parent_title = Some(section);
        self
    }
}

/// Paths reachable without a token.
pub const PUBLIC_PATHS: &[&str] = &["/login", "/register", "/403", "/404"];

const NOT_FOUND: RouteDescriptor = RouteDescriptor::new("/404", "not-found", "Not Found").hidden();

const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::new("/login", "login", "Sign In").hidden(),
    RouteDescriptor::new("/register", "register", "Register").hidden(),
    RouteDescriptor::new("/403", "forbidden", "Forbidden").hidden(),
    NOT_FOUND,
    RouteDescriptor::new("/", "root", "Home")
        .redirect_to("/dashboard")
        .hidden(),
    RouteDescriptor::new("/dashboard", "dashboard", "Dashboard").icon("odometer"),
    RouteDescriptor::new("/student/list", "student-list", "Students")
        .icon("user")
        .roles(&["admin", "teacher"])
        .under("Management"),
    RouteDescriptor::new("/course/list", "course-list", "Courses")
        .icon("reading")
        .roles(&["admin", "teacher"])
        .under("Management"),
    RouteDescriptor::new("/course/detail/:id", "course-detail", "Course Detail").hidden(),
    RouteDescriptor::new("/enrollment/market", "enrollment-market", "Course Market")
        .icon("shopping-cart")
        .roles(&["student"])
        .under("Enrollment"),
    RouteDescriptor::new("/enrollment/mine", "enrollment-mine", "My Courses")
        .icon("collection")
        .roles(&["student"])
        .under("Enrollment"),
    RouteDescriptor::new("/notification", "notification", "Notifications").icon("bell"),
    RouteDescriptor::new("/profile", "profile", "Profile").icon("setting"),
];

/// The full static route tree.
pub fn route_table() -> &'static [RouteDescriptor] {
    ROUTES
}

/// Whether a path is reachable without authentication.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&strip_query(path))
}

/// Match a path against the table; unmatched paths fall through to the
/// not-found route. Query strings are ignored for matching.
pub fn find_route(path: &str) -> &'static RouteDescriptor {
    let path = strip_query(path);
    ROUTES
        .iter()
        .find(|route| matches_pattern(route.path, path))
        .unwrap_or(&NOT_FOUND)
}

fn strip_query(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

/// Segment-wise pattern match; `:param` segments match any one segment.
fn matches_pattern(pattern: &str, path: &str) -> bool {
    if pattern == path {
        return true;
    }
    let pattern_segs: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segs.len() != path_segs.len() || pattern_segs.is_empty() {
        return false;
    }
    pattern_segs
        .iter()
        .zip(&path_segs)
        .all(|(pat, seg)| pat.starts_with(':') || pat == seg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_paths_match() {
        assert_eq!(find_route("/dashboard").name, "dashboard");
        assert_eq!(find_route("/student/list").name, "student-list");
    }

    #[test]
    fn param_segments_match_any_value() {
        assert_eq!(find_route("/course/detail/42").name, "course-detail");
        assert_eq!(find_route("/course/detail/abc").name, "course-detail");
        // too many segments is not a match
        assert_eq!(find_route("/course/detail/42/extra").name, "not-found");
    }

    #[test]
    fn unmatched_paths_fall_through_to_not_found() {
        assert_eq!(find_route("/no/such/page").name, "not-found");
    }

    #[test]
    fn query_strings_are_ignored() {
        assert_eq!(find_route("/login?redirect=/course/list").name, "login");
        assert!(is_public_path("/login?redirect=/course/list"));
    }

    #[test]
    fn public_allow_list() {
        for path in ["/login", "/register", "/403", "/404"] {
            assert!(is_public_path(path), "{path} should be public");
        }
        assert!(!is_public_path("/dashboard"));
        assert!(!is_public_path("/"));
    }

    #[test]
    fn root_redirects_to_dashboard() {
        assert_eq!(find_route("/").redirect, Some("/dashboard"));
    }

    #[test]
    fn role_annotations() {
        assert_eq!(find_route("/course/list").required_roles, ["admin", "teacher"]);
        assert_eq!(find_route("/enrollment/market").required_roles, ["student"]);
        assert!(find_route("/notification").required_roles.is_empty());
    }

    #[test]
    fn redirect_targets_are_terminal() {
        for route in route_table() {
            if let Some(target) = route.redirect {
                assert!(
                    find_route(target).redirect.is_none(),
                    "{} forwards to another redirect",
                    route.path
                );
            }
        }
    }
}
