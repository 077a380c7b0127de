use crate::models::EndpointSet;
use regex::Regex;

/// Finds the declared endpoint a `"METHOD path"` usage key refers to, taking
/// `{param}` placeholders into account.
///
/// The method must match exactly. A placeholder in the declared path matches
/// one or more non-`/` characters; every literal character is matched
/// literally. Declared endpoints are tried in declaration order and the first
/// match wins — a documented tie-break, not most-specific matching.
pub fn find_matching_endpoint<'a>(key: &str, endpoints: &'a EndpointSet) -> Option<&'a str> {
    let (method, path) = key.split_once(' ')?;

    for declared_key in endpoints.keys() {
        let Some((declared_method, declared_path)) = declared_key.split_once(' ') else {
            continue;
        };

        if method != declared_method {
            continue;
        }

        if let Some(pattern) = path_pattern(declared_path) {
            if pattern.is_match(path) {
                return Some(declared_key);
            }
        }
    }

    None
}

/// Compiles a declared path template into an anchored regex, e.g.
/// `/users/{id}` -> `^/users/[^/]+$`
fn path_pattern(declared_path: &str) -> Option<Regex> {
    let mut pattern = String::with_capacity(declared_path.len() + 8);
    pattern.push('^');

    let mut rest = declared_path;
    while let Some(open) = rest.find('{') {
        match rest[open..].find('}') {
            Some(close) => {
                pattern.push_str(&regex::escape(&rest[..open]));
                pattern.push_str("[^/]+");
                rest = &rest[open + close + 1..];
            }
            // Unbalanced brace: treat the remainder as literal text
            None => break,
        }
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    Regex::new(&pattern).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeclaredEndpoint, EndpointSet, HttpMethod};

    fn endpoints(entries: &[(HttpMethod, &str)]) -> EndpointSet {
        let mut set = EndpointSet::new();
        for (method, path) in entries {
            set.insert(DeclaredEndpoint::new(*method, *path));
        }
        set
    }

    #[test]
    fn matches_exact_paths() {
        let set = endpoints(&[(HttpMethod::Get, "/users"), (HttpMethod::Post, "/users")]);
        assert_eq!(find_matching_endpoint("GET /users", &set), Some("GET /users"));
        assert_eq!(
            find_matching_endpoint("POST /users", &set),
            Some("POST /users")
        );
    }

    #[test]
    fn matches_path_parameters() {
        let set = endpoints(&[
            (HttpMethod::Get, "/users/{id}"),
            (HttpMethod::Delete, "/users/{id}/posts/{postId}"),
        ]);
        assert_eq!(
            find_matching_endpoint("GET /users/123", &set),
            Some("GET /users/{id}")
        );
        assert_eq!(
            find_matching_endpoint("DELETE /users/123/posts/456", &set),
            Some("DELETE /users/{id}/posts/{postId}")
        );
    }

    #[test]
    fn method_mismatch_yields_none() {
        let set = endpoints(&[(HttpMethod::Get, "/users")]);
        assert_eq!(find_matching_endpoint("POST /users", &set), None);
    }

    #[test]
    fn path_mismatch_yields_none() {
        let set = endpoints(&[(HttpMethod::Get, "/users")]);
        assert_eq!(find_matching_endpoint("GET /posts", &set), None);
    }

    #[test]
    fn placeholder_does_not_cross_segments() {
        let set = endpoints(&[(HttpMethod::Get, "/users/{id}")]);
        assert_eq!(find_matching_endpoint("GET /users/1/posts", &set), None);
        assert_eq!(find_matching_endpoint("GET /users/", &set), None);
    }

    #[test]
    fn literal_dots_are_escaped() {
        let set = endpoints(&[(HttpMethod::Get, "/api/v1.0/users/{id}")]);
        assert_eq!(
            find_matching_endpoint("GET /api/v1.0/users/123", &set),
            Some("GET /api/v1.0/users/{id}")
        );
        assert_eq!(find_matching_endpoint("GET /api/v1X0/users/123", &set), None);
    }

    #[test]
    fn earliest_declared_endpoint_wins_tie_break() {
        let set = endpoints(&[
            (HttpMethod::Get, "/users"),
            (HttpMethod::Get, "/users/{id}"),
            (HttpMethod::Get, "/users/{id}/posts"),
        ]);
        assert_eq!(find_matching_endpoint("GET /users", &set), Some("GET /users"));
        assert_eq!(
            find_matching_endpoint("GET /users/123", &set),
            Some("GET /users/{id}")
        );
        assert_eq!(
            find_matching_endpoint("GET /users/123/posts", &set),
            Some("GET /users/{id}/posts")
        );
    }

    #[test]
    fn malformed_key_yields_none() {
        let set = endpoints(&[(HttpMethod::Get, "/users")]);
        assert_eq!(find_matching_endpoint("nospace", &set), None);
    }
}
