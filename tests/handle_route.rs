use contactme::handle::route::parse_location;
use contactme::handle::{ProfileLookup, RouteQuery, parse_route};

fn route(input: &str) -> RouteQuery {
    parse_route(&parse_location(input).expect("parsable location"))
}

fn handle_only(handle: &str) -> RouteQuery {
    RouteQuery {
        handle: Some(handle.to_string()),
        id: None,
    }
}

#[test]
fn handle_query_is_trimmed_and_lowercased() {
    assert_eq!(route("https://example.com/?handle=Alice"), handle_only("alice"));
    assert_eq!(route("/profile.html?handle=%20Bob%20"), handle_only("bob"));
}

#[test]
fn handle_query_carries_id_along() {
    assert_eq!(
        route("/?handle=alice&id=p-9"),
        RouteQuery {
            handle: Some("alice".to_string()),
            id: Some("p-9".to_string()),
        }
    );
}

#[test]
fn path_handles_resolve_with_or_without_prefix() {
    assert_eq!(route("/alice"), handle_only("alice"));
    assert_eq!(route("/p/alice"), handle_only("alice"));
    assert_eq!(route("/profile/alice"), handle_only("alice"));
    assert_eq!(route("/u/alice"), handle_only("alice"));
    assert_eq!(route("/p/bob/"), handle_only("bob"));
    assert_eq!(route("https://example.com/ALICE"), handle_only("alice"));
}

#[test]
fn system_and_asset_paths_resolve_to_nothing() {
    for path in [
        "",
        "/",
        "/assets/app.js",
        "/dashboard.html",
        "/login",
        "/api/x",
        "/js/config.js",
        "/p/profile",
        "/index.html",
    ] {
        assert_eq!(route(path), RouteQuery::default(), "{path:?}");
    }
}

#[test]
fn blocked_parent_rejects_dotless_leaf() {
    assert_eq!(route("/assets/anything"), RouteQuery::default());
    assert_eq!(route("/static/p/alice"), RouteQuery::default());
    assert_eq!(route("/css/alice"), RouteQuery::default());
}

#[test]
fn parsing_is_pure() {
    let url = parse_location("https://example.com/u/carol?utm=x").expect("valid url");
    assert_eq!(parse_route(&url), parse_route(&url));
}

#[test]
fn lookup_prefers_id_then_handle_then_default() {
    let both = RouteQuery {
        handle: Some("alice".to_string()),
        id: Some("p-1".to_string()),
    };
    assert_eq!(both.lookup("lowcode"), ProfileLookup::ById("p-1".to_string()));
    assert_eq!(
        handle_only("alice").lookup("lowcode"),
        ProfileLookup::ByHandle("alice".to_string())
    );
    assert_eq!(
        RouteQuery::default().lookup("LowCode"),
        ProfileLookup::ByHandle("lowcode".to_string())
    );
}
