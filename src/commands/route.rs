use serde::Serialize;

use crate::cli::RouteArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::handle::route::parse_location;
use crate::handle::{ProfileLookup, RouteQuery, parse_route};

#[derive(Debug, Serialize)]
struct RouteReport {
    url: String,
    route: RouteQuery,
    lookup: ProfileLookup,
    used_default: bool,
}

pub async fn run(ctx: &AppContext, args: RouteArgs) -> AppResult<()> {
    let url = parse_location(&args.url)?;
    let route = parse_route(&url);
    let lookup = route.lookup(&ctx.default_handle());

    let report = RouteReport {
        url: url.to_string(),
        used_default: route.is_empty(),
        route,
        lookup,
    };

    let text = format_report(&report);
    ctx.output.emit(&text, &report)
}

fn format_report(report: &RouteReport) -> String {
    let handle = report.route.handle.as_deref().unwrap_or("-");
    let id = report.route.id.as_deref().unwrap_or("-");
    let suffix = if report.used_default {
        " (default)"
    } else {
        ""
    };
    format!(
        "handle: {handle}\nid: {id}\nlookup: {}{suffix}",
        report.lookup
    )
}
