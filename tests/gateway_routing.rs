//! End-to-end routing: TOML configuration through table build to dispatch.

use micro_gateway::expression::NoConditions;
use micro_gateway::{
    parse_config, GatewayTable, ModuleRegistry, ProcessorRegistry, RequestContext, Shared,
};

const CONFIG: &str = r#"
[server]
access_control_allow_origin = "https://app.example.com https://*.trusted.example.com"

[[server.rewrites]]
from = "/legacy/*"
to = "/api"

[[server.rewrites]]
from = "/about"
to = "/pages/about"

[[server.actions]]
name = "user-fetch"
url = "/api/u/{id}"
method = "GET"
type = "fetch"

[[server.actions]]
name = "user-update"
url = "/api/u/{id}"
method = "POST"
type = "store"

[[server.actions]]
name = "catchall"
url = "/api/**"
method = "GET"
type = "fetch"

[[host_servers]]
hosts = "admin.example.com"
access_control_allow_origin = "*"

[[host_servers.modules]]
name = "health"
url = "/health /healthz"
"#;

fn build() -> GatewayTable {
    micro_gateway::observability::logging::init();
    GatewayTable::build(&parse_config(CONFIG).unwrap())
}

#[test]
fn rewrite_then_dispatch_resolves_an_action() {
    let table = build();
    let host = table.host("anything.example.com");

    let rewritten = host.rewrites.apply("/legacy/u/7");
    assert_eq!(rewritten, "/api/u/7");

    let mut registry = ProcessorRegistry::new();
    registry.register("fetch", |action, ctx| {
        assert_eq!(action.name, "user-fetch");
        ctx.url_param("id") == Some("7")
    });

    let mut ctx = RequestContext::new("GET", rewritten);
    let actions = host.actions.as_ref().unwrap();
    assert!(actions.dispatch(&registry, &mut ctx, &NoConditions));
    assert_eq!(ctx.url_param("id"), Some("7"));
}

#[test]
fn method_selects_the_action_table() {
    let table = build();
    let actions = table.default_host.actions.as_ref().unwrap();

    let mut registry = ProcessorRegistry::new();
    registry.register("fetch", |_, _| true);
    registry.register("store", |action, _| action.name == "user-update");

    let mut ctx = RequestContext::new("POST", "/api/u/9");
    assert!(actions.dispatch(&registry, &mut ctx, &NoConditions));

    let mut ctx = RequestContext::new("DELETE", "/api/u/9");
    assert!(!actions.dispatch(&registry, &mut ctx, &NoConditions));
}

#[test]
fn vetoed_action_falls_through_to_the_catchall() {
    let table = build();
    let actions = table.default_host.actions.as_ref().unwrap();

    let mut registry = ProcessorRegistry::new();
    // user-fetch declines, catchall accepts; both are type "fetch"
    registry.register("fetch", |action, _| action.name == "catchall");

    let mut ctx = RequestContext::new("GET", "/api/u/1");
    assert!(actions.dispatch(&registry, &mut ctx, &NoConditions));
}

#[test]
fn host_specific_modules_and_origins() {
    let table = build();
    let admin = table.host("admin.example.com");

    let mut registry = ModuleRegistry::new();
    registry.register("health", |_| true);
    let modules = admin.modules.as_ref().unwrap();
    for path in ["/health", "/healthz"] {
        let mut ctx = RequestContext::new("GET", path);
        assert!(modules.dispatch(&registry, &mut ctx, &NoConditions), "{path}");
    }

    assert!(admin.origins.as_ref().unwrap().allows_any());

    let default_origins = table.default_host.origins.as_ref().unwrap();
    assert!(default_origins.matches("https://app.example.com", &NoConditions));
    assert!(default_origins.matches("https://cdn.trusted.example.com", &NoConditions));
    assert!(!default_origins.matches("https://evil.example.com", &NoConditions));
}

#[test]
fn reconfiguration_swaps_the_published_table() {
    let shared = Shared::new(build());
    let snapshot = shared.load();
    assert!(snapshot.default_host.actions.is_some());

    shared.publish(GatewayTable::build(&parse_config("").unwrap()));
    assert!(shared.load().default_host.actions.is_none());
    // the pre-swap reader still sees the old table
    assert!(snapshot.default_host.actions.is_some());
}

#[test]
fn random_paths_respect_fixed_bounds() {
    use micro_gateway::routing::{matcher, pattern};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    micro_gateway::observability::logging::init();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let alphabet = ['a', 'b', '/', '?', '*', '1', '.'];
    let patterns = ["/a/**/b", "/api/{id}", "/x/*?/y", "`[0-9]+`", "/p/*x*y"];
    let masks: Vec<_> = patterns.iter().map(|p| pattern::compile(p)).collect();

    for _ in 0..2000 {
        let len = rng.gen_range(0..16);
        let path: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        for mask in &masks {
            if matcher::mask_matches(mask, &path, &NoConditions).is_some() {
                let trimmed = path.trim_end_matches(['/', ' ']);
                let mut collapsed = trimmed.to_string();
                while collapsed.contains("//") {
                    collapsed = collapsed.replace("//", "/");
                }
                assert!(
                    collapsed.starts_with(&mask.fixed_start),
                    "{mask:?} vs {path:?}"
                );
                assert!(
                    collapsed.ends_with(&mask.fixed_end),
                    "{mask:?} vs {path:?}"
                );
            }
        }
    }
}
