//! Integration tests for the `#[controller]` and `#[plugin]` macros and the
//! registration macros.
//!
//! Every type registered here is visible to every builder in this binary, so
//! each test uses its own vendor name to tell its hook records apart.

#![cfg(feature = "macros")]
#![allow(dead_code)]

use lazy_static::lazy_static;
use turnstile::{
    ACTION_AFTER, ACTION_BEFORE, App, Application, BoxError, BufferView, Context, Controller,
    FromApp, HookContext, MethodFlags, Params, Plugin, View, testing::CallLog,
};

lazy_static! {
    static ref AUDIT_LOG: CallLog = CallLog::new();
}

/// Audit records of one vendor, as `hook:Controller`.
fn audit_entries(vendor: &str) -> Vec<String> {
    let prefix = format!("{vendor}:");
    AUDIT_LOG
        .entries()
        .into_iter()
        .filter_map(|entry| entry.strip_prefix(&prefix).map(str::to_string))
        .collect()
}

fn app(vendor: &str) -> Application {
    let app = Application::builder().vendor(vendor).build(BufferView::new());
    app.load_plugins();
    app
}

// ============================================================================
// Controllers
// ============================================================================

#[derive(Default)]
struct Index;

#[turnstile::controller]
impl Index {
    pub fn index(&mut self, ctx: &mut Context<'_>) {
        ctx.assign("page", "home");
    }
}

#[derive(Default)]
struct Missing;

#[turnstile::controller(name = "NotFound")]
impl Missing {
    pub fn index(&mut self, ctx: &mut Context<'_>, params: &Params) {
        ctx.assign("page", "missing");
        ctx.assign("requested", params.values().collect::<Vec<_>>().join("/"));
    }
}

#[derive(Default)]
struct Blog {
    shown: u32,
}

#[turnstile::controller]
impl Blog {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn index(&mut self, ctx: &mut Context<'_>) {
        ctx.assign("page", "blog");
    }

    #[route("blog/read/:slug")]
    pub fn show(&mut self, ctx: &mut Context<'_>, params: &Params) -> Result<(), BoxError> {
        let slug = params.named("slug").ok_or("missing slug")?;
        self.shown += 1;
        ctx.assign("page", format!("post:{slug}"));
        Ok(())
    }

    pub fn edit_profile(&mut self, params: &Params, ctx: &mut Context<'_>) {
        ctx.assign("page", format!("profile:{}", params.positional(2).unwrap_or("-")));
    }

    #[action(name = "rss")]
    pub fn feed(&mut self, ctx: &mut Context<'_>) {
        ctx.assign("page", "rss");
    }

    #[action(sealed)]
    pub fn purge(&mut self, ctx: &mut Context<'_>) {
        ctx.assign("page", "purged");
    }

    #[action(skip)]
    pub fn summary(&self) -> String {
        format!("{} shown", self.shown)
    }

    fn draft(&mut self) {}
}

turnstile::register_controller!(Index);
turnstile::register_controller!(Missing);
turnstile::register_controller!(Blog);

// ============================================================================
// Plugins
// ============================================================================

#[derive(Default)]
struct Audit;

#[turnstile::plugin]
impl Audit {
    pub fn action_before(&mut self, ctx: &mut HookContext<'_>) {
        record(ctx, ACTION_BEFORE);
    }

    #[hook(name = "actionAfter")]
    pub fn after_action(&mut self, ctx: &mut HookContext<'_>) -> Result<(), BoxError> {
        record(ctx, ACTION_AFTER);
        ctx.view.assign("audited", "yes".to_string());
        Ok(())
    }

    pub fn menu(&mut self, params: &Params, ctx: &mut HookContext<'_>) {
        let section = params.named("section").unwrap_or("none");
        ctx.view.assign("menu", section.to_string());
    }

    #[hook(skip)]
    pub fn label(&self) -> &'static str {
        "audit"
    }
}

fn record(ctx: &HookContext<'_>, hook: &str) {
    AUDIT_LOG.push(format!("{}:{}:{}", ctx.app.vendor(), hook, ctx.controller.name()));
}

turnstile::register_plugin!(Audit);

// ============================================================================
// Components
// ============================================================================

#[derive(Debug, Default, PartialEq)]
struct Post {
    title: String,
}

#[derive(Debug)]
struct Clock {
    zone: String,
}

impl FromApp for Clock {
    fn from_app(app: &dyn App) -> Self {
        Clock {
            zone: app
                .config("zone")
                .and_then(|v| v.as_str())
                .unwrap_or("UTC")
                .to_string(),
        }
    }
}

turnstile::register_model!("post", Post);
turnstile::register_library!("clock", Clock);

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_generated_identity() {
    assert_eq!(Blog::IDENTITY, "Blog");
    assert_eq!(Missing::IDENTITY, "NotFound");
    assert_eq!(Missing.name(), "NotFound");
    assert_eq!(Audit::IDENTITY, "Audit");
}

#[test]
fn test_action_table() {
    let blog = Blog::create();
    let names: Vec<_> = blog.actions().iter().map(|m| m.name()).collect();
    assert_eq!(
        names,
        vec!["create", "index", "show", "editProfile", "rss", "purge", "draft"]
    );

    let flags = |name: &str| {
        blog.actions()
            .iter()
            .find(|m| m.name() == name)
            .map(|m| m.flags())
    };
    assert_eq!(
        flags("create"),
        Some(MethodFlags::PUBLIC | MethodFlags::CONSTRUCTOR)
    );
    assert_eq!(flags("purge"), Some(MethodFlags::PUBLIC | MethodFlags::FINAL));
    assert_eq!(flags("draft"), Some(MethodFlags::empty()));

    assert_eq!(blog.find_action("SHOW").map(|m| m.name()), Some("show"));
    assert_eq!(blog.find_action("editprofile").map(|m| m.name()), Some("editProfile"));
    for hidden in ["create", "purge", "draft", "summary", "feed"] {
        assert!(blog.find_action(hidden).is_none(), "{hidden} is dispatchable");
    }
    assert_eq!(blog.summary(), "0 shown");
}

#[test]
fn test_declared_routes() {
    let routes = Blog::default().routes();
    assert_eq!(routes.iter().collect::<Vec<_>>(), vec![("blog/read/:slug", "show")]);
    assert!(Index.routes().iter().next().is_none());
}

#[test]
fn test_plugin_hooks() {
    assert_eq!(Audit.hooks(), vec![ACTION_BEFORE, ACTION_AFTER, "menu"]);
    assert_eq!(Audit.label(), "audit");
}

#[test]
fn test_registrations_are_collected() {
    let app = app("Collected");

    let controllers: Vec<_> = app.dispatcher().controllers().names().collect();
    assert_eq!(controllers, vec!["Blog", "Index", "NotFound"]);
    assert_eq!(app.plugins().identities().collect::<Vec<_>>(), vec!["Audit"]);
}

#[test]
fn test_routed_dispatch() {
    let mut app = app("Routed");
    let outcome = app.dispatch_controller("public/blog/read/hello-world/").unwrap();

    assert_eq!(outcome.controller, "Blog");
    assert_eq!(outcome.action, "show");
    assert_eq!(outcome.params.named("slug"), Some("hello-world"));
    assert_eq!(app.view().get("page"), Some("post:hello-world"));
    assert_eq!(app.view().get("audited"), Some("yes"));
    assert_eq!(audit_entries("Routed"), vec!["actionBefore:Blog", "actionAfter:Blog"]);
}

#[test]
fn test_case_insensitive_action() {
    let mut app = app("Cased");
    let outcome = app.dispatch_controller("blog/EditProfile/7").unwrap();

    assert_eq!(outcome.action, "editProfile");
    assert!(!outcome.fell_back);
    assert_eq!(app.view().get("page"), Some("profile:7"));
}

#[test]
fn test_hidden_actions_fall_back() {
    let mut app = app("Hidden");

    let outcome = app.dispatch_controller("blog/rss").unwrap();
    assert_eq!(outcome.action, "rss");
    assert_eq!(app.view().get("page"), Some("rss"));

    for path in ["blog/feed", "blog/purge", "blog/create", "blog/draft"] {
        let outcome = app.dispatch_controller(path).unwrap();
        assert!(outcome.fell_back, "{path} did not fall back");
        assert_eq!(app.view().get("page"), Some("blog"));
    }
}

#[test]
fn test_not_found_controller() {
    let mut app = app("Lost");
    let page = app.handle("nowhere/at/all").unwrap();

    assert!(page.starts_with("# Lost (vendor/)"));
    assert_eq!(app.view().get("page"), Some("missing"));
    assert_eq!(app.view().get("requested"), Some("nowhere/at/all"));
    assert_eq!(
        audit_entries("Lost"),
        vec!["actionBefore:NotFound", "actionAfter:NotFound"]
    );
}

#[test]
fn test_custom_hook_with_params() {
    let mut app = app("Menus");
    let params: Params = [("section", "news")].into_iter().collect();

    let invoked = app
        .register_hook("menu", &mut Blog::default(), &params)
        .unwrap();

    assert_eq!(invoked, 1);
    assert_eq!(app.view().get("menu"), Some("news"));
    assert!(audit_entries("Menus").is_empty());
}

#[test]
fn test_registered_components() {
    let mut app = app("Parts");

    let post = app.model::<Post>("post").unwrap();
    assert_eq!(*post, Post::default());

    assert_eq!(app.library::<Clock>("clock").unwrap().zone, "UTC");
    app.set_config("zone", "CET");
    assert_eq!(app.library::<Clock>("Clock").unwrap().zone, "CET");
}
