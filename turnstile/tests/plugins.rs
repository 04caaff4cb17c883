//! Plugin discovery and hook fan-out.

use std::{fs, path::Path};
use turnstile::{
    ACTION_AFTER, ACTION_BEFORE, Application, MethodDescriptor, Settings, SourceMode, View,
    testing::{CallLog, RecordingPlugin, RecordingView},
};

mod common;
use common::{HOOKS, site, site_with_audit};

const BEFORE_ONLY: &[MethodDescriptor] = &[MethodDescriptor::public(ACTION_BEFORE)];

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn filesystem_settings(root: &Path) -> Settings {
    Settings {
        vendor: "Game".to_string(),
        sources: SourceMode::Filesystem,
        plugins: SourceMode::Filesystem,
        ..Settings::default()
    }
    .with_vendor_path(root.to_str().unwrap())
}

#[test]
fn test_hooks_run_in_identity_order() {
    let log = CallLog::new();
    let mut app = site(&log)
        .plugin("Zeta", RecordingPlugin::factory("Zeta", HOOKS, log.clone()))
        .plugin("Alpha", RecordingPlugin::factory("Alpha", BEFORE_ONLY, log.clone()))
        .build(RecordingView::new(log.clone()));

    let registry = app.load_plugins();
    assert_eq!(registry.identities().collect::<Vec<_>>(), vec!["Alpha", "Zeta"]);

    let outcome = app.dispatch_controller("").unwrap();
    assert_eq!(outcome.plugin_calls, 3);
    assert_eq!(
        log.entries(),
        vec![
            "Alpha.actionBefore()",
            "Zeta.actionBefore()",
            "Index.index()",
            "Zeta.actionAfter()",
        ]
    );
}

#[test]
fn test_directory_discovery() {
    let root = tempfile::tempdir().unwrap();
    let plugins = root.path().join("Game").join("Plugins");
    touch(&plugins.join("Audit.rs"));
    touch(&plugins.join("Stray.rs"));
    touch(&plugins.join("notes.txt"));
    for controller in ["Index", "NotFound", "Blog"] {
        touch(&root.path().join(format!("Game/Controllers/{controller}.rs")));
    }

    let log = CallLog::new();
    let mut app = site_with_audit(&log)
        .plugin("Cache", RecordingPlugin::factory("Cache", HOOKS, log.clone()))
        .settings(filesystem_settings(root.path()))
        .build(RecordingView::new(log.clone()));

    // Stray has no factory and Cache has no source file.
    let registry = app.load_plugins();
    assert_eq!(registry.identities().collect::<Vec<_>>(), vec!["Audit"]);

    // User is registered but has no source file.
    let outcome = app.dispatch_controller("user/9/edit").unwrap();
    assert!(outcome.not_found);
    assert_eq!(outcome.controller, "NotFound");

    touch(&plugins.join("Cache.rs"));
    let stale = app.plugins();
    let fresh = app.load_plugins();

    assert_eq!(stale.len(), 1);
    assert_eq!(fresh.identities().collect::<Vec<_>>(), vec!["Audit", "Cache"]);
    assert_eq!(app.plugins().len(), 2);
}

#[test]
fn test_missing_plugin_directory() {
    let root = tempfile::tempdir().unwrap();
    let log = CallLog::new();
    let app: Application<RecordingView> = site_with_audit(&log)
        .settings(filesystem_settings(root.path()))
        .build(RecordingView::new(log.clone()));

    assert!(app.load_plugins().is_empty());
}

#[test]
fn test_register_hook_raises_custom_hooks() {
    const MENU: &[MethodDescriptor] = &[MethodDescriptor::public("menu")];

    let log = CallLog::new();
    let mut app = site(&log)
        .plugin("Menu", RecordingPlugin::factory("Menu", MENU, log.clone()))
        .plugin("Audit", RecordingPlugin::factory("Audit", HOOKS, log.clone()))
        .build(RecordingView::new(log.clone()));
    app.load_plugins();

    let mut controller =
        turnstile::testing::ScriptedController::new("Blog", common::BLOG_ACTIONS, log.clone());
    let params: turnstile::Params = [("section", "news")].into_iter().collect();
    let invoked = app.register_hook("menu", &mut controller, &params).unwrap();

    assert_eq!(invoked, 1);
    assert_eq!(log.entries(), vec!["Menu.menu(section=news)"]);
    assert_eq!(app.view().get("hook.controller"), Some("Blog"));
    assert_eq!(app.raised_hooks(), ["menu"]);
    assert_eq!(app.register_hook(ACTION_AFTER, &mut controller, &params).unwrap(), 1);
}
