//! Router: named panels, focus, and message routing.

use std::fmt;

use crate::config::RouterConfig;
use crate::event::{Cmd, Message};

use super::traits::{update_slot, Panel};

/// How a registered panel receives messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Receives routed messages only while focused.
    #[default]
    Addressable,
    /// Receives every routed message, focused or not.
    ///
    /// Broadcast panels still see nothing from [`Router::init`], which only
    /// initializes the focused panel. Hosts that need a broadcast panel's
    /// startup command should call its `init` before registering it.
    Broadcast,
}

struct Entry {
    name: String,
    policy: Policy,
    panel: Box<dyn Panel>,
}

/// Ordered name → panel table owned by a [`Router`].
///
/// Registration order is dispatch order. Lookups are linear; routers hold a
/// handful of screens, not thousands.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.name == name)
    }

    /// Store `panel` under `name`.
    ///
    /// An existing entry with the same name is replaced in place, keeping
    /// its position, and its panel is returned.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        panel: Box<dyn Panel>,
        policy: Policy,
    ) -> Option<Box<dyn Panel>> {
        let name = name.into();
        if let Some(entry) = self.find_mut(&name) {
            entry.policy = policy;
            return Some(std::mem::replace(&mut entry.panel, panel));
        }
        self.entries.push(Entry {
            name,
            policy,
            panel,
        });
        None
    }

    /// Remove an entry, returning its panel.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Panel>> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(index).panel)
    }

    /// Borrow a registered panel.
    pub fn get(&self, name: &str) -> Option<&(dyn Panel + 'static)> {
        self.find(name).map(|e| e.panel.as_ref())
    }

    /// Mutably borrow a registered panel.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Panel + 'static)> {
        self.find_mut(name).map(|e| e.panel.as_mut())
    }

    /// Borrow a registered panel as its concrete type.
    ///
    /// `None` when the name is unknown or the panel is not a `T`.
    pub fn get_as<T: Panel>(&self, name: &str) -> Option<&T> {
        self.find(name)?.panel.downcast_ref::<T>()
    }

    /// Mutably borrow a registered panel as its concrete type.
    pub fn get_as_mut<T: Panel>(&mut self, name: &str) -> Option<&mut T> {
        self.find_mut(name)?.panel.downcast_mut::<T>()
    }

    /// Check whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Registration policy of `name`.
    pub fn policy(&self, name: &str) -> Option<Policy> {
        self.find(name).map(|e| e.policy)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of registered panels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|e| (&e.name, e.policy)))
            .finish()
    }
}

/// Host hook that sees every message before the panels do.
///
/// Returning a command short-circuits routing.
pub type Delegate = Box<dyn FnMut(&Message, &mut Registry) -> Option<Cmd>>;

/// Fallback startup command used when nothing is focused.
pub type Initializer = Box<dyn FnMut() -> Option<Cmd>>;

/// Top-level panel that owns named panels and routes messages to the
/// focused one.
///
/// Update priority:
///
/// 1. the quit key yields [`Cmd::Quit`] and nothing else runs;
/// 2. [`Message::NavigateTo`] moves focus and stops;
/// 3. the delegate, if installed, may claim the message;
/// 4. every entry that is focused or [`Policy::Broadcast`] gets the message,
///    in registration order, and their commands are combined in that order.
///
/// Focus naming an unregistered panel is not an error: updates reach only
/// broadcast entries and rendering yields empty text.
pub struct Router {
    registry: Registry,
    focus: Option<String>,
    delegate: Option<Delegate>,
    initializer: Option<Initializer>,
    config: RouterConfig,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("registry", &self.registry)
            .field("focus", &self.focus)
            .field("delegate", &self.delegate.is_some())
            .field("initializer", &self.initializer.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl Router {
    /// Create a router with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create a router with an explicit configuration.
    pub const fn with_config(config: RouterConfig) -> Self {
        Self {
            registry: Registry::new(),
            focus: None,
            delegate: None,
            initializer: None,
            config,
        }
    }

    /// Register `panel` under `name`.
    ///
    /// Re-registering a name replaces the old panel in place and returns it.
    pub fn register<P: Panel>(
        &mut self,
        name: impl Into<String>,
        panel: P,
        policy: Policy,
    ) -> Option<Box<dyn Panel>> {
        let name = name.into();
        tracing::debug!(name = %name, ?policy, "registering panel");
        let old = self.registry.insert(name.as_str(), Box::new(panel), policy);
        if old.is_some() {
            tracing::warn!(name = %name, "replaced registered panel");
        }
        old
    }

    /// Remove a panel. Focus on it, if any, is left dangling.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Panel>> {
        let removed = self.registry.remove(name);
        if removed.is_some() {
            tracing::debug!(name, "unregistered panel");
        }
        removed
    }

    /// Focus `name` for subsequent updates and renders.
    ///
    /// Returns whether `name` is registered. An unknown name clears focus.
    pub fn set_focus(&mut self, name: &str) -> bool {
        if self.registry.contains(name) {
            tracing::debug!(from = ?self.focus, to = name, "focus changed");
            self.focus = Some(name.to_owned());
            true
        } else {
            tracing::warn!(name, "focus requested for unknown panel; clearing focus");
            self.focus = None;
            false
        }
    }

    /// Name of the focused panel.
    pub fn focused(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Install the delegate hook.
    pub fn set_delegate<F>(&mut self, delegate: F)
    where
        F: FnMut(&Message, &mut Registry) -> Option<Cmd> + 'static,
    {
        self.delegate = Some(Box::new(delegate));
    }

    /// Install the fallback startup command.
    pub fn set_initializer<F>(&mut self, initializer: F)
    where
        F: FnMut() -> Option<Cmd> + 'static,
    {
        self.initializer = Some(Box::new(initializer));
    }

    /// The registered panels.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The registered panels, mutably.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Borrow a registered panel.
    pub fn get(&self, name: &str) -> Option<&(dyn Panel + 'static)> {
        self.registry.get(name)
    }

    /// Mutably borrow a registered panel.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Panel + 'static)> {
        self.registry.get_mut(name)
    }

    /// Borrow a registered panel as its concrete type.
    pub fn get_as<T: Panel>(&self, name: &str) -> Option<&T> {
        self.registry.get_as(name)
    }

    /// Mutably borrow a registered panel as its concrete type.
    pub fn get_as_mut<T: Panel>(&mut self, name: &str) -> Option<&mut T> {
        self.registry.get_as_mut(name)
    }

    /// Check whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Registration policy of `name`.
    pub fn policy(&self, name: &str) -> Option<Policy> {
        self.registry.policy(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    /// The active configuration.
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route one message. See the type-level docs for the priority order.
    pub fn dispatch(&mut self, msg: &Message) -> Option<Cmd> {
        if msg.as_key() == Some(&self.config.quit_key) {
            tracing::debug!(key = %self.config.quit_key, "quit key pressed");
            return Some(Cmd::Quit);
        }

        if let Message::NavigateTo(name) = msg {
            self.set_focus(name);
            return None;
        }

        if let Some(delegate) = self.delegate.as_mut() {
            if let Some(cmd) = delegate(msg, &mut self.registry) {
                tracing::trace!(cmd = cmd.type_name(), "delegate handled message");
                return Some(cmd);
            }
        }

        let focus = self.focus.as_deref();
        let cmds = self
            .registry
            .entries
            .iter_mut()
            .filter(|e| e.policy == Policy::Broadcast || focus == Some(e.name.as_str()))
            .map(|e| {
                tracing::trace!(panel = %e.name, ?msg, "dispatching");
                update_slot(&mut e.panel, msg)
            })
            .collect::<Vec<_>>();
        Cmd::batch(cmds)
    }
}

impl Panel for Router {
    fn init(&mut self) -> Option<Cmd> {
        let focused = self.focus.as_deref().and_then(|name| self.registry.get_mut(name));
        if let Some(panel) = focused {
            return panel.init();
        }
        self.initializer.as_mut().and_then(|init| init())
    }

    fn update(mut self: Box<Self>, msg: &Message) -> (Box<dyn Panel>, Option<Cmd>) {
        let cmd = self.dispatch(msg);
        (self, cmd)
    }

    fn render(&self) -> String {
        self.focus
            .as_deref()
            .and_then(|name| self.registry.get(name))
            .map(|panel| panel.render())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyPress;
    use crate::testing::{labels, Recorder};

    fn router_with(names: &[&'static str]) -> Router {
        let mut router = Router::new();
        for &name in names {
            router.register(name, Recorder::new(name).replying(), Policy::Addressable);
        }
        router
    }

    fn step(router: Router, msg: &Message) -> (Router, Option<Cmd>) {
        let (next, cmd) = Box::new(router).update(msg);
        let Ok(router) = next.downcast::<Router>() else {
            panic!("router replaced itself");
        };
        (*router, cmd)
    }

    fn updates(router: &Router, name: &str) -> usize {
        router.get_as::<Recorder>(name).unwrap().seen().len()
    }

    #[test]
    fn test_routes_to_focused_only() {
        let mut router = router_with(&["a", "b"]);
        assert!(router.set_focus("b"));

        let (router, cmd) = step(router, &Message::user(1u8));
        assert_eq!(labels(cmd), ["b"]);
        assert_eq!(updates(&router, "a"), 0);
        assert_eq!(updates(&router, "b"), 1);
        assert_eq!(router.focused(), Some("b"));
    }

    #[test]
    fn test_focus_unchanged_without_navigation() {
        let mut router = router_with(&["a", "b"]);
        router.set_focus("a");
        for msg in [Message::resize(10, 10), Message::FocusLost, Message::user("x")] {
            router = step(router, &msg).0;
        }
        assert_eq!(router.focused(), Some("a"));
    }

    #[test]
    fn test_navigate_to_registered() {
        let mut router = router_with(&["home", "detail"]);
        router.set_focus("home");

        let (router, cmd) = step(router, &Message::navigate("detail"));
        assert!(cmd.is_none());
        assert_eq!(router.focused(), Some("detail"));
        // Navigation itself is not delivered to any panel
        assert_eq!(updates(&router, "home"), 0);
        assert_eq!(updates(&router, "detail"), 0);
    }

    #[test]
    fn test_navigate_to_unknown_clears_focus() {
        let mut router = router_with(&["home"]);
        router.set_focus("home");

        let (router, cmd) = step(router, &Message::navigate("nowhere"));
        assert!(cmd.is_none());
        assert_eq!(router.focused(), None);

        let (router, cmd) = step(router, &Message::user(0u8));
        assert!(cmd.is_none());
        assert_eq!(updates(&router, "home"), 0);
        assert_eq!(router.render(), "");
    }

    #[test]
    fn test_set_focus_unknown_returns_false() {
        let mut router = router_with(&["a"]);
        assert!(router.set_focus("a"));
        assert!(!router.set_focus("b"));
        assert_eq!(router.focused(), None);
    }

    #[test]
    fn test_quit_key_wins_over_everything() {
        let mut router = router_with(&["a"]);
        router.set_focus("a");
        router.set_delegate(|_, _| Some(Cmd::msg(Message::user("delegate"))));

        let (router, cmd) = step(router, &Message::key(KeyPress::ctrl('c')));
        assert!(cmd.unwrap().is_quit());
        assert_eq!(updates(&router, "a"), 0);

        // Also with nothing focused
        let mut router = router;
        router.set_focus("missing");
        let (_, cmd) = step(router, &Message::key(KeyPress::ctrl('c')));
        assert!(cmd.unwrap().is_quit());
    }

    #[test]
    fn test_configured_quit_key() {
        let mut router = Router::with_config(RouterConfig {
            quit_key: KeyPress::char('q'),
        });
        router.register("a", Recorder::new("a").replying(), Policy::Addressable);
        router.set_focus("a");

        let (router, cmd) = step(router, &Message::key(KeyPress::ctrl('c')));
        assert_eq!(labels(cmd), ["a"]);
        let (_, cmd) = step(router, &Message::key(KeyPress::char('q')));
        assert!(cmd.unwrap().is_quit());
    }

    #[test]
    fn test_delegate_short_circuits() {
        let mut router = router_with(&["a"]);
        router.set_focus("a");
        router.set_delegate(|msg, _| {
            msg.payload::<&str>()
                .filter(|s| **s == "claim")
                .map(|_| Cmd::msg(Message::user("delegate")))
        });

        let (router, cmd) = step(router, &Message::user("claim"));
        assert_eq!(labels(cmd), ["delegate"]);
        assert_eq!(updates(&router, "a"), 0);

        let (router, cmd) = step(router, &Message::user("pass"));
        assert_eq!(labels(cmd), ["a"]);
        assert_eq!(updates(&router, "a"), 1);
    }

    #[test]
    fn test_delegate_can_reach_panels() {
        let mut router = router_with(&["list"]);
        router.set_delegate(|msg, registry| {
            if let Message::Paste(text) = msg {
                if let Some(recorder) = registry.get_as_mut::<Recorder>("list") {
                    recorder.set_text(text.clone());
                }
                return Some(Cmd::navigate("list"));
            }
            None
        });

        let (router, cmd) = step(router, &Message::Paste("pasted".into()));
        let Some(Cmd::Msg(Message::NavigateTo(name))) = cmd else {
            panic!("expected navigation command");
        };
        let (router, _) = step(router, &Message::NavigateTo(name));
        assert_eq!(router.render(), "pasted");
    }

    #[test]
    fn test_broadcast_receives_while_unfocused() {
        let mut router = Router::new();
        router.register("a", Recorder::new("a").replying(), Policy::Addressable);
        router.register("log", Recorder::new("log").replying(), Policy::Broadcast);
        router.register("b", Recorder::new("b").replying(), Policy::Addressable);
        router.set_focus("b");

        let (router, cmd) = step(router, &Message::user(0u8));
        // Registration order, not focus-first
        assert_eq!(labels(cmd), ["log", "b"]);
        assert_eq!(updates(&router, "a"), 0);
        assert_eq!(updates(&router, "log"), 1);
        assert_eq!(updates(&router, "b"), 1);
    }

    #[test]
    fn test_broadcast_without_focus() {
        let mut router = Router::new();
        router.register("log", Recorder::new("log").replying(), Policy::Broadcast);
        router.register("a", Recorder::new("a").replying(), Policy::Addressable);
        assert_eq!(router.focused(), None);

        let (router, cmd) = step(router, &Message::user(0u8));
        assert_eq!(labels(cmd), ["log"]);
        assert_eq!(updates(&router, "log"), 1);
        assert_eq!(updates(&router, "a"), 0);
        // Broadcast does not make a panel the one that renders
        assert_eq!(router.render(), "");
    }

    #[test]
    fn test_init_skips_broadcast_panels() {
        let mut router = Router::new();
        router.register("log", Recorder::new("log").with_init(), Policy::Broadcast);
        router.register("a", Recorder::new("a").with_init(), Policy::Addressable);
        router.set_focus("a");
        assert_eq!(labels(router.init()), ["init:a"]);
    }

    #[test]
    fn test_focused_broadcast_updated_once() {
        let mut router = Router::new();
        router.register("log", Recorder::new("log").replying(), Policy::Broadcast);
        router.set_focus("log");

        let (router, cmd) = step(router, &Message::user(0u8));
        assert_eq!(labels(cmd), ["log"]);
        assert_eq!(updates(&router, "log"), 1);
    }

    #[test]
    fn test_broadcast_skips_navigation_and_quit() {
        let mut router = Router::new();
        router.register("a", Recorder::new("a"), Policy::Addressable);
        router.register("log", Recorder::new("log"), Policy::Broadcast);

        let (router, _) = step(router, &Message::navigate("a"));
        let (router, _) = step(router, &Message::key(KeyPress::ctrl('c')));
        assert_eq!(updates(&router, "log"), 0);
    }

    #[test]
    fn test_nothing_focused_is_noop() {
        let router = router_with(&["a", "b"]);
        let (router, cmd) = step(router, &Message::user(0u8));
        assert!(cmd.is_none());
        assert_eq!(updates(&router, "a"), 0);
        assert_eq!(updates(&router, "b"), 0);
        assert_eq!(router.render(), "");
    }

    #[test]
    fn test_render_focused() {
        let mut router = router_with(&["a", "b"]);
        router.set_focus("a");
        assert_eq!(router.render(), "a");
        router.set_focus("b");
        assert_eq!(router.render(), "b");
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut router = router_with(&["a", "b", "c"]);
        assert!(router.register("b", Recorder::new("b2"), Policy::Broadcast).is_some());
        assert_eq!(router.names().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(router.policy("b"), Some(Policy::Broadcast));
        router.set_focus("b");
        assert_eq!(router.render(), "b2");
    }

    #[test]
    fn test_unregister_leaves_focus_dangling() {
        let mut router = router_with(&["a"]);
        router.set_focus("a");
        assert!(router.unregister("a").is_some());
        assert!(router.unregister("a").is_none());
        assert_eq!(router.focused(), Some("a"));
        assert_eq!(router.render(), "");

        let (_, cmd) = step(router, &Message::user(0u8));
        assert!(cmd.is_none());
    }

    #[test]
    fn test_init_prefers_focused_panel() {
        let mut router = Router::new();
        router.register("a", Recorder::new("a").with_init(), Policy::Addressable);
        router.set_initializer(|| Some(Cmd::msg(Message::user("fallback"))));

        router.set_focus("a");
        assert_eq!(labels(router.init()), ["init:a"]);
    }

    #[test]
    fn test_init_falls_back_to_initializer() {
        let mut router = router_with(&["a"]);
        assert!(router.init().is_none());

        router.set_initializer(|| Some(Cmd::msg(Message::user("fallback"))));
        assert_eq!(labels(router.init()), ["fallback"]);
    }

    #[test]
    fn test_get_as_wrong_type() {
        let router = router_with(&["a"]);
        assert!(router.get_as::<Router>("a").is_none());
        assert!(router.get_as::<Recorder>("missing").is_none());
        assert!(router.get("a").is_some_and(|p| p.is::<Recorder>()));
        assert!(router.contains("a"));
        assert_eq!(router.registry().len(), 1);
    }
}
