//! Resolver Demo: look up host names and browse the results.
//!
//! Demonstrates:
//! - Router with three screens and a delegate that moves between them
//! - LayoutTree screens mixing framed and plain nodes
//! - Task commands that run off the loop and re-enter as messages
//! - Configuration loaded from an optional TOML file
//!
//! Usage: `cargo run --example resolver [config.toml]`
//!
//! Type a host name and press Enter. Tab shows the history, Esc returns to
//! the input, ctrl+c (or the configured quit key) exits. Logs go to
//! `resolver.log`; set `RUST_LOG=trellis=trace` for dispatch detail.

use std::io::{self, Write};
use std::net::{IpAddr, ToSocketAddrs};
use std::ops::ControlFlow;
use std::thread;

use crossbeam_channel::{unbounded, Sender};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use trellis::{
    BorderKind, Cmd, Config, FrameStyle, KeyCode, KeyModifiers, LayoutNode, LayoutTree, Message,
    Orientation, Panel, Policy, Registry, Router,
};

/// Result of one lookup, delivered as a user message.
#[derive(Debug, Clone)]
struct Lookup {
    host: String,
    result: Result<Vec<IpAddr>, String>,
}

fn resolve(host: String) -> Message {
    let result = (host.as_str(), 0)
        .to_socket_addrs()
        .map(|addrs| addrs.map(|a| a.ip()).collect())
        .map_err(|e| e.to_string());
    tracing::info!(host = %host, ok = result.is_ok(), "lookup finished");
    Message::user(Lookup { host, result })
}

/// Single-line text input that submits a lookup on Enter.
#[derive(Default)]
struct HostInput {
    value: String,
}

impl Panel for HostInput {
    fn update(mut self: Box<Self>, msg: &Message) -> (Box<dyn Panel>, Option<Cmd>) {
        let cmd = match msg {
            Message::Key(key) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
            Message::Key(key) => match key.code {
                KeyCode::Char(c) => {
                    self.value.push(c);
                    None
                }
                KeyCode::Backspace => {
                    self.value.pop();
                    None
                }
                KeyCode::Enter if !self.value.trim().is_empty() => {
                    let host = std::mem::take(&mut self.value).trim().to_owned();
                    Some(Cmd::task(move || resolve(host)))
                }
                _ => None,
            },
            Message::Paste(text) => {
                self.value.extend(text.chars().filter(|c| !c.is_control()));
                None
            }
            _ => None,
        };
        (self, cmd)
    }

    fn render(&self) -> String {
        format!("host: {}█", self.value)
    }
}

/// Static text.
struct Label(String);

impl Panel for Label {
    fn update(self: Box<Self>, _msg: &Message) -> (Box<dyn Panel>, Option<Cmd>) {
        (self, None)
    }

    fn render(&self) -> String {
        self.0.clone()
    }
}

/// Past lookups with a cursor; the selected entry is expanded.
#[derive(Default)]
struct History {
    items: Vec<Lookup>,
    cursor: usize,
}

impl History {
    fn push(&mut self, lookup: Lookup) {
        self.items.push(lookup);
        self.cursor = self.items.len() - 1;
    }
}

impl Panel for History {
    fn update(mut self: Box<Self>, msg: &Message) -> (Box<dyn Panel>, Option<Cmd>) {
        if let Some(key) = msg.as_key() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    self.cursor = (self.cursor + 1).min(self.items.len().saturating_sub(1));
                }
                _ => {}
            }
        }
        (self, None)
    }

    fn render(&self) -> String {
        if self.items.is_empty() {
            return "no lookups yet".to_owned();
        }

        let mut out = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            let marker = if i == self.cursor { '>' } else { ' ' };
            match &item.result {
                Ok(addrs) => {
                    out.push(format!("{marker} {} ({} addresses)", item.host, addrs.len()));
                    if i == self.cursor {
                        out.extend(addrs.iter().map(|a| format!("    {a}")));
                    }
                }
                Err(e) => out.push(format!("{marker} {} failed: {e}", item.host)),
            }
        }
        out.join("\n")
    }
}

fn build_router(config: &Config) -> Router {
    let framed = FrameStyle::bordered(BorderKind::Rounded).with_padding(1);

    let mut input = LayoutTree::with_config(Orientation::Vertical, 1.0, 1.0, &config.style);
    input
        .add_node_with_style(HostInput::default(), 1.0, 0.3, framed.clone())
        .add_node(
            Label("Enter: resolve   Tab: history   Esc: back".to_owned()),
            1.0,
            0.2,
        );

    let mut history = LayoutTree::with_config(Orientation::Horizontal, 1.0, 1.0, &config.style);
    history.add_node_with_style(History::default(), 1.0, 1.0, framed.clone());

    let mut error = LayoutTree::with_config(Orientation::Vertical, 1.0, 0.5, &config.style);
    error.add_node_with_style(Label(String::new()), 1.0, 1.0, framed);

    let mut router = Router::with_config(config.router.clone());
    router.register("input", input, Policy::Addressable);
    router.register("history", history, Policy::Addressable);
    router.register("error", error, Policy::Addressable);
    router.set_focus("input");
    router.set_delegate(delegate);
    router
}

/// First node of a registered screen, as its concrete panel type.
fn screen_panel<'a, T: Panel>(registry: &'a mut Registry, screen: &str) -> Option<&'a mut T> {
    registry
        .get_as_mut::<LayoutTree>(screen)
        .and_then(|tree| tree.node_mut(0))
        .and_then(LayoutNode::panel_as_mut::<T>)
}

fn delegate(msg: &Message, registry: &mut Registry) -> Option<Cmd> {
    if let Some(lookup) = msg.payload::<Lookup>() {
        let screen = match &lookup.result {
            Ok(_) => "history",
            Err(e) => {
                if let Some(label) = screen_panel::<Label>(registry, "error") {
                    label.0 = format!("could not resolve {}:\n{e}", lookup.host);
                }
                "error"
            }
        };
        if let Some(history) = screen_panel::<History>(registry, "history") {
            history.push(lookup.clone());
        }
        return Some(Cmd::navigate(screen));
    }

    match msg.as_key().map(|k| k.code) {
        Some(KeyCode::Esc) => Some(Cmd::navigate("input")),
        Some(KeyCode::Tab) => Some(Cmd::navigate("history")),
        _ => None,
    }
}

/// Queue a message for the loop; a closed channel means the loop is gone.
fn send(tx: &Sender<Message>, msg: Message) {
    if let Err(e) = tx.send(msg) {
        tracing::warn!(msg = ?e.into_inner(), "message dropped: loop has exited");
    }
}

/// Execute a command the way a runtime would.
fn execute_cmd(cmd: Cmd, tx: &Sender<Message>) -> ControlFlow<()> {
    match cmd {
        Cmd::Quit => ControlFlow::Break(()),
        Cmd::Msg(msg) => {
            send(tx, msg);
            ControlFlow::Continue(())
        }
        Cmd::Task(task) => {
            let tx = tx.clone();
            thread::spawn(move || {
                send(&tx, task());
            });
            ControlFlow::Continue(())
        }
        Cmd::Batch(cmds) => cmds.into_iter().try_for_each(|cmd| execute_cmd(cmd, tx)),
    }
}

fn draw(out: &mut impl Write, router: &Router) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    out.write_all(router.render().replace('\n', "\r\n").as_bytes())?;
    out.flush()
}

fn spawn_input(tx: Sender<Message>) {
    thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(event) => {
                if let Some(msg) = Message::from_crossterm(event) {
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "input thread stopped");
                break;
            }
        }
    });
}

fn run(config: &Config) -> trellis::Result<()> {
    let mut router = build_router(config);
    let (tx, rx) = unbounded();
    spawn_input(tx.clone());

    let (mut width, mut height) = terminal::size()?;
    send(&tx, Message::resize(width, height));
    if let Some(cmd) = router.init() {
        if execute_cmd(cmd, &tx).is_break() {
            return Ok(());
        }
    }

    let mut stdout = io::stdout();
    while let Ok(msg) = rx.recv() {
        if let Message::Resize { width: w, height: h } = msg {
            (width, height) = (w, h);
        }

        let before = router.focused().map(str::to_owned);
        let cmd = router.dispatch(&msg);
        if router.focused() != before.as_deref() {
            // Unfocused screens miss resizes; catch the new one up.
            send(&tx, Message::resize(width, height));
        }

        draw(&mut stdout, &router)?;
        if let Some(cmd) = cmd {
            if execute_cmd(cmd, &tx).is_break() {
                break;
            }
        }
    }
    Ok(())
}

fn main() -> trellis::Result<()> {
    let log = std::fs::File::create("resolver.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log))
        .with_ansi(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run(&config);

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}
