//! `LayoutTree`: proportional row/column layout of panels.
//!
//! A tree owns an ordered list of nodes. Each node holds one panel plus the
//! fraction of the tree's content box it may use. On
//! [`Message::Resize`] the tree works out its own box, hands each child its
//! share, and forwards a `Resize` with the space left inside the child's
//! frame:
//!
//! ```text
//! Resize(cols, rows)
//!   outer      = (cols × width, rows × height)
//!   content    = outer − tree frame
//!   allocation = (content.w × node.width, content.h × node.height)
//!   target     = allocation − node frame     ──▶ child gets Resize(target)
//! ```
//!
//! Rendering frames each child to its allocation, joins the blocks along
//! the tree's orientation, and frames the result to the tree's outer box.

use std::fmt;

use crate::config::StyleConfig;
use crate::event::{Cmd, Message};
use crate::panel::{update_slot, Panel};
use crate::style::{FrameStyle, Style};

use super::join::{join_horizontal, join_vertical};
use super::size::{Fraction, Size};

/// Direction in which a tree stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// One child of a [`LayoutTree`].
pub struct LayoutNode {
    panel: Box<dyn Panel>,
    width: Fraction,
    height: Fraction,
    style: Box<dyn Style>,
    allocation: Size,
    target: Size,
}

impl LayoutNode {
    fn new(panel: Box<dyn Panel>, width: Fraction, height: Fraction, style: Box<dyn Style>) -> Self {
        Self {
            panel,
            width,
            height,
            style,
            allocation: Size::ZERO,
            target: Size::ZERO,
        }
    }

    /// Share of the parent's content width.
    pub const fn width(&self) -> Fraction {
        self.width
    }

    /// Share of the parent's content height.
    pub const fn height(&self) -> Fraction {
        self.height
    }

    /// Box the node was given at the last resize, frame included.
    pub const fn allocation(&self) -> Size {
        self.allocation
    }

    /// Box handed to the child at the last resize.
    pub const fn target(&self) -> Size {
        self.target
    }

    /// The child panel.
    pub fn panel(&self) -> &(dyn Panel + 'static) {
        self.panel.as_ref()
    }

    /// The child panel as its concrete type.
    pub fn panel_as<T: Panel>(&self) -> Option<&T> {
        self.panel.downcast_ref::<T>()
    }

    /// The child panel as its concrete type, mutably.
    pub fn panel_as_mut<T: Panel>(&mut self) -> Option<&mut T> {
        self.panel.downcast_mut::<T>()
    }

    /// The node's frame style.
    pub fn style(&self) -> &dyn Style {
        self.style.as_ref()
    }

    fn update(mut self, msg: &Message) -> (Self, Option<Cmd>) {
        let cmd = update_slot(&mut self.panel, msg);
        (self, cmd)
    }

    fn resize(mut self, content: Size) -> (Self, Option<Cmd>) {
        self.allocation = content.scale(self.width, self.height);
        self.target = self.allocation.shrink(self.style.frame_size());
        let msg = Message::resize(self.target.width, self.target.height);
        self.update(&msg)
    }

    fn render(&self) -> String {
        self.style.render(
            &self.panel.render(),
            self.allocation.width,
            self.allocation.height,
        )
    }
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNode")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("allocation", &self.allocation)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A row or column of panels sized as fractions of the available space.
///
/// Trees are panels, so they nest: a child tree applies its own fraction
/// to the box it receives.
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
    orientation: Orientation,
    width: Fraction,
    height: Fraction,
    outer: Size,
    content: Size,
    ready: bool,
    style: Box<dyn Style>,
    node_style: FrameStyle,
}

impl LayoutTree {
    /// Create an empty tree with the default frames.
    pub fn new(
        orientation: Orientation,
        width: impl Into<Fraction>,
        height: impl Into<Fraction>,
    ) -> Self {
        Self::with_config(orientation, width, height, &StyleConfig::default())
    }

    /// Create an empty tree with frames taken from `config`.
    pub fn with_config(
        orientation: Orientation,
        width: impl Into<Fraction>,
        height: impl Into<Fraction>,
        config: &StyleConfig,
    ) -> Self {
        Self {
            nodes: Vec::new(),
            orientation,
            width: width.into(),
            height: height.into(),
            outer: Size::ZERO,
            content: Size::ZERO,
            ready: false,
            style: Box::new(config.tree.clone()),
            node_style: config.node.clone(),
        }
    }

    /// Replace the tree's own frame.
    #[must_use]
    pub fn with_style(mut self, style: impl Style + 'static) -> Self {
        self.style = Box::new(style);
        self
    }

    /// Append a child framed with the default node style.
    pub fn add_node<P: Panel>(
        &mut self,
        panel: P,
        width: impl Into<Fraction>,
        height: impl Into<Fraction>,
    ) -> &mut Self {
        let style = self.node_style.clone();
        self.add_node_with_style(panel, width, height, style)
    }

    /// Append a child with an explicit frame style.
    pub fn add_node_with_style<P: Panel, S: Style + 'static>(
        &mut self,
        panel: P,
        width: impl Into<Fraction>,
        height: impl Into<Fraction>,
        style: S,
    ) -> &mut Self {
        self.nodes.push(LayoutNode::new(
            Box::new(panel),
            width.into(),
            height.into(),
            Box::new(style),
        ));
        self
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a resize has been received.
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Stacking direction.
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The tree's own box at the last resize.
    pub const fn outer_size(&self) -> Size {
        self.outer
    }

    /// Space inside the tree's frame at the last resize.
    pub const fn content_size(&self) -> Size {
        self.content
    }

    /// Child at `index`, in insertion order.
    pub fn node(&self, index: usize) -> Option<&LayoutNode> {
        self.nodes.get(index)
    }

    /// Child at `index`, mutably.
    pub fn node_mut(&mut self, index: usize) -> Option<&mut LayoutNode> {
        self.nodes.get_mut(index)
    }

    /// All children in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter()
    }

    /// Apply one message.
    ///
    /// A resize re-flows every child; anything else is forwarded to every
    /// child in order. Child commands are combined in the same order.
    pub fn dispatch(&mut self, msg: &Message) -> Option<Cmd> {
        match *msg {
            Message::Resize { width, height } => self.resize(width, height),
            _ => self.map_nodes(|node| node.update(msg)),
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Option<Cmd> {
        self.outer = Size::new(cols, rows).scale(self.width, self.height);
        self.content = self.outer.shrink(self.style.frame_size());
        tracing::debug!(
            outer = ?self.outer,
            content = ?self.content,
            nodes = self.nodes.len(),
            "re-flowing layout"
        );

        let content = self.content;
        let cmd = self.map_nodes(|node| node.resize(content));
        self.ready = true;
        cmd
    }

    /// Replace every node with the result of `f`, collecting commands in order.
    fn map_nodes<F>(&mut self, mut f: F) -> Option<Cmd>
    where
        F: FnMut(LayoutNode) -> (LayoutNode, Option<Cmd>),
    {
        let mut cmds = Vec::with_capacity(self.nodes.len());
        self.nodes = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(|node| {
                let (node, cmd) = f(node);
                cmds.push(cmd);
                node
            })
            .collect();
        Cmd::batch(cmds)
    }
}

impl fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutTree")
            .field("orientation", &self.orientation)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("outer", &self.outer)
            .field("content", &self.content)
            .field("ready", &self.ready)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

impl Panel for LayoutTree {
    fn init(&mut self) -> Option<Cmd> {
        Cmd::batch(self.nodes.iter_mut().map(|node| node.panel.init()))
    }

    fn update(mut self: Box<Self>, msg: &Message) -> (Box<dyn Panel>, Option<Cmd>) {
        let cmd = self.dispatch(msg);
        (self, cmd)
    }

    fn render(&self) -> String {
        if !self.ready {
            return String::new();
        }

        let blocks: Vec<String> = self.nodes.iter().map(LayoutNode::render).collect();
        let body = match self.orientation {
            Orientation::Horizontal => join_horizontal(&blocks),
            Orientation::Vertical => join_vertical(&blocks),
        };
        self.style.render(&body, self.outer.width, self.outer.height)
    }
}
