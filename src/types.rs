use crate::traits::Surface;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The engine's current key-interpretation policy.
///
/// The overlay is modal: the same key press is a motion command in normal
/// mode and plain text input in insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Navigation mode: keys drive the motion engine. The initial mode.
    Normal,
    /// Text entry mode: keys pass through to the host's native editing.
    Insert,
}

impl Mode {
    /// Display label for the host's mode indicator surface.
    pub fn indicator(self) -> &'static str {
        match self {
            Mode::Normal => "-- NORMAL --",
            Mode::Insert => "-- INSERT --",
        }
    }
}

/// A collapsed selection anchor inside one surface's content tree.
///
/// `offset` counts characters within the anchor node's own text, not bytes.
/// When a surface has no text-bearing nodes the anchor sits on the surface
/// root with offset 0, which hosts treat as "cursor at surface start".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret<N> {
    /// The node holding the anchor.
    pub node: N,
    /// Character offset within that node's text.
    pub offset: usize,
}

/// Host side-effect requests emitted by the engine.
///
/// The engine never touches a surface directly: every focus change, key
/// subscription change, selection placement, and indicator update is
/// returned to the host as one of these, in the order it must be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<S: Surface> {
    /// Give keyboard focus to this surface through the host's standard
    /// interactive-focus mechanism, the same action a pointer click
    /// produces, since the surface may require exactly that interaction
    /// to become the keyboard-event target.
    Focus(S),
    /// Install the raw key-press subscription, scoped to this surface.
    Listen(S),
    /// Remove the raw key-press subscription from this surface.
    Unlisten(S),
    /// Place a collapsed selection anchor. Never a range.
    SetCaret {
        /// The surface whose selection moves.
        surface: S,
        /// Where the collapsed anchor lands.
        caret: Caret<S::Node>,
    },
    /// New display string for the mode indicator.
    Indicator(&'static str),
}

/// What the host should do with the key event it just delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The overlay consumed the key: suppress the event's default behavior
    /// and further propagation.
    Handled,
    /// Not the overlay's key: let the host's native handling proceed.
    PassThrough,
}
