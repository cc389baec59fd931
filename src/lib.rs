pub mod discovery;
pub mod engine;
pub mod key;
pub mod motion;
pub mod position;
pub mod traits;
pub mod types;

pub use crate::discovery::{Bootstrap, BootstrapConfig, ScanOutcome};
pub use crate::engine::{Session, SessionBuilder, SessionSnapshot, TrackedLine};
pub use crate::key::{KeyCode, KeyEvent, Modifiers};
pub use crate::traits::Surface;
pub use crate::types::{Caret, Command, Disposition, Mode};
