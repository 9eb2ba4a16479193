//! Stage state that commands act on.

use std::fmt;

/// Something a command did to the stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    /// A line of dialog was shown.
    Dialog {
        /// Speaking character.
        character: String,
        /// Line of dialog.
        text: String,
        /// Speaker position.
        position: String,
    },
    /// The active scene changed.
    SceneSwitch {
        /// Scene switched to.
        scene: String,
    },
}

impl fmt::Display for StageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dialog {
                character,
                text,
                position,
            } => write!(f, "{character} says \"{text}\" at {position}"),
            Self::SceneSwitch { scene } => write!(f, "switching to scene: {scene}"),
        }
    }
}

/// The stage: current scene plus every event so far, in order.
#[derive(Debug, Clone, Default)]
pub struct GameContext {
    scene: Option<String>,
    events: Vec<StageEvent>,
}

impl GameContext {
    /// An empty stage with no scene loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a given scene.
    pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = Some(scene.into());
        self
    }

    /// Current scene.
    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    /// Events in the order they happened.
    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    /// Record a dialog line.
    pub fn show_dialog(&mut self, character: &str, text: &str, position: &str) {
        self.events.push(StageEvent::Dialog {
            character: character.to_string(),
            text: text.to_string(),
            position: position.to_string(),
        });
    }

    /// Switch scenes.
    pub fn switch_scene(&mut self, scene: &str) {
        self.scene = Some(scene.to_string());
        self.events.push(StageEvent::SceneSwitch {
            scene: scene.to_string(),
        });
    }
}
