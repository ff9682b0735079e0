use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_X: i32 = 20;
pub const DEFAULT_Y: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub collapsed: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        PanelState {
            x: DEFAULT_X,
            y: DEFAULT_Y,
            collapsed: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub panel_width: i32,
    pub panel_height: i32,
}

impl PanelState {
    pub fn move_to(&mut self, x: i32, y: i32, viewport: Viewport) {
        self.x = x.clamp(0, (viewport.width - viewport.panel_width).max(0));
        self.y = y.clamp(0, (viewport.height - viewport.panel_height).max(0));
    }

    pub fn toggle_collapsed(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }
}

pub trait StateStore {
    fn load(&self) -> Result<Option<PanelState>>;
    fn save(&self, state: &PanelState) -> Result<()>;
}

pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(dir: &Path) -> Self {
        JsonStateStore {
            path: dir.join("panel_state.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> Result<Option<PanelState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading panel state from {}", self.path.display()))?;
        let state = serde_json::from_str(&data)
            .with_context(|| format!("parsing panel state in {}", self.path.display()))?;
        Ok(Some(state))
    }

    fn save(&self, state: &PanelState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing panel state to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1920,
        height: 1080,
        panel_width: 320,
        panel_height: 400,
    };

    #[test]
    fn move_clamps_to_viewport_bounds() {
        let mut state = PanelState::default();
        state.move_to(-50, 5000, VIEWPORT);
        assert_eq!((state.x, state.y), (0, 1080 - 400));
        state.move_to(10_000, -1, VIEWPORT);
        assert_eq!((state.x, state.y), (1920 - 320, 0));
    }

    #[test]
    fn move_with_oversized_panel_pins_to_origin() {
        let mut state = PanelState::default();
        let tiny = Viewport {
            width: 100,
            height: 100,
            panel_width: 320,
            panel_height: 400,
        };
        state.move_to(40, 40, tiny);
        assert_eq!((state.x, state.y), (0, 0));
    }

    #[test]
    fn toggle_flips_and_reports_new_state() {
        let mut state = PanelState::default();
        assert!(state.toggle_collapsed());
        assert!(!state.toggle_collapsed());
    }

    #[test]
    fn store_round_trips_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStateStore::new(dir.path());
        assert!(store.load().expect("load empty").is_none());

        let state = PanelState {
            x: 64,
            y: 128,
            collapsed: true,
        };
        store.save(&state).expect("save");
        assert_eq!(store.load().expect("load"), Some(state));
    }

    #[test]
    fn store_accepts_state_without_collapsed_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStateStore::new(dir.path());
        fs::create_dir_all(dir.path()).expect("dir");
        fs::write(store.path(), r#"{"x": 1, "y": 2}"#).expect("write");
        let state = store.load().expect("load").expect("state");
        assert_eq!((state.x, state.y, state.collapsed), (1, 2, false));
    }
}
