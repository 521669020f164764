//! Input handling.
//!
//! Turns raw key and pointer events into the per-frame [`InputFrame`] the
//! core consumes. Two sources are provided: [`KeyboardInput`] for live
//! play and [`ScriptedInput`] for headless runs and tests.

use std::collections::HashSet;

use anyhow::Context;
use planet_shared::input::{Actions, InputFrame, InputSource};
use planet_shared::math::Vec3;

use crate::camera::OrbitCamera;

/// Platform-independent input events.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    /// Pointer drag, in pixels.
    Drag { dx: f32, dy: f32 },
    Wheel { delta: f32 },
    FocusLost,
}

/// Key mapping configuration. Each action accepts several keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_forward: Vec<String>,
    pub move_back: Vec<String>,
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = |ks: &[&str]| -> Vec<String> { ks.iter().map(|k| k.to_string()).collect() };
        Self {
            move_forward: keys(&["w", "arrowup"]),
            move_back: keys(&["s", "arrowdown"]),
            move_left: keys(&["a", "arrowleft"]),
            move_right: keys(&["d", "arrowright"]),
            jump: keys(&[" "]),
        }
    }
}

impl KeyBindings {
    /// Adds `key` to the action named `action_name` (`moveForward`, `jump`, ...).
    pub fn bind(&mut self, action_name: &str, key: &str) -> anyhow::Result<()> {
        let action = Actions::from_action_name(action_name)
            .with_context(|| format!("unknown action {action_name:?}"))?;
        let keys = [
            (Actions::MOVE_FORWARD, &mut self.move_forward),
            (Actions::MOVE_BACK, &mut self.move_back),
            (Actions::MOVE_LEFT, &mut self.move_left),
            (Actions::MOVE_RIGHT, &mut self.move_right),
            (Actions::JUMP, &mut self.jump),
        ]
        .into_iter()
        .find_map(|(a, keys)| (a == action).then_some(keys))
        .with_context(|| format!("no key list for {action_name:?}"))?;

        let key = key.to_lowercase();
        if !keys.contains(&key) {
            keys.push(key);
        }
        Ok(())
    }

    /// Actions held for a set of (lowercased) pressed keys.
    pub fn actions_for(&self, pressed: &HashSet<String>) -> Actions {
        let held = |keys: &[String]| keys.iter().any(|k| pressed.contains(k));
        let mut actions = Actions::empty();
        actions.set(Actions::MOVE_FORWARD, held(&self.move_forward));
        actions.set(Actions::MOVE_BACK, held(&self.move_back));
        actions.set(Actions::MOVE_LEFT, held(&self.move_left));
        actions.set(Actions::MOVE_RIGHT, held(&self.move_right));
        actions.set(Actions::JUMP, held(&self.jump));
        actions
    }
}

/// Live keyboard and pointer input driving an orbit camera.
#[derive(Debug, Clone)]
pub struct KeyboardInput {
    bindings: KeyBindings,
    pressed_keys: HashSet<String>,
    pub camera: OrbitCamera,
}

impl KeyboardInput {
    pub fn new(bindings: KeyBindings, camera: OrbitCamera) -> Self {
        Self {
            bindings,
            pressed_keys: HashSet::new(),
            camera,
        }
    }

    /// Process an input event and update state.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.to_lowercase());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(&key.to_lowercase());
            }
            InputEvent::Drag { dx, dy } => self.camera.orbit(*dx, *dy),
            InputEvent::Wheel { delta } => self.camera.zoom(*delta),
            InputEvent::FocusLost => self.pressed_keys.clear(),
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(&key.to_lowercase())
    }
}

impl InputSource for KeyboardInput {
    fn sample(&mut self) -> InputFrame {
        InputFrame {
            actions: self.bindings.actions_for(&self.pressed_keys),
            camera_forward: self.camera.forward(),
        }
    }
}

/// Replays a fixed action script, one entry per frame, with a fixed camera.
/// Frames past the end of the script hold nothing.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    segments: Vec<(Actions, u32)>,
    camera_forward: Vec3,
    frame: u64,
}

impl ScriptedInput {
    pub fn new(camera_forward: Vec3) -> Self {
        Self {
            segments: Vec::new(),
            camera_forward,
            frame: 0,
        }
    }

    /// Appends `frames` frames holding `actions`.
    pub fn hold(mut self, actions: Actions, frames: u32) -> Self {
        self.segments.push((actions, frames));
        self
    }

    /// Appends `frames` frames with nothing held.
    pub fn idle(self, frames: u32) -> Self {
        self.hold(Actions::empty(), frames)
    }

    /// Frames sampled so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total scripted frames.
    pub fn len(&self) -> u64 {
        self.segments.iter().map(|&(_, n)| u64::from(n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn actions_at(&self, frame: u64) -> Actions {
        let mut start = 0u64;
        for &(actions, n) in &self.segments {
            let end = start + u64::from(n);
            if frame < end {
                return actions;
            }
            start = end;
        }
        Actions::empty()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputFrame {
        let actions = self.actions_at(self.frame);
        self.frame += 1;
        InputFrame {
            actions,
            camera_forward: self.camera_forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> KeyboardInput {
        KeyboardInput::new(
            KeyBindings::default(),
            OrbitCamera::from_eye(Vec3::new(0.0, 15.0, 25.0)),
        )
    }

    #[test]
    fn keys_map_to_actions_case_insensitively() {
        let mut kb = keyboard();
        kb.process_event(&InputEvent::KeyDown("W".into()));
        kb.process_event(&InputEvent::KeyDown("ArrowLeft".into()));
        kb.process_event(&InputEvent::KeyDown(" ".into()));
        let frame = kb.sample();
        assert_eq!(
            frame.actions,
            Actions::MOVE_FORWARD | Actions::MOVE_LEFT | Actions::JUMP
        );

        kb.process_event(&InputEvent::KeyUp("w".into()));
        assert!(!kb.sample().actions.contains(Actions::MOVE_FORWARD));
        assert!(kb.is_key_pressed("arrowleft"));
    }

    #[test]
    fn extra_keys_bind_by_action_name() {
        let mut bindings = KeyBindings::default();
        bindings.bind("jump", "Enter").unwrap();
        bindings.bind("moveLeft", "q").unwrap();
        bindings.bind("moveLeft", "Q").unwrap();
        assert!(bindings.bind("crouch", "c").is_err());
        assert_eq!(bindings.move_left, vec!["a", "arrowleft", "q"]);

        let mut kb = KeyboardInput::new(bindings, OrbitCamera::from_eye(Vec3::new(0.0, 15.0, 25.0)));
        kb.process_event(&InputEvent::KeyDown("ENTER".into()));
        kb.process_event(&InputEvent::KeyDown("q".into()));
        assert_eq!(kb.sample().actions, Actions::JUMP | Actions::MOVE_LEFT);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut kb = keyboard();
        kb.process_event(&InputEvent::KeyDown("d".into()));
        kb.process_event(&InputEvent::FocusLost);
        assert_eq!(kb.sample().actions, Actions::empty());
    }

    #[test]
    fn drag_turns_the_camera() {
        let mut kb = keyboard();
        let before = kb.sample().camera_forward;
        kb.process_event(&InputEvent::Drag { dx: 200.0, dy: 0.0 });
        let after = kb.sample().camera_forward;
        assert!(!before.abs_diff_eq(after, 1e-3));
        assert!((after.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn script_plays_segments_in_order_then_idles() {
        let mut script = ScriptedInput::new(Vec3::NEG_Z)
            .hold(Actions::MOVE_FORWARD, 2)
            .idle(1)
            .hold(Actions::JUMP, 1);
        assert_eq!(script.len(), 4);

        let seen: Vec<Actions> = (0..6).map(|_| script.sample().actions).collect();
        assert_eq!(
            seen,
            vec![
                Actions::MOVE_FORWARD,
                Actions::MOVE_FORWARD,
                Actions::empty(),
                Actions::JUMP,
                Actions::empty(),
                Actions::empty(),
            ]
        );
        assert_eq!(script.frame(), 6);
    }
}
