//! Save document model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scene, identified by its position in the story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scene {
    pub part: i32,
    pub chapter: i32,
    pub section: i32,
}

impl Scene {
    pub const fn new(part: i32, chapter: i32, section: i32) -> Self {
        Self {
            part,
            chapter,
            section,
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.part, self.chapter, self.section)
    }
}

/// Persisted player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    /// Scenes in the order they were read.
    pub read_scenes: Vec<Scene>,
    /// The scene read most recently.
    pub recent_scene: Scene,
}

impl SaveData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `scene` was just read.
    ///
    /// Appends it to the read scenes (unless it is already the last entry)
    /// and makes it the recent scene.
    pub fn record_visit(&mut self, scene: Scene) {
        if self.read_scenes.last() != Some(&scene) {
            self.read_scenes.push(scene);
        }
        self.recent_scene = scene;
    }

    /// Whether the recent scene is the last read scene.
    ///
    /// Always holds for documents built with [`Self::record_visit`]. A
    /// document with no read scenes is consistent only while its recent
    /// scene is still the default.
    pub fn is_consistent(&self) -> bool {
        self.read_scenes.last().map_or_else(
            || self.recent_scene == Scene::default(),
            |last| *last == self.recent_scene,
        )
    }
}

impl fmt::Display for SaveData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read_scenes: [")?;
        for (i, scene) in self.read_scenes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{scene}")?;
        }
        write!(f, "], recent_scene: {}", self.recent_scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenes_compare_structurally() {
        assert_eq!(Scene::new(1, 1, 2), Scene::new(1, 1, 2));
        assert_ne!(Scene::new(1, 1, 2), Scene::new(1, 2, 1));
    }

    #[test]
    fn record_visit_tracks_recent_scene() {
        let mut save = SaveData::new();
        assert!(save.is_consistent());

        save.record_visit(Scene::new(1, 1, 1));
        save.record_visit(Scene::new(1, 1, 2));
        save.record_visit(Scene::new(1, 1, 2));

        assert_eq!(save.read_scenes, vec![Scene::new(1, 1, 1), Scene::new(1, 1, 2)]);
        assert_eq!(save.recent_scene, Scene::new(1, 1, 2));
        assert!(save.is_consistent());
    }

    #[test]
    fn mismatched_recent_scene_is_inconsistent() {
        let save = SaveData {
            read_scenes: vec![Scene::new(1, 1, 1)],
            recent_scene: Scene::new(2, 1, 1),
        };
        assert!(!save.is_consistent());

        let empty = SaveData {
            read_scenes: Vec::new(),
            recent_scene: Scene::new(1, 1, 1),
        };
        assert!(!empty.is_consistent());
    }

    #[test]
    fn display_lists_scenes() {
        let mut save = SaveData::new();
        save.record_visit(Scene::new(1, 1, 1));
        save.record_visit(Scene::new(1, 1, 2));
        assert_eq!(
            save.to_string(),
            "read_scenes: [1-1-1, 1-1-2], recent_scene: 1-1-2"
        );
    }
}
