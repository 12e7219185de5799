//! Generated scenes and the bounded history of recent ones.

use std::{collections::VecDeque, time::SystemTime};

use serde::{Deserialize, Serialize};

use crate::{canvas::Canvas, color::Color, shape::Shape};

/// One complete generated composition: background plus ordered shapes.
///
/// Shapes are drawn in sequence order. A scene never changes after it is
/// built; regenerating produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    canvas: Canvas,
    background: Color,
    shapes: Vec<Shape>,
    requested_count: usize,
}

impl Scene {
    pub fn new(canvas: Canvas, background: Color, shapes: Vec<Shape>, requested_count: usize) -> Self {
        Self {
            canvas,
            background,
            shapes,
            requested_count,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// How many shapes the density parameter asked for.
    pub fn requested_count(&self) -> usize {
        self.requested_count
    }

    /// How many requested shapes were dropped because no candidate position
    /// cleared the central exclusion zone.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus_core::{canvas::Canvas, color::Color, scene::Scene};
    /// let scene = Scene::new(Canvas::new(10, 10).unwrap(), Color::white(), vec![], 3);
    /// assert_eq!(scene.dropped_count(), 3);
    /// ```
    pub fn dropped_count(&self) -> usize {
        self.requested_count.saturating_sub(self.shapes.len())
    }
}

/// Number of scenes the history keeps.
pub const HISTORY_CAPACITY: usize = 10;

/// A remembered scene.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    id: u64,
    created_at: SystemTime,
    scene: Scene,
}

impl HistoryEntry {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

/// In-memory list of recent scenes, newest first.
///
/// Pushing beyond the capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Creates a history holding at most `capacity` scenes (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Records a scene and returns the id assigned to it.
    pub fn push(&mut self, scene: Scene) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_front(HistoryEntry {
            id,
            created_at: SystemTime::now(),
            scene,
        });
        self.entries.truncate(self.capacity);
        id
    }

    /// Looks up a still-remembered scene by id.
    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::Point, shape::ShapeKind};

    fn scene(requested: usize) -> Scene {
        let shape = Shape::new(
            ShapeKind::Circle { diameter: 4.0 },
            Point::new(2.0, 2.0),
            0.0,
            Color::black(),
        );
        Scene::new(
            Canvas::new(10, 10).unwrap(),
            Color::white(),
            vec![shape],
            requested,
        )
    }

    #[test]
    fn test_dropped_count() {
        assert_eq!(scene(1).dropped_count(), 0);
        assert_eq!(scene(4).dropped_count(), 3);
    }

    #[test]
    fn test_scene_json_roundtrip() {
        let original = scene(2);
        let json = serde_json::to_string(&original).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_history_newest_first() {
        let mut history = History::new();
        let first = history.push(scene(1));
        let second = history.push(scene(2));

        assert_eq!(history.latest().unwrap().id(), second);
        let ids: Vec<u64> = history.iter().map(HistoryEntry::id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = History::new();
        let ids: Vec<u64> = (0..HISTORY_CAPACITY + 3).map(|i| history.push(scene(i))).collect();

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert!(history.get(ids[0]).is_none());
        assert!(history.get(ids[2]).is_none());
        assert!(history.get(ids[3]).is_some());
        assert_eq!(history.latest().unwrap().id(), *ids.last().unwrap());
    }
}
