// src/document/document.rs

use crate::bsp::{BspBuilder, BspConfig, BspTree, WallId};
use crate::document::fields::{FieldSink, JsonFields};
use crate::error::{MazeError, WallError};
use crate::map::WallSegment;
use log::{debug, info};
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Group number used when a whole document is exported at once.
pub const DOCUMENT_GROUP: usize = 0;

/// The wall population of one maze together with its extent.
///
/// Width and height are in map units. Walls are addressed by [`WallId`],
/// their index in the store; the whole population is replaced when the
/// maze is regenerated.
#[derive(Debug, Default)]
pub struct MazeDocument {
    width: i32,
    height: i32,
    walls: Arc<RwLock<Vec<WallSegment>>>,
}

impl MazeDocument {
    /// Create a new empty document for a `width` x `height` maze.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    // Thread-safe getter.
    pub fn walls(&self) -> Arc<RwLock<Vec<WallSegment>>> {
        Arc::clone(&self.walls)
    }

    pub fn num_walls(&self) -> usize {
        self.walls.read().len()
    }

    /// Adds a wall and returns its id.
    pub fn add_wall(&mut self, wall: WallSegment) -> WallId {
        let mut walls = self.walls.write();
        walls.push(wall);
        WallId(walls.len() - 1)
    }

    pub fn wall(&self, id: WallId) -> Option<WallSegment> {
        self.walls.read().get(id.0).cloned()
    }

    /// Sets the seen flag of a wall. Returns false for an unknown id.
    pub fn set_seen(&self, id: WallId, seen: bool) -> bool {
        match self.walls.write().get_mut(id.0) {
            Some(wall) => {
                wall.set_seen(seen);
                true
            }
            None => false,
        }
    }

    /// Marks all walls on the outer border as partitions and returns how
    /// many walls are partitions afterwards.
    pub fn mark_borders(&self) -> usize {
        let (width, height) = (self.width, self.height);
        self.walls
            .write()
            .iter_mut()
            .map(|w| w.mark_border_if_applicable(width, height))
            .filter(|&partition| partition)
            .count()
    }

    /// Builds a BSP tree over the current walls and replaces the store
    /// with the tree's (split and flagged) walls.
    pub fn build_bsp(&self, config: BspConfig) -> Result<BspTree, MazeError> {
        let walls = self.walls.read().clone();
        let tree = BspBuilder::new(config).build(walls, self.width, self.height)?;
        *self.walls.write() = tree.walls().to_vec();
        info!(
            "Document now holds {} walls in {} leaves",
            tree.walls().len(),
            tree.leaf_count()
        );
        Ok(tree)
    }

    /// Writes every wall under group `number`, using its index as id.
    pub fn store<S: FieldSink + ?Sized>(&self, sink: &mut S, number: usize) {
        for (id, wall) in self.walls.read().iter().enumerate() {
            wall.store(sink, number, id);
        }
    }

    pub fn to_json(&self) -> Value {
        let mut fields = JsonFields::new();
        self.store(&mut fields, DOCUMENT_GROUP);
        json!({
            "width": self.width,
            "height": self.height,
            "wallCount": self.num_walls(),
            "walls": Value::Object(fields.into_map()),
        })
    }

    pub fn from_json(value: &Value) -> Result<Self, MazeError> {
        let width = json_int(value, "width")?;
        let height = json_int(value, "height")?;
        let count = json_int(value, "wallCount")?;
        let fields = match value.get("walls") {
            Some(Value::Object(map)) => JsonFields::from_map(map.clone()),
            Some(_) => {
                return Err(WallError::FieldType {
                    name: "walls".to_string(),
                    expected: "an object",
                }
                .into())
            }
            None => return Err(WallError::MissingField("walls".to_string()).into()),
        };

        let count = usize::try_from(count).map_err(|_| WallError::FieldType {
            name: "wallCount".to_string(),
            expected: "a non-negative integer",
        })?;

        let mut doc = MazeDocument::new(width, height);
        for id in 0..count {
            doc.add_wall(WallSegment::load(&fields, DOCUMENT_GROUP, id)?);
        }
        debug!("Loaded {} walls ({}x{})", doc.num_walls(), width, height);
        Ok(doc)
    }

    pub fn from_json_str(text: &str) -> Result<Self, MazeError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

fn json_int(value: &Value, name: &str) -> Result<i32, WallError> {
    let field = value
        .get(name)
        .ok_or_else(|| WallError::MissingField(name.to_string()))?;
    field
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| WallError::FieldType {
            name: name.to_string(),
            expected: "a 32-bit integer",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> MazeDocument {
        let mut doc = MazeDocument::new(40, 40);
        doc.add_wall(WallSegment::new(0, 0, 40, 0, 0, 0).unwrap());
        doc.add_wall(WallSegment::new(40, 0, 0, 40, 4, 0).unwrap());
        doc.add_wall(WallSegment::new(40, 40, -40, 0, 8, 0).unwrap());
        doc.add_wall(WallSegment::new(0, 40, 0, -40, 12, 0).unwrap());
        doc.add_wall(WallSegment::new(0, 20, 20, 0, 16, 1).unwrap());
        doc.add_wall(WallSegment::new(30, 10, 0, 20, 20, 2).unwrap());
        doc
    }

    #[test]
    fn test_empty_document() {
        let doc = MazeDocument::new(10, 10);
        assert_eq!(doc.num_walls(), 0);
        assert!(doc.wall(WallId(0)).is_none());
    }

    #[test]
    fn test_add_and_flag_walls() {
        let doc = sample_document();
        assert_eq!(doc.num_walls(), 6);
        assert!(doc.set_seen(WallId(4), true));
        assert!(!doc.set_seen(WallId(99), true));
        assert!(doc.wall(WallId(4)).unwrap().is_seen());
        assert_eq!(doc.mark_borders(), 4);
        assert!(!doc.wall(WallId(5)).unwrap().is_partition());
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample_document();
        doc.set_seen(WallId(1), true);
        doc.mark_borders();

        let text = doc.to_json().to_string();
        let back = MazeDocument::from_json_str(&text).unwrap();
        assert_eq!(back.width(), 40);
        assert_eq!(back.height(), 40);
        assert_eq!(*back.walls().read(), *doc.walls().read());
    }

    #[test]
    fn test_json_uses_field_names() {
        let value = sample_document().to_json();
        let walls = value.get("walls").unwrap();
        assert_eq!(walls.get("xSeg_0_5"), Some(&json!(30)));
        assert_eq!(walls.get("dySeg_0_5"), Some(&json!(20)));
        assert_eq!(walls.get("partitionSeg_0_5"), Some(&json!(false)));
        assert_eq!(value.get("wallCount"), Some(&json!(6)));
    }

    #[test]
    fn test_from_json_missing_wall() {
        let mut value = sample_document().to_json();
        value["wallCount"] = json!(7);
        assert!(matches!(
            MazeDocument::from_json(&value),
            Err(MazeError::Wall(WallError::MissingField(_)))
        ));
    }

    #[test]
    fn test_from_json_negative_wall_count() {
        let mut value = sample_document().to_json();
        value["wallCount"] = json!(-1);
        match MazeDocument::from_json(&value) {
            Err(MazeError::Wall(WallError::FieldType { name, .. })) => {
                assert_eq!(name, "wallCount")
            }
            other => panic!("expected a wallCount error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_end_out_of_range() {
        let text = r#"{
            "width": 10, "height": 10, "wallCount": 1,
            "walls": {
                "xSeg_0_0": 2147483647, "ySeg_0_0": 0,
                "dxSeg_0_0": 5, "dySeg_0_0": 0,
                "distSeg_0_0": 0, "colSeg_0_0": 0,
                "partitionSeg_0_0": false, "seenSeg_0_0": false
            }
        }"#;
        assert!(matches!(
            MazeDocument::from_json_str(text),
            Err(MazeError::Wall(WallError::EndOverflow { .. }))
        ));
    }

    #[test]
    fn test_build_bsp_replaces_walls() {
        let doc = sample_document();
        let tree = doc.build_bsp(BspConfig::default()).unwrap();
        assert_eq!(doc.num_walls(), tree.walls().len());
        assert_eq!(doc.num_walls(), 9);
        assert!(doc.walls().read().iter().all(|w| w.is_partition()));
    }

    #[test]
    fn test_concurrent_access() {
        let doc = sample_document();
        std::thread::scope(|s| {
            s.spawn(|| {
                doc.set_seen(WallId(0), true);
            });
            s.spawn(|| {
                let walls = doc.walls.read();
                let _ = walls.len();
            });
        });
        assert!(doc.wall(WallId(0)).unwrap().is_seen());
    }
}
