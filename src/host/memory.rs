//! In-memory slide host
//!
//! Behaves like a presentation host's automation model: the slide owns its
//! shapes, handles are cheap references that go stale when the shape is
//! deleted, and freeform nodes are stored in the unrotated frame but read and
//! written on the canvas.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;

use crate::handle::{FlipAxis, HandleError, ShapeHandle, ShapeKind};
use crate::types::{Angle, Length, Point};

/// Stable identity of a shape on its slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

#[derive(Debug, Clone)]
struct ShapeRecord {
    name: String,
    kind: ShapeKind,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    /// Degrees, clockwise, in `[0, 360)`
    rotation: f64,
    lock_aspect_ratio: bool,
    /// Unrotated frame
    nodes: Vec<DVec2>,
    flipped_h: bool,
    flipped_v: bool,
}

impl ShapeRecord {
    fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    fn turn(&self, p: DVec2, degrees: f64) -> DVec2 {
        let c = self.center();
        // y grows downwards, so a positive angle turns clockwise on screen
        c + DVec2::from_angle(degrees.to_radians()).rotate(p - c)
    }

    fn to_canvas(&self, p: DVec2) -> DVec2 {
        self.turn(p, self.rotation)
    }

    fn from_canvas(&self, p: DVec2) -> DVec2 {
        self.turn(p, -self.rotation)
    }

    /// Box follows the node outline
    fn refit(&mut self) {
        let Some(first) = self.nodes.first().copied() else {
            return;
        };
        let (min, max) = self
            .nodes
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        self.left = min.x;
        self.top = min.y;
        self.width = max.x - min.x;
        self.height = max.y - min.y;
    }

    fn resize(&mut self, width: f64, height: f64) {
        let sx = if self.width != 0.0 { width / self.width } else { 1.0 };
        let sy = if self.height != 0.0 { height / self.height } else { 1.0 };
        let origin = DVec2::new(self.left, self.top);
        for node in &mut self.nodes {
            *node = origin + (*node - origin) * DVec2::new(sx, sy);
        }
        self.width = width;
        self.height = height;
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let delta = DVec2::new(dx, dy);
        for node in &mut self.nodes {
            *node += delta;
        }
        self.left += dx;
        self.top += dy;
    }

    fn check_node(&self, index: usize) -> Result<(), HandleError> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(HandleError::NodeOutOfRange { index, len: self.nodes.len() })
        }
    }

    fn check_path_based(&self, operation: &'static str) -> Result<(), HandleError> {
        if self.kind.is_path_based() {
            Ok(())
        } else {
            Err(HandleError::Unsupported { kind: self.kind, operation })
        }
    }
}

#[derive(Debug)]
enum Slot {
    Live(ShapeRecord),
    Deleted { name: String },
}

#[derive(Debug, Default)]
struct SlideState {
    slots: Vec<Slot>,
    selection: Vec<ShapeId>,
    native_rotated_bounds: bool,
}

/// A slide owning its shapes
#[derive(Debug, Clone, Default)]
pub struct MemorySlide {
    state: Rc<RefCell<SlideState>>,
}

fn label(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::AutoShape => "Rectangle",
        ShapeKind::Freeform => "Freeform",
        ShapeKind::Picture => "Picture",
        ShapeKind::TextBox => "TextBox",
        ShapeKind::Line => "Straight Connector",
        ShapeKind::Group => "Group",
        ShapeKind::Other => "Shape",
    }
}

impl MemorySlide {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slide whose shapes report rotated bounds themselves
    pub fn with_native_rotated_bounds() -> Self {
        let slide = Self::default();
        slide.state.borrow_mut().native_rotated_bounds = true;
        slide
    }

    fn push(&self, record: ShapeRecord) -> MemoryShape {
        let mut state = self.state.borrow_mut();
        state.slots.push(Slot::Live(record));
        MemoryShape {
            state: Rc::clone(&self.state),
            id: ShapeId(state.slots.len() - 1),
        }
    }

    /// Add an unrotated shape. Autoshapes and freeforms get a rectangular
    /// node outline.
    pub fn add_shape(&self, kind: ShapeKind, left: f64, top: f64, width: f64, height: f64) -> MemoryShape {
        let nodes = if kind.is_path_based() {
            vec![
                DVec2::new(left, top),
                DVec2::new(left + width, top),
                DVec2::new(left + width, top + height),
                DVec2::new(left, top + height),
            ]
        } else {
            Vec::new()
        };
        let number = self.state.borrow().slots.len() + 1;
        self.push(ShapeRecord {
            name: format!("{} {}", label(kind), number),
            kind,
            left,
            top,
            width,
            height,
            rotation: 0.0,
            lock_aspect_ratio: false,
            nodes,
            flipped_h: false,
            flipped_v: false,
        })
    }

    /// Add a freeform through the given points
    pub fn add_freeform(&self, points: &[Point<Length>]) -> MemoryShape {
        let number = self.state.borrow().slots.len() + 1;
        let mut record = ShapeRecord {
            name: format!("{} {}", label(ShapeKind::Freeform), number),
            kind: ShapeKind::Freeform,
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            lock_aspect_ratio: false,
            nodes: points.iter().map(|p| p.to_dvec2()).collect(),
            flipped_h: false,
            flipped_v: false,
        };
        record.refit();
        self.push(record)
    }

    /// Handle to a live shape
    pub fn shape(&self, id: ShapeId) -> Option<MemoryShape> {
        let state = self.state.borrow();
        match state.slots.get(id.0) {
            Some(Slot::Live(_)) => Some(MemoryShape { state: Rc::clone(&self.state), id }),
            _ => None,
        }
    }

    /// First live shape with this name
    pub fn shape_named(&self, name: &str) -> Option<MemoryShape> {
        let state = self.state.borrow();
        state.slots.iter().enumerate().find_map(|(index, slot)| match slot {
            Slot::Live(record) if record.name == name => Some(MemoryShape {
                state: Rc::clone(&self.state),
                id: ShapeId(index),
            }),
            _ => None,
        })
    }

    /// Number of live shapes
    pub fn len(&self) -> usize {
        self.state
            .borrow()
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Live(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn selection(&self) -> Vec<ShapeId> {
        self.state.borrow().selection.clone()
    }
}

/// Handle to one shape on a [`MemorySlide`]
#[derive(Debug, Clone)]
pub struct MemoryShape {
    state: Rc<RefCell<SlideState>>,
    id: ShapeId,
}

impl MemoryShape {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Horizontal and vertical flip state
    pub fn flipped(&self) -> Result<(bool, bool), HandleError> {
        self.read(|record| (record.flipped_h, record.flipped_v))
    }

    fn read<R>(&self, f: impl FnOnce(&ShapeRecord) -> R) -> Result<R, HandleError> {
        match &self.state.borrow().slots[self.id.0] {
            Slot::Live(record) => Ok(f(record)),
            Slot::Deleted { name } => Err(HandleError::Deleted { name: name.clone() }),
        }
    }

    fn write<R>(
        &mut self,
        f: impl FnOnce(&mut ShapeRecord) -> Result<R, HandleError>,
    ) -> Result<R, HandleError> {
        match &mut self.state.borrow_mut().slots[self.id.0] {
            Slot::Live(record) => f(record),
            Slot::Deleted { name } => Err(HandleError::Deleted { name: name.clone() }),
        }
    }
}

impl ShapeHandle for MemoryShape {
    fn name(&self) -> Result<String, HandleError> {
        self.read(|record| record.name.clone())
    }

    fn set_name(&mut self, name: &str) -> Result<(), HandleError> {
        self.write(|record| {
            record.name = name.to_string();
            Ok(())
        })
    }

    fn width(&self) -> Result<Length, HandleError> {
        self.read(|record| Length(record.width))
    }

    fn set_width(&mut self, width: Length) -> Result<(), HandleError> {
        self.write(|record| {
            let height = match (record.lock_aspect_ratio, record.width != 0.0) {
                (true, true) => record.height * width.0 / record.width,
                _ => record.height,
            };
            record.resize(width.0, height);
            Ok(())
        })
    }

    fn height(&self) -> Result<Length, HandleError> {
        self.read(|record| Length(record.height))
    }

    fn set_height(&mut self, height: Length) -> Result<(), HandleError> {
        self.write(|record| {
            let width = match (record.lock_aspect_ratio, record.height != 0.0) {
                (true, true) => record.width * height.0 / record.height,
                _ => record.width,
            };
            record.resize(width, height.0);
            Ok(())
        })
    }

    fn left(&self) -> Result<Length, HandleError> {
        self.read(|record| Length(record.left))
    }

    fn set_left(&mut self, left: Length) -> Result<(), HandleError> {
        self.write(|record| {
            record.translate(left.0 - record.left, 0.0);
            Ok(())
        })
    }

    fn top(&self) -> Result<Length, HandleError> {
        self.read(|record| Length(record.top))
    }

    fn set_top(&mut self, top: Length) -> Result<(), HandleError> {
        self.write(|record| {
            record.translate(0.0, top.0 - record.top);
            Ok(())
        })
    }

    fn rotation(&self) -> Result<Angle, HandleError> {
        self.read(|record| Angle(record.rotation))
    }

    fn set_rotation(&mut self, rotation: Angle) -> Result<(), HandleError> {
        self.write(|record| {
            record.rotation = rotation.normalized().0;
            Ok(())
        })
    }

    fn lock_aspect_ratio(&self) -> Result<bool, HandleError> {
        self.read(|record| record.lock_aspect_ratio)
    }

    fn set_lock_aspect_ratio(&mut self, locked: bool) -> Result<(), HandleError> {
        self.write(|record| {
            record.lock_aspect_ratio = locked;
            Ok(())
        })
    }

    fn kind(&self) -> Result<ShapeKind, HandleError> {
        self.read(|record| record.kind)
    }

    fn node_count(&self) -> Result<usize, HandleError> {
        self.read(|record| record.nodes.len())
    }

    fn node_position(&self, index: usize) -> Result<Point<Length>, HandleError> {
        self.read(|record| -> Result<Point<Length>, HandleError> {
            record.check_node(index)?;
            Ok(record.to_canvas(record.nodes[index]).into())
        })?
    }

    fn set_node_position(&mut self, index: usize, position: Point<Length>) -> Result<(), HandleError> {
        self.write(|record| {
            record.check_node(index)?;
            record.nodes[index] = record.from_canvas(position.to_dvec2());
            record.kind = ShapeKind::Freeform;
            record.refit();
            Ok(())
        })
    }

    fn insert_line_node(&mut self, index: usize, position: Point<Length>) -> Result<(), HandleError> {
        self.write(|record| {
            record.check_path_based("node insertion")?;
            if index > record.nodes.len() {
                return Err(HandleError::NodeOutOfRange { index, len: record.nodes.len() });
            }
            let local = record.from_canvas(position.to_dvec2());
            record.nodes.insert(index, local);
            record.kind = ShapeKind::Freeform;
            record.refit();
            Ok(())
        })
    }

    fn delete_node(&mut self, index: usize) -> Result<(), HandleError> {
        self.write(|record| {
            record.check_path_based("node deletion")?;
            record.check_node(index)?;
            record.nodes.remove(index);
            record.kind = ShapeKind::Freeform;
            record.refit();
            Ok(())
        })
    }

    fn increment_left(&mut self, dx: Length) -> Result<(), HandleError> {
        self.write(|record| {
            record.translate(dx.0, 0.0);
            Ok(())
        })
    }

    fn increment_top(&mut self, dy: Length) -> Result<(), HandleError> {
        self.write(|record| {
            record.translate(0.0, dy.0);
            Ok(())
        })
    }

    fn flip(&mut self, axis: FlipAxis) -> Result<(), HandleError> {
        self.write(|record| {
            let c = record.center();
            let mirror = match axis {
                FlipAxis::Horizontal => DVec2::new(-1.0, 1.0),
                FlipAxis::Vertical => DVec2::new(1.0, -1.0),
            };
            for node in &mut record.nodes {
                *node = c + (*node - c) * mirror;
            }
            // A mirrored shape turns the other way
            record.rotation = Angle(-record.rotation).normalized().0;
            match axis {
                FlipAxis::Horizontal => record.flipped_h = !record.flipped_h,
                FlipAxis::Vertical => record.flipped_v = !record.flipped_v,
            }
            Ok(())
        })
    }

    fn select(&mut self) -> Result<(), HandleError> {
        let id = self.id;
        self.read(|_| ())?;
        self.state.borrow_mut().selection = vec![id];
        Ok(())
    }

    fn delete(self) -> Result<(), HandleError> {
        let mut state = self.state.borrow_mut();
        let slot = &mut state.slots[self.id.0];
        let name = match slot {
            Slot::Live(record) => record.name.clone(),
            Slot::Deleted { name } => return Err(HandleError::Deleted { name: name.clone() }),
        };
        *slot = Slot::Deleted { name };
        state.selection.retain(|id| *id != self.id);
        Ok(())
    }

    fn duplicate(&self) -> Result<Self, HandleError> {
        let record = self.read(ShapeRecord::clone)?;
        let mut state = self.state.borrow_mut();
        state.slots.push(Slot::Live(record));
        Ok(MemoryShape {
            state: Rc::clone(&self.state),
            id: ShapeId(state.slots.len() - 1),
        })
    }

    fn supports_native_rotated_bounds(&self) -> bool {
        self.state.borrow().native_rotated_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(actual: Point<Length>, x: f64, y: f64) {
        assert!(
            (actual.x.0 - x).abs() < 1e-9 && (actual.y.0 - y).abs() < 1e-9,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    #[test]
    fn autoshape_has_corner_nodes() {
        let slide = MemorySlide::new();
        let shape = slide.add_shape(ShapeKind::AutoShape, 10.0, 20.0, 100.0, 50.0);

        assert_eq!(shape.name().unwrap(), "Rectangle 1");
        assert_eq!(shape.node_count().unwrap(), 4);
        assert_near(shape.node_position(2).unwrap(), 110.0, 70.0);
    }

    #[test]
    fn picture_has_no_nodes() {
        let slide = MemorySlide::new();
        let shape = slide.add_shape(ShapeKind::Picture, 0.0, 0.0, 10.0, 10.0);

        assert_eq!(shape.node_count().unwrap(), 0);
        assert_eq!(
            shape.node_position(0),
            Err(HandleError::NodeOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn nodes_are_reported_rotated_about_center() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::AutoShape, 10.0, 20.0, 100.0, 50.0);
        shape.set_rotation(Angle(90.0)).unwrap();

        // Top-left corner swings to the top-right of the turned box
        assert_near(shape.node_position(0).unwrap(), 85.0, -5.0);
    }

    #[test]
    fn writing_nodes_refits_the_box() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::AutoShape, 0.0, 0.0, 10.0, 10.0);
        shape.set_node_position(2, Point::pt(30.0, 20.0)).unwrap();

        assert_eq!(shape.kind().unwrap(), ShapeKind::Freeform);
        assert_eq!(shape.width().unwrap(), Length(30.0));
        assert_eq!(shape.height().unwrap(), Length(20.0));
    }

    #[test]
    fn inserting_a_node_converts_autoshape() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::AutoShape, 0.0, 0.0, 10.0, 10.0);
        shape.insert_line_node(1, Point::pt(0.0, 0.0)).unwrap();

        assert_eq!(shape.kind().unwrap(), ShapeKind::Freeform);
        assert_eq!(shape.node_count().unwrap(), 5);

        let err = shape.insert_line_node(9, Point::pt(0.0, 0.0)).unwrap_err();
        assert_eq!(err, HandleError::NodeOutOfRange { index: 9, len: 5 });
    }

    #[test]
    fn node_editing_unsupported_on_pictures() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 0.0, 0.0, 10.0, 10.0);
        let err = shape.insert_line_node(0, Point::pt(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, HandleError::Unsupported { kind: ShapeKind::Picture, .. }));
    }

    #[test]
    fn locked_aspect_ratio_scales_both_sides() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 0.0, 0.0, 100.0, 50.0);
        shape.set_lock_aspect_ratio(true).unwrap();
        shape.set_width(Length(50.0)).unwrap();

        assert_eq!(shape.height().unwrap(), Length(25.0));
    }

    #[test]
    fn deleted_shape_invalidates_every_handle() {
        let slide = MemorySlide::new();
        let shape = slide.add_shape(ShapeKind::AutoShape, 0.0, 0.0, 10.0, 10.0);
        let other = shape.clone();

        shape.delete().unwrap();

        assert!(slide.is_empty());
        assert_eq!(
            other.width(),
            Err(HandleError::Deleted { name: "Rectangle 1".to_string() })
        );
    }

    #[test]
    fn duplicate_is_independent() {
        let slide = MemorySlide::new();
        let shape = slide.add_shape(ShapeKind::AutoShape, 0.0, 0.0, 10.0, 10.0);
        let mut copy = shape.duplicate().unwrap();
        copy.set_left(Length(50.0)).unwrap();

        assert_eq!(slide.len(), 2);
        assert_eq!(shape.left().unwrap(), Length(0.0));
        assert_eq!(copy.name().unwrap(), "Rectangle 1");
    }

    #[test]
    fn select_replaces_selection() {
        let slide = MemorySlide::new();
        let mut a = slide.add_shape(ShapeKind::AutoShape, 0.0, 0.0, 10.0, 10.0);
        let mut b = slide.add_shape(ShapeKind::AutoShape, 0.0, 0.0, 10.0, 10.0);

        a.select().unwrap();
        b.select().unwrap();
        assert_eq!(slide.selection(), vec![b.id()]);
    }

    #[test]
    fn flip_mirrors_rotation() {
        let slide = MemorySlide::new();
        let mut shape = slide.add_shape(ShapeKind::Picture, 0.0, 0.0, 10.0, 10.0);
        shape.set_rotation(Angle(30.0)).unwrap();
        shape.flip(FlipAxis::Horizontal).unwrap();

        assert_eq!(shape.rotation().unwrap(), Angle(330.0));
        assert_eq!(shape.flipped().unwrap(), (true, false));
    }
}
