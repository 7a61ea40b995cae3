use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Axis-aligned face rectangle in image pixel coordinates, origin upper-left.
///
/// Stored as edges; `width` and `height` are always derived so they can never
/// drift from the edges. Serializes with `x`/`y` aliases for `left`/`top`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn x(&self) -> i32 {
        self.left
    }

    pub fn y(&self) -> i32 {
        self.top
    }

    pub fn width(&self) -> i32 {
        self.right.wrapping_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.wrapping_sub(self.top)
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BoundingBox", 8)?;
        state.serialize_field("left", &self.left)?;
        state.serialize_field("x", &self.x())?;
        state.serialize_field("top", &self.top)?;
        state.serialize_field("y", &self.y())?;
        state.serialize_field("right", &self.right)?;
        state.serialize_field("bottom", &self.bottom)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::typical(BoundingBox::new(10, 20, 110, 170), 100, 150)]
    #[case::at_origin(BoundingBox::new(0, 0, 64, 48), 64, 48)]
    #[case::negative_left(BoundingBox::new(-30, 5, 20, 55), 50, 50)]
    #[case::degenerate(BoundingBox::new(40, 40, 40, 40), 0, 0)]
    #[case::extreme_edges_wrap(BoundingBox::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX), -1, -1)]
    fn test_dimensions_derive_from_edges(
        #[case] b: BoundingBox,
        #[case] width: i32,
        #[case] height: i32,
    ) {
        assert_eq!(b.width(), width);
        assert_eq!(b.height(), height);
        assert_eq!(b.width(), b.right.wrapping_sub(b.left));
        assert_eq!(b.height(), b.bottom.wrapping_sub(b.top));
    }

    #[test]
    fn test_serializes_canonical_and_alias_keys() {
        let b = BoundingBox::new(12, 34, 112, 184);
        assert_eq!(
            serde_json::to_value(b).unwrap(),
            json!({
                "left": 12,
                "x": 12,
                "top": 34,
                "y": 34,
                "right": 112,
                "bottom": 184,
                "width": 100,
                "height": 150,
            })
        );
    }
}
