use std::ops::{Add, Div, Mul, Sub};

/// A 2D point or offset. Used for both model space and screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Logical node diameters, in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSizes {
    pub normal: f32,
    pub selected: f32,
}

impl Default for NodeSizes {
    fn default() -> Self {
        Self {
            normal: 50.0,
            selected: 60.0,
        }
    }
}

impl NodeSizes {
    pub fn diameter(self, selected: bool) -> f32 {
        if selected { self.selected } else { self.normal }
    }
}

/// Screen-space placement of a node circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenCircle {
    pub top_left: Point,
    pub diameter: f32,
}

impl ScreenCircle {
    pub fn radius(self) -> f32 {
        self.diameter / 2.0
    }

    pub fn center(self) -> Point {
        self.top_left + Point::new(self.radius(), self.radius())
    }

    pub fn top_center(self) -> Point {
        self.top_left + Point::new(self.radius(), 0.0)
    }

    pub fn bottom_center(self) -> Point {
        self.top_left + Point::new(self.radius(), self.diameter)
    }

    pub fn contains(self, point: Point) -> bool {
        self.center().distance(point) <= self.radius()
    }
}

/// The pan/zoom mapping between model space and screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub offset: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl Transform {
    pub fn model_to_screen(self, model: Point) -> Point {
        model * self.scale + self.offset
    }

    pub fn screen_to_model(self, screen: Point) -> Point {
        (screen - self.offset) / self.scale
    }

    /// Places a circle of `diameter` layout units centred on `center`.
    ///
    /// Drawing, edge anchoring and hit testing all go through this.
    pub fn circle(self, center: Point, diameter: f32) -> ScreenCircle {
        let half = Point::new(diameter / 2.0, diameter / 2.0);
        ScreenCircle {
            top_left: (center - half) * self.scale + self.offset,
            diameter: diameter * self.scale,
        }
    }
}

/// Segment from the bottom of the parent circle to the top of the child circle.
pub fn edge_segment(parent: ScreenCircle, child: ScreenCircle) -> [Point; 2] {
    [parent.bottom_center(), child.top_center()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_center_matches_point_mapping() {
        let transform = Transform {
            scale: 1.7,
            offset: Point::new(-30.0, 12.5),
        };
        let center = Point::new(340.0, 400.0);

        let circle = transform.circle(center, 50.0);
        let mapped = transform.model_to_screen(center);

        assert!(circle.center().distance(mapped) < 1e-3);
        assert!((circle.radius() - 42.5).abs() < 1e-4);
    }

    #[test]
    fn edge_anchors_sit_on_circle_boundaries() {
        let transform = Transform {
            scale: 2.0,
            offset: Point::new(5.0, 5.0),
        };
        let parent = transform.circle(Point::new(540.0, 400.0), 50.0);
        let child = transform.circle(Point::new(540.0, 650.0), 60.0);

        let [start, end] = edge_segment(parent, child);

        assert!((start.distance(parent.center()) - parent.radius()).abs() < 1e-3);
        assert!((end.distance(child.center()) - child.radius()).abs() < 1e-3);
        assert!(start.y > parent.center().y);
        assert!(end.y < child.center().y);
    }
}
