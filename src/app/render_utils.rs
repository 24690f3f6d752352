use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, pos2, vec2};

use network_tree::tree::{Point, ScreenCircle};

pub(super) const ROOT_COLOR: Color32 = Color32::from_rgb(0xFF, 0x98, 0x00);
pub(super) const SELECTED_BORDER: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);
pub(super) const CONNECTED_BORDER: Color32 = Color32::from_rgb(0x00, 0xBC, 0xD4);
pub(super) const SEARCH_BORDER: Color32 = Color32::from_rgb(103, 196, 255);

pub(super) fn category_color(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Canvas-relative core point to an absolute egui position.
pub(super) fn to_screen(rect: Rect, point: Point) -> Pos2 {
    rect.min + vec2(point.x, point.y)
}

/// Absolute egui position to a canvas-relative core point.
pub(super) fn from_screen(rect: Rect, pos: Pos2) -> Point {
    let local = pos - rect.min;
    Point::new(local.x, local.y)
}

pub(super) fn to_vec(point: Point) -> Vec2 {
    vec2(point.x, point.y)
}

pub(super) fn from_vec(vec: Vec2) -> Point {
    Point::new(vec.x, vec.y)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, offset: Point, scale: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * scale).max(20.0);
    let origin = rect.min + to_vec(offset);
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, circle: ScreenCircle) -> bool {
    let center = to_screen(rect, circle.center());
    let radius = circle.radius();
    !(center.x + radius < rect.left()
        || center.x - radius > rect.right()
        || center.y + radius < rect.top()
        || center.y - radius > rect.bottom())
}
