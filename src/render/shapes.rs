use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use super::{BLACK, TRANSPARENT, WHITE};
use crate::ast::commons::LineColor;
use crate::engine::{Element, ElementKind};

fn ink(color: LineColor, reverse: bool) -> Rgba<u8> {
    if reverse || color == LineColor::W {
        WHITE
    } else {
        BLACK
    }
}

/// `^GB`: filled when the color is `F` or the border swallows both
/// dimensions; otherwise an inside stroke that leaves the interior
/// untouched.
pub(super) fn draw_box(canvas: &mut RgbaImage, element: &Element) {
    let ElementKind::Box {
        width,
        height,
        thickness,
        color,
    } = element.kind
    else {
        return;
    };

    let w = width.max(1);
    let h = height.max(1);
    let x = element.x as i32;
    let y = element.y as i32;
    let paint = ink(color, element.reverse);

    if color == LineColor::F || (thickness >= width && thickness >= height) {
        draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(w, h), paint);
        return;
    }

    let t = thickness.max(1).min(w).min(h);
    draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(w, t), paint);
    draw_filled_rect_mut(
        canvas,
        Rect::at(x, y + (h - t) as i32).of_size(w, t),
        paint,
    );
    draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(t, h), paint);
    draw_filled_rect_mut(
        canvas,
        Rect::at(x + (w - t) as i32, y).of_size(t, h),
        paint,
    );
}

/// `^GC`: centered at `(x + d/2, y + d/2)`; a zero thickness or color `F`
/// fills, anything else strokes a ring.
pub(super) fn draw_circle(canvas: &mut RgbaImage, element: &Element) {
    let ElementKind::Circle {
        diameter,
        thickness,
        color,
    } = element.kind
    else {
        return;
    };
    if diameter == 0 {
        return;
    }

    let radius = (diameter / 2) as i32;
    let paint = ink(color, element.reverse);
    let filled = thickness == 0 || color == LineColor::F;

    // rasterize into a transparent buffer so the ring does not erase
    // whatever sits underneath
    let side = (radius as u32) * 2 + 1;
    let mut buffer = RgbaImage::from_pixel(side, side, TRANSPARENT);
    draw_filled_circle_mut(&mut buffer, (radius, radius), radius, paint);
    if !filled {
        let inner = radius - thickness as i32;
        if inner > 0 {
            draw_filled_circle_mut(&mut buffer, (radius, radius), inner, TRANSPARENT);
        }
    }
    imageops::overlay(canvas, &buffer, element.x as i64, element.y as i64);
}

/// `^GD`: a stroked line from `(x, y)` to `(x + w, y + h)`.
pub(super) fn draw_diagonal(canvas: &mut RgbaImage, element: &Element) {
    let ElementKind::Diagonal {
        width,
        height,
        thickness,
        color,
    } = element.kind
    else {
        return;
    };

    let paint = ink(color, element.reverse);
    let t = thickness.max(1);
    let (x0, y0) = (element.x as f32, element.y as f32);
    let (x1, y1) = (x0 + width as f32, y0 + height as f32);

    // thickness is approximated by parallel strokes offset along the
    // minor axis, centered on the ideal line
    for i in 0..t {
        let offset = i as f32 - (t as f32 - 1.0) / 2.0;
        if width >= height {
            draw_line_segment_mut(canvas, (x0, y0 + offset), (x1, y1 + offset), paint);
        } else {
            draw_line_segment_mut(canvas, (x0 + offset, y0), (x1 + offset, y1), paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::commons::Orientation;

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(40, 40, WHITE)
    }

    fn element(kind: ElementKind) -> Element {
        Element::new(0, 0, Orientation::N, false, kind)
    }

    #[test]
    fn border_swallowing_both_dimensions_fills_the_box() {
        let mut img = canvas();
        draw_box(
            &mut img,
            &element(ElementKind::Box {
                width: 10,
                height: 10,
                thickness: 10,
                color: LineColor::B,
            }),
        );
        assert_eq!(img.get_pixel(5, 5), &BLACK);
        assert_eq!(img.get_pixel(9, 9), &BLACK);
        assert_eq!(img.get_pixel(10, 10), &WHITE);
    }

    #[test]
    fn stroked_box_leaves_the_interior_untouched() {
        let mut img = canvas();
        draw_box(
            &mut img,
            &element(ElementKind::Box {
                width: 20,
                height: 20,
                thickness: 3,
                color: LineColor::B,
            }),
        );
        assert_eq!(img.get_pixel(0, 0), &BLACK);
        assert_eq!(img.get_pixel(2, 10), &BLACK);
        assert_eq!(img.get_pixel(19, 19), &BLACK);
        assert_eq!(img.get_pixel(10, 10), &WHITE);
    }

    #[test]
    fn thickness_on_one_axis_only_does_not_fill() {
        // 30 wide, 4 tall, border 4: swallows the height but not the width
        let mut img = canvas();
        draw_box(
            &mut img,
            &element(ElementKind::Box {
                width: 30,
                height: 4,
                thickness: 4,
                color: LineColor::B,
            }),
        );
        assert_eq!(img.get_pixel(15, 1), &BLACK);
    }

    #[test]
    fn reverse_paints_white() {
        let mut img = RgbaImage::from_pixel(12, 12, BLACK);
        let mut boxed = element(ElementKind::Box {
            width: 10,
            height: 10,
            thickness: 10,
            color: LineColor::B,
        });
        boxed.reverse = true;
        draw_box(&mut img, &boxed);
        assert_eq!(img.get_pixel(5, 5), &WHITE);
        assert_eq!(img.get_pixel(11, 11), &BLACK);
    }

    #[test]
    fn zero_thickness_circle_fills() {
        let mut img = canvas();
        draw_circle(
            &mut img,
            &element(ElementKind::Circle {
                diameter: 20,
                thickness: 0,
                color: LineColor::B,
            }),
        );
        // center at (10, 10)
        assert_eq!(img.get_pixel(10, 10), &BLACK);
    }

    #[test]
    fn ring_circle_keeps_the_center_clear() {
        let mut img = canvas();
        draw_circle(
            &mut img,
            &element(ElementKind::Circle {
                diameter: 20,
                thickness: 3,
                color: LineColor::B,
            }),
        );
        assert_eq!(img.get_pixel(10, 10), &WHITE);
        assert_eq!(img.get_pixel(10, 0), &BLACK);
    }

    #[test]
    fn diagonal_connects_the_corners() {
        let mut img = canvas();
        draw_diagonal(
            &mut img,
            &element(ElementKind::Diagonal {
                width: 20,
                height: 20,
                thickness: 1,
                color: LineColor::B,
            }),
        );
        assert_eq!(img.get_pixel(0, 0), &BLACK);
        assert_eq!(img.get_pixel(10, 10), &BLACK);
    }
}
