//! # Rasterizer
//!
//! Paints a label's elements onto an RGBA canvas and encodes it to PNG.
//!
//! Rendering is two-phased: a `prepare` pass lays out every element
//! (measuring text, generating barcode bitmaps, decoding graphics) and
//! annotates it with render dimensions, then the canvas is sized to the
//! union of element bounding boxes and a `draw` pass paints the elements
//! in emission order.

mod barcode;
mod code39;
mod image_el;
mod shapes;
mod text;

use image::{imageops, Rgba, RgbaImage};

use crate::ast::commons::Orientation;
use crate::engine::{Element, ElementKind, Label};
use crate::{ZplError, ZplResult};

pub(crate) const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub(crate) const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub(crate) const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// White margin added to the right and bottom of the content extent.
const MARGIN: u32 = 4;
/// Safety limit to avoid OOM on malformed coordinates.
const MAX_DIM: u32 = 8192;

/// Rasterizes one label to PNG bytes.
pub fn render_label(label: &mut Label) -> ZplResult<Vec<u8>> {
    for element in &mut label.elements {
        prepare(element);
    }

    let (width, height) = canvas_size(&label.elements);
    let mut canvas = RgbaImage::from_pixel(width, height, WHITE);
    for element in &label.elements {
        draw(&mut canvas, element);
    }

    encode_png(&canvas)
}

/// Lays out a single element, attaching render dimensions and any cached
/// bitmap.
fn prepare(element: &mut Element) {
    match element.kind {
        ElementKind::Text { .. } => text::prepare(element),
        ElementKind::Barcode { .. } => barcode::prepare(element),
        ElementKind::Image { .. } => image_el::prepare(element),
        // shapes carry their size in the element itself
        ElementKind::Box { .. } | ElementKind::Circle { .. } | ElementKind::Diagonal { .. } => {}
    }
}

/// Paints a single element onto the canvas.
fn draw(canvas: &mut RgbaImage, element: &Element) {
    match element.kind {
        ElementKind::Text { .. } => text::draw(canvas, element),
        ElementKind::Barcode { .. } => barcode::draw(canvas, element),
        ElementKind::Image { .. } => image_el::draw(canvas, element),
        ElementKind::Box { .. } => shapes::draw_box(canvas, element),
        ElementKind::Circle { .. } => shapes::draw_circle(canvas, element),
        ElementKind::Diagonal { .. } => shapes::draw_diagonal(canvas, element),
    }
}

/// Canvas size covering every element's rotated bounding box plus the
/// margin. An empty extent still yields the minimal 5x5 canvas.
fn canvas_size(elements: &[Element]) -> (u32, u32) {
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for element in elements {
        let (w, h) = footprint(element);
        let (rot_w, rot_h) = match element.orientation {
            Orientation::R | Orientation::B => (h, w),
            Orientation::N | Orientation::I => (w, h),
        };
        max_x = max_x.max(element.x.saturating_add(rot_w));
        max_y = max_y.max(element.y.saturating_add(rot_h));
    }

    (
        max_x.max(1).saturating_add(MARGIN).min(MAX_DIM),
        max_y.max(1).saturating_add(MARGIN).min(MAX_DIM),
    )
}

/// Unrotated size of an element: prepared render dimensions first, the
/// intrinsic shape dimensions second, zero otherwise.
fn footprint(element: &Element) -> (u32, u32) {
    let (intrinsic_w, intrinsic_h) = match element.kind {
        ElementKind::Box { width, height, .. } | ElementKind::Diagonal { width, height, .. } => {
            (width, height)
        }
        ElementKind::Circle { diameter, .. } => (diameter, diameter),
        _ => (0, 0),
    };
    (
        element.render_width.unwrap_or(intrinsic_w),
        element.render_height.unwrap_or(intrinsic_h),
    )
}

fn encode_png(canvas: &RgbaImage) -> ZplResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    canvas
        .write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| ZplError::EncodeError(format!("failed to write PNG: {}", e)))?;
    Ok(bytes)
}

/// Blits `src` rotated about the anchor `(ax, ay)`.
///
/// `(dx, dy)` is the bitmap's local top-left offset from the anchor
/// before rotation, so the call is equivalent to a canvas
/// translate-rotate-draw sequence with the y axis pointing down
/// (R = -90 degrees, I = 180, B = +90). Out-of-canvas regions clip.
pub(crate) fn overlay_rotated(
    canvas: &mut RgbaImage,
    src: &RgbaImage,
    orientation: Orientation,
    ax: i64,
    ay: i64,
    dx: i64,
    dy: i64,
) {
    let (w, h) = (src.width() as i64, src.height() as i64);
    match orientation {
        Orientation::N => imageops::overlay(canvas, src, ax + dx, ay + dy),
        Orientation::R => {
            let rotated = imageops::rotate270(src);
            imageops::overlay(canvas, &rotated, ax + dy, ay - dx - w);
        }
        Orientation::I => {
            let rotated = imageops::rotate180(src);
            imageops::overlay(canvas, &rotated, ax - dx - w, ay - dy - h);
        }
        Orientation::B => {
            let rotated = imageops::rotate90(src);
            imageops::overlay(canvas, &rotated, ax - dy - h, ay + dx);
        }
    }
}

/// Scales a prepared bitmap to the element's render dimensions when they
/// differ, using nearest-neighbor to keep module edges crisp.
pub(crate) fn scale_to_render_size(element: &Element, bitmap: &RgbaImage) -> Option<RgbaImage> {
    let target_w = element.render_width.unwrap_or(bitmap.width());
    let target_h = element.render_height.unwrap_or(bitmap.height());
    if target_w == 0 || target_h == 0 {
        return None;
    }
    if (target_w, target_h) == bitmap.dimensions() {
        return Some(bitmap.clone());
    }
    Some(imageops::resize(
        bitmap,
        target_w,
        target_h,
        imageops::FilterType::Nearest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::commons::LineColor;

    fn boxed(x: u32, y: u32, w: u32, h: u32) -> Element {
        Element::new(
            x,
            y,
            Orientation::N,
            false,
            ElementKind::Box {
                width: w,
                height: h,
                thickness: 1,
                color: LineColor::B,
            },
        )
    }

    #[test]
    fn canvas_covers_the_extent_plus_margin() {
        let elements = vec![boxed(5, 5, 100, 50)];
        assert_eq!(canvas_size(&elements), (109, 59));
    }

    #[test]
    fn empty_extent_still_yields_the_minimal_canvas() {
        assert_eq!(canvas_size(&[]), (5, 5));
    }

    #[test]
    fn rotated_elements_swap_their_footprint() {
        let mut element = boxed(0, 0, 0, 0);
        element.orientation = Orientation::R;
        element.render_width = Some(100);
        element.render_height = Some(30);
        assert_eq!(canvas_size(&[element]), (34, 104));
    }

    #[test]
    fn rotation_blits_land_on_the_anchor_side() {
        let mut canvas = RgbaImage::from_pixel(20, 20, WHITE);
        let mut src = RgbaImage::from_pixel(4, 2, BLACK);
        src.put_pixel(0, 0, Rgba([1, 2, 3, 255]));

        // R: a 4x2 bitmap anchored at (10, 10) occupies x in [10, 12),
        // y in [6, 10), with the original top-left mapped to (10, 9).
        overlay_rotated(&mut canvas, &src, Orientation::R, 10, 10, 0, 0);
        assert_eq!(canvas.get_pixel(10, 9), &Rgba([1, 2, 3, 255]));
        assert_eq!(canvas.get_pixel(11, 6), &BLACK);
        assert_eq!(canvas.get_pixel(12, 9), &WHITE);
        assert_eq!(canvas.get_pixel(10, 10), &WHITE);
    }
}
