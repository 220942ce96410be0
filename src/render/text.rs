use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::RgbaImage;
use imageproc::drawing::draw_text_mut;

use super::{overlay_rotated, BLACK, TRANSPARENT, WHITE};
use crate::ast::commons::Justification;
use crate::engine::{registry, Element, ElementKind, OriginType};

/// Horizontal compression factor for a text element.
///
/// Font `'0'` with an unspecified width condenses to 0.65; an explicit
/// width/height pair gives their ratio. These constants are part of the
/// observable contract of the renderer.
pub(crate) fn scale_x(font_name: char, height: u32, width: u32) -> f32 {
    if font_name == '0' && width == 0 {
        0.65
    } else if width > 0 && height > 0 {
        width as f32 / height as f32
    } else {
        1.0
    }
}

/// Advance-plus-kerning width of `text` at the given scale.
pub(crate) fn measure(face: &FontArc, text: &str, scale: PxScale) -> f32 {
    let scaled = face.as_scaled(scale);
    let mut width = 0.0;
    let mut last = None;
    for c in text.chars() {
        let id = face.glyph_id(c);
        if let Some(prev) = last {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        last = Some(id);
    }
    width
}

pub(super) fn prepare(element: &mut Element) {
    let ElementKind::Text {
        ref text,
        font_name,
        height,
        width,
        ..
    } = element.kind
    else {
        return;
    };

    element.render_height = Some(height);
    let Some(face) = registry().face_for(font_name) else {
        element.render_width = Some(0);
        return;
    };

    let scale = PxScale {
        x: height as f32 * scale_x(font_name, height, width),
        y: height as f32,
    };
    element.render_width = Some(measure(face, text, scale).ceil() as u32);
}

pub(super) fn draw(canvas: &mut RgbaImage, element: &Element) {
    let ElementKind::Text {
        ref text,
        font_name,
        height,
        width,
        origin,
        block_width,
        block_align,
    } = element.kind
    else {
        return;
    };
    if text.is_empty() || height == 0 {
        return;
    }
    let Some(face) = registry().face_for(font_name) else {
        return;
    };

    let scale = PxScale {
        x: height as f32 * scale_x(font_name, height, width),
        y: height as f32,
    };

    let base_y = match origin {
        OriginType::TopLeft => element.y as i64 + height as i64,
        OriginType::Baseline => element.y as i64,
    };
    let mut base_x = element.x as i64;
    if let (Some(block_width), Some(align)) = (block_width, block_align) {
        let actual = element.render_width.unwrap_or(0) as i64;
        base_x += match align {
            Justification::C => (block_width as i64 - actual) / 2,
            Justification::R => block_width as i64 - actual,
            Justification::L | Justification::J => 0,
        };
    }

    let ink = if element.reverse { WHITE } else { BLACK };
    let scaled = face.as_scaled(scale);
    let ascent = scaled.ascent();

    // rasterize into a transparent buffer, then rotate about the baseline
    // anchor; the extra pixels absorb the thickening offsets
    let buffer_w = element.render_width.unwrap_or(0).max(1) + 2;
    let buffer_h = scaled.height().ceil() as u32 + 2;
    let mut buffer = RgbaImage::from_pixel(buffer_w, buffer_h, TRANSPARENT);
    draw_text_mut(&mut buffer, ink, 0, 0, scale, face, text);
    if font_name == '0' {
        // triple-draw thickens the substitute face towards Zebra's font 0
        draw_text_mut(&mut buffer, ink, 1, 0, scale, face, text);
        draw_text_mut(&mut buffer, ink, 0, 1, scale, face, text);
    }

    overlay_rotated(
        canvas,
        &buffer,
        element.orientation,
        base_x,
        base_y,
        0,
        -(ascent.round() as i64),
    );
}
