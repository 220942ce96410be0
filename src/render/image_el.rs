use image::RgbaImage;

use super::{overlay_rotated, scale_to_render_size, BLACK, TRANSPARENT};
use crate::engine::{Element, ElementKind, StoredGraphic};
use crate::tools;

pub(super) fn prepare(element: &mut Element) {
    let ElementKind::Image {
        scale_x,
        scale_y,
        ref graphic,
    } = element.kind
    else {
        return;
    };

    let decoded = graphic.as_deref().and_then(decode_graphic);
    match decoded {
        Some(bitmap) => {
            element.render_width = Some(bitmap.width().saturating_mul(scale_x.max(1)));
            element.render_height = Some(bitmap.height().saturating_mul(scale_y.max(1)));
            element.bitmap = Some(bitmap);
        }
        None => {
            element.render_width = Some(0);
            element.render_height = Some(0);
        }
    }
}

pub(super) fn draw(canvas: &mut RgbaImage, element: &Element) {
    let Some(bitmap) = &element.bitmap else {
        return;
    };
    let Some(scaled) = scale_to_render_size(element, bitmap) else {
        return;
    };
    overlay_rotated(
        canvas,
        &scaled,
        element.orientation,
        element.x as i64,
        element.y as i64,
        0,
        0,
    );
}

/// Decodes a stored graphic into a bitmap. `~DY` objects go through the
/// image codec; `~DG` graphics through the ASCII-hex scheme. Anything
/// that fails to decode leaves the element without a bitmap.
fn decode_graphic(graphic: &StoredGraphic) -> Option<RgbaImage> {
    match graphic {
        StoredGraphic::Encoded { data } => match image::load_from_memory(data) {
            Ok(decoded) => Some(decoded.to_rgba8()),
            Err(err) => {
                tracing::warn!(
                    target: crate::TARGET,
                    "stored object failed to decode: {}",
                    err
                );
                None
            }
        },
        StoredGraphic::Raw {
            total_bytes,
            bytes_per_row,
            data,
        } => raw_bitmap(*total_bytes, *bytes_per_row, data),
        StoredGraphic::Unparsed { .. } => None,
    }
}

/// Expands a `~DG` graphic into a bitmap: one bit per dot, set bits
/// painted black, clear bits transparent.
fn raw_bitmap(total_bytes: u32, bytes_per_row: u32, data: &str) -> Option<RgbaImage> {
    if bytes_per_row == 0 {
        return None;
    }
    let mut bytes = tools::decode_graphic(data, bytes_per_row as usize);
    if total_bytes > 0 {
        bytes.truncate(total_bytes as usize);
    }
    let rows = bytes.len() / bytes_per_row as usize;
    if rows == 0 {
        return None;
    }

    let width = bytes_per_row * 8;
    let mut bitmap = RgbaImage::from_pixel(width, rows as u32, TRANSPARENT);
    for (row, chunk) in bytes.chunks(bytes_per_row as usize).take(rows).enumerate() {
        for (byte_index, byte) in chunk.iter().enumerate() {
            if *byte == 0 {
                continue;
            }
            for bit in 0..8 {
                if byte & (0x80 >> bit) != 0 {
                    let x = byte_index as u32 * 8 + bit;
                    bitmap.put_pixel(x, row as u32, BLACK);
                }
            }
        }
    }
    Some(bitmap)
}
