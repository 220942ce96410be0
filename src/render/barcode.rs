use std::collections::HashMap;

use ab_glyph::PxScale;
use image::{imageops, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use rxing::common::BitMatrix;
use rxing::{BarcodeFormat, EncodeHintType, EncodeHintValue, EncodeHints, MultiFormatWriter, Writer};

use super::{code39, overlay_rotated, scale_to_render_size, text, BLACK, WHITE};
use crate::engine::{registry, BarcodeOptions, BarcodeType, Element, ElementKind};
use crate::{ZplError, ZplResult};

pub(super) fn prepare(element: &mut Element) {
    let ElementKind::Barcode {
        code_type,
        ref text,
        height,
        module_width,
        ratio,
        ref options,
        interpretation_line,
        interpretation_above,
    } = element.kind
    else {
        return;
    };

    let generated = match code_type {
        BarcodeType::Code39 => Ok(native_code39(
            text,
            module_width,
            ratio,
            height,
            interpretation_line,
            interpretation_above,
        )),
        BarcodeType::QrCode | BarcodeType::DataMatrix => {
            matrix_bitmap(code_type, text, options, module_width)
        }
        _ => delegated_bitmap(
            code_type,
            text,
            height,
            module_width,
            options,
            interpretation_line,
            interpretation_above,
        ),
    };

    match generated {
        Ok(mut bitmap) => {
            if element.reverse {
                invert(&mut bitmap);
            }
            if code_type == BarcodeType::Pdf417 && height > 0 && bitmap.height() > 0 {
                // multi-row symbols scale uniformly to the requested height
                let factor = height as f32 / bitmap.height() as f32;
                element.render_width = Some((bitmap.width() as f32 * factor).round() as u32);
                element.render_height = Some(height);
            } else {
                element.render_width = Some(bitmap.width());
                element.render_height = Some(bitmap.height());
            }
            element.bitmap = Some(bitmap);
        }
        Err(err) => {
            tracing::warn!(
                target: crate::TARGET,
                "barcode engine failure for {:?}: {}",
                code_type,
                err
            );
            element.render_width = Some(text.chars().count() as u32 * module_width * 10);
            element.render_height = Some(if height > 0 { height } else { 50 });
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

/// Code 39 is generated natively: uppercase, `*`-wrapped, laid out by the
/// pattern table with an optional interpretation area carved out of the
/// element height.
fn native_code39(
    data: &str,
    module_width: u32,
    ratio: f32,
    height: u32,
    interpretation_line: bool,
    interpretation_above: bool,
) -> RgbaImage {
    let display = format!("*{}*", data.to_uppercase());
    let total_height = height.max(1);
    let text_area = interpretation_area(total_height, interpretation_line);
    let bar_height = total_height.saturating_sub(text_area).max(1);

    let bars = code39::bars(&display, module_width, ratio, bar_height);
    if text_area == 0 {
        return bars;
    }
    compose_with_text(bars, &display, text_area, interpretation_above)
}

/// Every symbology other than Code 39 delegates to the `rxing` writer and
/// lays the returned bit matrix out at the element's module width.
fn delegated_bitmap(
    code_type: BarcodeType,
    data: &str,
    height: u32,
    module_width: u32,
    options: &BarcodeOptions,
    interpretation_line: bool,
    interpretation_above: bool,
) -> ZplResult<RgbaImage> {
    let matrix = encode_matrix(code_type, data, options)?;
    let module = module_width.max(1);
    let (grid_w, grid_h) = (matrix.getWidth(), matrix.getHeight());
    if grid_w == 0 || grid_h == 0 {
        return Err(ZplError::BarcodeError("empty bit matrix".to_owned()));
    }

    if grid_h > 1 {
        // multi-row symbology (PDF417): square cells at module width
        let mut canvas =
            RgbaImage::from_pixel(grid_w * module, grid_h * module, WHITE);
        for gy in 0..grid_h {
            for gx in 0..grid_w {
                if matrix.get(gx, gy) {
                    draw_filled_rect_mut(
                        &mut canvas,
                        Rect::at((gx * module) as i32, (gy * module) as i32)
                            .of_size(module, module),
                        BLACK,
                    );
                }
            }
        }
        return Ok(canvas);
    }

    let total_height = if height > 0 { height } else { 50 };
    let text_area = interpretation_area(total_height, interpretation_line);
    let bar_height = total_height.saturating_sub(text_area).max(1);

    let mut bars = RgbaImage::from_pixel(grid_w * module, bar_height, WHITE);
    for gx in 0..grid_w {
        if matrix.get(gx, 0) {
            draw_filled_rect_mut(
                &mut bars,
                Rect::at((gx * module) as i32, 0).of_size(module, bar_height),
                BLACK,
            );
        }
    }

    if text_area == 0 {
        Ok(bars)
    } else {
        Ok(compose_with_text(bars, data, text_area, interpretation_above))
    }
}

/// Matrix symbologies ignore bar height and size by magnification.
fn matrix_bitmap(
    code_type: BarcodeType,
    data: &str,
    options: &BarcodeOptions,
    module_width: u32,
) -> ZplResult<RgbaImage> {
    let matrix = encode_matrix(code_type, data, options)?;
    let scale = options.scale.unwrap_or(module_width).max(1);
    let (grid_w, grid_h) = (matrix.getWidth(), matrix.getHeight());
    if grid_w == 0 || grid_h == 0 {
        return Err(ZplError::BarcodeError("empty bit matrix".to_owned()));
    }

    let mut canvas = RgbaImage::from_pixel(grid_w * scale, grid_h * scale, WHITE);
    for gy in 0..grid_h {
        for gx in 0..grid_w {
            if matrix.get(gx, gy) {
                draw_filled_rect_mut(
                    &mut canvas,
                    Rect::at((gx * scale) as i32, (gy * scale) as i32).of_size(scale, scale),
                    BLACK,
                );
            }
        }
    }
    Ok(canvas)
}

fn encode_matrix(
    code_type: BarcodeType,
    data: &str,
    options: &BarcodeOptions,
) -> ZplResult<BitMatrix> {
    let format = match code_type {
        BarcodeType::Code39 => BarcodeFormat::CODE_39,
        BarcodeType::Code128 => BarcodeFormat::CODE_128,
        BarcodeType::Ean13 => BarcodeFormat::EAN_13,
        BarcodeType::Code93 => BarcodeFormat::CODE_93,
        BarcodeType::Interleaved2of5 => BarcodeFormat::ITF,
        BarcodeType::QrCode => BarcodeFormat::QR_CODE,
        BarcodeType::DataMatrix => BarcodeFormat::DATA_MATRIX,
        BarcodeType::Pdf417 => BarcodeFormat::PDF_417,
    };

    let mut hints = HashMap::new();
    hints.insert(
        EncodeHintType::MARGIN,
        EncodeHintValue::Margin("0".to_owned()),
    );
    if code_type == BarcodeType::QrCode {
        let level = match options.ecc_level {
            Some('L') => "L",
            Some('Q') => "Q",
            Some('H') => "H",
            _ => "M",
        };
        hints.insert(
            EncodeHintType::ERROR_CORRECTION,
            EncodeHintValue::ErrorCorrection(level.to_owned()),
        );
    }
    let hints = EncodeHints::from(hints);

    MultiFormatWriter
        .encode_with_hints(data, &format, 0, 0, &hints)
        .map_err(|e| ZplError::BarcodeError(e.to_string()))
}

/// Dots reserved for the interpretation line within the element height.
fn interpretation_area(height: u32, interpretation_line: bool) -> u32 {
    if interpretation_line {
        (height as f32 * 0.2).floor() as u32 + 4
    } else {
        0
    }
}

/// Stacks the interpretation line above or below the bars, centered
/// horizontally.
fn compose_with_text(bars: RgbaImage, label: &str, text_area: u32, above: bool) -> RgbaImage {
    let width = bars.width();
    let height = bars.height() + text_area;
    let mut canvas = RgbaImage::from_pixel(width, height, WHITE);

    let (bar_y, text_y) = if above {
        (text_area as i64, 0i64)
    } else {
        (0i64, bars.height() as i64)
    };
    imageops::overlay(&mut canvas, &bars, 0, bar_y);

    if let Some(face) = registry().face_for('0') {
        let font_height = text_area.saturating_sub(2).max(1);
        let scale = PxScale {
            x: font_height as f32 * text::scale_x('0', font_height, 0),
            y: font_height as f32,
        };
        let measured = text::measure(face, label, scale);
        let text_x = ((width as f32 - measured) / 2.0).max(0.0) as i32;
        draw_text_mut(
            &mut canvas,
            BLACK,
            text_x,
            text_y as i32 + 1,
            scale,
            face,
            label,
        );
    }

    canvas
}

fn invert(bitmap: &mut RgbaImage) {
    for pixel in bitmap.pixels_mut() {
        pixel.0[0] = 255 - pixel.0[0];
        pixel.0[1] = 255 - pixel.0[1];
        pixel.0[2] = 255 - pixel.0[2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::commons::Orientation;

    fn barcode_element(code_type: BarcodeType, text: &str, height: u32) -> Element {
        Element::new(
            0,
            0,
            Orientation::N,
            false,
            ElementKind::Barcode {
                code_type,
                text: text.to_owned(),
                height,
                module_width: 2,
                ratio: 2.0,
                options: BarcodeOptions::default(),
                interpretation_line: false,
                interpretation_above: false,
            },
        )
    }

    #[test]
    fn native_code39_prepares_exact_dimensions() {
        let mut element = barcode_element(BarcodeType::Code39, "123", 50);
        prepare(&mut element);
        // "*123*" = 84 modules at 2 dots per module
        assert_eq!(element.render_width, Some(168));
        assert_eq!(element.render_height, Some(50));
        assert!(element.bitmap.is_some());
    }

    #[test]
    fn engine_failure_falls_back_to_placeholder_dimensions() {
        // EAN-13 requires digits; letters make the writer fail
        let mut element = barcode_element(BarcodeType::Ean13, "NOTDIGITS", 40);
        prepare(&mut element);
        assert!(element.bitmap.is_none());
        assert_eq!(element.render_width, Some(9 * 2 * 10));
        assert_eq!(element.render_height, Some(40));
    }

    #[test]
    fn code128_bars_extrude_to_the_element_height() {
        let mut element = barcode_element(BarcodeType::Code128, "ABC123", 60);
        prepare(&mut element);
        assert_eq!(element.render_height, Some(60));
        let bitmap = element.bitmap.expect("code128 should rasterize");
        assert_eq!(bitmap.height(), 60);
        assert!(bitmap.width() > 0);
    }

    #[test]
    fn qr_sizes_by_magnification_not_height() {
        let mut small = barcode_element(BarcodeType::QrCode, "zpl", 300);
        if let ElementKind::Barcode { ref mut options, .. } = small.kind {
            options.scale = Some(3);
        }
        prepare(&mut small);
        let bitmap = small.bitmap.expect("qr should rasterize");
        assert_eq!(bitmap.width(), bitmap.height());
        assert_eq!(bitmap.width() % 3, 0);
        assert_ne!(small.render_height, Some(300));
    }

    #[test]
    fn reverse_inverts_the_prepared_bitmap() {
        let mut element = barcode_element(BarcodeType::Code39, "A", 20);
        element.reverse = true;
        prepare(&mut element);
        let bitmap = element.bitmap.expect("code39 should rasterize");
        // quiet zone is inverted to black
        assert_eq!(bitmap.get_pixel(0, 0), &BLACK);
    }
}
