use image::{Rgba, RgbaImage};
use zpl_raster::{analyze, render, render_label, ZplError};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn render_to_image(zpl: &str) -> RgbaImage {
    let png = render(zpl).expect("render should succeed");
    image::load_from_memory(&png)
        .expect("output should be a decodable PNG")
        .to_rgba8()
}

#[test]
fn output_is_png() {
    let png = render("^XA^FO5,5^GB10,10,1,B^FS^XZ").expect("render should succeed");
    assert_eq!(&png[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn empty_documents_are_an_error() {
    assert!(matches!(render(""), Err(ZplError::EmptyDocument)));
    assert!(matches!(render("^MMT^PR4"), Err(ZplError::EmptyDocument)));
}

#[test]
fn canvas_covers_the_box_extent_plus_margin() {
    let img = render_to_image("^XA^FO5,5^GB100,50,3,B^FS^XZ");
    assert_eq!(img.dimensions(), (109, 59));
    // border ink, interior left white
    assert_eq!(img.get_pixel(5, 5), &BLACK);
    assert_eq!(img.get_pixel(104, 54), &BLACK);
    assert_eq!(img.get_pixel(55, 30), &WHITE);
}

#[test]
fn border_swallowing_both_dimensions_fills_the_box() {
    let img = render_to_image("^XA^FO0,0^GB10,10,10,B^FS^XZ");
    assert_eq!(img.dimensions(), (14, 14));
    for x in 0..10 {
        for y in 0..10 {
            assert_eq!(img.get_pixel(x, y), &BLACK, "pixel at ({}, {})", x, y);
        }
    }
    assert_eq!(img.get_pixel(12, 12), &WHITE);
}

#[test]
fn undecodable_graphic_renders_the_minimal_canvas() {
    let img =
        render_to_image("^XA~DYR:L.PNG,P,P,4,,,89504E470D0A1A0A^FO0,0^XGR:L.PNG,1,1^FS^XZ");
    assert_eq!(img.dimensions(), (5, 5));
    for pixel in img.pixels() {
        assert_eq!(pixel, &WHITE);
    }
}

#[test]
fn code39_keeps_its_quiet_zones() {
    let img = render_to_image("^XA^BY2,2,50^FO0,0^B3N,N,50,N,N^FD123^FS^XZ");
    // "*123*" is 84 modules at 2 dots per module
    assert_eq!(img.dimensions(), (172, 54));
    for x in 0..20 {
        assert_eq!(img.get_pixel(x, 0), &WHITE, "left quiet zone at {}", x);
        assert_eq!(img.get_pixel(148 + x, 0), &WHITE, "right quiet zone at {}", x);
    }
    assert_eq!(img.get_pixel(20, 0), &BLACK);
    assert_eq!(img.get_pixel(20, 49), &BLACK);
}

#[test]
fn reverse_elements_paint_white_over_black() {
    let img = render_to_image("^XA^FO0,0^GB20,20,20,B^FS^FR^FO5,5^GB10,10,10,B^FS^XZ");
    assert_eq!(img.get_pixel(2, 2), &BLACK);
    assert_eq!(img.get_pixel(10, 10), &WHITE);
}

#[test]
fn rotated_barcodes_swap_the_canvas_footprint() {
    let img = render_to_image("^XA^BY2,2^FO0,0^B3R,N,20,N,N^FD1^FS^XZ");
    // "*1*" is 58 modules at 2 dots per module, rotated: 20 wide, 116 tall
    assert_eq!(img.dimensions(), (24, 120));
}

#[test]
fn failed_delegation_renders_placeholder_whitespace() {
    // letters are not valid EAN-13 data, so the engine fails and the
    // element keeps placeholder dimensions without ink
    let img = render_to_image("^XA^FO0,0^BEN,40,N^FDABC^FS^XZ");
    assert_eq!(img.dimensions(), (64, 44));
    for pixel in img.pixels() {
        assert_eq!(pixel, &WHITE);
    }
}

#[test]
fn code128_renders_ink_at_the_requested_height() {
    let img = render_to_image("^XA^BY2^FO0,0^BCN,60,N,N^FD1234^FS^XZ");
    let (w, h) = img.dimensions();
    assert_eq!(h, 64);
    let black_in_top_row = (0..w).any(|x| img.get_pixel(x, 0) == &BLACK);
    let black_in_last_bar_row = (0..w).any(|x| img.get_pixel(x, 59) == &BLACK);
    assert!(black_in_top_row && black_in_last_bar_row);
}

#[test]
fn qr_renders_square_modules() {
    let labels = analyze("^XA^FO0,0^BQN,4,M^FDZPL^FS^XZ");
    let mut label = labels.into_iter().next().expect("one label");
    let png = render_label(&mut label).expect("render should succeed");
    let element = &label.elements[0];
    let width = element.render_width.expect("prepared width");
    let height = element.render_height.expect("prepared height");
    assert_eq!(width, height);
    assert_eq!(width % 4, 0);

    let img = image::load_from_memory(&png).expect("decodable").to_rgba8();
    assert_eq!(img.dimensions(), (width + 4, height + 4));
    // a QR symbol always starts with its finder pattern in the corner
    assert_eq!(img.get_pixel(0, 0), &BLACK);
}

#[test]
fn raw_graphic_recall_draws_the_bitmap() {
    // 8x2 all-ink graphic magnified 2x
    let img = render_to_image("^XA~DGR:X.GRF,2,1,FFFF^FO0,0^XGR:X.GRF,2,2^FS^XZ");
    assert_eq!(img.dimensions(), (20, 8));
    assert_eq!(img.get_pixel(0, 0), &BLACK);
    assert_eq!(img.get_pixel(15, 3), &BLACK);
    assert_eq!(img.get_pixel(17, 1), &WHITE);
}

#[test]
fn multi_label_documents_render_the_first_label_only() {
    let png = render("^XA^FO0,0^GB10,10,10,B^FS^XZ^XA^FO0,0^GB30,30,30,B^FS^XZ")
        .expect("render should succeed");
    let img = image::load_from_memory(&png).expect("decodable").to_rgba8();
    assert_eq!(img.dimensions(), (14, 14));
}

#[test]
fn text_rendering_is_a_safe_noop_without_assertions_on_glyphs() {
    // glyph output depends on the host's DejaVu faces; rendering must
    // succeed either way
    let png = render("^XA^FO10,10^A0N,30,20^FDHI^FS^XZ").expect("render should succeed");
    assert!(!png.is_empty());
}
