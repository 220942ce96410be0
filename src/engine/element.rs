use std::sync::Arc;

use image::RgbaImage;

use crate::ast::commons::{Justification, LineColor, Orientation};

/// How an armed position addresses the element placed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginType {
    /// `^FO`: the position is the element's top-left corner.
    #[default]
    TopLeft,
    /// `^FT`: the position is the text baseline.
    Baseline,
}

/// Symbologies a `Barcode` element can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeType {
    Code39,
    Code128,
    Ean13,
    Code93,
    Interleaved2of5,
    QrCode,
    DataMatrix,
    Pdf417,
}

impl BarcodeType {
    /// Matrix symbologies size by a magnification scale instead of module
    /// width and bar height.
    pub fn is_matrix(self) -> bool {
        matches!(self, BarcodeType::QrCode | BarcodeType::DataMatrix)
    }
}

/// Code-specific parameters collected from the `^Bx` command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarcodeOptions {
    /// Magnification for matrix symbologies (dots per module).
    pub scale: Option<u32>,
    /// QR error correction level (L, M, Q, H).
    pub ecc_level: Option<char>,
    /// Code 128 mode parameter.
    pub mode: Option<char>,
    /// PDF417 security level.
    pub security_level: Option<u32>,
    /// PDF417 data columns.
    pub columns: Option<u32>,
    /// PDF417 rows.
    pub rows: Option<u32>,
    /// PDF417 row height in dots.
    pub row_height: Option<u32>,
    /// PDF417 truncated symbol flag.
    pub truncated: bool,
}

/// An object held in the printer's graphic store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredGraphic {
    /// `~DG` ASCII-hex graphic, kept encoded until recall.
    Raw {
        total_bytes: u32,
        bytes_per_row: u32,
        data: String,
    },
    /// `~DY` object whose hex payload decoded cleanly (PNG in practice).
    Encoded { data: Vec<u8> },
    /// `~DY` payload that failed to decode; treated as unavailable.
    Unparsed { data: String },
}

/// A positioned drawable primitive produced by the analyzer.
///
/// Elements are immutable after emission except for the prepared render
/// dimensions and cached bitmap the rasterizer attaches before layout.
#[derive(Debug, Clone)]
pub struct Element {
    /// X coordinate in dots from the canvas origin (label home applied).
    pub x: u32,
    /// Y coordinate in dots from the canvas origin.
    pub y: u32,
    /// Rotation about the element anchor.
    pub orientation: Orientation,
    /// White-ink printing armed by `^FR`.
    pub reverse: bool,
    /// Width in dots after preparation.
    pub render_width: Option<u32>,
    /// Height in dots after preparation.
    pub render_height: Option<u32>,
    /// Bitmap cached by the prepare pass (barcodes, recalled graphics).
    pub(crate) bitmap: Option<RgbaImage>,
    pub kind: ElementKind,
}

impl Element {
    pub(crate) fn new(
        x: u32,
        y: u32,
        orientation: Orientation,
        reverse: bool,
        kind: ElementKind,
    ) -> Self {
        Self {
            x,
            y,
            orientation,
            reverse,
            render_width: None,
            render_height: None,
            bitmap: None,
            kind,
        }
    }
}

/// The per-variant payload of an [`Element`].
#[derive(Debug, Clone)]
pub enum ElementKind {
    Text {
        /// The `^FD` payload (or one wrapped line of it), verbatim.
        text: String,
        /// ZPL font designator.
        font_name: char,
        /// Character height in dots.
        height: u32,
        /// Character width in dots (0 = font default).
        width: u32,
        /// How `(x, y)` addresses the glyphs.
        origin: OriginType,
        /// Field-block width carried for alignment at draw time.
        block_width: Option<u32>,
        /// Field-block justification.
        block_align: Option<Justification>,
    },
    Barcode {
        code_type: BarcodeType,
        text: String,
        /// Bar height in dots.
        height: u32,
        /// Narrow module width in dots.
        module_width: u32,
        /// Wide-to-narrow ratio.
        ratio: f32,
        options: BarcodeOptions,
        /// Draw the human-readable interpretation line.
        interpretation_line: bool,
        /// Interpretation line above instead of below.
        interpretation_above: bool,
    },
    Box {
        width: u32,
        height: u32,
        thickness: u32,
        color: LineColor,
    },
    Circle {
        diameter: u32,
        thickness: u32,
        color: LineColor,
    },
    Diagonal {
        width: u32,
        height: u32,
        thickness: u32,
        color: LineColor,
    },
    Image {
        /// Horizontal magnification.
        scale_x: u32,
        /// Vertical magnification.
        scale_y: u32,
        /// The recalled graphic, if the store held one under the name.
        graphic: Option<Arc<StoredGraphic>>,
    },
}

/// One `^XA…^XZ` section: the unit of rendering.
#[derive(Debug, Clone, Default)]
pub struct Label {
    pub elements: Vec<Element>,
}
