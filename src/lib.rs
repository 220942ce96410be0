//! # zpl-raster
//!
//! `zpl-raster` is a server-side renderer for ZPL II (Zebra Programming
//! Language) label documents. It interprets a ZPL program with a virtual
//! printer state machine and rasterizes the resulting elements to a PNG
//! approximating what a Zebra thermal printer would produce.
//!
//! ## Core Features
//! - **Lenient interpreter**: unknown commands and malformed parameters
//!   never abort a label; the analyzer substitutes documented defaults.
//! - **Stateful evaluation**: cursor position, fonts, barcode defaults,
//!   field blocks, reverse printing and the graphic store all behave as
//!   modal printer state.
//! - **Barcodes**: a native Code 39 generator plus Code 128, EAN-13,
//!   Code 93, Interleaved 2 of 5, QR, Data Matrix and PDF417 via `rxing`.
//! - **Content-sized canvas**: the output grows to the union of element
//!   bounding boxes; coordinates are dots, one dot per pixel.
//!
//! ## Quick Start
//!
//! Rendering a simple label to a PNG image:
//!
//! ```rust
//! # fn main() -> zpl_raster::ZplResult<()> {
//! let zpl = "^XA^FO50,50^A0N,50,40^FDZPL Raster^FS^XZ";
//! let png_bytes = zpl_raster::render(zpl)?;
//! assert_eq!(&png_bytes[1..4], b"PNG");
//! # Ok(())
//! # }
//! ```
//!
//! Multi-label documents render their first label through [`render`];
//! callers needing every label use [`analyze`] and [`render_label`].

mod ast;
mod engine;
pub mod error;
mod render;
mod tools;

pub use ast::cmd::Command;
pub use ast::commons::{Justification, LineColor, Orientation, YesNo};
pub use ast::{parse_zpl, tokenize};
pub use engine::{
    analyze, BarcodeDefaults, BarcodeOptions, BarcodeType, Element, ElementKind, FieldBlock,
    FontState, Label, NextPosition, OriginType, PendingBarcode, StoredGraphic, VirtualPrinter,
};
pub use error::{ZplError, ZplResult};
pub use render::render_label;

pub(crate) const TARGET: &str = "zpl-raster";

/// Renders the first label of a ZPL document to PNG bytes.
///
/// # Errors
/// Returns [`ZplError::EmptyDocument`] when the document yields no
/// labels, and an encoding error if the PNG write fails.
pub fn render(zpl: &str) -> ZplResult<Vec<u8>> {
    let mut labels = analyze(zpl);
    let Some(first) = labels.first_mut() else {
        return Err(ZplError::EmptyDocument);
    };
    render_label(first)
}
