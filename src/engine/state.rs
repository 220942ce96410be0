//! # Virtual Printer State
//!
//! The mutable state the evaluator maintains to disambiguate sequential
//! commands. One-shot values (`next_position`, `reverse_next`,
//! `pending_barcode`, `field_block`) are modeled as explicit options with
//! consume-and-clear helpers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::commons::{Justification, Orientation};
use crate::engine::element::{BarcodeOptions, BarcodeType, OriginType, StoredGraphic};

/// An armed field position awaiting the next element-producing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPosition {
    /// Absolute X in dots (label home applied).
    pub x: u32,
    /// Absolute Y in dots (label home applied).
    pub y: u32,
    /// Bottom justification flag, accepted but not interpreted.
    pub bottom: bool,
    /// Top-left (`^FO`) or baseline (`^FT`) addressing.
    pub origin: OriginType,
}

/// Current font configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontState {
    pub name: char,
    pub orientation: Orientation,
    pub height: u32,
    pub width: u32,
}

impl Default for FontState {
    fn default() -> Self {
        Self {
            name: '0',
            orientation: Orientation::N,
            height: 10,
            width: 0,
        }
    }
}

/// Defaults set by `^BY` and inherited by barcode type commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarcodeDefaults {
    pub module_width: u32,
    pub ratio: f32,
    pub height: u32,
}

impl Default for BarcodeDefaults {
    fn default() -> Self {
        Self {
            module_width: 2,
            ratio: 3.0,
            height: 50,
        }
    }
}

/// A barcode type command awaiting its `^FD` data.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBarcode {
    pub code_type: BarcodeType,
    pub orientation: Orientation,
    /// Bar height override; `None` inherits the barcode defaults.
    pub height: Option<u32>,
    /// Module width override (PDF417 only).
    pub module_width: Option<u32>,
    pub interpretation_line: bool,
    pub interpretation_above: bool,
    pub options: BarcodeOptions,
}

/// Field block formatting set by `^FB`, consumed by the next text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBlock {
    pub width: u32,
    pub lines: u32,
    pub line_spacing: u32,
    pub align: Justification,
    pub indent: u32,
}

/// The virtual printer: one instance per document, reset on every `^XA`.
#[derive(Debug, Default)]
pub struct VirtualPrinter {
    pub next_position: Option<NextPosition>,
    pub label_home: (u32, u32),
    pub font: FontState,
    pub field_orientation: Option<Orientation>,
    pub barcode_defaults: BarcodeDefaults,
    pub pending_barcode: Option<PendingBarcode>,
    pub field_block: Option<FieldBlock>,
    pub reverse_next: bool,
    /// Graphic store keyed by device-qualified name. Survives `reset()`:
    /// device storage outlives any single label format.
    pub graphics: HashMap<String, Arc<StoredGraphic>>,
}

impl VirtualPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the printer to its power-on state, keeping the graphic store.
    pub fn reset(&mut self) {
        self.next_position = None;
        self.label_home = (0, 0);
        self.font = FontState::default();
        self.field_orientation = None;
        self.barcode_defaults = BarcodeDefaults::default();
        self.pending_barcode = None;
        self.field_block = None;
        self.reverse_next = false;
    }

    /// Consumes the armed position.
    pub fn take_position(&mut self) -> Option<NextPosition> {
        self.next_position.take()
    }

    /// Consumes the one-shot reverse flag.
    pub fn take_reverse(&mut self) -> bool {
        std::mem::take(&mut self.reverse_next)
    }

    /// Consumes the pending barcode spec.
    pub fn take_pending_barcode(&mut self) -> Option<PendingBarcode> {
        self.pending_barcode.take()
    }

    /// Consumes the armed field block.
    pub fn take_field_block(&mut self) -> Option<FieldBlock> {
        self.field_block.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_the_graphic_store() {
        let mut printer = VirtualPrinter::new();
        printer.graphics.insert(
            "R:LOGO.PNG".to_owned(),
            Arc::new(StoredGraphic::Unparsed {
                data: "XY".to_owned(),
            }),
        );
        printer.reverse_next = true;
        printer.label_home = (10, 10);

        printer.reset();

        assert!(!printer.reverse_next);
        assert_eq!(printer.label_home, (0, 0));
        assert_eq!(printer.font, FontState::default());
        assert!(printer.graphics.contains_key("R:LOGO.PNG"));
    }

    #[test]
    fn one_shot_state_is_consumed_and_cleared() {
        let mut printer = VirtualPrinter::new();
        printer.reverse_next = true;
        assert!(printer.take_reverse());
        assert!(!printer.take_reverse());

        printer.next_position = Some(NextPosition {
            x: 5,
            y: 6,
            bottom: false,
            origin: OriginType::TopLeft,
        });
        assert!(printer.take_position().is_some());
        assert!(printer.take_position().is_none());
    }
}
