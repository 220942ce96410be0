use std::sync::Arc;

use crate::ast::cmd::Command;
use crate::ast::commons::Orientation;
use crate::ast::parse_zpl;
use crate::engine::element::{
    BarcodeOptions, BarcodeType, Element, ElementKind, Label, OriginType, StoredGraphic,
};
use crate::engine::state::{FieldBlock, NextPosition, PendingBarcode, VirtualPrinter};

/// Analyzes a ZPL document into its labels.
///
/// Never fails: the evaluator ignores what it does not understand and
/// substitutes documented defaults for malformed parameters. A document
/// without `^XZ` but with emitted elements yields one trailing label.
pub fn analyze(zpl: &str) -> Vec<Label> {
    LabelBuilder::new().run(parse_zpl(zpl))
}

/// Walks the command stream, mutating the virtual printer and emitting
/// elements; `^XZ` closes the element buffer into a label.
struct LabelBuilder {
    printer: VirtualPrinter,
    elements: Vec<Element>,
    labels: Vec<Label>,
}

impl LabelBuilder {
    fn new() -> Self {
        Self {
            printer: VirtualPrinter::new(),
            elements: Vec::new(),
            labels: Vec::new(),
        }
    }

    fn run(mut self, commands: Vec<Command>) -> Vec<Label> {
        for command in commands {
            self.eval(command);
        }
        if !self.elements.is_empty() {
            self.labels.push(Label {
                elements: std::mem::take(&mut self.elements),
            });
        }
        self.labels
    }

    fn eval(&mut self, command: Command) {
        match command {
            Command::StartFormat => {
                self.printer.reset();
                self.elements.clear();
            }

            Command::EndFormat => {
                self.labels.push(Label {
                    elements: std::mem::take(&mut self.elements),
                });
                self.printer.next_position = None;
                self.printer.pending_barcode = None;
                self.printer.field_block = None;
            }

            Command::LabelHome { x, y } => {
                self.printer.label_home = (x.unwrap_or(0), y.unwrap_or(0));
            }

            Command::FieldOrigin { x, y, bottom } => {
                self.arm_position(x, y, bottom, OriginType::TopLeft);
            }

            Command::FieldTypeset { x, y, bottom } => {
                self.arm_position(x, y, bottom, OriginType::Baseline);
            }

            Command::FieldSeparator => {
                self.printer.next_position = None;
                self.printer.pending_barcode = None;
            }

            Command::FieldReverse => {
                self.printer.reverse_next = true;
            }

            Command::FieldOrientation { orientation } => {
                self.printer.field_orientation = Some(orientation);
            }

            Command::FontSpec {
                name,
                orientation,
                height,
                width,
            } => {
                self.printer.font.name = name;
                self.printer.font.orientation = self
                    .printer
                    .field_orientation
                    .or(orientation)
                    .unwrap_or_default();
                if let Some(h) = height {
                    self.printer.font.height = h;
                }
                if let Some(w) = width {
                    self.printer.font.width = w;
                }
            }

            Command::FontDefault {
                name,
                height,
                width,
            } => {
                if let Some(n) = name {
                    self.printer.font.name = n;
                }
                if let Some(h) = height {
                    self.printer.font.height = h;
                }
                if let Some(w) = width {
                    self.printer.font.width = w;
                }
            }

            Command::FieldBlock {
                width,
                lines,
                line_spacing,
                justification,
                indent,
            } => {
                self.printer.field_block = Some(FieldBlock {
                    width: width.unwrap_or(0),
                    lines: lines.unwrap_or(0),
                    line_spacing: line_spacing.unwrap_or(0),
                    align: justification.unwrap_or_default(),
                    indent: indent.unwrap_or(0),
                });
            }

            Command::BarcodeDefaults {
                module_width,
                ratio,
                height,
            } => {
                if let Some(w) = module_width {
                    self.printer.barcode_defaults.module_width = w;
                }
                if let Some(r) = ratio {
                    self.printer.barcode_defaults.ratio = r;
                }
                if let Some(h) = height {
                    self.printer.barcode_defaults.height = h;
                }
            }

            Command::Code128 {
                orientation,
                height,
                interpretation_line,
                interpretation_above,
                mode,
            } => {
                self.arm_barcode(
                    BarcodeType::Code128,
                    orientation,
                    height,
                    interpretation_line.map(bool::from).unwrap_or(true),
                    interpretation_above.map(bool::from).unwrap_or(false),
                    BarcodeOptions {
                        mode,
                        ..BarcodeOptions::default()
                    },
                );
            }

            Command::Code39 {
                orientation,
                check_digit: _,
                height,
                interpretation_line,
                interpretation_above,
            } => {
                self.arm_barcode(
                    BarcodeType::Code39,
                    orientation,
                    height,
                    interpretation_line.map(bool::from).unwrap_or(true),
                    interpretation_above.map(bool::from).unwrap_or(false),
                    BarcodeOptions::default(),
                );
            }

            Command::Ean13 {
                orientation,
                height,
                interpretation_line,
                interpretation_above,
            } => {
                self.arm_barcode(
                    BarcodeType::Ean13,
                    orientation,
                    height,
                    interpretation_line.map(bool::from).unwrap_or(true),
                    interpretation_above.map(bool::from).unwrap_or(false),
                    BarcodeOptions::default(),
                );
            }

            Command::Code93 {
                orientation,
                height,
                interpretation_line,
                interpretation_above,
            } => {
                self.arm_barcode(
                    BarcodeType::Code93,
                    orientation,
                    height,
                    interpretation_line.map(bool::from).unwrap_or(true),
                    interpretation_above.map(bool::from).unwrap_or(false),
                    BarcodeOptions::default(),
                );
            }

            Command::Interleaved2of5 {
                orientation,
                height,
                interpretation_line,
                interpretation_above,
            } => {
                self.arm_barcode(
                    BarcodeType::Interleaved2of5,
                    orientation,
                    height,
                    interpretation_line.map(bool::from).unwrap_or(true),
                    interpretation_above.map(bool::from).unwrap_or(false),
                    BarcodeOptions::default(),
                );
            }

            Command::QrCode {
                orientation,
                scale,
                ecc_level,
            } => {
                self.arm_barcode(
                    BarcodeType::QrCode,
                    orientation,
                    None,
                    false,
                    false,
                    BarcodeOptions {
                        scale,
                        ecc_level,
                        ..BarcodeOptions::default()
                    },
                );
            }

            Command::DataMatrix { orientation, scale } => {
                self.arm_barcode(
                    BarcodeType::DataMatrix,
                    orientation,
                    None,
                    false,
                    false,
                    BarcodeOptions {
                        scale,
                        ..BarcodeOptions::default()
                    },
                );
            }

            Command::Pdf417 {
                orientation,
                module_width,
                security_level,
                columns,
                rows,
                row_height,
                truncated,
            } => {
                let options = BarcodeOptions {
                    security_level,
                    columns,
                    rows,
                    row_height,
                    truncated: truncated.map(bool::from).unwrap_or(false),
                    ..BarcodeOptions::default()
                };
                self.printer.pending_barcode = Some(PendingBarcode {
                    code_type: BarcodeType::Pdf417,
                    orientation,
                    height: None,
                    module_width,
                    interpretation_line: false,
                    interpretation_above: false,
                    options,
                });
            }

            Command::GraphicBox {
                width,
                height,
                thickness,
                color,
            } => {
                self.emit_shape(ElementKind::Box {
                    width: width.unwrap_or(0),
                    height: height.unwrap_or(0),
                    thickness: thickness.unwrap_or(1),
                    color: color.unwrap_or_default(),
                });
            }

            Command::GraphicCircle {
                diameter,
                thickness,
                color,
            } => {
                self.emit_shape(ElementKind::Circle {
                    diameter: diameter.unwrap_or(0),
                    thickness: thickness.unwrap_or(0),
                    color: color.unwrap_or_default(),
                });
            }

            Command::GraphicDiagonal {
                width,
                height,
                thickness,
                color,
            } => {
                self.emit_shape(ElementKind::Diagonal {
                    width: width.unwrap_or(0),
                    height: height.unwrap_or(0),
                    thickness: thickness.unwrap_or(1),
                    color: color.unwrap_or_default(),
                });
            }

            Command::FieldData { data } => self.field_data(data),

            Command::DownloadGraphic {
                name,
                total_bytes,
                bytes_per_row,
                data,
            } => {
                self.printer.graphics.insert(
                    name,
                    Arc::new(StoredGraphic::Raw {
                        total_bytes: total_bytes.unwrap_or(0),
                        bytes_per_row: bytes_per_row.unwrap_or(0),
                        data,
                    }),
                );
            }

            Command::DownloadObject { name, data } => {
                let stored = match hex::decode(&data) {
                    Ok(bytes) => StoredGraphic::Encoded { data: bytes },
                    Err(err) => {
                        tracing::debug!(
                            target: crate::TARGET,
                            "~DY payload for {} is not valid hex ({}), storing raw",
                            name,
                            err
                        );
                        StoredGraphic::Unparsed { data }
                    }
                };
                self.printer.graphics.insert(name, Arc::new(stored));
            }

            Command::ImageMove { name } => self.recall_graphic(&name, 1, 1),

            Command::RecallGraphic {
                name,
                scale_x,
                scale_y,
            } => self.recall_graphic(&name, scale_x.unwrap_or(1), scale_y.unwrap_or(1)),

            Command::Unsupported { designator } => {
                tracing::debug!(
                    target: crate::TARGET,
                    "ignoring unsupported command {}",
                    designator
                );
            }
        }
    }

    fn arm_position(&mut self, x: Option<u32>, y: Option<u32>, bottom: Option<u32>, origin: OriginType) {
        let (home_x, home_y) = self.printer.label_home;
        self.printer.next_position = Some(NextPosition {
            x: home_x.saturating_add(x.unwrap_or(0)),
            y: home_y.saturating_add(y.unwrap_or(0)),
            bottom: bottom.unwrap_or(0) != 0,
            origin,
        });
    }

    fn arm_barcode(
        &mut self,
        code_type: BarcodeType,
        orientation: Orientation,
        height: Option<u32>,
        interpretation_line: bool,
        interpretation_above: bool,
        options: BarcodeOptions,
    ) {
        self.printer.pending_barcode = Some(PendingBarcode {
            code_type,
            orientation,
            height,
            module_width: None,
            interpretation_line,
            interpretation_above,
            options,
        });
    }

    /// Shapes fall back to the canvas origin when no position is armed.
    fn emit_shape(&mut self, kind: ElementKind) {
        let position = self.printer.take_position();
        let (x, y) = position.map(|p| (p.x, p.y)).unwrap_or((0, 0));
        let reverse = self.printer.take_reverse();
        self.elements
            .push(Element::new(x, y, Orientation::N, reverse, kind));
    }

    /// `^FD`: a barcode if one is pending, otherwise text (wrapped when a
    /// field block is armed). Always consumes the armed position.
    fn field_data(&mut self, data: String) {
        let position = self.printer.take_position();
        let (x, y) = position.map(|p| (p.x, p.y)).unwrap_or((0, 0));
        let origin = position.map(|p| p.origin).unwrap_or_default();
        let reverse = self.printer.take_reverse();

        if let Some(pending) = self.printer.take_pending_barcode() {
            let defaults = self.printer.barcode_defaults;
            self.elements.push(Element::new(
                x,
                y,
                pending.orientation,
                reverse,
                ElementKind::Barcode {
                    code_type: pending.code_type,
                    text: data,
                    height: pending.height.unwrap_or(defaults.height),
                    module_width: pending.module_width.unwrap_or(defaults.module_width),
                    ratio: defaults.ratio,
                    options: pending.options,
                    interpretation_line: pending.interpretation_line,
                    interpretation_above: pending.interpretation_above,
                },
            ));
            return;
        }

        let font = self.printer.font;
        if let Some(block) = self.printer.take_field_block() {
            let mut lines = wrap_lines(&data, &block, font.height, font.name, font.width);
            if block.lines > 0 && lines.len() as u32 > block.lines {
                lines.truncate(block.lines as usize);
            }
            let produced = lines.len() as u32;
            let step = font.height.saturating_add(block.line_spacing);
            let offset_y = if block.lines > produced {
                let allowed_extent = block.lines as i64 * step as i64 - block.line_spacing as i64;
                let produced_extent = produced as i64 * step as i64 - block.line_spacing as i64;
                ((allowed_extent - produced_extent) / 2).max(0) as u32
            } else {
                0
            };

            for (i, line) in lines.into_iter().enumerate() {
                let line_x = if i == 0 {
                    x
                } else {
                    x.saturating_add(block.indent)
                };
                let line_y = y
                    .saturating_add(offset_y)
                    .saturating_add(i as u32 * step);
                self.elements.push(Element::new(
                    line_x,
                    line_y,
                    font.orientation,
                    reverse && i == 0,
                    ElementKind::Text {
                        text: line,
                        font_name: font.name,
                        height: font.height,
                        width: font.width,
                        origin,
                        block_width: Some(block.width),
                        block_align: Some(block.align),
                    },
                ));
            }
            return;
        }

        self.elements.push(Element::new(
            x,
            y,
            font.orientation,
            reverse,
            ElementKind::Text {
                text: data,
                font_name: font.name,
                height: font.height,
                width: font.width,
                origin,
                block_width: None,
                block_align: None,
            },
        ));
    }

    /// `^IM` / `^XG`: recall a stored graphic. Falls back to the label
    /// home when no position is armed and clears any pending field block.
    fn recall_graphic(&mut self, name: &str, scale_x: u32, scale_y: u32) {
        let position = self.printer.take_position();
        let (x, y) = position
            .map(|p| (p.x, p.y))
            .unwrap_or(self.printer.label_home);
        let reverse = self.printer.take_reverse();
        let orientation = self.printer.field_orientation.unwrap_or_default();
        self.printer.field_block = None;

        let graphic = self.printer.graphics.get(name).cloned();
        if graphic.is_none() {
            tracing::debug!(
                target: crate::TARGET,
                "graphic {} not found in store",
                name
            );
        }
        self.elements.push(Element::new(
            x,
            y,
            orientation,
            reverse,
            ElementKind::Image {
                scale_x,
                scale_y,
                graphic,
            },
        ));
    }
}

/// Wraps a field-block payload into lines.
///
/// `\&` splits paragraphs; words are packed greedily against a capacity
/// estimated from the font height (`height × 0.6`, compressed by 0.65 for
/// font `'0'` with unspecified width). A word longer than the capacity is
/// placed alone on its own line.
fn wrap_lines(data: &str, block: &FieldBlock, font_height: u32, font_name: char, font_width: u32) -> Vec<String> {
    let wrap_scale = if font_name == '0' && font_width == 0 {
        0.65
    } else {
        1.0
    };
    let char_width = font_height as f32 * 0.6 * wrap_scale;
    let max_chars = if block.width > 0 && char_width > 0.0 {
        ((block.width as f32 / char_width).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    for paragraph in data.split("\\&") {
        let mut words = paragraph.split_whitespace();
        let Some(first) = words.next() else {
            lines.push(String::new());
            continue;
        };
        let mut current = first.to_owned();
        for word in words {
            if current.chars().count() + 1 + word.chars().count() > max_chars {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                current.push(' ');
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(width: u32) -> FieldBlock {
        FieldBlock {
            width,
            lines: 0,
            line_spacing: 0,
            align: crate::ast::commons::Justification::L,
            indent: 0,
        }
    }

    #[test]
    fn wrap_packs_words_greedily() {
        // char width 20 * 0.6 = 12, capacity 5
        let lines = wrap_lines("Hello world here", &block(60), 20, '0', 10);
        assert_eq!(lines, vec!["Hello", "world", "here"]);
    }

    #[test]
    fn wrap_condenses_default_font_zero() {
        // char width 10 * 0.6 * 0.65 = 3.9, capacity 15
        let lines = wrap_lines("aaaa bbbb cccc dddd", &block(60), 10, '0', 0);
        assert_eq!(lines, vec!["aaaa bbbb cccc", "dddd"]);
    }

    #[test]
    fn wrap_places_oversized_words_alone() {
        let lines = wrap_lines("extraordinary a", &block(60), 20, '0', 10);
        assert_eq!(lines, vec!["extraordinary", "a"]);
    }

    #[test]
    fn wrap_splits_paragraphs_on_the_literal_escape() {
        let lines = wrap_lines("one\\&two\\&\\&three", &block(0), 20, 'A', 0);
        assert_eq!(lines, vec!["one", "two", "", "three"]);
    }

    #[test]
    fn zero_width_block_is_unbounded() {
        let lines = wrap_lines("a b c d e f g", &block(0), 20, 'A', 0);
        assert_eq!(lines, vec!["a b c d e f g"]);
    }
}
