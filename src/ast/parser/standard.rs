use super::{char_field, f32_field, lead_char, lead_orientation, take_field, u32_field, Span};
use crate::ast::cmd::Command;
use crate::ast::commons::{Justification, LineColor, Orientation, YesNo};

/// ^LHx,y - Label Home
pub fn cmd_lh(tail: Span) -> Command {
    let (tail, x) = u32_field(tail);
    let (_, y) = u32_field(tail);
    Command::LabelHome { x, y }
}

/// ^FOx,y[,b] - Field Origin
pub fn cmd_fo(tail: Span) -> Command {
    let (tail, x) = u32_field(tail);
    let (tail, y) = u32_field(tail);
    let (_, bottom) = u32_field(tail);
    Command::FieldOrigin { x, y, bottom }
}

/// ^FTx,y[,b] - Field Typeset
pub fn cmd_ft(tail: Span) -> Command {
    let (tail, x) = u32_field(tail);
    let (tail, y) = u32_field(tail);
    let (_, bottom) = u32_field(tail);
    Command::FieldTypeset { x, y, bottom }
}

/// ^FWo - Field Orientation
pub fn cmd_fw(tail: Span) -> Command {
    let (_, orientation) = lead_char(tail);
    Command::FieldOrientation {
        orientation: orientation.map(Orientation::from).unwrap_or_default(),
    }
}

/// ^Aa[o][,h[,w]] - Font Specification
pub fn cmd_a(name: char, tail: Span) -> Command {
    let (tail, orientation) = lead_char(tail);
    let (tail, height) = u32_field(tail);
    let (_, width) = u32_field(tail);
    Command::FontSpec {
        name,
        orientation: orientation.map(Orientation::from),
        height,
        width,
    }
}

/// ^CF[a][,h[,w]] - Change Default Font
pub fn cmd_cf(tail: Span) -> Command {
    let (tail, name) = lead_char(tail);
    let (tail, height) = u32_field(tail);
    let (_, width) = u32_field(tail);
    Command::FontDefault {
        name,
        height,
        width,
    }
}

/// ^FBw,l,s,a,i - Field Block
pub fn cmd_fb(tail: Span) -> Command {
    let (tail, width) = u32_field(tail);
    let (tail, lines) = u32_field(tail);
    let (tail, line_spacing) = u32_field(tail);
    let (tail, justification) = char_field(tail);
    let (_, indent) = u32_field(tail);
    Command::FieldBlock {
        width,
        lines,
        line_spacing,
        justification: justification.map(Justification::from),
        indent,
    }
}

/// ^GBw,h,t,c[,r] - Graphic Box
pub fn cmd_gb(tail: Span) -> Command {
    let (tail, width) = u32_field(tail);
    let (tail, height) = u32_field(tail);
    let (tail, thickness) = u32_field(tail);
    let (_, color) = char_field(tail);
    Command::GraphicBox {
        width,
        height,
        thickness,
        color: color.map(LineColor::from),
    }
}

/// ^GCd,t,c - Graphic Circle
pub fn cmd_gc(tail: Span) -> Command {
    let (tail, diameter) = u32_field(tail);
    let (tail, thickness) = u32_field(tail);
    let (_, color) = char_field(tail);
    Command::GraphicCircle {
        diameter,
        thickness,
        color: color.map(LineColor::from),
    }
}

/// ^GDw,h,t,c - Graphic Diagonal Line
pub fn cmd_gd(tail: Span) -> Command {
    let (tail, width) = u32_field(tail);
    let (tail, height) = u32_field(tail);
    let (tail, thickness) = u32_field(tail);
    let (_, color) = char_field(tail);
    Command::GraphicDiagonal {
        width,
        height,
        thickness,
        color: color.map(LineColor::from),
    }
}

/// ^BYw[,r[,h]] - Barcode Field Default
pub fn cmd_by(tail: Span) -> Command {
    let (tail, module_width) = u32_field(tail);
    let (tail, ratio) = f32_field(tail);
    let (_, height) = u32_field(tail);
    Command::BarcodeDefaults {
        module_width,
        ratio,
        height,
    }
}

/// ^Bx[o],… - barcode type commands, dispatched on the type designator.
///
/// The orientation is consumed only when the first tail character is one
/// of `N`, `R`, `I`, `B`. Unknown type designators yield `None` so the
/// caller can fall back to an unsupported command.
pub fn cmd_b(code: char, tail: Span) -> Option<Command> {
    let (tail, orientation) = lead_orientation(tail);
    let command = match code {
        'C' | 'D' => {
            let (tail, height) = u32_field(tail);
            let (tail, interpretation_line) = char_field(tail);
            let (tail, interpretation_above) = char_field(tail);
            let (_, mode) = char_field(tail);
            Command::Code128 {
                orientation,
                height,
                interpretation_line: interpretation_line.map(YesNo::from),
                interpretation_above: interpretation_above.map(YesNo::from),
                mode,
            }
        }
        '3' => {
            let (tail, check_digit) = char_field(tail);
            let (tail, height) = u32_field(tail);
            let (tail, interpretation_line) = char_field(tail);
            let (_, interpretation_above) = char_field(tail);
            Command::Code39 {
                orientation,
                check_digit: check_digit.map(YesNo::from),
                height,
                interpretation_line: interpretation_line.map(YesNo::from),
                interpretation_above: interpretation_above.map(YesNo::from),
            }
        }
        'E' | '8' => {
            let (tail, height) = u32_field(tail);
            let (tail, interpretation_line) = char_field(tail);
            let (_, interpretation_above) = char_field(tail);
            Command::Ean13 {
                orientation,
                height,
                interpretation_line: interpretation_line.map(YesNo::from),
                interpretation_above: interpretation_above.map(YesNo::from),
            }
        }
        '9' | 'A' => {
            let (tail, height) = u32_field(tail);
            let (tail, interpretation_line) = char_field(tail);
            let (_, interpretation_above) = char_field(tail);
            Command::Code93 {
                orientation,
                height,
                interpretation_line: interpretation_line.map(YesNo::from),
                interpretation_above: interpretation_above.map(YesNo::from),
            }
        }
        '2' => {
            let (tail, height) = u32_field(tail);
            let (tail, interpretation_line) = char_field(tail);
            let (_, interpretation_above) = char_field(tail);
            Command::Interleaved2of5 {
                orientation,
                height,
                interpretation_line: interpretation_line.map(YesNo::from),
                interpretation_above: interpretation_above.map(YesNo::from),
            }
        }
        'Q' => {
            let (tail, scale) = u32_field(tail);
            let (_, ecc_level) = char_field(tail);
            Command::QrCode {
                orientation,
                scale,
                ecc_level,
            }
        }
        'X' => {
            let (_, scale) = u32_field(tail);
            Command::DataMatrix { orientation, scale }
        }
        '7' => {
            let (tail, module_width) = u32_field(tail);
            let (tail, security_level) = u32_field(tail);
            let (tail, columns) = u32_field(tail);
            let (tail, rows) = u32_field(tail);
            let (tail, row_height) = u32_field(tail);
            let (_, truncated) = char_field(tail);
            Command::Pdf417 {
                orientation,
                module_width,
                security_level,
                columns,
                rows,
                row_height,
                truncated: truncated.map(YesNo::from),
            }
        }
        _ => return None,
    };
    Some(command)
}

/// ~DGname,t,w,data - Download Graphic
pub fn cmd_dg(tail: Span) -> Command {
    let (tail, name) = take_field(tail);
    let name = name.trim().to_owned();
    let (tail, total_bytes) = u32_field(tail);
    let (data, bytes_per_row) = u32_field(tail);
    Command::DownloadGraphic {
        name,
        total_bytes,
        bytes_per_row,
        data: data.to_owned(),
    }
}

/// ~DYname,f,b,x,t,w,data - Download Objects
pub fn cmd_dy(tail: Span) -> Command {
    let (tail, name) = take_field(tail);
    let name = name.trim().to_owned();
    // the f,b,x,t,w format and size parameters are not needed to store
    // the object
    let (tail, _) = take_field(tail);
    let (tail, _) = take_field(tail);
    let (tail, _) = take_field(tail);
    let (tail, _) = take_field(tail);
    let (data, _) = take_field(tail);
    Command::DownloadObject {
        name,
        data: data.trim().to_owned(),
    }
}

/// ^IMname - Image Move
pub fn cmd_im(tail: Span) -> Command {
    Command::ImageMove {
        name: tail.trim().to_owned(),
    }
}

/// ^XGname,mx,my - Recall Graphic
pub fn cmd_xg(tail: Span) -> Command {
    let (tail, name) = take_field(tail);
    let name = name.trim().to_owned();
    let (tail, scale_x) = u32_field(tail);
    let (_, scale_y) = u32_field(tail);
    Command::RecallGraphic {
        name,
        scale_x,
        scale_y,
    }
}
