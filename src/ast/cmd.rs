use super::commons::{Justification, LineColor, Orientation, YesNo};

/// Represents the supported ZPL commands in the AST.
///
/// Parameters are `Option`-valued where the command allows them to be
/// omitted; the evaluator substitutes the documented default for each
/// missing parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// ^XA - Start Format
    /// Starts the definition of a label format.
    StartFormat,

    /// ^XZ - End Format
    /// Terminates the definition of a label format.
    EndFormat,

    /// ^LH - Label Home
    /// Defines the default home position for the label.
    LabelHome {
        /// X coordinate of the home position (in dots)
        x: Option<u32>,
        /// Y coordinate of the home position (in dots)
        y: Option<u32>,
    },

    /// ^FO - Field Origin
    /// Arms the top-left corner of the next field relative to the Label Home.
    FieldOrigin {
        /// X coordinate (in dots)
        x: Option<u32>,
        /// Y coordinate (in dots)
        y: Option<u32>,
        /// Bottom justification parameter (accepted, not interpreted)
        bottom: Option<u32>,
    },

    /// ^FT - Field Typeset
    /// Like ^FO but the armed position addresses the text baseline.
    FieldTypeset {
        /// X coordinate (in dots)
        x: Option<u32>,
        /// Y coordinate (in dots)
        y: Option<u32>,
        /// Bottom justification parameter (accepted, not interpreted)
        bottom: Option<u32>,
    },

    /// ^FS - Field Separator
    /// Indicates the end of a field definition.
    FieldSeparator,

    /// ^FR - Field Reverse Print
    /// The next element prints as white ink.
    FieldReverse,

    /// ^FW - Field Orientation
    /// Default orientation overriding subsequent font commands.
    FieldOrientation {
        /// Orientation (N, R, I, B)
        orientation: Orientation,
    },

    /// ^A - Font Specification
    /// Specifies the font for the following text fields.
    FontSpec {
        /// Font designator (A-Z, 0-9)
        name: char,
        /// Field orientation (N, R, I, B)
        orientation: Option<Orientation>,
        /// Character height in dots
        height: Option<u32>,
        /// Character width in dots
        width: Option<u32>,
    },

    /// ^CF - Change Default Font
    /// Updates the default font; absent fields leave the state unchanged.
    FontDefault {
        /// Font designator
        name: Option<char>,
        /// Character height
        height: Option<u32>,
        /// Character width
        width: Option<u32>,
    },

    /// ^FB - Field Block
    /// Formats the next text field inside a block.
    FieldBlock {
        /// Width of the text block in dots
        width: Option<u32>,
        /// Maximum number of lines
        lines: Option<u32>,
        /// Extra space between lines
        line_spacing: Option<u32>,
        /// Text justification (L, C, R, J)
        justification: Option<Justification>,
        /// Indentation for the second line onwards
        indent: Option<u32>,
    },

    /// ^FD - Field Data
    /// The payload of the current field, kept verbatim.
    FieldData {
        /// Data string
        data: String,
    },

    /// ^GB - Graphic Box
    GraphicBox {
        /// Box width
        width: Option<u32>,
        /// Box height
        height: Option<u32>,
        /// Border thickness
        thickness: Option<u32>,
        /// Line color
        color: Option<LineColor>,
    },

    /// ^GC - Graphic Circle
    GraphicCircle {
        /// Circle diameter
        diameter: Option<u32>,
        /// Border thickness
        thickness: Option<u32>,
        /// Line color
        color: Option<LineColor>,
    },

    /// ^GD - Graphic Diagonal Line
    GraphicDiagonal {
        /// Horizontal extent
        width: Option<u32>,
        /// Vertical extent
        height: Option<u32>,
        /// Line thickness
        thickness: Option<u32>,
        /// Line color
        color: Option<LineColor>,
    },

    /// ^BY - Barcode Field Default
    /// Changes the default values for barcodes.
    BarcodeDefaults {
        /// Module width (in dots)
        module_width: Option<u32>,
        /// Wide to narrow bar ratio
        ratio: Option<f32>,
        /// Bar height
        height: Option<u32>,
    },

    /// ^BC / ^BD - Code 128 Barcode
    Code128 {
        orientation: Orientation,
        height: Option<u32>,
        interpretation_line: Option<YesNo>,
        interpretation_above: Option<YesNo>,
        /// Mode (N, U, A, D)
        mode: Option<char>,
    },

    /// ^B3 - Code 39 Barcode
    Code39 {
        orientation: Orientation,
        /// Mod-43 check digit flag (accepted, ignored)
        check_digit: Option<YesNo>,
        height: Option<u32>,
        interpretation_line: Option<YesNo>,
        interpretation_above: Option<YesNo>,
    },

    /// ^BE / ^B8 - EAN-13 Barcode
    Ean13 {
        orientation: Orientation,
        height: Option<u32>,
        interpretation_line: Option<YesNo>,
        interpretation_above: Option<YesNo>,
    },

    /// ^B9 / ^BA - Code 93 Barcode
    Code93 {
        orientation: Orientation,
        height: Option<u32>,
        interpretation_line: Option<YesNo>,
        interpretation_above: Option<YesNo>,
    },

    /// ^B2 - Interleaved 2 of 5 Barcode
    Interleaved2of5 {
        orientation: Orientation,
        height: Option<u32>,
        interpretation_line: Option<YesNo>,
        interpretation_above: Option<YesNo>,
    },

    /// ^BQ - QR Code Barcode
    QrCode {
        orientation: Orientation,
        /// Magnification in dots per module
        scale: Option<u32>,
        /// Error correction level (L, M, Q, H)
        ecc_level: Option<char>,
    },

    /// ^BX - Data Matrix Barcode
    DataMatrix {
        orientation: Orientation,
        /// Magnification in dots per module
        scale: Option<u32>,
    },

    /// ^B7 - PDF417 Barcode
    Pdf417 {
        orientation: Orientation,
        module_width: Option<u32>,
        security_level: Option<u32>,
        columns: Option<u32>,
        rows: Option<u32>,
        row_height: Option<u32>,
        truncated: Option<YesNo>,
    },

    /// ~DG - Download Graphic
    /// Stores a raw ASCII-hex graphic in the printer's graphic store.
    DownloadGraphic {
        /// Device-qualified name (e.g. "R:LOGO.GRF")
        name: String,
        /// Total byte count
        total_bytes: Option<u32>,
        /// Bytes per image row
        bytes_per_row: Option<u32>,
        /// Encoded graphic data, kept verbatim
        data: String,
    },

    /// ~DY - Download Objects
    /// Stores a hex-encoded object (PNG in practice) in the graphic store.
    DownloadObject {
        /// Device-qualified name (e.g. "R:LOGO.PNG")
        name: String,
        /// Hexadecimal payload
        data: String,
    },

    /// ^IM - Image Move
    /// Places a stored graphic at the current position.
    ImageMove {
        /// Device-qualified name
        name: String,
    },

    /// ^XG - Recall Graphic
    /// Places a stored graphic with magnification.
    RecallGraphic {
        /// Device-qualified name
        name: String,
        /// Horizontal magnification
        scale_x: Option<u32>,
        /// Vertical magnification
        scale_y: Option<u32>,
    },

    /// Unsupported or unknown command, ignored by the evaluator.
    Unsupported {
        /// Command introducer and designator (e.g. "^XY")
        designator: String,
    },
}
