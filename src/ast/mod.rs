//! # AST (Abstract Syntax Tree)
//!
//! This module slices a raw ZPL byte stream into command tokens and parses
//! each token into a structured [`cmd::Command`]. Parsing is lenient by
//! contract: unknown designators and malformed parameters never abort a
//! label.

pub mod cmd;
pub mod commons;
mod parser;

pub use parser::{parse_zpl, tokenize};

#[cfg(test)]
mod tests {
    use super::cmd::Command;
    use super::commons::{Justification, LineColor, Orientation, YesNo};
    use super::{parse_zpl, tokenize};

    #[test]
    fn tokens_keep_introducers_and_reassemble_the_cleaned_input() {
        let input = "junk^XA\n^FO10,20\r\n^FDHI^FS~DGR:X.GRF,8,1,FF^XZ";
        let tokens = tokenize(input);
        assert_eq!(tokens[0], "^XA");
        assert_eq!(tokens[1], "^FO10,20");

        let cleaned: String = input
            .chars()
            .filter(|c| !matches!(c, '\n' | '\x0b' | '\x0c' | '\r'))
            .collect();
        let reassembled: String = tokens.concat();
        assert_eq!(&cleaned["junk".len()..], reassembled.as_str());
    }

    #[test]
    fn vertical_whitespace_inside_a_token_is_not_part_of_the_grammar() {
        let tokens = tokenize("^FD12\n34^FS");
        assert_eq!(tokens, vec!["^FD1234".to_owned(), "^FS".to_owned()]);
    }

    #[test]
    fn field_data_is_kept_verbatim() {
        let commands = parse_zpl("^FD  spaced, data  ^FS");
        assert_eq!(
            commands[0],
            Command::FieldData {
                data: "  spaced, data  ".to_owned()
            }
        );
    }

    #[test]
    fn font_spec_reads_glued_orientation() {
        let commands = parse_zpl("^A0N,30,20");
        assert_eq!(
            commands[0],
            Command::FontSpec {
                name: '0',
                orientation: Some(Orientation::N),
                height: Some(30),
                width: Some(20),
            }
        );
    }

    #[test]
    fn font_spec_without_orientation_starts_at_the_height_parameter() {
        let commands = parse_zpl("^A0,30");
        assert_eq!(
            commands[0],
            Command::FontSpec {
                name: '0',
                orientation: None,
                height: Some(30),
                width: None,
            }
        );
    }

    #[test]
    fn malformed_numbers_collapse_to_none() {
        let commands = parse_zpl("^FOABC,20^GB100,xx,3,W");
        assert_eq!(
            commands[0],
            Command::FieldOrigin {
                x: None,
                y: Some(20),
                bottom: None
            }
        );
        assert_eq!(
            commands[1],
            Command::GraphicBox {
                width: Some(100),
                height: None,
                thickness: Some(3),
                color: Some(LineColor::W),
            }
        );
    }

    #[test]
    fn barcode_orientation_is_taken_only_from_nrib() {
        let commands = parse_zpl("^B3N,N,50,N,N^BQ,2,H");
        assert_eq!(
            commands[0],
            Command::Code39 {
                orientation: Orientation::N,
                check_digit: Some(YesNo::N),
                height: Some(50),
                interpretation_line: Some(YesNo::N),
                interpretation_above: Some(YesNo::N),
            }
        );
        assert_eq!(
            commands[1],
            Command::QrCode {
                orientation: Orientation::N,
                scale: Some(2),
                ecc_level: Some('H'),
            }
        );
    }

    #[test]
    fn unknown_designators_are_preserved_as_unsupported() {
        let commands = parse_zpl("^MM T^PR4");
        assert!(matches!(
            commands[0],
            Command::Unsupported { ref designator } if designator == "^MM"
        ));
        assert!(matches!(commands[1], Command::Unsupported { .. }));
    }

    #[test]
    fn field_block_upper_cases_the_justification() {
        let commands = parse_zpl("^FB60,2,1,c,5");
        assert_eq!(
            commands[0],
            Command::FieldBlock {
                width: Some(60),
                lines: Some(2),
                line_spacing: Some(1),
                justification: Some(Justification::C),
                indent: Some(5),
            }
        );
    }

    #[test]
    fn download_graphic_keeps_the_data_tail_with_commas() {
        let commands = parse_zpl("~DGR:X.GRF,16,2,FFFF,00FF");
        assert_eq!(
            commands[0],
            Command::DownloadGraphic {
                name: "R:X.GRF".to_owned(),
                total_bytes: Some(16),
                bytes_per_row: Some(2),
                data: "FFFF,00FF".to_owned(),
            }
        );
    }
}
