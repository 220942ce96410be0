//! Native Code 39 bar generation.
//!
//! Each supported character maps to a nine-element pattern over narrow
//! (`n`) and wide (`w`) modules; bars sit at even indices, spaces at odd.
//! Characters are separated by a single narrow gap and the symbol is
//! framed by ten quiet modules on each side.

use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::{BLACK, WHITE};

/// Quiet zone on each side, in modules.
const QUIET_MODULES: f32 = 10.0;

const PATTERNS: &[(char, &str)] = &[
    ('0', "nnnwwnwnn"),
    ('1', "wnnwnnnnw"),
    ('2', "nnwwnnnnw"),
    ('3', "wnwwnnnnn"),
    ('4', "nnnwwnnnw"),
    ('5', "wnnwwnnnn"),
    ('6', "nnwwwnnnn"),
    ('7', "nnnwnnwnw"),
    ('8', "wnnwnnwnn"),
    ('9', "nnwwnnwnn"),
    ('A', "wnnnnwnnw"),
    ('B', "nnwnnwnnw"),
    ('C', "wnwnnwnnn"),
    ('D', "nnnnwwnnw"),
    ('E', "wnnnwwnnn"),
    ('F', "nnwnwwnnn"),
    ('G', "nnnnnwwnw"),
    ('H', "wnnnnwwnn"),
    ('I', "nnwnnwwnn"),
    ('J', "nnnnwwwnn"),
    ('K', "wnnnnnnww"),
    ('L', "nnwnnnnww"),
    ('M', "wnwnnnnwn"),
    ('N', "nnnnwnnww"),
    ('O', "wnnnwnnwn"),
    ('P', "nnwnwnnwn"),
    ('Q', "nnnnnnwww"),
    ('R', "wnnnnnwwn"),
    ('S', "nnwnnnwwn"),
    ('T', "nnnnwnwwn"),
    ('U', "wwnnnnnnw"),
    ('V', "nwwnnnnnw"),
    ('W', "wwwnnnnnn"),
    ('X', "nwnnwnnnw"),
    ('Y', "wwnnwnnnn"),
    ('Z', "nwwnwnnnn"),
    ('-', "nwnnnnwnw"),
    ('.', "wwnnnnwnn"),
    (' ', "nwwnnnwnn"),
    ('$', "nwnwnwnnn"),
    ('/', "nwnwnnnwn"),
    ('+', "nwnnnwnwn"),
    ('%', "nnnwnwnwn"),
    ('*', "nwnnwnwnn"),
];

/// Unknown characters encode as `-`.
fn pattern_for(c: char) -> &'static str {
    PATTERNS
        .iter()
        .find(|(p, _)| *p == c)
        .map(|(_, pattern)| *pattern)
        .unwrap_or("nwnnnnwnw")
}

fn pattern_modules(pattern: &str, ratio: f32) -> f32 {
    pattern
        .chars()
        .map(|e| if e == 'w' { ratio } else { 1.0 })
        .sum()
}

/// Total symbol width in modules, quiet zones and inter-character gaps
/// included.
pub(super) fn total_modules(text: &str, ratio: f32) -> f32 {
    let char_modules: f32 = text
        .chars()
        .map(|c| pattern_modules(pattern_for(c), ratio))
        .sum();
    let gaps = text.chars().count().saturating_sub(1) as f32;
    2.0 * QUIET_MODULES + char_modules + gaps
}

/// Paints the bars of an already wrapped symbol (`*` start/stop included)
/// onto a white canvas of the exact symbol width.
pub(super) fn bars(text: &str, module_width: u32, ratio: f32, bar_height: u32) -> RgbaImage {
    let narrow = if module_width == 0 { 2 } else { module_width } as f32;
    let ratio = if ratio < 1.0 { 2.0 } else { ratio };

    let width = (total_modules(text, ratio) * narrow).ceil() as u32;
    let height = bar_height.max(1);
    let mut canvas = RgbaImage::from_pixel(width.max(1), height, WHITE);

    let mut x = QUIET_MODULES * narrow;
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            x += narrow;
        }
        for (j, element) in pattern_for(c).chars().enumerate() {
            let advance = if element == 'w' { ratio * narrow } else { narrow };
            if j % 2 == 0 {
                let x0 = x.round() as i32;
                let x1 = (x + advance).round() as i32;
                if x1 > x0 {
                    draw_filled_rect_mut(
                        &mut canvas,
                        Rect::at(x0, 0).of_size((x1 - x0) as u32, height),
                        BLACK,
                    );
                }
            }
            x += advance;
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_has_nine_elements_and_three_wides() {
        for (c, pattern) in PATTERNS {
            assert_eq!(pattern.len(), 9, "pattern for {:?}", c);
            assert_eq!(
                pattern.chars().filter(|e| *e == 'w').count(),
                3,
                "pattern for {:?}",
                c
            );
        }
    }

    #[test]
    fn module_arithmetic_matches_the_symbol_layout() {
        // every char is 6 narrow + 3 wide modules; with ratio 2 that is 12
        // modules, so "*123*" = 5*12 + 4 gaps + 2*10 quiet = 84 modules
        assert_eq!(total_modules("*123*", 2.0), 84.0);
    }

    #[test]
    fn bars_canvas_is_the_module_total_times_the_narrow_width() {
        let img = bars("*123*", 2, 2.0, 50);
        assert_eq!(img.dimensions(), (168, 50));
    }

    #[test]
    fn quiet_zones_stay_white() {
        let img = bars("*A*", 2, 2.0, 10);
        for x in 0..20 {
            assert_eq!(img.get_pixel(x, 0), &WHITE);
            assert_eq!(img.get_pixel(img.width() - 1 - x, 0), &WHITE);
        }
        // the start character begins with a narrow bar right after the
        // quiet zone
        assert_eq!(img.get_pixel(20, 0), &BLACK);
    }

    #[test]
    fn unknown_characters_fall_back_to_dash() {
        assert_eq!(pattern_for('?'), pattern_for('-'));
    }
}
