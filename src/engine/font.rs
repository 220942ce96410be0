use std::sync::OnceLock;

use ab_glyph::FontArc;
use font_loader::system_fonts;

/// Candidate filesystem locations for the bundled faces, checked before
/// asking the system font index.
const SANS_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
];

const BOLD_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
];

const CONDENSED_BOLD_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansCondensed-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansCondensed-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSansCondensed-Bold.ttf",
];

/// Process-wide registry of the DejaVu faces used for measurement and
/// rendering.
///
/// Loaded lazily on first demand; the bold and condensed variants are
/// best-effort and their absence never fails registration.
#[derive(Debug)]
pub struct FontRegistry {
    sans: Option<FontArc>,
    bold: Option<FontArc>,
    condensed_bold: Option<FontArc>,
}

static REGISTRY: OnceLock<FontRegistry> = OnceLock::new();

/// The shared registry, loading the faces on the first call. Subsequent
/// calls are no-ops returning the same instance.
pub fn registry() -> &'static FontRegistry {
    REGISTRY.get_or_init(FontRegistry::load)
}

impl FontRegistry {
    fn load() -> Self {
        let sans = load_face(SANS_PATHS, "DejaVu Sans", false);
        if sans.is_none() {
            tracing::warn!(
                target: crate::TARGET,
                "DejaVu Sans not found, text elements will not be drawn"
            );
        }
        Self {
            sans,
            bold: load_face(BOLD_PATHS, "DejaVu Sans", true),
            condensed_bold: load_face(CONDENSED_BOLD_PATHS, "DejaVu Sans Condensed", true),
        }
    }

    /// Face for a ZPL font designator. `'0'` prefers the condensed bold
    /// chain; every other designator maps to the normal face.
    pub fn face_for(&self, designator: char) -> Option<&FontArc> {
        if designator == '0' {
            self.condensed_bold
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.sans.as_ref())
        } else {
            self.sans.as_ref()
        }
    }
}

fn load_face(paths: &[&str], family: &str, bold: bool) -> Option<FontArc> {
    for path in paths {
        if let Ok(bytes) = std::fs::read(path) {
            match FontArc::try_from_vec(bytes) {
                Ok(face) => return Some(face),
                Err(err) => {
                    tracing::debug!(
                        target: crate::TARGET,
                        "invalid font data at {}: {}",
                        path,
                        err
                    );
                }
            }
        }
    }

    let mut builder = system_fonts::FontPropertyBuilder::new().family(family);
    if bold {
        builder = builder.bold();
    }
    let property = builder.build();
    system_fonts::get(&property).and_then(|(data, _)| FontArc::try_from_vec(data).ok())
}

#[cfg(test)]
mod tests {
    use super::registry;

    #[test]
    fn repeated_demands_return_the_same_registry() {
        let first = registry();
        let second = registry();
        assert!(std::ptr::eq(first, second));
    }
}
