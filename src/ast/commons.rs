/// Field and font orientation in ZPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Normal (default)
    #[default]
    N,
    /// Rotated 90 degrees
    R,
    /// Inverted 180 degrees
    I,
    /// Bottom-up
    B,
}

impl From<char> for Orientation {
    fn from(value: char) -> Self {
        match value {
            'N' => Orientation::N,
            'R' => Orientation::R,
            'I' => Orientation::I,
            'B' => Orientation::B,
            _ => {
                tracing::debug!(
                    target: crate::TARGET,
                    "{} is not a valid orientation, using N as default",
                    value
                );
                Orientation::N
            }
        }
    }
}

/// Represents text justification options in ZPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    /// Left justification (Default)
    #[default]
    L,
    /// Center justification
    C,
    /// Right justification
    R,
    /// Justified (full width)
    J,
}

impl From<char> for Justification {
    fn from(value: char) -> Self {
        match value.to_ascii_uppercase() {
            'L' => Justification::L,
            'C' => Justification::C,
            'R' => Justification::R,
            'J' => Justification::J,
            _ => {
                tracing::debug!(
                    target: crate::TARGET,
                    "{} is not a valid justification, using L as default",
                    value
                );
                Justification::L
            }
        }
    }
}

/// Line color for graphic primitives (`B`lack, `W`hite, or solid `F`ill).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineColor {
    /// Black ink (default)
    #[default]
    B,
    /// White ink
    W,
    /// Solid fill
    F,
}

impl From<char> for LineColor {
    fn from(value: char) -> Self {
        match value {
            'B' => LineColor::B,
            'W' => LineColor::W,
            'F' => LineColor::F,
            _ => {
                tracing::debug!(
                    target: crate::TARGET,
                    "{} is not a valid line color, using B as default",
                    value
                );
                LineColor::B
            }
        }
    }
}

/// Represents a boolean-like state in ZPL (Yes/No).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    /// Yes ('Y')
    Y,
    /// No ('N')
    N,
}

impl From<char> for YesNo {
    fn from(value: char) -> Self {
        match value {
            'Y' | 'y' => YesNo::Y,
            _ => YesNo::N,
        }
    }
}

impl From<YesNo> for bool {
    fn from(value: YesNo) -> Self {
        matches!(value, YesNo::Y)
    }
}
