//! # Engine Layer
//!
//! The engine turns the linear command stream into labels of positioned
//! drawing elements. A virtual printer tracks the modal state (cursor,
//! font, barcode defaults, field block, graphic store) that gives each
//! `^FD` its meaning.
//!
//! ## Core Workflow
//! 1. Receives the stream of [`crate::ast::cmd::Command`]s from the parser.
//! 2. Updates the virtual printer as modal commands are processed.
//! 3. Emits an [`Element`] for every element-producing command.
//! 4. Closes the element buffer into a [`Label`] on `^XZ`.

mod element;
mod font;
mod intr;
mod state;

pub use element::{
    BarcodeOptions, BarcodeType, Element, ElementKind, Label, OriginType, StoredGraphic,
};
pub use intr::analyze;
pub use state::{
    BarcodeDefaults, FieldBlock, FontState, NextPosition, PendingBarcode, VirtualPrinter,
};

pub(crate) use font::registry;
