//! Purpose: Internal JSON parsing boundary shared by the converter.
//! Exports: `parse` module with decode helpers and failure categorization.
//! Role: Single seam for the parser so callsites avoid ad hoc decode logic.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
