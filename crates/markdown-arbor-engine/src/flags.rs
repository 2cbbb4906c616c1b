//! Option bit-set shared by parsing and rendering.
//!
//! Callers pass a plain `u32` word; unknown bits are ignored by every
//! consumer, so option words from newer callers degrade gracefully.

pub const DEFAULT: u32 = 0;

/// Parse: substitute "smart" typographic punctuation.
///
/// Straight quotes become curly quotes, `--`/`---` become en/em dashes and
/// `...` becomes an ellipsis.
pub const SMART: u32 = 1 << 0;

/// Render: emit raw HTML and unsafe links verbatim.
///
/// Off by default: raw HTML is replaced by a placeholder comment and unsafe
/// link destinations by the empty string. HTML output only.
pub const UNSAFE: u32 = 1 << 1;

/// Render: soft line breaks become spaces. Ignored by the XML target.
pub const NO_BREAKS: u32 = 1 << 2;

/// Render: soft line breaks become hard breaks. Ignored by the XML target.
pub const HARD_BREAKS: u32 = 1 << 3;

/// Render: annotate block elements with their source position.
/// HTML and XML targets only.
pub const SOURCE_POS: u32 = 1 << 4;
