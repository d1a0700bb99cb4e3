//! Pipeline stages for cause-list-to-PDF generation.
//!
//! Each submodule implements one transformation step and can be tested on
//! its own.
//!
//! ## Data Flow
//!
//! ```text
//! source ──▶ extract ──▶ layout ──▶ pdf
//! (HTML)     (records)   (pages)    (bytes)
//!              │            │
//!          normalize    wrap + font
//! ```
//!
//! 1. [`source`]: pull `<tr>`/`<td>` rows out of the scraped listing page
//! 2. [`extract`]: filter irregular rows and map the survivors to records,
//!    cleaning every field through [`normalize`]
//! 3. [`layout`]: place title, header and banded rows on fixed-size pages,
//!    wrapping cell text with [`wrap`] against [`font`] metrics
//! 4. [`pdf`]: serialise the page layout with `lopdf`

pub mod extract;
pub mod font;
pub mod layout;
pub mod normalize;
pub mod pdf;
pub mod source;
pub mod wrap;
