//! CSS selectors for every markup region the parser reads.
//!
//! The dictionary revises its markup from time to time. Keeping the selectors in one
//! table means a revision is a one-file change; the extraction steps in
//! [`crate::types`] never embed class names of their own.

/// The outermost container wrapping all entry content. Its absence means the document
/// is not an entry page at all.
pub const ENTRY_BODY: &str = "div.entry-body";

/// The illustrative image for the entry.
pub const IMAGE: &str = "amp-img.dimg_i";

/// The primary sense definition.
pub const DEFINITION: &str = "div.def.ddef_d.db";

/// The canonical headword as rendered in the entry header.
pub const HEADWORD: &str = "span.hw.dhw";

/// The part-of-speech label ("noun", "adjective", ...).
pub const PART_OF_SPEECH: &str = "span.pos.dpos";

/// One pronunciation-audio widget. Entry pages carry zero, one (single recording) or
/// two (UK and US) of these.
pub const PRONUNCIATION: &str = "span.daud";

/// The encoded audio sources inside a pronunciation widget, in document order.
pub const AUDIO_SOURCE: &str = "audio source";

/// One usage example in the "more examples" accordion.
pub const EXAMPLE: &str = "div.daccord li.eg.dexamp";
