//! Structured types

use scraper::{ElementRef, Html, Selector};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::selectors;

/// The site origin used to absolutize root-relative asset links.
const ORIGIN: &str = "https://dictionary.cambridge.org";

/// Marker substring embedded in the resolved link of a UK pronunciation recording.
///
/// The two pronunciation widgets are not reliably ordered UK-then-US in the markup, so
/// region assignment relies on this marker rather than on position.
const UK_AUDIO_MARKER: &str = "uk_pron";

/// The maximum number of usage examples kept per entry.
const MAX_EXAMPLES: usize = 2;

/// A single dictionary entry extracted from an entry page.
///
/// Every field is optional and extracted independently; a field is populated exactly
/// when the corresponding markup region was found. The all-absent value (see
/// [`Entry::is_empty`]) means the document was not recognized as an entry page at all,
/// which is distinct from an entry that merely lacks some regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    /// The canonical headword as rendered on the page
    ///
    /// Examples: `apple`, `give up`
    ///
    /// # HTML Source
    /// Parsed from the `<span class="hw dhw">` element in the entry header
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,

    /// The primary sense definition, trimmed of surrounding whitespace and the trailing
    /// punctuation the site renders after it
    ///
    /// # HTML Source
    /// Parsed from the first `<div class="def ddef_d db">` element
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub definition: Option<String>,

    /// Absolute URL of the illustrative image, if the entry has one
    ///
    /// # HTML Source
    /// The `src` attribute of the `<amp-img class="dimg_i">` element, resolved against
    /// the site origin when root-relative
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub image: Option<String>,

    /// The part-of-speech label
    ///
    /// Examples: `noun`, `adjective`
    ///
    /// # HTML Source
    /// Parsed from the `<span class="pos dpos">` element in the entry header
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub morphology: Option<String>,

    /// Audio pronunciation link(s)
    ///
    /// A bare URL when the page carries a single recording, or a UK/US mapping when it
    /// carries both regional variants
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pronunciations: Option<Pronunciations>,

    /// Up to two illustrative usage sentences, in document order
    ///
    /// # HTML Source
    /// Parsed from `<li class="eg dexamp">` elements in the examples accordion
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Vec::is_empty", default)
    )]
    pub examples: Vec<String>,
}

/// Audio pronunciation links for an entry.
///
/// Serializes either as a bare URL string or as a mapping with `"UK"` and `"US"` keys,
/// matching the number of recordings the page carries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Pronunciations {
    /// The only recording on the page.
    Single(String),
    /// Region-keyed recordings when the page carries both variants. A side whose
    /// widget had no resolvable audio source is omitted.
    Regional {
        /// The UK recording.
        #[cfg_attr(
            feature = "serde",
            serde(rename = "UK", skip_serializing_if = "Option::is_none", default)
        )]
        uk: Option<String>,
        /// The US recording.
        #[cfg_attr(
            feature = "serde",
            serde(rename = "US", skip_serializing_if = "Option::is_none", default)
        )]
        us: Option<String>,
    },
}

impl Entry {
    /// Extracts an entry from the markup of an entry page.
    ///
    /// Extraction is best-effort: each region is located independently and a missing or
    /// drifted region only leaves its own field absent. The single exception is the
    /// outer entry container — when it is missing the document is not an entry page and
    /// the empty entry is returned immediately.
    #[must_use]
    pub fn from_html(html: impl AsRef<str>) -> Entry {
        let body_selector = Selector::parse(selectors::ENTRY_BODY).expect("entry body selector");

        let document = Html::parse_document(html.as_ref());
        document
            .select(&body_selector)
            .next()
            .map_or_else(Entry::default, |ref body| Entry::from_entry_body(body))
    }

    /// Returns `true` when no region of the document yielded data, i.e. the lookup has
    /// nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.definition.is_none()
            && self.image.is_none()
            && self.morphology.is_none()
            && self.pronunciations.is_none()
            && self.examples.is_empty()
    }

    fn from_entry_body(body: &ElementRef<'_>) -> Entry {
        Entry {
            name: headword(body),
            definition: definition(body),
            image: image(body),
            morphology: part_of_speech(body),
            pronunciations: pronunciations(body),
            examples: examples(body),
        }
    }
}

fn headword(body: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse(selectors::HEADWORD).expect("headword selector");

    body.select(&selector).next().map(trimmed_text)
}

fn part_of_speech(body: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse(selectors::PART_OF_SPEECH).expect("part of speech selector");

    body.select(&selector).next().map(trimmed_text)
}

fn definition(body: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse(selectors::DEFINITION).expect("definition selector");

    body.select(&selector)
        .next()
        .map(|elem| tidy_definition(&element_text(elem)))
}

fn image(body: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse(selectors::IMAGE).expect("image selector");

    body.select(&selector)
        .next()
        .and_then(|elem| elem.attr("src"))
        .map(absolute_url)
}

fn examples(body: &ElementRef<'_>) -> Vec<String> {
    let selector = Selector::parse(selectors::EXAMPLE).expect("example selector");

    body.select(&selector)
        .take(MAX_EXAMPLES)
        .map(trimmed_text)
        .collect()
}

fn pronunciations(body: &ElementRef<'_>) -> Option<Pronunciations> {
    let selector = Selector::parse(selectors::PRONUNCIATION).expect("pronunciation selector");
    let widgets: Vec<ElementRef<'_>> = body.select(&selector).collect();

    match widgets.as_slice() {
        [] => None,
        [single] => audio_url(single).map(Pronunciations::Single),
        [first, second, ..] => {
            let (uk, us) = assign_regions(audio_url(first), audio_url(second));

            if uk.is_none() && us.is_none() {
                None
            } else {
                Some(Pronunciations::Regional { uk, us })
            }
        }
    }
}

/// Resolves the authoritative audio link of a pronunciation widget.
///
/// A widget lists its recording in several encodings; the second `<source>` is the one
/// playable at full quality, so a widget with fewer than two sources resolves to
/// nothing.
fn audio_url(widget: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse(selectors::AUDIO_SOURCE).expect("audio source selector");

    widget
        .select(&selector)
        .nth(1)
        .and_then(|source| source.attr("src"))
        .map(absolute_url)
}

/// Assigns the two resolved pronunciation links to their regions, returning
/// `(uk, us)`.
///
/// The widgets are not reliably ordered in the markup, so the assignment inspects the
/// links for the UK marker instead: when the first link carries it the order was
/// UK-then-US, otherwise US-then-UK. With only one resolvable link, that link is
/// classified by its own marker and the other side stays absent.
fn assign_regions(
    first: Option<String>,
    second: Option<String>,
) -> (Option<String>, Option<String>) {
    match (first, second) {
        (Some(first), Some(second)) => {
            if first.contains(UK_AUDIO_MARKER) {
                (Some(first), Some(second))
            } else {
                (Some(second), Some(first))
            }
        }
        (Some(link), None) | (None, Some(link)) => {
            if link.contains(UK_AUDIO_MARKER) {
                (Some(link), None)
            } else {
                (None, Some(link))
            }
        }
        (None, None) => (None, None),
    }
}

/// Prepends the site origin to root-relative links; links that already carry a scheme
/// are kept as-is.
fn absolute_url(link: &str) -> String {
    if link.starts_with('/') {
        format!("{ORIGIN}{link}")
    } else {
        link.to_string()
    }
}

/// Strips the surrounding whitespace and the trailing punctuation the site renders
/// after a definition (usually a colon).
fn tidy_definition(text: &str) -> String {
    text.trim()
        .trim_end_matches([':', '.', ';'])
        .trim_end()
        .to_string()
}

fn element_text(elem: ElementRef<'_>) -> String {
    elem.text().collect()
}

fn trimmed_text(elem: ElementRef<'_>) -> String {
    element_text(elem).trim().to_string()
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn test_empty_entry_serializes_to_empty_object() {
        let value = serde_json::to_value(Entry::default()).unwrap();

        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let entry = Entry {
            definition: Some("a round fruit".to_string()),
            ..Entry::default()
        };
        let value = serde_json::to_value(entry).unwrap();

        assert_eq!(value, json!({"definition": "a round fruit"}));
    }

    #[test]
    fn test_single_pronunciation_serializes_as_string() {
        let entry = Entry {
            pronunciations: Some(Pronunciations::Single("https://a.example/word.mp3".to_string())),
            ..Entry::default()
        };
        let value = serde_json::to_value(entry).unwrap();

        assert_eq!(value, json!({"pronunciations": "https://a.example/word.mp3"}));
    }

    #[test]
    fn test_regional_pronunciations_serialize_as_mapping() {
        let entry = Entry {
            pronunciations: Some(Pronunciations::Regional {
                uk: Some("https://a.example/uk_pron/word.mp3".to_string()),
                us: Some("https://a.example/us_pron/word.mp3".to_string()),
            }),
            ..Entry::default()
        };
        let value = serde_json::to_value(entry).unwrap();

        assert_eq!(
            value,
            json!({
                "pronunciations": {
                    "UK": "https://a.example/uk_pron/word.mp3",
                    "US": "https://a.example/us_pron/word.mp3",
                }
            })
        );
    }

    #[test]
    fn test_full_fixture_round_trips_through_json() {
        let html = include_str!("../tests/fixtures/pages/apple.html");
        let entry = Entry::from_html(html);
        let value = serde_json::to_value(&entry).unwrap();

        let Value::Object(fields) = &value else {
            panic!("expected an object");
        };
        assert_eq!(fields.len(), 6);

        let decoded: Entry = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, entry);
    }
}
