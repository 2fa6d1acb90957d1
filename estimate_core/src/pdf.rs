//! # PDF Generation Module
//!
//! Renders quotes to PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Quote data is bound to Typst variables as string literals, so client
//!   text is never interpreted as markup
//! - The logo (if any) is served from memory through the Typst `World`
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::calculations::{EstimateRequest, PricingPolicy, ProjectType};
//! use estimate_core::config::BrandingConfig;
//! use estimate_core::pdf::render_quote_pdf;
//! use estimate_core::permits::PermitAdvisory;
//! use estimate_core::quote::{ClientInfo, Quote};
//!
//! let client = ClientInfo::new("Jane Doe", "jane@example.com", "410-555-0100", "10 Light St");
//! let request = EstimateRequest::area(ProjectType::Deck, 12.0, 16.0, "Composite");
//! let quote = Quote::prepare(client, request, PricingPolicy::Markup, &PermitAdvisory::default()).unwrap();
//!
//! let pdf_bytes = render_quote_pdf(&quote, &BrandingConfig::default(), None).unwrap();
//! std::fs::write("quote.pdf", pdf_bytes).unwrap();
//! ```

use std::path::Path;

use chrono::{Datelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::branding::Logo;
use crate::config::BrandingConfig;
use crate::errors::{CoreResult, EstimateError};
use crate::quote::Quote;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world: one source document plus in-memory assets.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
    /// Binary files the document may load, keyed by root-relative path
    assets: Vec<(String, Bytes)>,
}

impl PdfWorld {
    fn new(source: String, assets: Vec<(String, Bytes)>) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
            assets,
        }
    }

    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();
        // Bundled fonts from typst-assets (Libertinus Serif, New Computer Modern, DejaVu Sans Mono)
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }
        fonts
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        let path = id.vpath().as_rootless_path();
        if id.package().is_none() {
            if let Some((_, bytes)) = self.assets.iter().find(|(name, _)| path == Path::new(name)) {
                return Ok(bytes.clone());
            }
        }
        Err(FileError::NotFound(path.into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for a customer quote. `{{BINDINGS}}` is replaced with
/// `#let` statements defining every variable the body uses.
const QUOTE_TEMPLATE: &str = r##"
{{BINDINGS}}

#set page(
  paper: "a4",
  margin: (top: 20mm, bottom: 40mm, left: 20mm, right: 20mm),
  footer: context {
    if here().page() == counter(page).final().first() {
      set align(center)
      set text(size: 10pt)
      [#contact_name \ #phone \ #website]
    }
  },
)

#set text(font: "Libertinus Serif", size: 12pt)

#if logo_path != none {
  place(top + left, image(logo_path, width: 30mm))
}

#align(center)[
  #text(size: 16pt, weight: "bold")[#company_name]
]

#align(right)[#text(size: 10pt, fill: gray)[#prepared_on]]

#v(12mm)

#text(size: 14pt, weight: "bold")[#project_heading]

#v(4pt)

#for (label, value) in detail_lines {
  [#strong(label + ":") #value]
  linebreak()
}

#v(10mm)

#for (label, value) in result_lines {
  [#strong(label + ":") #value]
  linebreak()
}

#if permit_notice != none {
  v(8mm)
  block(width: 100%, fill: rgb("#fff3cd"), inset: 8pt, radius: 4pt)[
    #text(size: 11pt)[#permit_notice]
  ]
}
"##;

// ============================================================================
// PDF Rendering Functions
// ============================================================================

/// Render a quote to PDF.
///
/// # Arguments
///
/// * `quote` - The priced quote
/// * `branding` - Company name and footer contact details
/// * `logo` - Logo to place top-left, if one was loaded
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(EstimateError::RenderFailed)` - If Typst compilation or export fails
///
/// If the logo passes the format check but Typst cannot decode it, the quote
/// is rendered again without the logo.
pub fn render_quote_pdf(quote: &Quote, branding: &BrandingConfig, logo: Option<&Logo>) -> CoreResult<Vec<u8>> {
    if let Some(logo) = logo {
        match compile_pdf(build_source(quote, branding, Some(logo)), logo_assets(logo)) {
            Ok(pdf) => return Ok(pdf),
            Err(e) => {
                tracing::warn!(error = %e, "logo could not be embedded, rendering without it");
            }
        }
    }
    compile_pdf(build_source(quote, branding, None), Vec::new())
}

fn logo_file_name(logo: &Logo) -> String {
    format!("logo.{}", logo.format.extension())
}

fn logo_assets(logo: &Logo) -> Vec<(String, Bytes)> {
    vec![(logo_file_name(logo), Bytes::new(logo.bytes.clone()))]
}

/// Assemble the full Typst source for a quote.
fn build_source(quote: &Quote, branding: &BrandingConfig, logo: Option<&Logo>) -> String {
    let client = &quote.client;
    let detail_lines = [
        ("Client", client.name.as_str()),
        ("Email", client.email.as_str()),
        ("Phone", client.phone.as_str()),
        ("Address", client.address.as_str()),
    ]
    .into_iter()
    .map(|(label, value)| (label.to_string(), value.trim().to_string()))
    .chain(std::iter::once(("Material".to_string(), quote.material_label())))
    .collect::<Vec<_>>();

    let result_lines = quote
        .result
        .fields()
        .into_iter()
        .map(|(key, value)| (humanize_key(key), value))
        .collect::<Vec<_>>();

    let bindings = [
        ("company_name", typst_string(&branding.company_name)),
        ("contact_name", typst_string(&branding.contact_name)),
        ("phone", typst_string(&branding.phone)),
        ("website", typst_string(&branding.website)),
        ("prepared_on", typst_string(&quote.prepared_on.format("%B %-d, %Y").to_string())),
        ("project_heading", typst_string(&quote.title())),
        ("detail_lines", typst_pairs(&detail_lines)),
        ("result_lines", typst_pairs(&result_lines)),
        ("permit_notice", typst_optional(quote.permit_notice.as_deref())),
        ("logo_path", typst_optional(logo.map(logo_file_name).as_deref())),
    ]
    .iter()
    .map(|(name, value)| format!("#let {} = {}", name, value))
    .collect::<Vec<_>>()
    .join("\n");

    QUOTE_TEMPLATE.replace("{{BINDINGS}}", &bindings)
}

fn compile_pdf(source: String, assets: Vec<(String, Bytes)>) -> CoreResult<Vec<u8>> {
    let world = PdfWorld::new(source, assets);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::render_failed(format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::render_failed(format!("PDF export failed: {}", error_msgs.join("; ")))
    })
}

/// Turn a field key into a label: `material_cost` -> `Material Cost`.
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Quote text as a Typst string literal
fn typst_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn typst_optional(s: Option<&str>) -> String {
    s.map(typst_string).unwrap_or_else(|| "none".to_string())
}

/// Array of (label, value) string pairs. The trailing comma keeps a
/// one-element array from being read as a parenthesized expression.
fn typst_pairs(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return "()".to_string();
    }
    let items = pairs
        .iter()
        .map(|(label, value)| format!("({}, {})", typst_string(label), typst_string(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("({},)", items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{EstimateRequest, PricingPolicy, ProjectType};
    use crate::permits::PermitAdvisory;
    use crate::quote::ClientInfo;

    const SVG_LOGO: &[u8] =
        br#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="40" height="20" fill="teal"/></svg>"#;

    fn quote(address: &str, policy: PricingPolicy) -> Quote {
        let client = ClientInfo::new("Jane Doe", "jane@example.com", "410-555-0100", address);
        let request = EstimateRequest::area(ProjectType::Deck, 10.0, 10.0, "Pressure-treated wood").with_markup(20.0);
        Quote::prepare(client, request, policy, &PermitAdvisory::default()).unwrap()
    }

    fn assert_pdf(bytes: &[u8]) {
        assert!(bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("material_cost"), "Material Cost");
        assert_eq!(humanize_key("sqft"), "Sqft");
        assert_eq!(humanize_key("duration_days"), "Duration Days");
        assert_eq!(humanize_key("DOWN_payment"), "Down Payment");
    }

    #[test]
    fn test_typst_string_escaping() {
        assert_eq!(typst_string("plain"), "\"plain\"");
        assert_eq!(typst_string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(typst_string("a\\b\nc"), "\"a\\\\b\\nc\"");
    }

    #[test]
    fn test_typst_pairs_single_element() {
        let pairs = vec![("Sqft".to_string(), "100.00".to_string())];
        assert_eq!(typst_pairs(&pairs), "((\"Sqft\", \"100.00\"),)");
        assert_eq!(typst_pairs(&[]), "()");
    }

    #[test]
    fn test_source_lists_every_result_field() {
        let quote = quote("5 Oak Rd, Towson MD 21286", PricingPolicy::FixedMultiplier);
        let source = build_source(&quote, &BrandingConfig::default(), None);

        for label in ["Sqft", "Material Cost", "Labor Cost", "Total Estimate", "Down Payment", "Duration Days"] {
            assert!(source.contains(&format!("\"{}\"", label)), "missing {}", label);
        }
        assert!(source.contains("#let project_heading = \"Deck Estimate\""));
        assert!(source.contains("#let logo_path = none"));
        assert!(source.contains("#let permit_notice = none"));
        assert!(source.contains("\"2666.67\""));
    }

    #[test]
    fn test_source_references_logo_by_format() {
        let quote = quote("5 Oak Rd", PricingPolicy::Markup);
        let logo = Logo::from_bytes(SVG_LOGO.to_vec()).unwrap();
        let source = build_source(&quote, &BrandingConfig::default(), Some(&logo));
        assert!(source.contains("#let logo_path = \"logo.svg\""));
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = render_quote_pdf(&quote("5 Oak Rd, Towson MD 21286", PricingPolicy::Markup), &BrandingConfig::default(), None);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
        assert_pdf(&pdf.unwrap());
    }

    #[test]
    fn test_pdf_with_logo_and_permit_notice() {
        let quote = quote("100 N Charles St, Baltimore MD 21201", PricingPolicy::FixedMultiplier);
        let logo = Logo::from_bytes(SVG_LOGO.to_vec()).unwrap();

        let pdf = render_quote_pdf(&quote, &BrandingConfig::default(), Some(&logo)).unwrap();
        assert_pdf(&pdf);
    }

    #[test]
    fn test_undecodable_logo_falls_back() {
        let quote = quote("5 Oak Rd", PricingPolicy::Markup);
        // Correct PNG signature, garbage after it
        let logo = Logo::from_bytes(b"\x89PNG\r\n\x1a\nnot really a png".to_vec()).unwrap();

        let pdf = render_quote_pdf(&quote, &BrandingConfig::default(), Some(&logo)).unwrap();
        assert_pdf(&pdf);
    }

    #[test]
    fn test_markup_characters_in_client_text() {
        let client = ClientInfo::new(
            "#set page(width: 1cm) *Bold* _it_ $x$ // comment",
            "a@b.com",
            "[555] <tag> @ref",
            "1 \"Quoted\" Ln \\ 21201",
        );
        let request = EstimateRequest::fence(30.0, 6.0, "Chain-link");
        let quote = Quote::prepare(client, request, PricingPolicy::Markup, &PermitAdvisory::default()).unwrap();

        let pdf = render_quote_pdf(&quote, &BrandingConfig::default(), None).unwrap();
        assert_pdf(&pdf);
    }
}
