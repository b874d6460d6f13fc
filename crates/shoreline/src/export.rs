//! Word-compatible export of the guide's content.
//!
//! The export is plain HTML with a UTF-8 charset declaration; word processors
//! open it when saved with a `.doc` extension.

use std::{fs, path::Path};

use log::info;

use shoreline_core::catalog::{self, Catalog, GALLERY_LIMIT};

use crate::{error::ShorelineError, feedback::FeedbackEntry};

/// File name used when no output path is given.
pub const DEFAULT_EXPORT_NAME: &str = "BeautyOfBeaches.doc";

const TITLE: &str = "Explore the World\u{2019}s Most Beautiful Beaches";
const ABOUT: &str =
    "We are students building a responsive SPA to showcase the world\u{2019}s most beautiful beaches.";
const INFO_EMAIL: &str = "info@beautyofbeaches.example";
const SUPPORT_EMAIL: &str = "support@beautyofbeaches.example";
const PHONE: &str = "+234 800 000 0000";
const ADDRESS: &str = "123 Ocean View, Lagos, Nigeria";

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Default)]
struct Body {
    html: String,
}

impl Body {
    fn open_section(&mut self, id: &str) {
        self.html.push_str(&format!("<section id=\"{}\">", escape_html(id)));
    }

    fn close_section(&mut self) {
        self.html.push_str("</section>");
    }

    fn heading(&mut self, level: u8, text: &str) {
        self.html
            .push_str(&format!("<h{level}>{}</h{level}>", escape_html(text)));
    }

    fn paragraph(&mut self, text: &str) {
        self.html.push_str(&format!("<p>{}</p>", escape_html(text)));
    }

    fn list<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.html.push_str("<ul>");
        for item in items {
            self.html
                .push_str(&format!("<li>{}</li>", escape_html(item.as_ref())));
        }
        self.html.push_str("</ul>");
    }
}

/// Renders the full export: beaches, gallery, travel, recent feedback and the
/// contact details.
pub fn render_document(catalog: &Catalog, feedback: &[FeedbackEntry]) -> String {
    let mut body = Body::default();

    body.open_section("home");
    body.heading(1, TITLE);
    body.close_section();

    body.open_section("zones");
    body.heading(2, "Beaches by Zone");
    for beach in catalog.beaches() {
        body.heading(3, beach.name());
        body.paragraph(&format!("{} \u{2022} {}", beach.country(), beach.zone()));
        body.paragraph(beach.description());
    }
    body.close_section();

    body.open_section("gallery");
    body.heading(2, "Gallery");
    body.list(catalog.gallery_images(GALLERY_LIMIT));
    body.close_section();

    body.open_section("ads");
    body.heading(2, "Travel");
    body.paragraph("Flights: compare fares and find routes to beach destinations.");
    body.paragraph("Buses: find intercity buses and coastal routes.");
    body.close_section();

    if !feedback.is_empty() {
        body.open_section("feedback");
        body.heading(2, "Recent feedback");
        body.list(
            feedback
                .iter()
                .map(|entry| format!("{}: {}", entry.name(), entry.message())),
        );
        body.close_section();
    }

    body.open_section("about");
    body.heading(2, "About Us");
    body.paragraph(ABOUT);
    body.list([
        format!("Email: {INFO_EMAIL}"),
        format!("Address: {ADDRESS}"),
        format!("Contact: {PHONE}"),
    ]);
    body.close_section();

    body.open_section("contact");
    body.heading(2, "Contact Us");
    body.list([
        format!("Email: {SUPPORT_EMAIL}"),
        format!("Phone: {PHONE}"),
        format!("Address: {ADDRESS}"),
    ]);
    body.close_section();

    body.open_section("sitemap");
    body.heading(2, "Sitemap");
    body.list(catalog::sitemap_links().map(|section| section.label()));
    body.close_section();

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head><body>{}</body></html>",
        body.html
    )
}

/// Writes `document` to `path`.
///
/// # Errors
///
/// Returns [`ShorelineError::Export`] when `path` names a directory and
/// [`ShorelineError::Io`] when the file cannot be written.
pub fn write_document(path: &Path, document: &str) -> Result<(), ShorelineError> {
    if path.is_dir() {
        return Err(ShorelineError::Export(format!(
            "'{}' is a directory",
            path.display()
        )));
    }
    fs::write(path, document)?;
    info!(path = path.display().to_string(), bytes = document.len(); "Export written");
    Ok(())
}
