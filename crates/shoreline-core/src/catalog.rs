//! The curated beach catalog and the page's section list.
//!
//! The catalog is static content compiled into the binary. It backs the zone
//! filter, the gallery, and the document export; [`site_sections`] is the
//! content store that hands the navigator its ordered section ids.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::SectionId;

/// Number of images the gallery section shows.
pub const GALLERY_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown zone '{0}', expected one of ALL, NORTH, SOUTH, EAST, WEST")]
pub struct ParseZoneError(String);

/// Compass zone a beach is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
    North,
    South,
    East,
    West,
}

impl Zone {
    /// All zones in display order.
    pub const ALL: [Zone; 4] = [Zone::North, Zone::South, Zone::East, Zone::West];

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::North => "NORTH",
            Zone::South => "SOUTH",
            Zone::East => "EAST",
            Zone::West => "WEST",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::ALL
            .into_iter()
            .find(|zone| zone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseZoneError(s.to_string()))
    }
}

/// Zone selection applied to the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZoneFilter {
    #[default]
    All,
    Only(Zone),
}

impl ZoneFilter {
    pub fn matches(self, zone: Zone) -> bool {
        match self {
            ZoneFilter::All => true,
            ZoneFilter::Only(only) => only == zone,
        }
    }
}

impl fmt::Display for ZoneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneFilter::All => f.write_str("ALL"),
            ZoneFilter::Only(zone) => fmt::Display::fmt(zone, f),
        }
    }
}

impl FromStr for ZoneFilter {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(ZoneFilter::All);
        }
        s.parse().map(ZoneFilter::Only)
    }
}

/// A beach destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Beach {
    id: &'static str,
    name: &'static str,
    country: &'static str,
    zone: Zone,
    description: &'static str,
    images: &'static [&'static str],
}

impl Beach {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn country(&self) -> &'static str {
        self.country
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn images(&self) -> &'static [&'static str] {
        self.images
    }

    /// Image shown on the beach's card.
    pub fn cover_image(&self) -> Option<&'static str> {
        self.images.first().copied()
    }
}

const BEACHES: &[Beach] = &[
    Beach {
        id: "grace-bay",
        name: "Grace Bay Beach",
        country: "Turks & Caicos",
        zone: Zone::North,
        description: "Powder-soft sands and calm turquoise waters protected by a barrier reef.",
        images: &[
            "https://images.unsplash.com/photo-1500375592092-40eb2168fd21",
            "https://images.unsplash.com/photo-1507525428034-b723cf961d3e",
        ],
    },
    Beach {
        id: "bondi",
        name: "Bondi Beach",
        country: "Australia",
        zone: Zone::East,
        description: "Iconic crescent beach near Sydney with buzzing promenade and surf culture.",
        images: &[
            "https://images.unsplash.com/photo-1469474968028-56623f02e42e",
            "https://images.unsplash.com/photo-1540541338287-41700207dee6",
        ],
    },
    Beach {
        id: "miami-south",
        name: "South Beach",
        country: "USA",
        zone: Zone::West,
        description: "Art Deco vibes, palm-lined sands and lively boardwalks in Miami.",
        images: &[
            "https://images.unsplash.com/photo-1533105079780-92b9be482077",
            "https://images.unsplash.com/photo-1526481280698-8fcc13fdab58",
        ],
    },
    Beach {
        id: "zanzibar-nungwi",
        name: "Nungwi Beach",
        country: "Tanzania",
        zone: Zone::South,
        description: "Crystal waters, dhow boats and spectacular sunsets at Zanzibar\u{2019}s tip.",
        images: &[
            "https://images.unsplash.com/photo-1455211641447-59724f265d3d",
            "https://images.unsplash.com/photo-1493558103817-58b2924bce98",
        ],
    },
];

/// Read-only view over the beach list.
///
/// # Examples
///
/// ```
/// # use shoreline_core::catalog::{Catalog, Zone, ZoneFilter};
/// let catalog = Catalog::builtin();
///
/// let east: Vec<_> = catalog.filter(ZoneFilter::Only(Zone::East)).collect();
/// assert_eq!(east.len(), 1);
/// assert_eq!(east[0].name(), "Bondi Beach");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    beaches: &'static [Beach],
}

impl Catalog {
    /// The curated list shipped with the site.
    pub fn builtin() -> Self {
        Self { beaches: BEACHES }
    }

    pub fn beaches(&self) -> &'static [Beach] {
        self.beaches
    }

    /// Beaches matching `filter`, in catalog order.
    pub fn filter(&self, filter: ZoneFilter) -> impl Iterator<Item = &'static Beach> {
        self.beaches
            .iter()
            .filter(move |beach| filter.matches(beach.zone))
    }

    pub fn find(&self, id: &str) -> Option<&'static Beach> {
        self.beaches.iter().find(|beach| beach.id == id)
    }

    /// Every beach image flattened in catalog order, truncated to `limit`.
    pub fn gallery_images(&self, limit: usize) -> impl Iterator<Item = &'static str> {
        self.beaches
            .iter()
            .flat_map(|beach| beach.images.iter().copied())
            .take(limit)
    }
}

/// One content section of the page and its navigation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSection {
    id: &'static str,
    label: &'static str,
}

impl SiteSection {
    pub fn id(&self) -> SectionId {
        SectionId::new(self.id)
    }

    pub fn anchor(&self) -> &'static str {
        self.id
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

const SECTIONS: &[SiteSection] = &[
    SiteSection { id: "home", label: "Home" },
    SiteSection { id: "gallery", label: "Gallery" },
    SiteSection { id: "zones", label: "Zones" },
    SiteSection { id: "ads", label: "Travel" },
    SiteSection { id: "feedback", label: "Feedback" },
    SiteSection { id: "about", label: "About" },
    SiteSection { id: "contact", label: "Contact" },
    SiteSection { id: "sitemap", label: "Sitemap" },
];

/// The page's sections in document order.
pub fn site_sections() -> &'static [SiteSection] {
    SECTIONS
}

/// Ordered ids of every page section, as registered with the navigator.
pub fn section_ids() -> Vec<SectionId> {
    SECTIONS.iter().map(SiteSection::id).collect()
}

/// Links shown in the sitemap: every section except the sitemap itself.
pub fn sitemap_links() -> impl Iterator<Item = &'static SiteSection> {
    SECTIONS.iter().filter(|section| section.id != "sitemap")
}
