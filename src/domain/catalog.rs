//! Built-in seed catalog.
//!
//! The registry is populated from this catalog at process start and on
//! administrative reset. Display data and starting prices are fixed; the
//! deadline of each cycle is drawn fresh by the service.

/// Immutable display data and opening price for one catalog lot.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Display title.
    pub title: &'static str,
    /// Display description.
    pub description: &'static str,
    /// Display image reference.
    pub image_url: &'static str,
    /// Opening price in whole currency units.
    pub starting_price: u64,
}

/// The built-in six-lot catalog.
#[must_use]
pub const fn default_catalog() -> &'static [CatalogEntry] {
    &[
        CatalogEntry {
            title: "1962 Gibson ES-335",
            description: "Sunburst semi-hollow in original case, all-original electronics",
            image_url: "https://picsum.photos/seed/es335/400",
            starting_price: 12_000,
        },
        CatalogEntry {
            title: "Omega Speedmaster Professional",
            description: "Pre-moon caliber 321, serviced with papers",
            image_url: "https://picsum.photos/seed/speedmaster/400",
            starting_price: 5_000,
        },
        CatalogEntry {
            title: "First Edition Dune (1965)",
            description: "Chilton first printing with unclipped dust jacket",
            image_url: "https://picsum.photos/seed/dune/400",
            starting_price: 3_500,
        },
        CatalogEntry {
            title: "Leica M3 Double Stroke",
            description: "1955 body with Summicron 50mm f/2, recently CLA'd",
            image_url: "https://picsum.photos/seed/m3/400",
            starting_price: 2_200,
        },
        CatalogEntry {
            title: "Signed Banksy Screen Print",
            description: "Girl with Balloon, numbered edition with COA",
            image_url: "https://picsum.photos/seed/balloon/400",
            starting_price: 25_000,
        },
        CatalogEntry {
            title: "Courtside Finals Tickets",
            description: "Two courtside seats for game seven, transferable",
            image_url: "https://picsum.photos/seed/courtside/400",
            starting_price: 1_500,
        },
    ]
}
