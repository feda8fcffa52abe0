//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod prints;
pub mod wishlist;

use clap::Args;
use gallery_storefront::models::ArtworkSummary;

/// Catalog fields identifying an artwork on the command line.
#[derive(Args, Debug)]
pub struct ArtworkArgs {
    /// Artwork document ID
    #[arg(long)]
    pub id: String,

    /// Artwork title
    #[arg(long)]
    pub title: String,

    /// Artist name
    #[arg(long)]
    pub artist: String,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
}

impl ArtworkArgs {
    pub fn summary(&self) -> ArtworkSummary {
        let summary = ArtworkSummary::new(self.id.as_str(), self.title.as_str(), self.artist.as_str());
        match &self.image {
            Some(image) => summary.with_image(image.as_str()),
            None => summary,
        }
    }
}

/// Stdout handle for command output (logs go to stderr).
pub fn stdout() -> std::io::StdoutLock<'static> {
    std::io::stdout().lock()
}
