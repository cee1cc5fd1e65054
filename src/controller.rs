//! Gallery controller
//!
//! Loads the species grid, opens the detail overlay for a selected species
//! and closes it again. The controller owns no UI of its own; it drives an
//! injected [`GalleryView`] with data from an injected [`SpeciesApi`].

use std::cell::Cell;

use crate::api::{ApiError, SpeciesApi};
use crate::config::GalleryConfig;
use crate::models::SpeciesId;
use crate::placeholder::SvgPlaceholder;
use crate::resolve::ImageResolver;
use crate::view::{ClickTarget, Detail, GalleryView, Thumbnail};

/// Shown in place of the grid when the collection cannot be loaded
pub const GRID_ERROR_MESSAGE: &str = "Unable to load species right now. Please try again later.";

/// Alerted when a single species cannot be loaded
pub const DETAIL_ERROR_MESSAGE: &str = "Sorry, the details for this species could not be loaded.";

/// Key that closes the overlay
pub const ESCAPE_KEY: &str = "Escape";

/// What happened to a detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The overlay shows the requested species
    Shown,
    /// A newer request was issued before this one finished; the view was
    /// left alone
    Superseded,
}

pub struct GalleryController<A, V> {
    api: A,
    view: V,
    resolver: ImageResolver,
    discard_stale: bool,
    latest_ticket: Cell<u64>,
}

impl<A: SpeciesApi, V: GalleryView> GalleryController<A, V> {
    pub fn new(api: A, view: V, resolver: ImageResolver) -> Self {
        Self { api, view, resolver, discard_stale: true, latest_ticket: Cell::new(0) }
    }

    /// Controller with the resolver and stale-response policy taken from
    /// configuration.
    pub fn from_config(api: A, view: V, config: &GalleryConfig) -> Self {
        let placeholder = SvgPlaceholder::from(&config.placeholder);
        let resolver = ImageResolver::new(&config.assets, &placeholder);
        Self::new(api, view, resolver).discard_stale_details(config.behavior.discard_stale_details)
    }

    /// When false, every detail response updates the overlay as it arrives
    /// and the last one to arrive wins.
    pub fn discard_stale_details(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    pub fn with_resolver(mut self, resolver: ImageResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Fetch the collection and fill the grid in response order.
    ///
    /// On failure the grid shows [`GRID_ERROR_MESSAGE`]; the error is logged
    /// and returned, never retried. Returns the number of thumbnails shown.
    pub async fn load_grid(&self) -> Result<usize, ApiError> {
        let species = match self.api.list().await {
            Ok(species) => species,
            Err(e) => {
                tracing::error!(error = %e, "failed to load species list");
                self.view.show_grid_error(GRID_ERROR_MESSAGE);
                return Err(e);
            }
        };

        self.view.clear_grid();
        for (index, item) in species.iter().enumerate() {
            let thumbnail = Thumbnail::new(index, item, &self.resolver);
            if thumbnail.species_id.is_none() {
                tracing::warn!(index, "species without id; thumbnail will not open details");
            }
            self.view.append_thumbnail(&thumbnail);
        }

        tracing::info!(count = species.len(), "species grid loaded");
        Ok(species.len())
    }

    /// Fetch one species, fill the overlay, show it and focus its close
    /// control.
    ///
    /// On failure the view raises [`DETAIL_ERROR_MESSAGE`] as an alert. If a
    /// newer request was started meanwhile and stale responses are being
    /// discarded, neither outcome touches the view.
    pub async fn load_info(&self, id: &SpeciesId) -> Result<DetailOutcome, ApiError> {
        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);

        let result = self.api.get(id).await;

        if self.discard_stale && self.latest_ticket.get() != ticket {
            tracing::debug!(%id, ticket, "discarding superseded detail response");
            return Ok(DetailOutcome::Superseded);
        }

        match result {
            Ok(species) => {
                let detail = Detail::new(&species, &self.resolver);
                self.view.set_detail(&detail);
                self.view.set_overlay_visible(true);
                self.view.focus_close();
                tracing::info!(%id, title = %detail.title, "species details shown");
                Ok(DetailOutcome::Shown)
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to load species details");
                self.view.alert(DETAIL_ERROR_MESSAGE);
                Err(e)
            }
        }
    }

    /// Hide the overlay. Hiding a hidden overlay does nothing.
    pub fn hide_modal(&self) {
        if self.view.is_overlay_visible() {
            self.view.set_overlay_visible(false);
            tracing::debug!("overlay hidden");
        }
    }

    /// Keyboard handler. Returns true when the key closed the overlay.
    pub fn handle_key(&self, key: &str) -> bool {
        if key == ESCAPE_KEY && self.view.is_overlay_visible() {
            self.hide_modal();
            return true;
        }
        false
    }

    /// Overlay click handler. Returns true when the click closed the overlay.
    pub fn handle_overlay_click(&self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::CloseControl | ClickTarget::Backdrop => {
                let was_visible = self.view.is_overlay_visible();
                self.hide_modal();
                was_visible
            }
            ClickTarget::Content => false,
        }
    }
}
