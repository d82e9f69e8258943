use futures::future::{BoxFuture, FutureExt};
use nearby_catalog::{CatalogError, VenueClient};
use nearby_core::{Position, VenueListing};

pub type FetchFuture = BoxFuture<'static, Result<Vec<VenueListing>, CatalogError>>;

/// Anything that can fetch the venue listings near a position.
///
/// The returned future must be `'static + Send` so the list controller can
/// run it off its own context and abandon it when superseded.
pub trait VenueSource: Send + Sync {
    fn fetch_venues(&self, position: Position) -> FetchFuture;
}

impl VenueSource for VenueClient {
    fn fetch_venues(&self, position: Position) -> FetchFuture {
        let client = self.clone();
        async move { client.fetch_venues(position).await }.boxed()
    }
}
