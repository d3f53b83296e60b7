// Application state for HTTP handlers
use crate::application::card_service::CardService;
use crate::application::feed_service::FeedService;

#[derive(Clone)]
pub struct AppState {
    pub card_service: CardService,
    pub feed_service: FeedService,
}
