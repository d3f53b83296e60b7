// Application layer - Use cases over the feed
pub mod card_service;
pub mod feed_service;
pub mod feed_store;
