// Domain layer - Pure types and transformations
pub mod card;
pub mod chart;
pub mod feed;
pub mod projection;
pub mod table;
