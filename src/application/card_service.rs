// Card service - Use case for rendering dashboard cards
use crate::application::feed_service::FeedService;
use crate::domain::card::{subtitle, CardSummary, CardView, Tab};
use crate::domain::chart::{build, ChartKind};
use crate::domain::feed::FeedEnvelope;
use crate::domain::projection::{project, ProjectionMode};
use crate::domain::table::{accessibility_rows, date_range};
use crate::infrastructure::config::{CardConfig, CardsConfig};

#[derive(Clone)]
pub struct CardService {
    feed: FeedService,
    cards_config: CardsConfig,
}

impl CardService {
    pub fn new(feed: FeedService, cards_config: CardsConfig) -> Self {
        Self { feed, cards_config }
    }

    pub fn list_cards(&self) -> Vec<CardSummary> {
        self.cards_config
            .cards
            .iter()
            .map(|card| CardSummary {
                id: card.id.clone(),
                title: card.title.clone(),
                embed_path: card.embed_path.clone(),
                tabs: Tab::all(),
            })
            .collect()
    }

    /// Render `card_id` for the selected tab, or `None` if no such card.
    pub async fn render(&self, card_id: &str, mode: ProjectionMode) -> Option<CardView> {
        let card = self.cards_config.cards.iter().find(|c| c.id == card_id)?;
        let envelope = self.feed.latest().await;
        Some(render_card(card, &envelope, mode))
    }
}

fn render_card(card: &CardConfig, envelope: &FeedEnvelope, mode: ProjectionMode) -> CardView {
    let raw = envelope.select(&card.metric_keys());
    let view = project(&raw, mode);
    let chart = build(&view, ChartKind::from(mode), &card.labels());

    tracing::debug!(
        "Rendered card {} ({}): {} series over {} dates",
        card.id,
        mode,
        chart.series.len(),
        view.dates.len()
    );

    CardView {
        id: card.id.clone(),
        title: card.title.clone(),
        subtitle: subtitle(view.last_updated_on, card.short_date),
        embed_path: card.embed_path.clone(),
        is_stale: view.is_stale,
        error: view.error.as_ref().map(|e| e.to_string()),
        active_tab: mode,
        tabs: Tab::all(),
        date_range: date_range(&view.dates),
        table: accessibility_rows(&view),
        chart,
    }
}
