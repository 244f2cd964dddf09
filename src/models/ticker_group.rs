use crate::models::{ExtractedEntity, TickerSelection};
use crate::types::TickerSymbol;
use serde::Serialize;

/// Tickers resolved for one fragment of the oracle output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerGroup {
    pub original_text: String,
    pub tickers: Vec<TickerSymbol>,
}

impl TickerGroup {
    /// Groups selections by the originating entity's original text (or name), keeping
    /// first-seen group order and selection order within each group. A ticker appears at
    /// most once per group.
    pub fn group_selections(
        entities: &[ExtractedEntity],
        selections: &[TickerSelection],
    ) -> Vec<TickerGroup> {
        let mut groups: Vec<TickerGroup> = Vec::new();

        for selection in selections {
            let entity = match entities.get(selection.entity_id) {
                Some(entity) => entity,
                None => continue,
            };
            let group_key = entity.group_key();

            match groups
                .iter_mut()
                .find(|group| group.original_text == group_key)
            {
                Some(group) => {
                    if !group.tickers.contains(&selection.ticker) {
                        group.tickers.push(selection.ticker.clone());
                    }
                }
                None => groups.push(TickerGroup {
                    original_text: group_key.to_string(),
                    tickers: vec![selection.ticker.clone()],
                }),
            }
        }

        groups
    }
}
