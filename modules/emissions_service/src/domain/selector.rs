//! Alternative sourcing: greedy selection of unclaimed second-hand inventory

use super::repository::InventoryRepository;
use super::storage_failure;
use crate::contract::{EmissionsError, FabricBlockItem};
use std::collections::BTreeSet;

/// Inventory items already substituted earlier in the same assessment.
///
/// Threaded by value through the fabric block loop so the claim state stays
/// scoped to one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedItems(BTreeSet<i64>);

impl ClaimedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Record a claim, returning the updated set
    #[must_use]
    pub fn claim(mut self, id: i64) -> Self {
        self.0.insert(id);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// First item, by id ascending, that has not been claimed yet
pub fn pick_unclaimed<'a>(
    items: &'a [FabricBlockItem],
    claimed: &ClaimedItems,
) -> Option<&'a FabricBlockItem> {
    items
        .iter()
        .filter(|item| !claimed.contains(item.id))
        .min_by_key(|item| item.id)
}

/// Select one unclaimed inventory item of the given fabric block type.
///
/// Returns the chosen item (with its preparation history) and the claimed
/// set including it. When nothing is available the set comes back unchanged.
pub async fn select_alternative(
    inventory: &dyn InventoryRepository,
    fabric_block_type: &str,
    claimed: ClaimedItems,
) -> Result<(Option<FabricBlockItem>, ClaimedItems), EmissionsError> {
    let items = inventory
        .items_by_type_name(fabric_block_type)
        .await
        .map_err(storage_failure)?;

    match pick_unclaimed(&items, &claimed).cloned() {
        Some(item) => {
            tracing::debug!(
                fabric_block = %fabric_block_type,
                item_id = item.id,
                "Selected second-hand substitute"
            );
            let claimed = claimed.claim(item.id);
            Ok((Some(item), claimed))
        }
        None => Ok((None, claimed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64) -> FabricBlockItem {
        FabricBlockItem {
            id,
            type_id: 1,
            type_name: "FB1".to_string(),
            co2eq: None,
            garment_id: None,
            location: None,
            preparations: Vec::new(),
        }
    }

    #[test]
    fn picks_lowest_unclaimed_id() {
        let items = vec![item(7), item(3), item(5)];
        let claimed = ClaimedItems::new().claim(3);

        let picked = pick_unclaimed(&items, &claimed).map(|i| i.id);
        assert_eq!(picked, Some(5));
    }

    #[test]
    fn none_when_everything_is_claimed() {
        let items = vec![item(1), item(2)];
        let claimed = ClaimedItems::new().claim(1).claim(2);

        assert!(pick_unclaimed(&items, &claimed).is_none());
    }
}
