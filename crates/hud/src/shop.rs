use crate::format::group_thousands;
use crate::view::Icon;
use rand::Rng;
use rand::seq::SliceRandom;
use runner_common::UpgradeId;
use runner_kernel::GameStore;
use serde::Serialize;

/// Most offers shown in one visit to the shop.
pub const MAX_OFFERS: usize = 3;

/// An upgrade for sale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShopItem {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub icon: Icon,
}

impl ShopItem {
    pub fn one_time(&self) -> bool {
        self.id.is_one_time()
    }
}

/// Everything the shop can ever sell.
pub const CATALOG: [ShopItem; 4] = [
    ShopItem {
        id: UpgradeId::DoubleJump,
        name: "DOUBLE JUMP",
        description: "Jump again in mid-air. Essential for high obstacles.",
        cost: 1000,
        icon: Icon::ArrowUp,
    },
    ShopItem {
        id: UpgradeId::MaxLife,
        name: "MAX LIFE UP",
        description: "Permanently adds a heart slot and heals you.",
        cost: 1500,
        icon: Icon::Pulse,
    },
    ShopItem {
        id: UpgradeId::Heal,
        name: "REPAIR KIT",
        description: "Restores 1 Life point instantly.",
        cost: 1000,
        icon: Icon::Plus,
    },
    ShopItem {
        id: UpgradeId::Immortal,
        name: "IMMORTALITY",
        description: "Unlock Ability: Press Shift/Enter to be invincible for 5s.",
        cost: 3000,
        icon: Icon::Shield,
    },
];

/// Pick up to [`MAX_OFFERS`] distinct catalog items in random order,
/// skipping one-time upgrades that are already owned.
pub fn select_offers<R: Rng + ?Sized>(
    has_double_jump: bool,
    has_immortality: bool,
    rng: &mut R,
) -> Vec<ShopItem> {
    let mut pool: Vec<ShopItem> = CATALOG
        .iter()
        .filter(|item| match item.id {
            UpgradeId::DoubleJump => !has_double_jump,
            UpgradeId::Immortal => !has_immortality,
            UpgradeId::MaxLife | UpgradeId::Heal => true,
        })
        .copied()
        .collect();
    pool.shuffle(rng);
    pool.truncate(MAX_OFFERS);
    pool
}

/// One purchasable card on the shop screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferView {
    pub item: ShopItem,
    /// Purchase button state; disabled when the player cannot pay.
    pub affordable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView {
    pub title: &'static str,
    pub credits: u64,
    pub credits_text: String,
    pub offers: Vec<OfferView>,
    pub resume_label: &'static str,
}

/// The shop screen's own state: the offers rolled when it was mounted.
///
/// Offers are rolled on mount and re-rolled whenever the one-time ownership
/// flags change, so a bought one-time upgrade disappears from the shelf.
#[derive(Debug, Default)]
pub struct ShopScreen {
    offers: Vec<ShopItem>,
    rolled_for: Option<(bool, bool)>,
}

impl ShopScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.rolled_for.is_some()
    }

    pub fn offers(&self) -> &[ShopItem] {
        &self.offers
    }

    /// Mount, or re-roll if ownership changed since the last roll.
    pub fn sync<R: Rng + ?Sized>(&mut self, store: &GameStore, rng: &mut R) {
        let flags = (store.has_double_jump(), store.has_immortality());
        if self.rolled_for == Some(flags) {
            return;
        }
        self.offers = select_offers(flags.0, flags.1, rng);
        self.rolled_for = Some(flags);
        tracing::debug!(
            offers = ?self.offers.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(),
            "shop offers rolled"
        );
    }

    /// Forget the current roll; the next [`sync`](Self::sync) rolls fresh offers.
    pub fn unmount(&mut self) {
        self.offers.clear();
        self.rolled_for = None;
    }

    pub fn view(&self, store: &GameStore) -> ShopView {
        let credits = store.score();
        ShopView {
            title: "UPGRADE BAY",
            credits,
            credits_text: group_thousands(credits),
            offers: self
                .offers
                .iter()
                .map(|item| OfferView {
                    item: *item,
                    affordable: credits >= item.cost,
                })
                .collect(),
            resume_label: "RESUME MISSION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn shop_store(credits: u64) -> GameStore {
        let mut s = GameStore::new();
        s.start_game();
        s.collect_gem(credits);
        s.open_shop().unwrap();
        s
    }

    #[test]
    fn offers_are_distinct_and_capped() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for (dj, imm) in [(false, false), (true, false), (false, true), (true, true)] {
                let offers = select_offers(dj, imm, &mut rng);
                assert!(offers.len() <= MAX_OFFERS);
                let ids: BTreeSet<UpgradeId> = offers.iter().map(|o| o.id).collect();
                assert_eq!(ids.len(), offers.len(), "duplicate offer");
                if dj {
                    assert!(!ids.contains(&UpgradeId::DoubleJump));
                }
                if imm {
                    assert!(!ids.contains(&UpgradeId::Immortal));
                }
            }
        }
    }

    #[test]
    fn owning_both_one_time_upgrades_leaves_two_offers() {
        let mut rng = StdRng::seed_from_u64(7);
        let offers = select_offers(true, true, &mut rng);
        let ids: BTreeSet<UpgradeId> = offers.iter().map(|o| o.id).collect();
        assert_eq!(ids, BTreeSet::from([UpgradeId::MaxLife, UpgradeId::Heal]));
    }

    #[test]
    fn every_item_eventually_offered() {
        let mut seen = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            seen.extend(select_offers(false, false, &mut rng).iter().map(|o| o.id));
        }
        assert_eq!(seen.len(), CATALOG.len());
    }

    #[test]
    fn affordability_flags() {
        let store = shop_store(1200);
        let mut screen = ShopScreen::new();
        let mut rng = StdRng::seed_from_u64(3);
        screen.sync(&store, &mut rng);

        let view = screen.view(&store);
        assert_eq!(view.credits_text, "1,200");
        for offer in &view.offers {
            assert_eq!(offer.affordable, offer.item.cost <= 1200);
        }
    }

    #[test]
    fn sync_keeps_roll_until_ownership_changes() {
        let mut store = shop_store(5000);
        let mut screen = ShopScreen::new();
        let mut rng = StdRng::seed_from_u64(11);

        screen.sync(&store, &mut rng);
        let first = screen.offers().to_vec();
        screen.sync(&store, &mut rng);
        assert_eq!(screen.offers(), first.as_slice());

        store.buy_item(UpgradeId::Immortal, 3000).unwrap();
        screen.sync(&store, &mut rng);
        assert!(screen.offers().iter().all(|o| o.id != UpgradeId::Immortal));
    }

    #[test]
    fn unmount_clears_roll() {
        let store = shop_store(0);
        let mut screen = ShopScreen::new();
        let mut rng = StdRng::seed_from_u64(5);
        screen.sync(&store, &mut rng);
        assert!(screen.is_mounted());
        screen.unmount();
        assert!(!screen.is_mounted());
        assert!(screen.offers().is_empty());
    }

    #[test]
    fn catalog_one_time_flags() {
        let one_time: Vec<UpgradeId> = CATALOG
            .iter()
            .filter(|i| i.one_time())
            .map(|i| i.id)
            .collect();
        assert_eq!(one_time, vec![UpgradeId::DoubleJump, UpgradeId::Immortal]);
    }
}
