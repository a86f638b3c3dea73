//! Basket-versus-components arbitrage.
//!
//! A basket trading away from the weighted sum of its component mids gets
//! unwound against the components: sell the rich side, buy the cheap side,
//! all legs at the touch. Legs are not atomic; each tick re-derives the
//! mispricing from live positions, so a partial fill self-corrects.

use crate::domain::{Depth, Order, PositionLimits, Side};
use crate::strategy::config::Basket;
use crate::strategy::sizing::capacity;
use std::collections::HashMap;

/// Weighted fair value of the basket from component mids; `None` when any
/// component mid is missing.
pub fn fair_value(cfg: &Basket, mids: &HashMap<String, f64>) -> Option<f64> {
    let mut fair = 0.0;
    for leg in &cfg.components {
        fair += leg.weight as f64 * mids.get(&leg.symbol)?;
    }
    Some(fair)
}

pub fn evaluate(
    cfg: &Basket,
    depths: &HashMap<String, Depth>,
    mids: &HashMap<String, f64>,
    positions: &HashMap<String, i64>,
    limits: &PositionLimits,
) -> Vec<Order> {
    let (Some(fair), Some(&basket_mid)) = (fair_value(cfg, mids), mids.get(&cfg.symbol)) else {
        return Vec::new();
    };
    let Some(basket_depth) = depths.get(&cfg.symbol) else {
        return Vec::new();
    };
    let edge = basket_mid - fair;
    if edge.abs() <= cfg.edge {
        return Vec::new();
    }

    let position = positions.get(&cfg.symbol).copied().unwrap_or(0);
    let limit = limits.limit(&cfg.symbol);

    // Basket rich: sell it, buy the parts. Cheap: the mirror image.
    let (basket_side, leg_side) =
        if edge > 0.0 { (Side::Ask, Side::Bid) } else { (Side::Bid, Side::Ask) };

    let basket_touch = match basket_side {
        Side::Ask => basket_depth.best_bid(),
        Side::Bid => basket_depth.best_ask(),
    };
    let Some(basket_touch) = basket_touch else {
        return Vec::new();
    };

    let mut qty = capacity(basket_side, position, limit).min(basket_touch.size);
    let mut leg_touches = Vec::with_capacity(cfg.components.len());
    for leg in &cfg.components {
        let Some(depth) = depths.get(&leg.symbol) else {
            return Vec::new();
        };
        let touch = match leg_side {
            Side::Bid => depth.best_ask(),
            Side::Ask => depth.best_bid(),
        };
        let Some(touch) = touch else {
            return Vec::new();
        };
        let leg_position = positions.get(&leg.symbol).copied().unwrap_or(0);
        let leg_cap = capacity(leg_side, leg_position, limits.limit(&leg.symbol));
        qty = qty.min(leg_cap / leg.weight).min(touch.size / leg.weight);
        leg_touches.push(touch.price);
    }
    if qty <= 0 {
        return Vec::new();
    }

    let mut orders = Vec::new();
    match basket_side {
        Side::Ask => orders.push(Order::sell(&cfg.symbol, basket_touch.price, qty)),
        Side::Bid => orders.push(Order::buy(&cfg.symbol, basket_touch.price, qty)),
    }
    for (leg, price) in cfg.components.iter().zip(leg_touches) {
        let leg_qty = leg.weight * qty;
        match leg_side {
            Side::Bid => orders.push(Order::buy(&leg.symbol, price, leg_qty)),
            Side::Ask => orders.push(Order::sell(&leg.symbol, price, leg_qty)),
        }
    }
    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Level;
    use crate::strategy::config::BasketLeg;

    fn depth(bid: (f64, i64), ask: (f64, i64)) -> Depth {
        let mut depth = Depth::default();
        depth.add_level(Level { price: bid.0, size: bid.1 }, Side::Bid);
        depth.add_level(Level { price: ask.0, size: ask.1 }, Side::Ask);
        depth
    }

    fn basket() -> Basket {
        Basket {
            symbol: "PICNIC_BASKET1".into(),
            components: vec![
                BasketLeg { symbol: "CROISSANTS".into(), weight: 6 },
                BasketLeg { symbol: "JAMS".into(), weight: 3 },
                BasketLeg { symbol: "DJEMBES".into(), weight: 1 },
            ],
            edge: 10.0,
        }
    }

    fn limits() -> PositionLimits {
        [
            ("PICNIC_BASKET1".to_string(), 60),
            ("CROISSANTS".to_string(), 250),
            ("JAMS".to_string(), 350),
            ("DJEMBES".to_string(), 60),
        ]
        .into_iter()
        .collect::<HashMap<_, _>>()
        .into()
    }

    fn scene(basket_mid_offset: f64) -> (HashMap<String, Depth>, HashMap<String, f64>) {
        let mut depths = HashMap::new();
        let mut mids = HashMap::new();
        // Component mids: 100, 50, 200 -> fair = 6*100 + 3*50 + 200 = 950.
        depths.insert("CROISSANTS".to_string(), depth((99.0, 1000), (101.0, 1000)));
        mids.insert("CROISSANTS".to_string(), 100.0);
        depths.insert("JAMS".to_string(), depth((49.0, 1000), (51.0, 1000)));
        mids.insert("JAMS".to_string(), 50.0);
        depths.insert("DJEMBES".to_string(), depth((199.0, 1000), (201.0, 1000)));
        mids.insert("DJEMBES".to_string(), 200.0);
        let basket_mid = 950.0 + basket_mid_offset;
        depths.insert(
            "PICNIC_BASKET1".to_string(),
            depth((basket_mid - 1.0, 1000), (basket_mid + 1.0, 1000)),
        );
        mids.insert("PICNIC_BASKET1".to_string(), basket_mid);
        (depths, mids)
    }

    #[test]
    fn rich_basket_is_sold_against_component_buys() {
        let (depths, mids) = scene(30.0);
        let orders = evaluate(&basket(), &depths, &mids, &HashMap::new(), &limits());
        // Flat everywhere: min(60, 250/6, 350/3, 60/1) = 41.
        assert_eq!(orders.len(), 4);
        assert_eq!(orders[0].symbol, "PICNIC_BASKET1");
        assert_eq!(orders[0].quantity, -41);
        assert_eq!(orders[1].symbol, "CROISSANTS");
        assert_eq!(orders[1].quantity, 6 * 41);
        assert_eq!(orders[2].symbol, "JAMS");
        assert_eq!(orders[2].quantity, 3 * 41);
        assert_eq!(orders[3].symbol, "DJEMBES");
        assert_eq!(orders[3].quantity, 41);
    }

    #[test]
    fn cheap_basket_is_bought_against_component_sells() {
        let (depths, mids) = scene(-30.0);
        let orders = evaluate(&basket(), &depths, &mids, &HashMap::new(), &limits());
        assert_eq!(orders.len(), 4);
        assert!(orders[0].is_buy());
        assert!(!orders[1].is_buy());
    }

    #[test]
    fn edge_inside_threshold_is_quiet() {
        let (depths, mids) = scene(5.0);
        let orders = evaluate(&basket(), &depths, &mids, &HashMap::new(), &limits());
        assert!(orders.is_empty());
    }

    #[test]
    fn component_positions_tighten_the_size() {
        let (depths, mids) = scene(30.0);
        let mut positions = HashMap::new();
        // Already long croissants: buy capacity 250-130=120, 120/6 = 20.
        positions.insert("CROISSANTS".to_string(), 130);
        let orders = evaluate(&basket(), &depths, &mids, &positions, &limits());
        assert_eq!(orders[0].quantity, -20);
    }

    #[test]
    fn missing_component_book_is_quiet() {
        let (mut depths, mids) = scene(30.0);
        depths.remove("JAMS");
        let orders = evaluate(&basket(), &depths, &mids, &HashMap::new(), &limits());
        assert!(orders.is_empty());
    }
}
