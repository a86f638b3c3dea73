//! Semicolon-delimited historical market-data feed.
//!
//! Rows carry up to three book levels per side. Numeric fields are read
//! leniently: an absent or malformed value drops that level rather than
//! failing the load, since exchange exports routinely leave deep levels
//! blank. Only I/O and reader-level failures surface as errors.

use crate::domain::{Depth, Level, Side};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to open market data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read market data: {0}")]
    Csv(#[from] csv::Error),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

/// One raw feed row: a single product's book snapshot at one timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRow {
    pub day: i64,
    pub timestamp: i64,
    pub product: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bid_price_1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub bid_volume_1: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bid_price_2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub bid_volume_2: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bid_price_3: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub bid_volume_3: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ask_price_1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ask_volume_1: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ask_price_2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ask_volume_2: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ask_price_3: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ask_volume_3: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mid_price: Option<f64>,
}

impl MarketRow {
    fn levels(&self, side: Side) -> [(Option<f64>, Option<i64>); 3] {
        match side {
            Side::Bid => [
                (self.bid_price_1, self.bid_volume_1),
                (self.bid_price_2, self.bid_volume_2),
                (self.bid_price_3, self.bid_volume_3),
            ],
            Side::Ask => [
                (self.ask_price_1, self.ask_volume_1),
                (self.ask_price_2, self.ask_volume_2),
                (self.ask_price_3, self.ask_volume_3),
            ],
        }
    }

    fn depth(&self) -> Depth {
        let mut depth = Depth::new();
        for side in [Side::Bid, Side::Ask] {
            for (price, volume) in self.levels(side) {
                if let (Some(price), Some(volume)) = (price, volume) {
                    depth.add_level(Level { price, size: volume.abs() }, side);
                }
            }
        }
        depth
    }
}

/// One replay tick: every product's book and mid at one `(day, timestamp)`.
#[derive(Debug, Clone, Default)]
pub struct MarketTick {
    pub day: i64,
    pub timestamp: i64,
    pub depths: HashMap<String, Depth>,
    /// Mid reference per product: the feed's own mid where present, the
    /// book-derived mid otherwise.
    pub mids: HashMap<String, f64>,
}

/// Parse a feed stream into chronologically ordered ticks. Rows that fail
/// to deserialize outright (bad key fields) are logged and dropped.
pub fn read_ticks<R: Read>(reader: R) -> Result<Vec<MarketTick>, FeedError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    let mut grouped: BTreeMap<(i64, i64), MarketTick> = BTreeMap::new();
    for record in csv_reader.deserialize::<MarketRow>() {
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                log::warn!("dropping unreadable feed row: {err}");
                continue;
            }
        };
        let tick = grouped.entry((row.day, row.timestamp)).or_insert_with(|| MarketTick {
            day: row.day,
            timestamp: row.timestamp,
            ..MarketTick::default()
        });
        let depth = row.depth();
        let mid = row.mid_price.or_else(|| depth.mid_price());
        if let Some(mid) = mid {
            tick.mids.insert(row.product.clone(), mid);
        }
        tick.depths.insert(row.product, depth);
    }

    Ok(grouped.into_values().collect())
}

/// Load ticks from a feed file on disk.
pub fn load_ticks(path: impl AsRef<Path>) -> Result<Vec<MarketTick>, FeedError> {
    let file = std::fs::File::open(path)?;
    read_ticks(file)
}
