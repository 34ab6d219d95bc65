//! Domain payloads produced by the backend handlers.
//!
//! These are the expensive-to-recompute results the cache exists to
//! shield. The `compute_*` constructors stand in for the upstream feeds
//! and database reads of the real backend; handlers and the cache warmer
//! both go through them, so warmed entries are indistinguishable from
//! miss-populated ones.

use serde::{Deserialize, Serialize};

// == Market Data ==
/// Aggregated market snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub prices: Vec<AssetPrice>,
    /// Snapshot time, ISO 8601
    pub as_of: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPrice {
    pub symbol: String,
    pub price_usd: f64,
    pub change_24h_pct: f64,
}

impl MarketData {
    /// Recomputes the market snapshot.
    pub fn compute() -> Self {
        Self {
            prices: vec![
                AssetPrice {
                    symbol: "BTC".to_string(),
                    price_usd: 64_250.0,
                    change_24h_pct: 1.8,
                },
                AssetPrice {
                    symbol: "ETH".to_string(),
                    price_usd: 3_120.0,
                    change_24h_pct: -0.6,
                },
                AssetPrice {
                    symbol: "SOL".to_string(),
                    price_usd: 148.5,
                    change_24h_pct: 4.2,
                },
            ],
            as_of: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == Whale Activity ==
/// Recent large on-chain transfers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhaleActivity {
    pub transfers: Vec<WhaleTransfer>,
    pub as_of: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhaleTransfer {
    pub symbol: String,
    pub amount: f64,
    pub direction: String,
}

impl WhaleActivity {
    /// Recomputes the whale activity feed.
    pub fn compute() -> Self {
        Self {
            transfers: vec![
                WhaleTransfer {
                    symbol: "BTC".to_string(),
                    amount: 1_200.0,
                    direction: "exchange_inflow".to_string(),
                },
                WhaleTransfer {
                    symbol: "ETH".to_string(),
                    amount: 18_000.0,
                    direction: "exchange_outflow".to_string(),
                },
            ],
            as_of: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == NFT Collections ==
/// Trending NFT collection listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftCollections {
    pub collections: Vec<NftCollection>,
    pub as_of: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftCollection {
    pub name: String,
    pub floor_price_eth: f64,
    pub volume_24h_eth: f64,
}

impl NftCollections {
    /// Recomputes the trending collection listing.
    pub fn compute() -> Self {
        Self {
            collections: vec![
                NftCollection {
                    name: "CryptoPunks".to_string(),
                    floor_price_eth: 42.5,
                    volume_24h_eth: 310.0,
                },
                NftCollection {
                    name: "Bored Ape Yacht Club".to_string(),
                    floor_price_eth: 28.1,
                    volume_24h_eth: 190.0,
                },
            ],
            as_of: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == User Progress ==
/// One user's course progress record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: String,
    pub completed_lessons: u32,
    pub current_level: String,
    pub xp: u64,
}

impl UserProgress {
    /// Recomputes the progress record for `user_id`.
    pub fn compute(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            completed_lessons: 12,
            current_level: "intermediate".to_string(),
            xp: 3_450,
        }
    }
}

// == Lessons ==
/// Static lesson content for one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub level: String,
    pub title: String,
    pub chapters: Vec<String>,
}

impl Lesson {
    /// The lesson levels that exist.
    pub const LEVELS: [&'static str; 3] = ["beginner", "intermediate", "advanced"];

    /// Looks up lesson content for `level`, if it exists.
    pub fn compute(level: &str) -> Option<Self> {
        if !Self::LEVELS.contains(&level) {
            return None;
        }
        Some(Self {
            level: level.to_string(),
            title: format!("Crypto fundamentals: {level}"),
            chapters: vec![
                "What is a blockchain".to_string(),
                "Wallets and keys".to_string(),
                "Reading market data".to_string(),
            ],
        })
    }
}

// == Forum ==
/// One page of the forum listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPage {
    pub page: u32,
    pub posts: Vec<ForumPost>,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub replies: u32,
}

impl ForumPage {
    const POSTS_PER_PAGE: u32 = 2;

    /// Recomputes one page of the listing.
    pub fn compute(page: u32) -> Self {
        let base = u64::from(page.saturating_sub(1)) * u64::from(Self::POSTS_PER_PAGE);
        Self {
            page,
            posts: (0..Self::POSTS_PER_PAGE)
                .map(|i| ForumPost {
                    id: base + u64::from(i) + 1,
                    title: format!("Discussion thread #{}", base + u64::from(i) + 1),
                    author: "community".to_string(),
                    replies: 7,
                })
                .collect(),
            total_pages: 50,
        }
    }
}
