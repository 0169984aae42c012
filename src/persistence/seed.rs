//! Startup data: the reference tables every deployment needs, and an
//! optional set of demo accounts and listings.
//!
//! Both loaders are idempotent. Rows whose natural key (material, tip
//! title, email, product name) already exists are left untouched.

use tracing::info;

use super::MarketStore;
use crate::auth::PasswordHasher;
use crate::domain::product::MAX_PRODUCT_LIMIT;
use crate::domain::{
    NewProduct, NewRate, NewTip, NewUser, ProductQuery, ProductStatus, ProductVisibility,
    RateTrend, Role, UserStatus,
};
use crate::error::MarketError;

const RATES: &[(&str, f64, RateTrend, &str)] = &[
    ("Aluminum", 140.0, RateTrend::Up, "🥤"),
    ("Copper", 650.0, RateTrend::Up, "🔌"),
    ("Steel", 45.0, RateTrend::Stable, "🔩"),
    ("Brass", 420.0, RateTrend::Up, "🔧"),
    ("Iron", 35.0, RateTrend::Stable, "⚙️"),
    ("Plastic", 25.0, RateTrend::Down, "♻️"),
    ("Cardboard", 8.0, RateTrend::Up, "📦"),
    ("Newspaper", 12.0, RateTrend::Stable, "📰"),
    ("Electronics", 250.0, RateTrend::Up, "💾"),
];

struct TipSeed {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    icon: &'static str,
    impact: &'static str,
}

const TIPS: &[TipSeed] = &[
    TipSeed {
        title: "Clean Your Metals Before Pickup",
        description: "Remove dirt, paint, and non-metal attachments from steel, aluminum, and copper to get better rates. Clean metals fetch 15-20% higher prices.",
        category: "Preparation",
        icon: "🧽",
        impact: "Higher Rates",
    },
    TipSeed {
        title: "Separate Different Metal Types",
        description: "Don't mix aluminum with steel or copper. Different metals have different values. Copper is most valuable, then aluminum, then steel.",
        category: "Rates",
        icon: "🔧",
        impact: "Better Pricing",
    },
    TipSeed {
        title: "Remove Insulation from Copper Wires",
        description: "Stripped copper wire gets ₹650/kg while insulated wire gets only ₹250/kg. Spend time stripping for much better returns.",
        category: "Preparation",
        icon: "⚡",
        impact: "160% More Value",
    },
    TipSeed {
        title: "Wear Safety Gloves and Shoes",
        description: "Always wear protective gear when handling scrap materials. Sharp edges, rust, and chemicals can cause injuries.",
        category: "Safety",
        icon: "🧤",
        impact: "Stay Safe",
    },
    TipSeed {
        title: "Best Time to Sell Metals",
        description: "Metal prices are typically higher during construction season (March-September). Monitor trends and sell when rates are up.",
        category: "Rates",
        icon: "📈",
        impact: "Timing Matters",
    },
];

struct UserSeed {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    phone: &'static str,
    address: &'static str,
    role: Role,
    business_name: Option<&'static str>,
}

const DEMO_USERS: &[UserSeed] = &[
    UserSeed {
        email: "admin@ecoscrap.com",
        password: "admin123",
        name: "Admin User",
        phone: "+91 9999999999",
        address: "EcoScrap HQ, Bandra Kurla Complex, Mumbai, Maharashtra 400051",
        role: Role::Admin,
        business_name: None,
    },
    UserSeed {
        email: "dealer1@ecoscrap.com",
        password: "dealer123",
        name: "Rajesh Kumar",
        phone: "+91 9876543210",
        address: "123 Industrial Area, Okhla Phase II, New Delhi 110020",
        role: Role::Dealer,
        business_name: Some("Kumar Metals & Recyclers"),
    },
    UserSeed {
        email: "dealer2@ecoscrap.com",
        password: "dealer123",
        name: "Sunita Singh",
        phone: "+91 9123456789",
        address: "456 Market Road, Hadapsar, Pune, Maharashtra 411028",
        role: Role::Dealer,
        business_name: Some("Singh Eco Solutions"),
    },
    UserSeed {
        email: "customer1@ecoscrap.com",
        password: "customer123",
        name: "Priya Sharma",
        phone: "+91 8765432109",
        address: "789 Residential Colony, Koramangala, Bangalore, Karnataka 560095",
        role: Role::Customer,
        business_name: None,
    },
    UserSeed {
        email: "customer2@ecoscrap.com",
        password: "customer123",
        name: "Amit Patel",
        phone: "+91 7654321098",
        address: "321 Sector 15, Gurugram, Haryana 122001",
        role: Role::Customer,
        business_name: None,
    },
];

struct ProductSeed {
    dealer_email: &'static str,
    name: &'static str,
    price: f64,
    category: &'static str,
    description: &'static str,
    stock: i64,
    image: &'static str,
}

const DEMO_PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        dealer_email: "dealer1@ecoscrap.com",
        name: "Recycled Steel Sheets",
        price: 3800.0,
        category: "metals",
        description: "High-quality recycled steel sheets perfect for construction. Tested for durability and strength.",
        stock: 50,
        image: "🔩",
    },
    ProductSeed {
        dealer_email: "dealer1@ecoscrap.com",
        name: "Copper Wire Scraps",
        price: 10_400.0,
        category: "metals",
        description: "Pure copper wire scraps with excellent conductivity. Ideal for electrical applications.",
        stock: 25,
        image: "🔌",
    },
    ProductSeed {
        dealer_email: "dealer2@ecoscrap.com",
        name: "Plastic Bottle Pellets",
        price: 1050.0,
        category: "plastics",
        description: "Clean PET plastic pellets ready for manufacturing. Food-grade quality available.",
        stock: 100,
        image: "♻️",
    },
];

/// Inserts the default material rates and tips that are not yet present.
///
/// # Errors
///
/// Returns a [`MarketError`] on storage failure.
pub async fn seed_reference_data(store: &dyn MarketStore) -> Result<(), MarketError> {
    let mut rates = 0;
    for &(material, rate_per_kg, trend, icon) in RATES {
        let rate = NewRate {
            material: material.to_string(),
            rate_per_kg,
            trend,
            icon: icon.to_string(),
        };
        if store.insert_rate_if_absent(rate).await? {
            rates += 1;
        }
    }

    let mut tips = 0;
    for seed in TIPS {
        let tip = NewTip {
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            category: seed.category.to_string(),
            icon: seed.icon.to_string(),
            impact: seed.impact.to_string(),
        };
        if store.insert_tip_if_absent(tip).await? {
            tips += 1;
        }
    }

    info!(rates, tips, "reference data seeded");
    Ok(())
}

/// Inserts the demo accounts and approved sample listings that are not
/// yet present.
///
/// # Errors
///
/// Returns a [`MarketError`] on storage or hashing failure.
pub async fn seed_demo_data(
    store: &dyn MarketStore,
    hasher: &PasswordHasher,
) -> Result<(), MarketError> {
    let mut users = 0;
    for seed in DEMO_USERS {
        if store.find_user_by_email(seed.email).await?.is_some() {
            continue;
        }
        store
            .insert_user(NewUser {
                email: seed.email.to_string(),
                password_hash: hasher.hash(seed.password).await?,
                name: seed.name.to_string(),
                phone: seed.phone.to_string(),
                address: seed.address.to_string(),
                role: seed.role,
                status: UserStatus::Active,
                business_name: seed.business_name.map(str::to_string),
            })
            .await?;
        users += 1;
    }

    let existing = store
        .list_products(&ProductQuery {
            visibility: ProductVisibility::AdminView { status: None },
            category: None,
            search: None,
            limit: MAX_PRODUCT_LIMIT,
            offset: 0,
        })
        .await?;

    let mut products = 0;
    for seed in DEMO_PRODUCTS {
        if existing.iter().any(|p| p.name == seed.name) {
            continue;
        }
        let Some(dealer) = store.find_user_by_email(seed.dealer_email).await? else {
            continue;
        };
        let product = store
            .insert_product(NewProduct {
                dealer_email: dealer.email,
                dealer_name: dealer.name,
                name: seed.name.to_string(),
                price: seed.price,
                category: seed.category.to_string(),
                description: seed.description.to_string(),
                stock: seed.stock,
                image: seed.image.to_string(),
            })
            .await?;
        store
            .set_product_status(product.id, ProductStatus::Approved)
            .await?;
        products += 1;
    }

    info!(users, products, "demo data seeded");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::memory::MemoryStore;

    #[tokio::test]
    async fn reference_seed_is_idempotent() {
        let store = MemoryStore::new();
        assert!(seed_reference_data(&store).await.is_ok());
        assert!(seed_reference_data(&store).await.is_ok());

        let Ok(rates) = store.list_rates().await else {
            panic!("rates");
        };
        assert_eq!(rates.len(), RATES.len());
        let Ok(Some(copper)) = store.find_rate("Copper").await else {
            panic!("copper");
        };
        assert!((copper.rate_per_kg - 650.0).abs() < f64::EPSILON);

        let Ok(tips) = store.list_tips(None).await else {
            panic!("tips");
        };
        assert_eq!(tips.len(), TIPS.len());
    }

    #[tokio::test]
    async fn demo_seed_creates_approved_listings_once() {
        let store = MemoryStore::new();
        let Ok(hasher) = PasswordHasher::new(64) else {
            panic!("hasher");
        };
        assert!(seed_demo_data(&store, &hasher).await.is_ok());
        assert!(seed_demo_data(&store, &hasher).await.is_ok());

        let Ok(users) = store.list_users().await else {
            panic!("users");
        };
        assert_eq!(users.len(), DEMO_USERS.len());

        let Ok(products) = store
            .list_products(&ProductQuery {
                visibility: ProductVisibility::AdminView { status: None },
                category: None,
                search: None,
                limit: MAX_PRODUCT_LIMIT,
                offset: 0,
            })
            .await
        else {
            panic!("products");
        };
        assert_eq!(products.len(), DEMO_PRODUCTS.len());
        assert!(products.iter().all(|p| p.status == ProductStatus::Approved));

        let Ok(Some(admin)) = store.find_user_by_email("admin@ecoscrap.com").await else {
            panic!("admin");
        };
        assert_eq!(admin.role, Role::Admin);
        assert!(matches!(hasher.verify("admin123", &admin.password_hash).await, Ok(true)));
    }
}
