//! # Seed Fixtures
//!
//! A realistic development dataset: one central kitchen, three branches,
//! a catalog of staple products, batched inventory in several states,
//! recipes, production plans, transfers, and orders of every kind.
//!
//! Ids are fixed strings (not random UUIDs) so tests and demos can refer
//! to entities directly. Timestamps are relative to the current clock so
//! derived statuses (expired, low stock) come out the same whenever the
//! fixture is built.

use chrono::{DateTime, Duration, Utc};

use kitchen_core::{
    derive_status, ActiveStatus, Branch, Distribution, DistributionStatus, InventoryItem,
    InventoryStatus, Location, Money, OpeningHours, OrderKind, OrderLine, OrderStatus, PlanStatus,
    Product, ProductionPlan, PurchaseOrder, Recipe, RecipeIngredient, Supplier,
};

use crate::store::EntityStore;

// Branch ids, also referenced by the auth directory.
pub const BRANCH_OLAYA: &str = "b-olaya";
pub const BRANCH_HAMRA: &str = "b-hamra";
pub const BRANCH_LABAN: &str = "b-laban";

// Product ids tests lean on.
pub const PRODUCT_CHICKEN: &str = "p-chicken";
pub const PRODUCT_RICE: &str = "p-rice";
pub const PRODUCT_YOGURT: &str = "p-yogurt";
pub const PRODUCT_TOMATO: &str = "p-tomato";

pub const SUPPLIER_FRESH_FARMS: &str = "s-fresh-farms";
pub const SUPPLIER_GOLDEN_GRAIN: &str = "s-golden-grain";

/// Builds the full seed store against the current clock.
pub fn seed_store() -> EntityStore {
    seed_store_at(Utc::now())
}

/// Builds the full seed store against an explicit "now".
pub fn seed_store_at(now: DateTime<Utc>) -> EntityStore {
    let mut store = EntityStore::new();
    store.branches = branches(now);
    store.products = products(now);
    store.suppliers = suppliers(now);
    store.inventory = inventory(&store.products, now);
    store.recipes = recipes(now);
    store.production_plans = production_plans(now);
    store.distributions = distributions(now);
    store.purchase_orders = purchase_orders(now);
    store
}

fn branches(now: DateTime<Utc>) -> Vec<Branch> {
    let branch = |id: &str, name: &str, address: &str, phone: &str, manager: &str| Branch {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        manager: manager.to_string(),
        status: ActiveStatus::Active,
        opening_hours: OpeningHours {
            open: "08:00".to_string(),
            close: "23:00".to_string(),
        },
        created_at: now - Duration::days(400),
    };
    vec![
        branch(
            BRANCH_OLAYA,
            "Olaya",
            "Olaya Street 12",
            "+966-11-555-0101",
            "Omar Haddad",
        ),
        branch(
            BRANCH_HAMRA,
            "Hamra",
            "Al Hamra District 4",
            "+966-11-555-0102",
            "Lina Khoury",
        ),
        branch(
            BRANCH_LABAN,
            "Laban",
            "Laban Road 88",
            "+966-11-555-0103",
            "Yousef Nasser",
        ),
    ]
}

fn products(now: DateTime<Utc>) -> Vec<Product> {
    let product = |id: &str,
                   name: &str,
                   category: &str,
                   unit: &str,
                   cost_cents: i64,
                   min_stock: i64,
                   max_stock: i64,
                   expiration_days: i64| Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        unit: unit.to_string(),
        cost: Money::from_cents(cost_cents),
        min_stock,
        max_stock,
        expiration_days,
        description: None,
        created_at: now - Duration::days(300),
    };
    vec![
        product(PRODUCT_CHICKEN, "Chicken Breast", "Meat", "kg", 2550, 20, 200, 5),
        product("p-lamb", "Lamb Shoulder", "Meat", "kg", 4800, 10, 100, 4),
        product(PRODUCT_RICE, "Basmati Rice", "Grains", "kg", 1200, 50, 500, 365),
        product("p-flour", "All-Purpose Flour", "Grains", "kg", 450, 40, 400, 180),
        product("p-chickpeas", "Dried Chickpeas", "Grains", "kg", 700, 30, 300, 365),
        product(PRODUCT_TOMATO, "Tomatoes", "Vegetables", "kg", 600, 30, 150, 7),
        product("p-onion", "Onions", "Vegetables", "kg", 350, 40, 200, 21),
        product("p-garlic", "Garlic", "Vegetables", "kg", 900, 10, 50, 30),
        product("p-parsley", "Parsley", "Vegetables", "kg", 800, 5, 30, 4),
        product("p-lemon", "Lemons", "Fruit", "kg", 550, 15, 80, 14),
        product(PRODUCT_YOGURT, "Plain Yogurt", "Dairy", "L", 750, 10, 60, 10),
        product("p-milk", "Fresh Milk", "Dairy", "L", 500, 20, 120, 7),
        product("p-olive-oil", "Olive Oil", "Pantry", "L", 3200, 10, 80, 540),
        product("p-tahini", "Tahini", "Pantry", "kg", 2100, 8, 40, 270),
        product("p-cardamom", "Cardamom", "Spices", "kg", 12_000, 2, 10, 365),
    ]
}

fn suppliers(now: DateTime<Utc>) -> Vec<Supplier> {
    let supplier = |id: &str,
                    name: &str,
                    contact: &str,
                    email: &str,
                    products: &[&str],
                    rating: f64| Supplier {
        id: id.to_string(),
        name: name.to_string(),
        contact_person: contact.to_string(),
        email: email.to_string(),
        phone: "+966-11-555-0200".to_string(),
        address: "Industrial District".to_string(),
        products: products.iter().map(|p| p.to_string()).collect(),
        rating,
        status: ActiveStatus::Active,
        created_at: now - Duration::days(350),
    };
    vec![
        supplier(
            SUPPLIER_FRESH_FARMS,
            "Fresh Farms Co",
            "Ahmed Al-Rashid",
            "orders@freshfarms.example",
            &[PRODUCT_CHICKEN, "p-lamb", PRODUCT_TOMATO, "p-onion"],
            4.6,
        ),
        supplier(
            SUPPLIER_GOLDEN_GRAIN,
            "Golden Grain Trading",
            "Fatima Zahrani",
            "sales@goldengrain.example",
            &[PRODUCT_RICE, "p-flour", "p-chickpeas"],
            4.2,
        ),
        supplier(
            "s-green-valley",
            "Green Valley Produce",
            "Khalid Omar",
            "supply@greenvalley.example",
            &["p-garlic", "p-parsley", "p-lemon"],
            3.9,
        ),
        supplier(
            "s-dairy-direct",
            "Dairy Direct",
            "Maha Suleiman",
            "accounts@dairydirect.example",
            &[PRODUCT_YOGURT, "p-milk"],
            4.8,
        ),
        supplier(
            "s-pantry-plus",
            "Pantry Plus",
            "Samir Haddad",
            "info@pantryplus.example",
            &["p-olive-oil", "p-tahini"],
            4.0,
        ),
        supplier(
            "s-spice-route",
            "Spice Route Imports",
            "Nadia Qasim",
            "import@spiceroute.example",
            &["p-cardamom"],
            4.4,
        ),
    ]
}

fn inventory(products: &[Product], now: DateTime<Utc>) -> Vec<InventoryItem> {
    struct Batch {
        id: &'static str,
        product_id: &'static str,
        quantity: i64,
        location: Location,
        batch_number: &'static str,
        expires_in_days: i64,
        received_days_ago: i64,
        supplier_id: &'static str,
        cost_cents: i64,
    }
    let batches = [
        // Central kitchen working stock.
        Batch {
            id: "i-ck-chicken",
            product_id: PRODUCT_CHICKEN,
            quantity: 80,
            location: Location::CentralKitchen,
            batch_number: "CK-CHK-001",
            expires_in_days: 4,
            received_days_ago: 1,
            supplier_id: SUPPLIER_FRESH_FARMS,
            cost_cents: 2550,
        },
        Batch {
            id: "i-ck-rice",
            product_id: PRODUCT_RICE,
            quantity: 320,
            location: Location::CentralKitchen,
            batch_number: "CK-RCE-014",
            expires_in_days: 250,
            received_days_ago: 20,
            supplier_id: SUPPLIER_GOLDEN_GRAIN,
            cost_cents: 1200,
        },
        Batch {
            id: "i-ck-onion",
            product_id: "p-onion",
            quantity: 110,
            location: Location::CentralKitchen,
            batch_number: "CK-ONI-007",
            expires_in_days: 12,
            received_days_ago: 6,
            supplier_id: SUPPLIER_FRESH_FARMS,
            cost_cents: 350,
        },
        Batch {
            id: "i-ck-oil",
            product_id: "p-olive-oil",
            quantity: 40,
            location: Location::CentralKitchen,
            batch_number: "CK-OIL-003",
            expires_in_days: 400,
            received_days_ago: 60,
            supplier_id: "s-pantry-plus",
            cost_cents: 3200,
        },
        // Expiring soon at the central kitchen: healthy quantity, two
        // days of shelf life left.
        Batch {
            id: "i-ck-tomato",
            product_id: PRODUCT_TOMATO,
            quantity: 60,
            location: Location::CentralKitchen,
            batch_number: "CK-TOM-019",
            expires_in_days: 2,
            received_days_ago: 5,
            supplier_id: SUPPLIER_FRESH_FARMS,
            cost_cents: 600,
        },
        // Low stock at Olaya: 8 on hand against a minimum of 10.
        Batch {
            id: "i-olaya-yogurt",
            product_id: PRODUCT_YOGURT,
            quantity: 8,
            location: Location::Branch(BRANCH_OLAYA.to_string()),
            batch_number: "OLA-YOG-002",
            expires_in_days: 6,
            received_days_ago: 3,
            supplier_id: "s-dairy-direct",
            cost_cents: 750,
        },
        Batch {
            id: "i-olaya-rice",
            product_id: PRODUCT_RICE,
            quantity: 90,
            location: Location::Branch(BRANCH_OLAYA.to_string()),
            batch_number: "OLA-RCE-005",
            expires_in_days: 200,
            received_days_ago: 15,
            supplier_id: SUPPLIER_GOLDEN_GRAIN,
            cost_cents: 1200,
        },
        // Expired at Hamra: three days past its date.
        Batch {
            id: "i-hamra-parsley",
            product_id: "p-parsley",
            quantity: 6,
            location: Location::Branch(BRANCH_HAMRA.to_string()),
            batch_number: "HAM-PAR-011",
            expires_in_days: -3,
            received_days_ago: 7,
            supplier_id: "s-green-valley",
            cost_cents: 800,
        },
        Batch {
            id: "i-hamra-chicken",
            product_id: PRODUCT_CHICKEN,
            quantity: 35,
            location: Location::Branch(BRANCH_HAMRA.to_string()),
            batch_number: "HAM-CHK-004",
            expires_in_days: 3,
            received_days_ago: 2,
            supplier_id: SUPPLIER_FRESH_FARMS,
            cost_cents: 2550,
        },
        // Run dry at Laban.
        Batch {
            id: "i-laban-milk",
            product_id: "p-milk",
            quantity: 0,
            location: Location::Branch(BRANCH_LABAN.to_string()),
            batch_number: "LAB-MLK-009",
            expires_in_days: 4,
            received_days_ago: 3,
            supplier_id: "s-dairy-direct",
            cost_cents: 500,
        },
    ];

    batches
        .into_iter()
        .map(|b| {
            let mut item = InventoryItem {
                id: b.id.to_string(),
                product_id: b.product_id.to_string(),
                quantity: b.quantity,
                location: b.location,
                batch_number: b.batch_number.to_string(),
                expiration_date: now + Duration::days(b.expires_in_days),
                received_date: now - Duration::days(b.received_days_ago),
                supplier_id: b.supplier_id.to_string(),
                cost: Money::from_cents(b.cost_cents),
                status: InventoryStatus::Available,
                version: 0,
            };
            if let Some(product) = products.iter().find(|p| p.id == item.product_id) {
                item.status = derive_status(&item, product, now);
            }
            item
        })
        .collect()
}

fn recipes(now: DateTime<Utc>) -> Vec<Recipe> {
    let ingredient = |product_id: &str, quantity: f64, unit: &str| RecipeIngredient {
        product_id: product_id.to_string(),
        quantity,
        unit: unit.to_string(),
    };
    vec![
        Recipe {
            id: "r-kabsa".to_string(),
            name: "Chicken Kabsa".to_string(),
            description: "Spiced rice with roast chicken.".to_string(),
            ingredients: vec![
                ingredient(PRODUCT_CHICKEN, 1.5, "kg"),
                ingredient(PRODUCT_RICE, 1.0, "kg"),
                ingredient("p-onion", 0.3, "kg"),
                ingredient(PRODUCT_TOMATO, 0.4, "kg"),
                ingredient("p-cardamom", 0.01, "kg"),
            ],
            preparation_minutes: 30,
            cooking_minutes: 60,
            servings: 6,
            instructions: vec![
                "Sear the chicken in batches.".to_string(),
                "Soften onions and tomatoes with the spices.".to_string(),
                "Add rice and stock, simmer covered until tender.".to_string(),
                "Rest ten minutes before plating.".to_string(),
            ],
            created_at: now - Duration::days(200),
        },
        Recipe {
            id: "r-hummus".to_string(),
            name: "Hummus".to_string(),
            description: "Chickpea and tahini dip.".to_string(),
            ingredients: vec![
                ingredient("p-chickpeas", 0.5, "kg"),
                ingredient("p-tahini", 0.2, "kg"),
                ingredient("p-lemon", 0.1, "kg"),
                ingredient("p-garlic", 0.02, "kg"),
                ingredient("p-olive-oil", 0.1, "L"),
            ],
            preparation_minutes: 20,
            cooking_minutes: 90,
            servings: 10,
            instructions: vec![
                "Simmer soaked chickpeas until soft.".to_string(),
                "Blend with tahini, lemon, and garlic.".to_string(),
                "Finish with olive oil.".to_string(),
            ],
            created_at: now - Duration::days(180),
        },
        Recipe {
            id: "r-laban-drink".to_string(),
            name: "Laban Drink".to_string(),
            description: "Chilled salted yogurt drink.".to_string(),
            ingredients: vec![
                ingredient(PRODUCT_YOGURT, 1.0, "L"),
                ingredient("p-milk", 0.5, "L"),
            ],
            preparation_minutes: 10,
            cooking_minutes: 0,
            servings: 8,
            instructions: vec![
                "Whisk yogurt and milk with salt.".to_string(),
                "Chill before serving.".to_string(),
            ],
            created_at: now - Duration::days(150),
        },
    ]
}

fn production_plans(now: DateTime<Utc>) -> Vec<ProductionPlan> {
    vec![
        ProductionPlan {
            id: "pp-kabsa-today".to_string(),
            recipe_id: "r-kabsa".to_string(),
            quantity: 12,
            scheduled_date: now,
            status: PlanStatus::InProgress,
            assigned_by: "Sarah Mitchell".to_string(),
            notes: Some("Lunch service".to_string()),
            created_at: now - Duration::days(1),
        },
        ProductionPlan {
            id: "pp-hummus-tomorrow".to_string(),
            recipe_id: "r-hummus".to_string(),
            quantity: 20,
            scheduled_date: now + Duration::days(1),
            status: PlanStatus::Planned,
            assigned_by: "Sarah Mitchell".to_string(),
            notes: None,
            created_at: now - Duration::days(1),
        },
        ProductionPlan {
            id: "pp-laban-done".to_string(),
            recipe_id: "r-laban-drink".to_string(),
            quantity: 15,
            scheduled_date: now - Duration::days(2),
            status: PlanStatus::Completed,
            assigned_by: "Sarah Mitchell".to_string(),
            notes: None,
            created_at: now - Duration::days(3),
        },
    ]
}

fn distributions(now: DateTime<Utc>) -> Vec<Distribution> {
    vec![
        Distribution {
            id: "d-rice-olaya".to_string(),
            product_id: PRODUCT_RICE.to_string(),
            from_location: Location::CentralKitchen,
            to_location: Location::Branch(BRANCH_OLAYA.to_string()),
            quantity: 50,
            scheduled_date: now + Duration::days(1),
            delivery_date: None,
            status: DistributionStatus::Pending,
            driver_name: Some("Hassan".to_string()),
            notes: None,
            created_at: now - Duration::hours(6),
        },
        Distribution {
            id: "d-chicken-hamra".to_string(),
            product_id: PRODUCT_CHICKEN.to_string(),
            from_location: Location::CentralKitchen,
            to_location: Location::Branch(BRANCH_HAMRA.to_string()),
            quantity: 25,
            scheduled_date: now - Duration::days(2),
            delivery_date: Some(now - Duration::days(2)),
            status: DistributionStatus::Delivered,
            driver_name: Some("Hassan".to_string()),
            notes: None,
            created_at: now - Duration::days(3),
        },
    ]
}

fn purchase_orders(now: DateTime<Utc>) -> Vec<PurchaseOrder> {
    let order = |id: &str,
                 kind: OrderKind,
                 items: Vec<OrderLine>,
                 status: OrderStatus,
                 days_ago: i64| {
        let total = items.iter().map(|line| line.total).sum();
        PurchaseOrder {
            id: id.to_string(),
            kind,
            items,
            total,
            status,
            order_date: now - Duration::days(days_ago),
            expected_delivery_date: now + Duration::days(3 - days_ago),
            actual_delivery_date: None,
            requested_by: None,
            approved_by: None,
            notes: None,
            created_at: now - Duration::days(days_ago),
            version: 0,
        }
    };
    let mut received = order(
        "po-supplier-rice",
        OrderKind::Supplier {
            supplier_id: SUPPLIER_GOLDEN_GRAIN.to_string(),
        },
        vec![OrderLine::new(PRODUCT_RICE, 200, Money::from_cents(1200))],
        OrderStatus::Received,
        6,
    );
    received.approved_by = Some("Sarah Mitchell".to_string());
    received.actual_delivery_date = Some(now - Duration::days(4));

    vec![
        order(
            "po-restock-hamra",
            OrderKind::BranchRestock {
                from_branch: BRANCH_HAMRA.to_string(),
            },
            vec![
                OrderLine::new(PRODUCT_CHICKEN, 15, Money::from_cents(2550)),
                OrderLine::new("p-onion", 20, Money::from_cents(350)),
            ],
            OrderStatus::Pending,
            0,
        ),
        order(
            "po-dist-olaya",
            OrderKind::Distribution {
                to_branch: BRANCH_OLAYA.to_string(),
            },
            vec![OrderLine::new(PRODUCT_RICE, 40, Money::from_cents(1200))],
            OrderStatus::Approved,
            1,
        ),
        received,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_references_resolve() {
        let store = seed_store();
        for item in &store.inventory {
            assert!(store.product(&item.product_id).is_some(), "{}", item.id);
            assert!(store.supplier(&item.supplier_id).is_some(), "{}", item.id);
            if let Location::Branch(id) = &item.location {
                assert!(store.branch(id).is_some(), "{}", item.id);
            }
        }
        for recipe in &store.recipes {
            for ingredient in &recipe.ingredients {
                assert!(store.product(&ingredient.product_id).is_some());
            }
        }
        for supplier in &store.suppliers {
            for product_id in &supplier.products {
                assert!(store.product(product_id).is_some());
            }
        }
    }

    #[test]
    fn test_seed_statuses_are_derived() {
        let store = seed_store();
        let by_id = |id: &str| store.inventory_item(id).unwrap().status;
        assert_eq!(by_id("i-olaya-yogurt"), InventoryStatus::LowStock);
        assert_eq!(by_id("i-hamra-parsley"), InventoryStatus::Expired);
        assert_eq!(by_id("i-laban-milk"), InventoryStatus::OutOfStock);
        assert_eq!(by_id("i-ck-tomato"), InventoryStatus::Available);
    }

    #[test]
    fn test_seed_order_totals_match_lines() {
        let store = seed_store();
        for order in &store.purchase_orders {
            assert_eq!(order.total, order.line_total(), "{}", order.id);
        }
    }
}
